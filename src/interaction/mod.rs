use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{GrammarError, GrammarResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Shown,
    #[default]
    Hidden,
}

impl Visibility {
    /// Single transition of the toggle state machine.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Shown => Self::Hidden,
            Self::Hidden => Self::Shown,
        }
    }

    #[must_use]
    pub fn is_shown(self) -> bool {
        matches!(self, Self::Shown)
    }

    /// CSS `display` value a document host applies for this state.
    #[must_use]
    pub fn css_display(self) -> &'static str {
        match self {
            Self::Shown => "block",
            Self::Hidden => "none",
        }
    }
}

/// Identifier of a toggleable display region, e.g. `solution1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ElementId(String);

impl ElementId {
    pub fn new(raw: impl Into<String>) -> GrammarResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(GrammarError::InvalidData(
                "toggle element id must not be empty".to_owned(),
            ));
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ElementId {
    type Error = GrammarError;

    fn try_from(raw: String) -> GrammarResult<Self> {
        Self::new(raw)
    }
}

impl TryFrom<&str> for ElementId {
    type Error = GrammarError;

    fn try_from(raw: &str) -> GrammarResult<Self> {
        Self::new(raw)
    }
}

impl From<ElementId> for String {
    fn from(id: ElementId) -> Self {
        id.0
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display host boundary: applies a region's visibility on screen.
pub trait Presenter {
    fn present(&mut self, id: &ElementId, visibility: Visibility);
}

/// Headless presenter that remembers what it was last asked to show.
#[derive(Debug, Default)]
pub struct NullPresenter {
    pub present_count: usize,
    pub last_presented: Option<(ElementId, Visibility)>,
}

impl Presenter for NullPresenter {
    fn present(&mut self, id: &ElementId, visibility: Visibility) {
        self.present_count += 1;
        self.last_presented = Some((id.clone(), visibility));
    }
}

/// Registry of toggle elements for one display session.
///
/// Element state changes only through `activate`; dropping the board ends the
/// session.
#[derive(Debug)]
pub struct ToggleBoard<P: Presenter> {
    presenter: P,
    elements: IndexMap<ElementId, Visibility>,
}

impl<P: Presenter> ToggleBoard<P> {
    #[must_use]
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            elements: IndexMap::new(),
        }
    }

    /// Registers `id` in the `Hidden` state.
    pub fn register(&mut self, id: &str) -> GrammarResult<ElementId> {
        self.register_with_state(id, Visibility::Hidden)
    }

    pub fn register_with_state(
        &mut self,
        id: &str,
        initial: Visibility,
    ) -> GrammarResult<ElementId> {
        let id = ElementId::new(id)?;
        if self.elements.contains_key(&id) {
            return Err(GrammarError::DuplicateElement(id.into()));
        }
        debug!(element = %id, state = ?initial, "register toggle element");
        self.presenter.present(&id, initial);
        self.elements.insert(id.clone(), initial);
        Ok(id)
    }

    /// Flips the element's visibility and returns the new state.
    pub fn activate(&mut self, id: &str) -> GrammarResult<Visibility> {
        let Some((_, key, state)) = self.elements.get_full_mut(id) else {
            return Err(GrammarError::UnknownElement(id.to_owned()));
        };
        let next = state.flipped();
        *state = next;
        trace!(element = %key, state = ?next, "activate toggle element");
        self.presenter.present(key, next);
        Ok(next)
    }

    #[must_use]
    pub fn visibility(&self, id: &str) -> Option<Visibility> {
        self.elements.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Registered elements in registration order.
    pub fn elements(&self) -> impl Iterator<Item = (&ElementId, Visibility)> {
        self.elements.iter().map(|(id, state)| (id, *state))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    #[must_use]
    pub fn into_presenter(self) -> P {
        self.presenter
    }
}
