use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Aesthetic, Value};
use crate::error::{GrammarError, GrammarResult};

/// Identifier of a layer's visual form (`point`, `line`, `ribbon`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Geometry(String);

impl Geometry {
    pub fn new(name: impl Into<String>) -> GrammarResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GrammarError::EmptyGeometry { layer: None });
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn point() -> Self {
        Self("point".to_owned())
    }

    #[must_use]
    pub fn line() -> Self {
        Self("line".to_owned())
    }

    #[must_use]
    pub fn ribbon() -> Self {
        Self("ribbon".to_owned())
    }

    #[must_use]
    pub fn smooth() -> Self {
        Self("smooth".to_owned())
    }

    #[must_use]
    pub fn bar() -> Self {
        Self("bar".to_owned())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Geometry {
    type Error = GrammarError;

    fn try_from(name: String) -> GrammarResult<Self> {
        Self::new(name)
    }
}

impl From<Geometry> for String {
    fn from(geometry: Geometry) -> Self {
        geometry.0
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type RequiredAesthetics = SmallVec<[Aesthetic; 4]>;

/// Geometry name -> aesthetics that must be bound after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeometryCatalog {
    requirements: IndexMap<String, RequiredAesthetics>,
}

impl GeometryCatalog {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            requirements: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_geometry<I>(mut self, geometry: impl Into<String>, required: I) -> Self
    where
        I: IntoIterator<Item = Aesthetic>,
    {
        self.requirements
            .insert(geometry.into(), required.into_iter().collect());
        self
    }

    #[must_use]
    pub fn contains(&self, geometry: &Geometry) -> bool {
        self.requirements.contains_key(geometry.name())
    }

    /// Required aesthetics for `geometry`; empty for unlisted geometries.
    #[must_use]
    pub fn required(&self, geometry: &Geometry) -> &[Aesthetic] {
        self.requirements
            .get(geometry.name())
            .map_or(&[][..], SmallVec::as_slice)
    }
}

impl Default for GeometryCatalog {
    fn default() -> Self {
        use Aesthetic::{Intercept, Label, Slope, X, Xintercept, Y, Yintercept, Ymax, Ymin};

        let mut catalog = Self::empty();
        for name in ["point", "line", "path", "step", "area", "smooth", "col", "tile"] {
            catalog = catalog.with_geometry(name, [X, Y]);
        }
        for name in ["bar", "histogram", "density"] {
            catalog = catalog.with_geometry(name, [X]);
        }
        for name in ["ribbon", "errorbar", "linerange"] {
            catalog = catalog.with_geometry(name, [X, Ymin, Ymax]);
        }
        catalog
            .with_geometry("text", [X, Y, Label])
            .with_geometry("pointrange", [X, Y, Ymin, Ymax])
            .with_geometry("hline", [Yintercept])
            .with_geometry("vline", [Xintercept])
            .with_geometry("abline", [Slope, Intercept])
    }
}

/// Style and behavior options not tied to data fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters {
    values: IndexMap<String, Value>,
}

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}
