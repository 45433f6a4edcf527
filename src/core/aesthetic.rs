use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Value;
use crate::error::{GrammarError, GrammarResult};

/// Visual property a layer can map data onto.
///
/// The set is open: names outside the built-in list parse to `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Aesthetic {
    X,
    Y,
    Color,
    Fill,
    Size,
    Alpha,
    Shape,
    Linetype,
    Group,
    Label,
    Ymin,
    Ymax,
    Xmin,
    Xmax,
    Xintercept,
    Yintercept,
    Slope,
    Intercept,
    Weight,
    Custom(CustomAesthetic),
}

/// Name of an aesthetic outside the built-in list.
///
/// Only obtainable through parsing, so it never collides with a built-in name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomAesthetic(String);

impl CustomAesthetic {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Aesthetic {
    /// Parses `name`; built-in names and aliases collapse to their variant.
    pub fn custom(name: impl AsRef<str>) -> GrammarResult<Self> {
        name.as_ref().parse()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Color => "color",
            Self::Fill => "fill",
            Self::Size => "size",
            Self::Alpha => "alpha",
            Self::Shape => "shape",
            Self::Linetype => "linetype",
            Self::Group => "group",
            Self::Label => "label",
            Self::Ymin => "ymin",
            Self::Ymax => "ymax",
            Self::Xmin => "xmin",
            Self::Xmax => "xmax",
            Self::Xintercept => "xintercept",
            Self::Yintercept => "yintercept",
            Self::Slope => "slope",
            Self::Intercept => "intercept",
            Self::Weight => "weight",
            Self::Custom(name) => name.as_str(),
        }
    }
}

impl FromStr for Aesthetic {
    type Err = GrammarError;

    fn from_str(raw: &str) -> GrammarResult<Self> {
        let aesthetic = match raw {
            _ if raw.trim().is_empty() => {
                return Err(GrammarError::InvalidData(
                    "aesthetic name must not be empty".to_owned(),
                ));
            }
            "x" => Self::X,
            "y" => Self::Y,
            "color" | "colour" => Self::Color,
            "fill" => Self::Fill,
            "size" => Self::Size,
            "alpha" => Self::Alpha,
            "shape" => Self::Shape,
            "linetype" => Self::Linetype,
            "group" => Self::Group,
            "label" => Self::Label,
            "ymin" => Self::Ymin,
            "ymax" => Self::Ymax,
            "xmin" => Self::Xmin,
            "xmax" => Self::Xmax,
            "xintercept" => Self::Xintercept,
            "yintercept" => Self::Yintercept,
            "slope" => Self::Slope,
            "intercept" => Self::Intercept,
            "weight" => Self::Weight,
            other => Self::Custom(CustomAesthetic(other.to_owned())),
        };
        Ok(aesthetic)
    }
}

impl TryFrom<String> for Aesthetic {
    type Error = GrammarError;

    fn try_from(raw: String) -> GrammarResult<Self> {
        raw.parse()
    }
}

impl From<Aesthetic> for String {
    fn from(aesthetic: Aesthetic) -> Self {
        aesthetic.name().to_owned()
    }
}

impl fmt::Display for Aesthetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an aesthetic is bound to: a data column or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AestheticValue {
    Field(String),
    Constant(Value),
}

impl AestheticValue {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    #[must_use]
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(value.into())
    }

    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name),
            Self::Constant(_) => None,
        }
    }
}

/// Per-layer state of one aesthetic.
///
/// `Absent` inherits from the chart context, `Suppressed` blocks inheritance,
/// `Set` overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AestheticSlot {
    Absent,
    Suppressed,
    Set(AestheticValue),
}

/// Ordered aesthetic bindings. `Absent` slots are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<Aesthetic, AestheticSlot>",
    into = "IndexMap<Aesthetic, AestheticSlot>"
)]
pub struct Mapping {
    slots: IndexMap<Aesthetic, AestheticSlot>,
}

impl From<IndexMap<Aesthetic, AestheticSlot>> for Mapping {
    fn from(slots: IndexMap<Aesthetic, AestheticSlot>) -> Self {
        let mut mapping = Self::new();
        for (aesthetic, slot) in slots {
            mapping.set(aesthetic, slot);
        }
        mapping
    }
}

impl From<Mapping> for IndexMap<Aesthetic, AestheticSlot> {
    fn from(mapping: Mapping) -> Self {
        mapping.slots
    }
}

impl Mapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, aesthetic: Aesthetic, field: impl Into<String>) -> Self {
        self.set(aesthetic, AestheticSlot::Set(AestheticValue::field(field)));
        self
    }

    #[must_use]
    pub fn with_constant(mut self, aesthetic: Aesthetic, value: impl Into<Value>) -> Self {
        self.set(
            aesthetic,
            AestheticSlot::Set(AestheticValue::constant(value)),
        );
        self
    }

    #[must_use]
    pub fn suppress(mut self, aesthetic: Aesthetic) -> Self {
        self.set(aesthetic, AestheticSlot::Suppressed);
        self
    }

    /// Stores a slot; `Absent` removes any existing entry.
    pub fn set(&mut self, aesthetic: Aesthetic, slot: AestheticSlot) {
        match slot {
            AestheticSlot::Absent => {
                self.slots.shift_remove(&aesthetic);
            }
            slot => {
                self.slots.insert(aesthetic, slot);
            }
        }
    }

    #[must_use]
    pub fn slot(&self, aesthetic: &Aesthetic) -> AestheticSlot {
        self.slots
            .get(aesthetic)
            .cloned()
            .unwrap_or(AestheticSlot::Absent)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Aesthetic, &AestheticSlot)> {
        self.slots.iter()
    }

    /// Bound values only, skipping suppressed entries.
    pub fn bound(&self) -> impl Iterator<Item = (&Aesthetic, &AestheticValue)> {
        self.slots.iter().filter_map(|(aesthetic, slot)| match slot {
            AestheticSlot::Set(value) => Some((aesthetic, value)),
            AestheticSlot::Absent | AestheticSlot::Suppressed => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Aesthetic, AestheticSlot, AestheticValue, Mapping};

    #[test]
    fn colour_alias_parses_to_color() {
        let parsed: Aesthetic = "colour".parse().expect("parse");
        assert_eq!(parsed, Aesthetic::Color);
        assert_eq!(parsed.to_string(), "color");
    }

    #[test]
    fn unknown_names_are_custom() {
        let parsed: Aesthetic = "stroke".parse().expect("parse");
        assert_eq!(parsed, Aesthetic::custom("stroke").expect("custom"));
        assert_eq!(parsed.name(), "stroke");
        assert!("".parse::<Aesthetic>().is_err());
    }

    #[test]
    fn custom_with_builtin_name_collapses_to_variant() {
        assert_eq!(Aesthetic::custom("x"), Ok(Aesthetic::X));
        assert_eq!(Aesthetic::custom("colour"), Ok(Aesthetic::Color));
        assert!(Aesthetic::custom("").is_err());
        assert!(Aesthetic::custom("  ").is_err());
    }

    #[test]
    fn absent_slots_are_dropped_on_load() {
        let mapping: Mapping =
            serde_json::from_str(r#"{"x":"absent","y":{"set":{"field":"tip"}}}"#)
                .expect("mapping json");
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.slot(&Aesthetic::X), AestheticSlot::Absent);

        let only_absent: Mapping = serde_json::from_str(r#"{"x":"absent"}"#).expect("mapping json");
        assert!(only_absent.is_empty());
    }

    #[test]
    fn setting_absent_removes_entry() {
        let mut mapping = Mapping::new().with_field(Aesthetic::X, "total_bill");
        mapping.set(Aesthetic::X, AestheticSlot::Absent);
        assert!(mapping.is_empty());
        assert_eq!(mapping.slot(&Aesthetic::X), AestheticSlot::Absent);
    }

    #[test]
    fn bound_skips_suppressed() {
        let mapping = Mapping::new()
            .with_field(Aesthetic::X, "total_bill")
            .suppress(Aesthetic::Color);
        let bound: Vec<_> = mapping.bound().collect();
        assert_eq!(
            bound,
            vec![(&Aesthetic::X, &AestheticValue::field("total_bill"))]
        );
    }

    #[test]
    fn mapping_json_uses_aesthetic_names_as_keys() {
        let mapping = Mapping::new()
            .with_field(Aesthetic::X, "total_bill")
            .suppress(Aesthetic::Color);
        let json = serde_json::to_string(&mapping).expect("serialize");
        assert_eq!(json, r#"{"x":{"set":{"field":"total_bill"}},"color":"suppressed"}"#);
    }
}
