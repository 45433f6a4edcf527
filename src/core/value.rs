use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Single table cell or literal aesthetic constant.
///
/// Numbers are totally ordered so tables and resolved layers can derive `Eq`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Missing,
    Bool(bool),
    Number(OrderedFloat<f64>),
    Text(String),
}

impl Value {
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value.into_inner()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("NA"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{}", value.into_inner()),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn json_uses_plain_scalars() {
        let values = vec![
            Value::Missing,
            Value::from(true),
            Value::from(16.99),
            Value::from("Female"),
        ];
        let json = serde_json::to_string(&values).expect("serialize");
        assert_eq!(json, r#"[null,true,16.99,"Female"]"#);

        let back: Vec<Value> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, values);
    }

    #[test]
    fn missing_displays_as_na() {
        assert_eq!(Value::Missing.to_string(), "NA");
        assert_eq!(Value::from(3).to_string(), "3");
    }
}
