use thiserror::Error;

pub type GrammarResult<T> = Result<T, GrammarError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrammarError {
    #[error("{}geometry `{geometry}` requires aesthetic `{aesthetic}`", layer_prefix(.layer))]
    UnresolvedAesthetic {
        layer: Option<usize>,
        geometry: String,
        aesthetic: String,
    },

    #[error("{}layer has no geometry", layer_prefix(.layer))]
    EmptyGeometry { layer: Option<usize> },

    #[error(
        "{}aesthetic `{aesthetic}` references unknown field `{field}`",
        layer_prefix(.layer)
    )]
    UnknownField {
        layer: Option<usize>,
        aesthetic: String,
        field: String,
    },

    #[error("{}unknown geometry `{geometry}`", layer_prefix(.layer))]
    UnknownGeometry {
        layer: Option<usize>,
        geometry: String,
    },

    #[error("unknown toggle element `{0}`")]
    UnknownElement(String),

    #[error("toggle element `{0}` is already registered")]
    DuplicateElement(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl GrammarError {
    /// Attaches a layer index to layer-scoped errors.
    #[must_use]
    pub(crate) fn at_layer(self, index: usize) -> Self {
        match self {
            Self::UnresolvedAesthetic {
                geometry,
                aesthetic,
                ..
            } => Self::UnresolvedAesthetic {
                layer: Some(index),
                geometry,
                aesthetic,
            },
            Self::EmptyGeometry { .. } => Self::EmptyGeometry { layer: Some(index) },
            Self::UnknownField {
                aesthetic, field, ..
            } => Self::UnknownField {
                layer: Some(index),
                aesthetic,
                field,
            },
            Self::UnknownGeometry { geometry, .. } => Self::UnknownGeometry {
                layer: Some(index),
                geometry,
            },
            other => other,
        }
    }
}

fn layer_prefix(layer: &Option<usize>) -> String {
    match layer {
        Some(index) => format!("layer {index}: "),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::GrammarError;

    #[test]
    fn layer_index_is_rendered_only_when_known() {
        let bare = GrammarError::EmptyGeometry { layer: None };
        assert_eq!(bare.to_string(), "layer has no geometry");

        let indexed = bare.at_layer(2);
        assert_eq!(indexed.to_string(), "layer 2: layer has no geometry");
    }

    #[test]
    fn toggle_errors_ignore_layer_index() {
        let err = GrammarError::UnknownElement("solution9".to_owned()).at_layer(4);
        assert_eq!(err, GrammarError::UnknownElement("solution9".to_owned()));
    }
}
