use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Aesthetic, AestheticValue, DataTable, Geometry, Parameters};

/// Fully resolved drawing instruction handed to a rendering engine.
///
/// Composed sequences are drawn in order, so later entries stack on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLayer {
    /// Position of the source layer in the composed sequence; 0 for a bare `resolve`.
    pub index: usize,
    pub data: Arc<DataTable>,
    pub mapping: IndexMap<Aesthetic, AestheticValue>,
    pub geometry: Geometry,
    pub parameters: Parameters,
}

impl ResolvedLayer {
    #[must_use]
    pub fn binding(&self, aesthetic: &Aesthetic) -> Option<&AestheticValue> {
        self.mapping.get(aesthetic)
    }

    /// Field bound to `aesthetic`, if it is bound to a column.
    #[must_use]
    pub fn field(&self, aesthetic: &Aesthetic) -> Option<&str> {
        self.binding(aesthetic).and_then(AestheticValue::field_name)
    }
}
