use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Aesthetic, AestheticSlot, AestheticValue, DataTable, Geometry, Mapping, Parameters, Value};

/// One visual contribution to a chart.
///
/// Unset `data` and absent mapping slots fall back to the chart context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default)]
    pub data: Option<Arc<DataTable>>,
    #[serde(default)]
    pub mapping: Mapping,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub parameters: Parameters,
    /// When `false` the context mapping is ignored entirely for this layer.
    #[serde(default = "default_inherit_mapping")]
    pub inherit_mapping: bool,
}

fn default_inherit_mapping() -> bool {
    true
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            data: None,
            mapping: Mapping::new(),
            geometry: None,
            parameters: Parameters::new(),
            inherit_mapping: default_inherit_mapping(),
        }
    }
}

impl Layer {
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<Arc<DataTable>>) -> Self {
        self.data = Some(data.into());
        self
    }

    #[must_use]
    pub fn with_mapping(mut self, mapping: Mapping) -> Self {
        self.mapping = mapping;
        self
    }

    #[must_use]
    pub fn with_field(mut self, aesthetic: Aesthetic, field: impl Into<String>) -> Self {
        self.mapping
            .set(aesthetic, AestheticSlot::Set(AestheticValue::field(field)));
        self
    }

    #[must_use]
    pub fn with_constant(mut self, aesthetic: Aesthetic, value: impl Into<Value>) -> Self {
        self.mapping
            .set(aesthetic, AestheticSlot::Set(AestheticValue::constant(value)));
        self
    }

    /// Blocks `aesthetic` from being inherited from the chart context.
    #[must_use]
    pub fn suppress(mut self, aesthetic: Aesthetic) -> Self {
        self.mapping.set(aesthetic, AestheticSlot::Suppressed);
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name, value);
        self
    }

    #[must_use]
    pub fn without_inherited_mapping(mut self) -> Self {
        self.inherit_mapping = false;
        self
    }
}

/// Default data and mapping shared by an ordered list of layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartContext {
    #[serde(default)]
    pub data: Option<Arc<DataTable>>,
    #[serde(default)]
    pub mapping: Mapping,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl ChartContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<Arc<DataTable>>) -> Self {
        self.data = Some(data.into());
        self
    }

    #[must_use]
    pub fn with_mapping(mut self, mapping: Mapping) -> Self {
        self.mapping = mapping;
        self
    }

    #[must_use]
    pub fn with_field(mut self, aesthetic: Aesthetic, field: impl Into<String>) -> Self {
        self.mapping
            .set(aesthetic, AestheticSlot::Set(AestheticValue::field(field)));
        self
    }

    /// Appends a layer; later layers draw on top of earlier ones.
    #[must_use]
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartContext, Layer};
    use crate::core::{Aesthetic, AestheticSlot, Geometry};

    #[test]
    fn layer_inherits_mapping_by_default() {
        let layer = Layer::new(Geometry::point());
        assert!(layer.inherit_mapping);
        assert!(layer.mapping.is_empty());
        assert!(layer.data.is_none());
    }

    #[test]
    fn layer_json_defaults_missing_fields() {
        let layer: Layer = serde_json::from_str(r#"{"geometry":"line"}"#).expect("layer json");
        assert_eq!(layer, Layer::new(Geometry::line()));
    }

    #[test]
    fn suppress_replaces_set_slot() {
        let layer = Layer::new(Geometry::point())
            .with_field(Aesthetic::Color, "sex")
            .suppress(Aesthetic::Color);
        assert_eq!(
            layer.mapping.slot(&Aesthetic::Color),
            AestheticSlot::Suppressed
        );
    }

    #[test]
    fn context_keeps_layer_order() {
        let context = ChartContext::new()
            .with_layer(Layer::new(Geometry::ribbon()))
            .with_layer(Layer::new(Geometry::line()))
            .with_layer(Layer::new(Geometry::point()));
        let geometries: Vec<_> = context
            .layers
            .iter()
            .filter_map(|layer| layer.geometry.as_ref().map(Geometry::name))
            .collect();
        assert_eq!(geometries, vec!["ribbon", "line", "point"]);
    }
}
