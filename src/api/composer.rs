use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

#[cfg(feature = "parallel-compose")]
use rayon::prelude::*;

use crate::core::{AestheticSlot, AestheticValue, DataTable};
use crate::error::{GrammarError, GrammarResult};
use crate::render::Renderer;

use super::{ChartContext, ComposerConfig, Layer, ResolvedLayer};

/// Resolves layers against a chart context.
///
/// Resolution is pure: the composer holds only immutable configuration, so a
/// single instance can serve any number of independent charts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerComposer {
    config: ComposerConfig,
}

impl LayerComposer {
    #[must_use]
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Resolves one layer against `context`.
    ///
    /// Layer mapping entries win key-by-key and `Suppressed` entries drop the
    /// context value. Effective data is the layer's own table, else the
    /// context's.
    pub fn resolve(&self, context: &ChartContext, layer: &Layer) -> GrammarResult<ResolvedLayer> {
        self.resolve_at(context, layer, 0)
    }

    fn resolve_at(
        &self,
        context: &ChartContext,
        layer: &Layer,
        index: usize,
    ) -> GrammarResult<ResolvedLayer> {
        let Some(geometry) = layer.geometry.clone() else {
            return Err(GrammarError::EmptyGeometry { layer: None });
        };

        let catalog = &self.config.geometry_catalog;
        if self.config.strict_geometries && !catalog.contains(&geometry) {
            return Err(GrammarError::UnknownGeometry {
                layer: None,
                geometry: geometry.name().to_owned(),
            });
        }

        let data = layer
            .data
            .as_ref()
            .or(context.data.as_ref())
            .map_or_else(|| Arc::new(DataTable::new()), Arc::clone);

        let mut mapping: IndexMap<_, AestheticValue> = IndexMap::new();
        if layer.inherit_mapping {
            for (aesthetic, inherited) in context.mapping.bound() {
                match layer.mapping.slot(aesthetic) {
                    AestheticSlot::Absent => {
                        mapping.insert(aesthetic.clone(), inherited.clone());
                    }
                    AestheticSlot::Set(own) => {
                        mapping.insert(aesthetic.clone(), own);
                    }
                    AestheticSlot::Suppressed => {}
                }
            }
        }
        for (aesthetic, own) in layer.mapping.bound() {
            if !mapping.contains_key(aesthetic) {
                mapping.insert(aesthetic.clone(), own.clone());
            }
        }

        if let Some(missing) = catalog
            .required(&geometry)
            .iter()
            .find(|aesthetic| !mapping.contains_key(*aesthetic))
        {
            return Err(GrammarError::UnresolvedAesthetic {
                layer: None,
                geometry: geometry.name().to_owned(),
                aesthetic: missing.to_string(),
            });
        }

        if self.config.validate_field_references {
            for (aesthetic, value) in &mapping {
                if let AestheticValue::Field(field) = value {
                    if !data.has_field(field) {
                        return Err(GrammarError::UnknownField {
                            layer: None,
                            aesthetic: aesthetic.to_string(),
                            field: field.clone(),
                        });
                    }
                }
            }
        }

        trace!(
            index,
            geometry = %geometry,
            aesthetics = mapping.len(),
            rows = data.row_count(),
            "resolved layer"
        );

        Ok(ResolvedLayer {
            index,
            data,
            mapping,
            geometry,
            parameters: layer.parameters.clone(),
        })
    }

    /// Resolves every layer in order.
    ///
    /// All-or-nothing: the first failing layer (lowest index) is reported and
    /// no partial sequence is returned.
    pub fn compose(
        &self,
        context: &ChartContext,
        layers: &[Layer],
    ) -> GrammarResult<Vec<ResolvedLayer>> {
        debug!(layer_count = layers.len(), "compose layers");

        #[cfg(feature = "parallel-compose")]
        let resolved: GrammarResult<Vec<ResolvedLayer>> = {
            let results: Vec<GrammarResult<ResolvedLayer>> = layers
                .par_iter()
                .enumerate()
                .map(|(index, layer)| {
                    self.resolve_at(context, layer, index)
                        .map_err(|err| err.at_layer(index))
                })
                .collect();
            results.into_iter().collect()
        };

        #[cfg(not(feature = "parallel-compose"))]
        let resolved: GrammarResult<Vec<ResolvedLayer>> = layers
            .iter()
            .enumerate()
            .map(|(index, layer)| {
                self.resolve_at(context, layer, index)
                    .map_err(|err| err.at_layer(index))
            })
            .collect();

        if let Err(err) = &resolved {
            warn!(error = %err, "layer composition failed");
        }
        resolved
    }

    /// Resolves the context's own layers.
    pub fn compose_context(&self, context: &ChartContext) -> GrammarResult<Vec<ResolvedLayer>> {
        self.compose(context, &context.layers)
    }

    /// Composes and hands the complete sequence to `renderer`.
    ///
    /// The renderer is not invoked when any layer fails to resolve.
    pub fn compose_and_render<R: Renderer>(
        &self,
        context: &ChartContext,
        layers: &[Layer],
        renderer: &mut R,
    ) -> GrammarResult<()> {
        let resolved = self.compose(context, layers)?;
        renderer.render(&resolved).inspect_err(|err| {
            warn!(error = %err, "renderer rejected composed layers");
        })
    }
}

/// Resolves one layer with the default configuration.
pub fn resolve(context: &ChartContext, layer: &Layer) -> GrammarResult<ResolvedLayer> {
    LayerComposer::default().resolve(context, layer)
}

/// Resolves a layer sequence with the default configuration.
pub fn compose(context: &ChartContext, layers: &[Layer]) -> GrammarResult<Vec<ResolvedLayer>> {
    LayerComposer::default().compose(context, layers)
}
