use crate::api::ResolvedLayer;
use crate::core::Geometry;
use crate::error::{GrammarError, GrammarResult};
use crate::render::Renderer;

/// No-op renderer used by tests and headless composition.
///
/// It still checks that every resolved binding is drawable so tests can catch
/// inconsistent layers before a real engine is wired in.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_layer_count: usize,
    pub last_stacking: Vec<Geometry>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, layers: &[ResolvedLayer]) -> GrammarResult<()> {
        for layer in layers {
            for (aesthetic, value) in &layer.mapping {
                if let Some(field) = value.field_name() {
                    if !layer.data.has_field(field) {
                        return Err(GrammarError::InvalidData(format!(
                            "`{aesthetic}` is bound to missing column `{field}`"
                        )));
                    }
                }
            }
        }
        self.render_count += 1;
        self.last_layer_count = layers.len();
        self.last_stacking = layers.iter().map(|layer| layer.geometry.clone()).collect();
        Ok(())
    }
}
