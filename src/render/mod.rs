mod null_renderer;

pub use null_renderer::NullRenderer;

use crate::api::ResolvedLayer;
use crate::error::GrammarResult;

/// Contract implemented by any rendering engine.
///
/// Engines receive the complete, ordered sequence of resolved layers so
/// drawing code stays isolated from inheritance and validation rules.
/// Layers are drawn in sequence order; later layers stack on top.
pub trait Renderer {
    fn render(&mut self, layers: &[ResolvedLayer]) -> GrammarResult<()>;
}
