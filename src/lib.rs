//! layer-grammar: layered chart composition in the grammar-of-graphics style.
//!
//! A chart is a context (default data + aesthetic mapping) plus an ordered
//! list of layers. The composer resolves each layer's inherited fields into a
//! drawing instruction for an external rendering engine. The interaction
//! module holds the show/hide state of solution regions in a lesson display.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartContext, ComposerConfig, Layer, LayerComposer, ResolvedLayer, compose, resolve};
pub use error::{GrammarError, GrammarResult};
pub use interaction::{ToggleBoard, Visibility};
