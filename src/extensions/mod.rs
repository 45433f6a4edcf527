//! Boundaries to external collaborators that feed layer data.
//!
//! Keep providers behind traits and out of the resolution path.

pub mod model;

pub use model::{
    FIT_COLUMN, IntervalKind, LOWER_COLUMN, ModelProvider, ModelSpec, UPPER_COLUMN, fitted_layer,
};
