use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::Layer;
use crate::core::{DataTable, Geometry};
use crate::error::{GrammarError, GrammarResult};

pub const FIT_COLUMN: &str = "fit";
pub const LOWER_COLUMN: &str = "lwr";
pub const UPPER_COLUMN: &str = "upr";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    None,
    Confidence,
    Prediction,
}

impl IntervalKind {
    #[must_use]
    pub fn has_bounds(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Model formula `response ~ predictors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub response: String,
    pub predictors: Vec<String>,
}

impl ModelSpec {
    #[must_use]
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            predictors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_predictor(mut self, predictor: impl Into<String>) -> Self {
        self.predictors.push(predictor.into());
        self
    }
}

/// External statistical engine producing fitted values.
///
/// Implementations return a table with a `fit` column and, for interval
/// requests, `lwr`/`upr` columns. Rows may be the input observations or a new
/// prediction grid of any length.
pub trait ModelProvider {
    fn fit(
        &self,
        data: &DataTable,
        spec: &ModelSpec,
        interval: IntervalKind,
    ) -> GrammarResult<DataTable>;
}

/// Runs `provider` and wraps its output table as a layer's own data.
pub fn fitted_layer<M: ModelProvider + ?Sized>(
    provider: &M,
    data: &DataTable,
    spec: &ModelSpec,
    interval: IntervalKind,
    geometry: Geometry,
) -> GrammarResult<Layer> {
    for field in std::iter::once(&spec.response).chain(&spec.predictors) {
        if !data.has_field(field) {
            return Err(GrammarError::InvalidData(format!(
                "model references unknown field `{field}`"
            )));
        }
    }

    let fitted = provider.fit(data, spec, interval)?;
    let mut expected = vec![FIT_COLUMN];
    if interval.has_bounds() {
        expected.extend([LOWER_COLUMN, UPPER_COLUMN]);
    }
    if let Some(missing) = expected.iter().find(|column| !fitted.has_field(column)) {
        return Err(GrammarError::InvalidData(format!(
            "model output is missing column `{missing}`"
        )));
    }

    debug!(
        response = %spec.response,
        predictors = spec.predictors.len(),
        interval = ?interval,
        rows = fitted.row_count(),
        "fitted model layer data"
    );
    Ok(Layer::new(geometry).with_data(fitted))
}
