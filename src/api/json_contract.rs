use serde::{Deserialize, Serialize};

use crate::error::{GrammarError, GrammarResult};

use super::{ChartContext, ComposerConfig, LayerComposer, ResolvedLayer};

pub const COMPOSER_CONFIG_JSON_SCHEMA_V1: u32 = 1;
pub const RESOLVED_CHART_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ComposerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedChartJsonContractV1 {
    pub schema_version: u32,
    pub layers: Vec<ResolvedLayer>,
}

impl ComposerConfig {
    pub fn to_json_contract_v1_pretty(&self) -> GrammarResult<String> {
        let payload = ComposerConfigJsonContractV1 {
            schema_version: COMPOSER_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            GrammarError::InvalidData(format!("failed to serialize composer config contract v1: {e}"))
        })
    }

    /// Accepts either a bare config object or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> GrammarResult<Self> {
        if let Ok(payload) = serde_json::from_str::<ComposerConfigJsonContractV1>(input) {
            if payload.schema_version != COMPOSER_CONFIG_JSON_SCHEMA_V1 {
                return Err(GrammarError::InvalidData(format!(
                    "unsupported composer config schema version: {}",
                    payload.schema_version
                )));
            }
            return Ok(payload.config);
        }
        serde_json::from_str::<Self>(input).map_err(|e| {
            GrammarError::InvalidData(format!("failed to parse composer config json payload: {e}"))
        })
    }
}

impl ResolvedChartJsonContractV1 {
    #[must_use]
    pub fn new(layers: Vec<ResolvedLayer>) -> Self {
        Self {
            schema_version: RESOLVED_CHART_JSON_SCHEMA_V1,
            layers,
        }
    }

    pub fn to_json_pretty(&self) -> GrammarResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GrammarError::InvalidData(format!("failed to serialize resolved chart contract v1: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> GrammarResult<Self> {
        let payload: Self = serde_json::from_str(input).map_err(|e| {
            GrammarError::InvalidData(format!("failed to parse resolved chart json payload: {e}"))
        })?;
        if payload.schema_version != RESOLVED_CHART_JSON_SCHEMA_V1 {
            return Err(GrammarError::InvalidData(format!(
                "unsupported resolved chart schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload)
    }
}

impl LayerComposer {
    /// Composes the context's layers and exports them for an external renderer.
    pub fn resolved_chart_json_contract_v1_pretty(
        &self,
        context: &ChartContext,
    ) -> GrammarResult<String> {
        let layers = self.compose_context(context)?;
        ResolvedChartJsonContractV1::new(layers).to_json_pretty()
    }
}
