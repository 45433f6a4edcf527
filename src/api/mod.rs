mod composer;
mod composer_config;
mod json_contract;
mod layer;
mod resolved;

pub use composer::{LayerComposer, compose, resolve};
pub use composer_config::ComposerConfig;
pub use json_contract::{
    COMPOSER_CONFIG_JSON_SCHEMA_V1, ComposerConfigJsonContractV1, RESOLVED_CHART_JSON_SCHEMA_V1,
    ResolvedChartJsonContractV1,
};
pub use layer::{ChartContext, Layer};
pub use resolved::ResolvedLayer;
