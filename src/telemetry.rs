//! Opt-in `tracing` setup for hosts of the composer and toggle board.
//!
//! Composition logs at `debug` (sequence length), `trace` (per layer) and
//! `warn` (failed compose or rejected render). Hosts that already run a
//! subscriber can ignore this module.

use serde::{Deserialize, Serialize};

/// Filter used when neither the environment nor the caller names one.
pub const DEFAULT_FILTER: &str = "layer_grammar=info";

/// Environment variable consulted before the configured filter.
pub const FILTER_ENV: &str = "LAYER_GRAMMAR_LOG";

fn default_filter() -> String {
    DEFAULT_FILTER.to_owned()
}

fn default_with_target() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_with_target")]
    pub with_target: bool,
    #[serde(default)]
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            with_target: default_with_target(),
            ansi: false,
        }
    }
}

impl TelemetryConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filter(mut self, directive: impl Into<String>) -> Self {
        self.filter = directive.into();
        self
    }

    #[must_use]
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    /// Directive actually applied: a non-blank `LAYER_GRAMMAR_LOG` wins.
    #[must_use]
    pub fn effective_filter(&self, env_value: Option<&str>) -> String {
        match env_value.map(str::trim) {
            Some(directive) if !directive.is_empty() => directive.to_owned(),
            _ if self.filter.trim().is_empty() => default_filter(),
            _ => self.filter.clone(),
        }
    }
}

/// Installs a compact global subscriber built from `config`.
///
/// Returns `false` without the `telemetry` feature, or when the host already
/// installed a global subscriber.
#[must_use]
pub fn init_tracing(config: &TelemetryConfig) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let env_value = std::env::var(FILTER_ENV).ok();
        let directive = config.effective_filter(env_value.as_deref());
        let filter = tracing_subscriber::EnvFilter::try_new(&directive)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .with_ansi(config.ansi)
            .compact()
            .try_init()
            .is_ok();
        if installed {
            tracing::debug!(filter = %directive, "layer-grammar tracing installed");
        }
        installed
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = config;
        false
    }
}

/// `init_tracing` with `TelemetryConfig::default()`.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(&TelemetryConfig::default())
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FILTER, TelemetryConfig};

    #[test]
    fn environment_directive_wins_when_present() {
        let config = TelemetryConfig::new().with_filter("layer_grammar=debug");
        assert_eq!(config.effective_filter(None), "layer_grammar=debug");
        assert_eq!(
            config.effective_filter(Some(" layer_grammar::api=trace ")),
            "layer_grammar::api=trace"
        );
        assert_eq!(config.effective_filter(Some("  ")), "layer_grammar=debug");
    }

    #[test]
    fn blank_configured_filter_falls_back_to_default() {
        let config = TelemetryConfig::new().with_filter("");
        assert_eq!(config.effective_filter(None), DEFAULT_FILTER);
    }

    #[test]
    fn config_json_fills_defaults() {
        let config: TelemetryConfig =
            serde_json::from_str(r#"{"ansi":true}"#).expect("telemetry json");
        assert_eq!(config, TelemetryConfig::new().with_ansi(true));
    }

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn init_is_a_no_op_without_feature() {
        assert!(!super::init_default_tracing());
        assert!(!super::init_tracing(&TelemetryConfig::new()));
    }
}
