use crate::providers::ProviderKind;
use relay_core::config::{self as core_config, ServerConfig};
use relay_core::error::AppError;
use serde::Deserialize;

/// Settings file stem, resolved as `relay.toml`, `relay.yaml`, ... when present.
const CONFIG_FILE: &str = "relay";

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// Path the frontend posts to.
    #[serde(default = "default_route")]
    pub route: String,
    /// Provider family served by this deployment.
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_route() -> String {
    "/api/gemini".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamConfig {
    /// Overrides the provider's public base URL (e.g. a test double).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Environment variable holding the credential; defaults per provider.
    #[serde(default)]
    pub credential_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            route: default_route(),
            provider: ProviderKind::default(),
            upstream: UpstreamConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        core_config::load(CONFIG_FILE)
    }

    /// Name of the environment variable the credential is read from.
    pub fn credential_env(&self) -> &str {
        self.upstream
            .credential_env
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.provider.default_credential_env())
    }
}
