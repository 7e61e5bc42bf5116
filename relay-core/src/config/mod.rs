use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Environment prefix for every service setting (`APP__SERVER__PORT`, ...).
pub const ENV_PREFIX: &str = "APP";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Load settings from `.env`, an optional `<file_stem>.*` file and
/// `APP__`-prefixed environment variables, in increasing priority.
pub fn load<T: DeserializeOwned>(file_stem: &str) -> Result<T, AppError> {
    dotenvy::dotenv().ok();
    load_with_prefix(file_stem, ENV_PREFIX)
}

fn load_with_prefix<T: DeserializeOwned>(file_stem: &str, prefix: &str) -> Result<T, AppError> {
    let config = Cfg::builder()
        .add_source(File::with_name(file_stem).required(false))
        .add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
