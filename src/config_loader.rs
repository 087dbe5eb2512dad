use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CarbonConfig {
    /// Directory the service loads model artifacts from at startup.
    #[serde(default = "default_model_dir")]
    pub model_dir: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_model_dir() -> String {
    "models".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CarbonConfig {
    fn default() -> Self {
        CarbonConfig {
            model_dir: default_model_dir(),
            server: ServerConfig::default(),
            log_level: default_log_level(),
        }
    }
}

/// Layered configuration: built-in defaults, then `carbonscore.toml`, then
/// `CARBON_`-prefixed environment variables.
pub fn load_config() -> Result<CarbonConfig, figment::Error> {
    let figment = Figment::from(Serialized::defaults(CarbonConfig::default()))
        .merge(Toml::file("carbonscore.toml"))
        .merge(Env::prefixed("CARBON_"));

    let config: CarbonConfig = figment.extract()?;

    if config.model_dir.trim().is_empty() {
        return Err(figment::Error::from("model_dir must be set".to_string()));
    }

    Ok(config)
}
