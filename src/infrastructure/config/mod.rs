use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};

/// Optional config file read from the working directory
pub const CONFIG_FILE: &str = "sandhub.toml";

/// Prefix of environment overrides, e.g. `SANDHUB_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "SANDHUB_";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    pub loader: LoaderConfig,
    /// Default tracing directive; `RUST_LOG` wins when set
    pub log_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// Largest accepted upload body
    #[validate(range(min = 1024))]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Trim surrounding whitespace from every cell
    pub trim: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3001,
                max_upload_bytes: 20 * 1024 * 1024,
            },
            loader: LoaderConfig { trim: true },
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then `sandhub.toml`, then `SANDHUB_*` variables
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: AppConfig = figment
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        config
            .validate()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
