//! Service configuration

use serde::Deserialize;

use crate::utils::validation::DEFAULT_PAGE_LIMIT;

/// Service configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// HTTP API behaviour
    #[serde(default)]
    pub api: ApiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
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

impl ServerConfig {
    /// `host:port` string to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Default and upper bound for the transaction page size
    #[serde(default = "default_max_page_limit")]
    pub max_page_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_page_limit: default_max_page_limit(),
        }
    }
}

fn default_max_page_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl AppConfig {
    /// Loads configuration from optional config files and `LEDGER__*`
    /// environment variables, the latter taking precedence.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
