// Configuration module

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Store endpoint (`DATABASE_URL`).
    pub database_url: String,
    /// Store access credential (`DATABASE_TOKEN`), used as the connection password.
    pub database_token: String,
    #[serde(default = "default_server_host")]
    pub server_host: String,
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    /// Comma-separated list of allowed CORS origins.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub database_acquire_timeout_secs: u64,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::default())
    }

    /// Build and validate configuration from any `config` source.
    pub fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: Config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "DATABASE_URL must not be empty".to_string(),
            ));
        }
        if self.database_token.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "DATABASE_TOKEN must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Parsed CORS origins; entries that are not valid header values are skipped.
    pub fn allowed_origins(&self) -> Vec<axum::http::HeaderValue> {
        self.frontend_url
            .split(',')
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect()
    }
}
