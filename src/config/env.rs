use thiserror::Error;
use url::Url;

pub const DEFAULT_FUNCTION_NAME: &str = "classify-spam";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: Url,
    pub api_key: Option<String>,
    pub function_name: String,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
