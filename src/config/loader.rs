use std::env;

use url::Url;

use super::env::{
    AppConfig, BackendConfig, ConfigError, DEFAULT_FUNCTION_NAME, DirectoryConfig, LoggingConfig,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_base_url = non_empty(&lookup, "CLASSIFIER_BASE_URL")
            .ok_or(ConfigError::Missing("CLASSIFIER_BASE_URL"))?;
        let base_url = parse_base_url(&raw_base_url)?;

        let function_name = non_empty(&lookup, "CLASSIFIER_FUNCTION")
            .unwrap_or_else(|| DEFAULT_FUNCTION_NAME.to_string());
        if function_name.contains('/') {
            return Err(ConfigError::Invalid {
                key: "CLASSIFIER_FUNCTION",
                reason: "function name must not contain '/'".to_string(),
            });
        }

        let backend = BackendConfig {
            base_url,
            api_key: non_empty(&lookup, "CLASSIFIER_API_KEY"),
            function_name,
        };

        let directories = DirectoryConfig {
            logs_dir: non_empty(&lookup, "LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: non_empty(&lookup, "LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        Ok(Self {
            backend,
            directories,
            logging,
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::Invalid {
        key: "CLASSIFIER_BASE_URL",
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            key: "CLASSIFIER_BASE_URL",
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}
