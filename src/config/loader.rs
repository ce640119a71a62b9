use std::{env, str::FromStr, time::Duration};

use url::Url;

use super::env::{ApiConfig, AppConfig, ConfigError, DirectoryConfig, LoggingConfig};

/// The Lambda endpoint the original frontend ships with; overridable for
/// staging deployments. The old CORS-proxy detour is gone on purpose, the
/// endpoint answers direct POSTs.
pub const DEFAULT_ENDPOINT: &str = "https://kcp02bv6wa.execute-api.sa-east-1.amazonaws.com/cases";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint_raw =
            env::var("CLASSIFY_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint_raw).map_err(|err| ConfigError::Invalid {
            key: "CLASSIFY_ENDPOINT",
            reason: err.to_string(),
        })?;

        let api = ApiConfig {
            endpoint,
            request_timeout: Duration::from_millis(parse_or("API_TIMEOUT_MS", 30_000)),
            confidence: parse_or("CLASSIFY_CONFIDENCE", 0.7),
            detailed: parse_or("CLASSIFY_DETAILED", true),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            export_dir: env::var("EXPORT_DIR").unwrap_or_else(|_| ".".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| "America/Sao_Paulo".to_string());

        Ok(Self {
            api,
            directories,
            logging,
            timezone,
        })
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}
