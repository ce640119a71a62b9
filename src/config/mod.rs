pub mod env;
mod loader;

pub use env::{ApiConfig, AppConfig, ConfigError, DirectoryConfig, LoggingConfig};
pub use loader::{load_config, DEFAULT_ENDPOINT};
