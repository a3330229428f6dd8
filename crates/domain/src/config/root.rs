use serde::{Deserialize, Serialize};

use super::blocking::BlockingConfig;
use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "regexblock.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/regexblock/config.toml";

/// Main configuration structure for RegexBlock
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration (port, bind address, API key)
    pub server: ServerConfig,

    /// Block evaluation configuration
    pub blocking: BlockingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. regexblock.toml in current directory
    /// 3. /etc/regexblock/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.read_only {
            self.blocking.read_only = true;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.web_port == 0 {
            return Err(ConfigError::Validation("Web port cannot be 0".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        if self.blocking.check_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "blocking.check_timeout_ms cannot be 0".to_string(),
            ));
        }

        if self.blocking.purge_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "blocking.purge_interval_secs cannot be 0".to_string(),
            ));
        }

        if matches!(self.server.api_key.as_deref(), Some("")) {
            return Err(ConfigError::Validation(
                "server.api_key cannot be an empty string".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(String::from)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub read_only: bool,
}
