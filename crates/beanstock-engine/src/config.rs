//! Configuration loading and typed config structures for the game server.
//!
//! The canonical configuration lives in `beanstock-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//!
//! Balance values (pot count, shop slot count, rotation period, tier tables,
//! experience curves) are deliberately *not* configurable: they are game
//! constants, and moving them into config would let a deploy silently change
//! the economy. Config covers only deployment-level knobs.

use std::path::Path;

use serde::Deserialize;

use crate::session::DEFAULT_STARTING_COINS;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game server configuration.
///
/// Mirrors the structure of `beanstock-config.yaml`. All fields have
/// defaults, so an empty or missing section falls back to the stock game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Gameplay settings (starting balance, RNG seed).
    #[serde(default)]
    pub game: GameplayConfig,

    /// HTTP server bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Gameplay configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameplayConfig {
    /// Coin balance granted to a fresh session.
    #[serde(default = "default_starting_coins")]
    pub starting_coins: u64,

    /// Random seed for reproducible sessions. When absent, the RNG is
    /// seeded from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            starting_coins: default_starting_coins(),
            seed: None,
        }
    }
}

/// HTTP server bind configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
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

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_starting_coins() -> u64 {
    DEFAULT_STARTING_COINS
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    5001
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.game.starting_coins, 120);
        assert_eq!(config.game.seed, None);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
game:
  starting_coins: 5000
  seed: 1234

server:
  host: "127.0.0.1"
  port: 9090

logging:
  level: "debug"
"#;

        let config = GameConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_else(GameConfig::default);

        assert_eq!(config.game.starting_coins, 5000);
        assert_eq!(config.game.seed, Some(1234));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "server:\n  port: 8000\n";
        let config = GameConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_else(GameConfig::default);

        // Port is overridden
        assert_eq!(config.server.port, 8000);
        // Everything else uses defaults
        assert_eq!(config.game.starting_coins, 120);
        assert_eq!(config.game.seed, None);
    }

    #[test]
    fn parse_empty_yaml() {
        let yaml = "";
        let config = GameConfig::parse(yaml);
        assert!(config.is_ok());
    }

    #[test]
    fn parse_malformed_yaml_is_yaml_error() {
        let yaml = "game: [not, a, mapping";
        let err = GameConfig::parse(yaml);
        assert!(matches!(err, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::from_file(Path::new("/nonexistent/beanstock-config.yaml"));
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("beanstock-config.yaml");
        if path.exists() {
            let config = GameConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
