//! Application settings
//!
//! Settings are assembled from an optional TOML file plus environment
//! overrides, e.g. `CHAT_AGENT_SERVER__PORT=9000` overrides `server.port`.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Intent catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Conversation log settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Enforce the configured CORS origins (disable only for development)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
    /// Allowed CORS origins for the browser frontend
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Intent catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the intents JSON document
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Conversation log settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}

fn default_catalog_path() -> String {
    "config/intents.json".to_string()
}

fn default_database_path() -> String {
    "data/conversations.db".to_string()
}

impl Settings {
    /// Validate settings after load
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }
        if self.catalog.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "catalog.path".to_string(),
                message: "catalog path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from an optional TOML file plus `CHAT_AGENT_` env overrides
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        if !std::path::Path::new(path).exists() {
            return Err(ConfigError::FileNotFound(path.to_string()));
        }
        builder = builder.add_source(config::File::with_name(path));
    }

    let settings: Settings = builder
        .add_source(
            config::Environment::with_prefix("CHAT_AGENT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        host = %settings.server.host,
        port = settings.server.port,
        catalog = %settings.catalog.path,
        "Settings loaded"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8000);
        assert!(settings.server.cors_enabled);
        assert_eq!(settings.catalog.path, "config/intents.json");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.server.port, 8000);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\n\n[catalog]\npath = \"custom/intents.json\"\n"
        )
        .unwrap();

        let settings = load_settings(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.catalog.path, "custom/intents.json");
        // Unspecified sections keep their defaults
        assert_eq!(settings.database.path, "data/conversations.db");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_settings(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 0\n").unwrap();

        let err = load_settings(Some(file.path().to_str().unwrap())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
