//! Configuration management for the chat agent
//!
//! Supports loading configuration from:
//! - TOML files
//! - Environment variables (CHAT_AGENT_ prefix)

pub mod settings;

pub use settings::{
    load_settings, CatalogConfig, DatabaseConfig, ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
