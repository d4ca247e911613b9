//! Error types for Perch

use thiserror::Error;

/// The main error type for Perch operations
#[derive(Debug, Error)]
pub enum PerchError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    #[error("Duplicate template name: {0}")]
    DuplicateTemplate(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Perch operations
pub type Result<T> = std::result::Result<T, PerchError>;

impl From<toml::de::Error> for PerchError {
    fn from(err: toml::de::Error) -> Self {
        PerchError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for PerchError {
    fn from(err: toml::ser::Error) -> Self {
        PerchError::TomlSerError(err.to_string())
    }
}
