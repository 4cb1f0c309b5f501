//! Error types for Drift

use thiserror::Error;

/// The main error type for Drift operations
#[derive(Debug, Error)]
pub enum DriftError {
    #[error("Particle pool overflow: requested {requested} slot(s), {available} available")]
    PoolOverflow { requested: usize, available: usize },

    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),

    #[error("Frame dump error: {0}")]
    FrameDumpError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for Drift operations
pub type Result<T> = std::result::Result<T, DriftError>;

impl DriftError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        DriftError::InvalidConfig {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for DriftError {
    fn from(err: toml::de::Error) -> Self {
        DriftError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for DriftError {
    fn from(err: toml::ser::Error) -> Self {
        DriftError::TomlSerError(err.to_string())
    }
}

impl From<serde_json::Error> for DriftError {
    fn from(err: serde_json::Error) -> Self {
        DriftError::JsonError(err.to_string())
    }
}
