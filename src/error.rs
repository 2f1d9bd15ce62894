//! Error types for the object model

use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Object model errors
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unsupported capability: {capability}")]
    UnsupportedCapability { capability: String },

    #[error("Invalid element for {operation}: {reason}")]
    InvalidElement { operation: &'static str, reason: String },

    #[error("Invalid decimal literal: {0}")]
    InvalidDecimal(String),

    #[error("Construction provider already resolved; registration must happen before first use")]
    ProviderAlreadyResolved,

    #[error("Cyclic node graph at {path}")]
    CyclicGraph { path: String },

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    pub(crate) fn unsupported(capability: impl Into<String>) -> Self {
        Self::UnsupportedCapability {
            capability: capability.into(),
        }
    }

    pub(crate) fn invalid_element(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidElement {
            operation,
            reason: reason.into(),
        }
    }
}
