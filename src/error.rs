//! Error types for propdiff operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PropdiffError>;

#[derive(Error, Debug)]
pub enum PropdiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Property not found: {name}")]
    PropertyNotFound { name: String },

    #[error("No such version '{selector}' for property '{property}'")]
    VersionNotFound { property: String, selector: String },

    #[error("Both sides of the comparison are labeled '{label}'")]
    DuplicateLabels { label: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl PropdiffError {
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn version_not_found(property: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::VersionNotFound {
            property: property.into(),
            selector: selector.into(),
        }
    }
}
