//! Error types for splice-content

/// Result type for splice-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in splice-content operations
///
/// Anchor and close-marker misses are not errors; they are reported
/// through [`crate::Outcome`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Key not found: {path}")]
    MissingKey { path: String },

    #[error("Value at {path} is not an object")]
    NotAnObject { path: String },

    #[error("Invalid move {from} -> {to}: {reason}")]
    InvalidMove {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Invalid rule '{rule}': {message}")]
    InvalidRule { rule: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingKey { path: path.into() }
    }

    pub fn invalid_rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRule {
            rule: rule.into(),
            message: message.into(),
        }
    }
}
