//! Error types for splice-core

/// Result type for splice-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or running a recipe
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Recipe step is malformed (1-based step number)
    #[error("Invalid recipe step {step}: {message}")]
    InvalidRecipe { step: usize, message: String },

    /// Transformation of a specific file failed
    #[error("{path}: {source}")]
    Document {
        path: String,
        #[source]
        source: splice_content::Error,
    },

    /// Filesystem error from splice-fs
    #[error(transparent)]
    Fs(#[from] splice_fs::Error),
}

impl Error {
    pub fn invalid(step: usize, message: impl Into<String>) -> Self {
        Self::InvalidRecipe {
            step,
            message: message.into(),
        }
    }
}
