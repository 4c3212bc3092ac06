use std::path::PathBuf;

/// Everything that can abort a thumbnail run.
///
/// A run either writes one complete thumbnail or fails with one of these.
#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("missing asset {path:?}: {reason}")]
    MissingAsset { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("font family '{family}' is not installed (installed: {installed})")]
    FontNotFound { family: String, installed: String },

    #[error("failed to encode {path:?}: {reason}")]
    EncodingFailure { path: PathBuf, reason: String },
}

impl ThumbnailError {
    pub(crate) fn missing(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ThumbnailError::MissingAsset {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ThumbnailError::InvalidConfiguration(message.into())
    }

    pub(crate) fn encoding(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ThumbnailError::EncodingFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<toml::de::Error> for ThumbnailError {
    fn from(e: toml::de::Error) -> Self {
        ThumbnailError::InvalidConfiguration(format!("TOML parse error: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, ThumbnailError>;
