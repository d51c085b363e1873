//! Error types shared across Kinetrace crates.

use std::path::PathBuf;

/// Top-level error type for Kinetrace operations.
#[derive(Debug, thiserror::Error)]
pub enum KinetraceError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Report sink error: {message}")]
    Sink { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using KinetraceError.
pub type KinetraceResult<T> = Result<T, KinetraceError>;

impl KinetraceError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink {
            message: msg.into(),
        }
    }

    /// Whether this error was raised while validating configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KinetraceError::config("smoothing window must be at least 1");
        assert_eq!(
            err.to_string(),
            "Configuration error: smoothing window must be at least 1"
        );
        assert!(err.is_config());

        let err = KinetraceError::sink("disk full");
        assert_eq!(err.to_string(), "Report sink error: disk full");
        assert!(!err.is_config());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: KinetraceError = io.into();
        assert!(matches!(err, KinetraceError::Io(_)));
    }
}
