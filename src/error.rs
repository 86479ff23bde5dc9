//! Structured error types for configuration resolution.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    // Validation errors
    MissingEndpoint,
    MissingUsername,
    MissingPassword,
    InvalidUrl,

    // File errors
    FileNotFound,
    MalformedFile,
    Io,

    // Rendering errors
    Serialize,
}

/// Errors raised while resolving, rendering or saving a connection config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("url unset")]
    MissingEndpoint,

    #[error("username unset")]
    MissingUsername,

    #[error("password unset")]
    MissingPassword,

    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("config file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("malformed config file {}: {reason}", path.display())]
    MalformedFile { path: PathBuf, reason: String },

    #[error("failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render config: {reason}")]
    Serialize { reason: String },
}

impl ConfigError {
    /// The programmatic kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingEndpoint => ErrorKind::MissingEndpoint,
            Self::MissingUsername => ErrorKind::MissingUsername,
            Self::MissingPassword => ErrorKind::MissingPassword,
            Self::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::MalformedFile { .. } => ErrorKind::MalformedFile,
            Self::Io { .. } => ErrorKind::Io,
            Self::Serialize { .. } => ErrorKind::Serialize,
        }
    }

    // Convenience constructors

    pub fn invalid_url(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::MalformedFile {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn serialize(reason: impl std::fmt::Display) -> Self {
        Self::Serialize {
            reason: reason.to_string(),
        }
    }

    /// Map an I/O failure on `path`, keeping "not found" distinct.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// True for the three completeness checks run after resolution.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MissingEndpoint | ErrorKind::MissingUsername | ErrorKind::MissingPassword
        )
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
