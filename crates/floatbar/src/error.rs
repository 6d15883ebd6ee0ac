//! Error types for floatbar.

use std::path::PathBuf;

use floatbar_core::DomError;

/// Result type alias for floatbar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or constructing a toolbar.
///
/// Failures inside event handlers never surface here; they are logged and
/// swallowed so the host's event loop keeps running.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document operation failed.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// JSON options or snapshot could not be parsed.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML options could not be parsed.
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// File I/O error.
    #[error("Failed to read options file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The options file extension is neither `.json` nor `.toml`.
    #[error("Unsupported options format for '{0}' (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
