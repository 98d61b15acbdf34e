//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`ReadError`](crate::fingerprint::ReadError),
//! [`SubtitleError`](crate::subtitles::SubtitleError)), while the CLI uses
//! `anyhow` for convenient error propagation. Operations that span
//! several modules (hash a file, then search) return [`Error`].

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Movie hash could not be computed
    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] crate::fingerprint::ReadError),

    /// Subtitle API error
    #[error("Subtitle service error: {0}")]
    Subtitles(#[from] crate::subtitles::SubtitleError),

    /// Refusing to overwrite an existing file
    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an already-exists error.
    pub fn already_exists(path: impl Into<PathBuf>) -> Self {
        Self::AlreadyExists(path.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, crate::fingerprint::ReadError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Fingerprint(e).context(ctx))
    }
}
