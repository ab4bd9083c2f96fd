//! Loader error types.

use gamedata_format::FormatError;
use thiserror::Error;

/// Errors returned by [`load_gamespec`](crate::load_gamespec).
///
/// Cache problems never show up here; they degrade to a fresh decode.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The payload does not match the schema of the requested version.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The wrapper decoded without its single `empiresdat` element.
    #[error("decoded game data has no empiresdat element")]
    MissingRoot,
}

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;

impl LoadError {
    /// Whether the payload ended early.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::Format(err) if err.is_truncation())
    }
}
