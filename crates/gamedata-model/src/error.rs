//! Error types for version tag handling.

use thiserror::Error;

use crate::version::{GameEdition, GameExpansion};

/// Errors raised while parsing or validating a version tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The edition name is not one of the known editions.
    #[error("unknown game edition: {name}")]
    UnknownEdition { name: String },

    /// The expansion name is not one of the known expansions.
    #[error("unknown game expansion: {name}")]
    UnknownExpansion { name: String },

    /// The expansion exists but does not extend this edition.
    #[error("expansion {expansion} does not belong to edition {edition}")]
    ExpansionMismatch {
        edition: GameEdition,
        expansion: GameExpansion,
    },
}

/// Result type alias for version operations.
pub type Result<T> = std::result::Result<T, VersionError>;
