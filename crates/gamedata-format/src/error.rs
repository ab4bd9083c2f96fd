//! Error types for schema construction and decoding.

use gamedata_model::GameVersion;
use thiserror::Error;

/// Errors that can occur while building schemas or decoding data.
///
/// Every variant is fatal for the decode that raised it. No partial tree
/// is returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The buffer ended before a field's bytes could be read.
    #[error("truncated input at offset {offset:#x} (need {need} bytes, have {have})")]
    TruncatedInput {
        offset: usize,
        need: usize,
        have: usize,
    },

    /// A length source names a field that has not been decoded yet.
    #[error("{structure}.{field}: length reference '{reference}' is not a decoded field")]
    MissingLengthReference {
        structure: &'static str,
        field: String,
        reference: &'static str,
    },

    /// The schema builder has no layout for this version.
    #[error("{structure} has no layout for game version {version}")]
    UnsupportedVersion {
        structure: &'static str,
        version: GameVersion,
    },

    /// A descriptor list violates a schema invariant.
    #[error("invalid schema for {structure}: {message}")]
    InvalidSchema {
        structure: &'static str,
        message: String,
    },

    /// A length field holds a value that cannot be used as a count.
    #[error("{structure}.{field}: invalid length {value} from '{reference}'")]
    InvalidLength {
        structure: &'static str,
        field: String,
        reference: &'static str,
        value: i128,
    },

    /// A presence gate does not match the array it gates.
    #[error("{structure}.{field}: presence gate '{gate}' {message}")]
    PresenceGateMismatch {
        structure: &'static str,
        field: String,
        gate: &'static str,
        message: String,
    },

    /// A subtype discriminator has no registered structure.
    #[error("{structure}.{field}: no subtype registered for {discriminator} = {value}")]
    UnknownSubtype {
        structure: &'static str,
        field: String,
        discriminator: &'static str,
        value: i64,
    },

    /// A structure contains itself, directly or indirectly.
    #[error("recursive schema: {path}")]
    RecursiveSchema { path: String },
}

/// Result type alias for format operations.
pub type Result<T> = std::result::Result<T, FormatError>;

impl FormatError {
    /// Create an UnsupportedVersion error.
    pub fn unsupported_version(structure: &'static str, version: &GameVersion) -> Self {
        Self::UnsupportedVersion {
            structure,
            version: version.clone(),
        }
    }

    /// Create an InvalidSchema error.
    pub fn invalid_schema(structure: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            structure,
            message: message.into(),
        }
    }

    /// Create a MissingLengthReference error.
    pub fn missing_length_reference(
        structure: &'static str,
        field: impl Into<String>,
        reference: &'static str,
    ) -> Self {
        Self::MissingLengthReference {
            structure,
            field: field.into(),
            reference,
        }
    }

    /// Whether this error was caused by running out of input bytes.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}
