//! Shared data model for decoding Genie engine game data.
//!
//! - [`GameVersion`]: the detected edition plus installed expansions, which
//!   selects the binary layout the decoder uses.
//! - [`ParsedNode`]: the decoded tree. It is plain data, serializable with
//!   serde (JSON export) and rkyv (result cache payload).

pub mod error;
pub mod node;
pub mod version;

pub use error::{Result, VersionError};
pub use node::{Field, ParsedNode, Value};
pub use version::{GameEdition, GameExpansion, GameVersion};
