//! Persistent cache of decoded game data trees.
//!
//! Decoding a full `empires.dat` is cheap but not free; the cache stores
//! the resulting [`ParsedNode`] tree next to the schema fingerprint it was
//! decoded with, so a later run can skip the decode entirely.
//!
//! # File Format
//!
//! ```text
//! +------------------------+
//! | Magic: "GDC\x01"       | 4 bytes - file identification
//! +------------------------+
//! | Version: 1             | 4 bytes - u32 little-endian format version
//! +------------------------+
//! | Schema fingerprint     | 32 bytes - SHA-256 of the resolved schema
//! +------------------------+
//! | rkyv Payload           | Variable - the decoded tree
//! +------------------------+
//! ```
//!
//! # Failure policy
//!
//! [`load`] never fails. Every problem with a cache file, from a missing
//! file to a truncated payload, is reported as [`CacheOutcome::Miss`] with
//! the reason attached, and the caller decodes from source instead.
//! [`store`] reports errors, which callers are expected to log and ignore.

mod error;
mod format;
mod io;

pub use error::{CacheError, Result};
pub use format::{CURRENT_FORMAT_VERSION, HEADER_LEN, MAGIC_BYTES, deserialize_tree, serialize_tree};
pub use io::{CacheOutcome, MissReason, load, store};

pub use gamedata_format::SchemaFingerprint;
pub use gamedata_model::ParsedNode;
