//! Declarative binary schema interpreter for Genie engine game data.
//!
//! A structure's layout is described by an ordered list of
//! [`FieldDescriptor`]s that is *computed* per [`GameVersion`]: the same
//! conceptual record changed field widths, field presence and array lengths
//! between releases. The [`Decoder`] walks such a list against a byte buffer
//! and produces a [`ParsedNode`] tree.
//!
//! # Layers
//!
//! - [`codec`]: little-endian primitive reads and writes over a byte cursor
//! - [`storage`]: how a field's bytes map to a value
//! - [`descriptor`]: one schema entry, plus the builder helpers used to
//!   write schemas
//! - [`schema`]: the [`Structure`] trait implemented by every record type
//! - [`decoder`]: the interpreter
//! - [`fingerprint`]: structural hash of a resolved schema
//!
//! # Example
//!
//! ```
//! use gamedata_format::descriptor::{read, subdata};
//! use gamedata_format::{
//!     Decoder, FieldDescriptor, Primitive, Result, StorageKind, StructRef, Structure,
//! };
//! use gamedata_model::{GameEdition, GameVersion};
//!
//! struct Point;
//!
//! impl Structure for Point {
//!     const NAME: &'static str = "point";
//!     fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
//!         Ok(vec![
//!             read("x", StorageKind::Scalar(Primitive::I16)),
//!             read("y", StorageKind::Scalar(Primitive::I16)),
//!         ])
//!     }
//! }
//!
//! struct Path;
//!
//! impl Structure for Path {
//!     const NAME: &'static str = "path";
//!     fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
//!         Ok(vec![
//!             read("point_count", StorageKind::Scalar(Primitive::U16)),
//!             read("points", subdata::<Point>("point_count")),
//!         ])
//!     }
//! }
//!
//! let data = [2, 0, 1, 0, 2, 0, 3, 0, 4, 0];
//! let mut decoder = Decoder::new(GameVersion::new(GameEdition::Aoc));
//! let (end, node) = decoder.decode_root(&data, StructRef::of::<Path>()).unwrap();
//! assert_eq!(end, data.len());
//! assert_eq!(node.get_int("point_count"), Some(2));
//! ```

pub mod codec;
pub mod decoder;
pub mod descriptor;
mod error;
pub mod fingerprint;
pub mod schema;
pub mod storage;

pub use codec::{Cursor, Primitive, Scalar, Writer};
pub use decoder::{Args, Decoder};
pub use descriptor::{FieldDescriptor, NestedArray, ReadMode};
pub use error::{FormatError, Result};
pub use fingerprint::{SchemaFingerprint, fingerprint, fingerprint_members};
pub use schema::{StructRef, Structure};
pub use storage::{ElementSchema, LengthSource, StorageKind};

pub use gamedata_model::{GameVersion, ParsedNode, Value};
