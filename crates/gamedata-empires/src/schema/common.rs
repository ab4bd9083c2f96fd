//! Helpers shared by the structure schemas.

use gamedata_format::descriptor::{read, read_export, skip, text};
use gamedata_format::{FieldDescriptor, FormatError, Primitive, Result};
use gamedata_model::{GameEdition, GameVersion};

/// Fail for editions no layout has been written for.
pub(crate) fn require_layout(structure: &'static str, version: &GameVersion) -> Result<()> {
    match version.edition {
        GameEdition::Ror
        | GameEdition::Aoc
        | GameEdition::Swgb
        | GameEdition::HdEdition
        | GameEdition::Aoe1De
        | GameEdition::Aoe2De => Ok(()),
        GameEdition::Aok => Err(FormatError::unsupported_version(structure, version)),
    }
}

/// Length-prefixed string of the definitive editions.
///
/// The first length is a debug copy of the second and is not used.
pub(crate) fn debug_string(
    debug_len: &'static str,
    len: &'static str,
    name: &'static str,
) -> [FieldDescriptor; 3] {
    [
        skip(debug_len, Primitive::U16),
        read(len, Primitive::U16),
        read(name, text(len)),
    ]
}

/// Exported variant of [`debug_string`].
pub(crate) fn debug_string_export(
    debug_len: &'static str,
    len: &'static str,
    name: &'static str,
) -> [FieldDescriptor; 3] {
    [
        skip(debug_len, Primitive::U16),
        read_export(len, Primitive::U16),
        read_export(name, text(len)),
    ]
}
