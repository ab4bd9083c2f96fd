//! Structure types and references to them.

use std::fmt;

use gamedata_model::GameVersion;

use crate::descriptor::{FieldDescriptor, validate_members};
use crate::error::Result;

/// A record type of the binary format.
///
/// Implementors compute their field layout for a given version. The
/// function must be pure: calling it twice with the same version returns
/// value-equal lists. Versions without a layout return
/// [`FormatError::UnsupportedVersion`](crate::FormatError::UnsupportedVersion).
pub trait Structure {
    /// Unique structure type name, used in decoded nodes.
    const NAME: &'static str;

    /// One-line description for listings.
    const DESCRIPTION: &'static str = "";

    /// Ordered field descriptors effective for `version`.
    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>>;
}

type MembersFn = fn(&GameVersion) -> Result<Vec<FieldDescriptor>>;

/// Copyable, type-erased reference to a [`Structure`].
///
/// Descriptors refer to element structures through this handle, so schema
/// lists stay plain data.
#[derive(Clone, Copy)]
pub struct StructRef {
    name: &'static str,
    description: &'static str,
    members: MembersFn,
}

impl StructRef {
    /// Reference to the structure type `T`.
    #[must_use]
    pub const fn of<T: Structure>() -> Self {
        Self {
            name: T::NAME,
            description: T::DESCRIPTION,
            members: T::members,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Build and validate the field list for `version`.
    pub fn members(&self, version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let members = (self.members)(version)?;
        validate_members(self.name, &members)?;
        Ok(members)
    }
}

impl PartialEq for StructRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for StructRef {}

impl fmt::Debug for StructRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StructRef").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Primitive;
    use crate::descriptor::read;
    use crate::error::FormatError;
    use gamedata_model::GameEdition;

    struct TileSize;

    impl Structure for TileSize {
        const NAME: &'static str = "tile_size";
        const DESCRIPTION: &'static str = "size of one terrain tile type";

        fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
            if version.edition == GameEdition::Aok {
                return Err(FormatError::unsupported_version(Self::NAME, version));
            }
            Ok(vec![
                read("width", Primitive::I16),
                read("height", Primitive::I16),
                read("delta_y", Primitive::I16),
            ])
        }
    }

    #[test]
    fn test_struct_ref_members() {
        let tile = StructRef::of::<TileSize>();
        assert_eq!(tile.name(), "tile_size");
        assert_eq!(tile.description(), "size of one terrain tile type");
        let members = tile.members(&GameEdition::Aoc.into()).unwrap();
        assert_eq!(members.len(), 3);
    }

    #[test]
    fn test_struct_ref_unsupported() {
        let tile = StructRef::of::<TileSize>();
        let err = tile.members(&GameEdition::Aok.into()).unwrap_err();
        assert!(matches!(err, FormatError::UnsupportedVersion { .. }));
    }

    #[test]
    fn test_struct_ref_equality_by_name() {
        assert_eq!(StructRef::of::<TileSize>(), StructRef::of::<TileSize>());
        assert_eq!(format!("{:?}", StructRef::of::<TileSize>()), "StructRef(\"tile_size\")");
    }
}
