//! Field descriptors and the helpers schemas are written with.
//!
//! A schema is a `Vec<FieldDescriptor>` built by pushing and extending;
//! an emitted descriptor is never modified afterwards. Branching on the
//! game version therefore only ever adds or leaves out descriptors.
//!
//! ```
//! use gamedata_format::descriptor::{id_array, read, read_export, skip, text};
//! use gamedata_format::{FieldDescriptor, Primitive};
//!
//! let mut members: Vec<FieldDescriptor> = vec![read("versionstr", text(8usize))];
//! members.extend([
//!     read("terrain_restriction_count", Primitive::U16),
//!     read_export("terrain_count", Primitive::U16),
//!     read("float_ptr_terrain_tables", id_array(Primitive::I32, "terrain_restriction_count")),
//!     skip("map_row_offset", Primitive::I32),
//! ]);
//! assert_eq!(members.len(), 5);
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::codec::Primitive;
use crate::error::{FormatError, Result};
use crate::schema::{StructRef, Structure};
use crate::storage::{ElementSchema, LengthSource, StorageKind};

/// What the decoder does with a field after reading it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadMode {
    /// Keep in the sibling map and the output tree.
    Store,
    /// Like `Store`, and flag the field for downstream consumers.
    StoreExported,
    /// Read to keep the cursor aligned; the value has no known meaning.
    Discard,
    /// Read to keep the cursor aligned; the value is known but unused.
    Skip,
}

impl ReadMode {
    /// Whether fields with this mode are retained.
    #[must_use]
    pub const fn is_stored(self) -> bool {
        matches!(self, Self::Store | Self::StoreExported)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Store => "read",
            Self::StoreExported => "read_export",
            Self::Discard => "discard",
            Self::Skip => "skip",
        }
    }
}

/// One schema entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub mode: ReadMode,
    /// Required for stored fields; later fields refer to it by name.
    pub name: Option<&'static str>,
    pub kind: StorageKind,
}

impl FieldDescriptor {
    pub fn new(mode: ReadMode, name: Option<&'static str>, kind: impl Into<StorageKind>) -> Self {
        Self {
            mode,
            name,
            kind: kind.into(),
        }
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        self.name.unwrap_or("<unnamed>")
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.mode.as_str(),
            self.name.unwrap_or("_"),
            self.kind
        )
    }
}

/// Repeated block of nested structures.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedArray {
    pub element: ElementSchema,
    pub length: LengthSource,
    /// Sibling fields forwarded into each element's decode context.
    pub passed_args: Vec<&'static str>,
    /// Earlier id array of the same length. A zero entry means the element
    /// at that index is absent from the source and occupies no bytes.
    pub presence_gate: Option<&'static str>,
}

impl NestedArray {
    pub fn new(element: ElementSchema, length: impl Into<LengthSource>) -> Self {
        Self {
            element,
            length: length.into(),
            passed_args: Vec::new(),
            presence_gate: None,
        }
    }

    /// Forward sibling values into each element's context.
    #[must_use]
    pub fn passed_args(mut self, names: &[&'static str]) -> Self {
        self.passed_args.extend_from_slice(names);
        self
    }

    /// Gate each element on the matching entry of an id array.
    #[must_use]
    pub fn offset_to(mut self, gate: &'static str) -> Self {
        self.presence_gate = Some(gate);
        self
    }
}

impl fmt::Display for NestedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.element, self.length)?;
        if !self.passed_args.is_empty() {
            write!(f, " args({})", self.passed_args.join(", "))?;
        }
        if let Some(gate) = self.presence_gate {
            write!(f, " gated_by({gate})")?;
        }
        Ok(())
    }
}

/// Stored field.
pub fn read(name: &'static str, kind: impl Into<StorageKind>) -> FieldDescriptor {
    FieldDescriptor::new(ReadMode::Store, Some(name), kind)
}

/// Stored field that is part of the exported subset.
pub fn read_export(name: &'static str, kind: impl Into<StorageKind>) -> FieldDescriptor {
    FieldDescriptor::new(ReadMode::StoreExported, Some(name), kind)
}

/// Unnamed field of unknown meaning.
pub fn discard(kind: impl Into<StorageKind>) -> FieldDescriptor {
    FieldDescriptor::new(ReadMode::Discard, None, kind)
}

/// Named field of unknown meaning.
pub fn discard_named(name: &'static str, kind: impl Into<StorageKind>) -> FieldDescriptor {
    FieldDescriptor::new(ReadMode::Discard, Some(name), kind)
}

/// Known field that is not retained.
pub fn skip(name: &'static str, kind: impl Into<StorageKind>) -> FieldDescriptor {
    FieldDescriptor::new(ReadMode::Skip, Some(name), kind)
}

/// Opaque id scalar.
pub fn id(primitive: Primitive) -> StorageKind {
    StorageKind::Id(primitive)
}

/// Fixed-length text.
pub fn text(length: impl Into<LengthSource>) -> StorageKind {
    StorageKind::Text {
        length: length.into(),
    }
}

pub fn int_array(element: Primitive, length: impl Into<LengthSource>) -> StorageKind {
    StorageKind::IntArray {
        element,
        length: length.into(),
    }
}

pub fn float_array(element: Primitive, length: impl Into<LengthSource>) -> StorageKind {
    StorageKind::FloatArray {
        element,
        length: length.into(),
    }
}

pub fn id_array(element: Primitive, length: impl Into<LengthSource>) -> StorageKind {
    StorageKind::IdArray {
        element,
        length: length.into(),
    }
}

/// Array of `T` structures.
pub fn subdata<T: Structure>(length: impl Into<LengthSource>) -> NestedArray {
    NestedArray::new(ElementSchema::Struct(StructRef::of::<T>()), length)
}

/// Array of structures selected per element by a leading discriminator.
pub fn subtypes(
    discriminator: &'static str,
    primitive: Primitive,
    variants: &'static [(i64, StructRef)],
    length: impl Into<LengthSource>,
) -> NestedArray {
    NestedArray::new(
        ElementSchema::Subtype {
            discriminator,
            primitive,
            variants,
        },
        length,
    )
}

/// Check the invariants of one structure's descriptor list.
///
/// - stored fields are named
/// - names are unique
/// - a presence gate names an earlier, stored id array
pub fn validate_members(structure: &'static str, members: &[FieldDescriptor]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut id_arrays = HashSet::new();

    for member in members {
        if member.mode.is_stored() && member.name.is_none() {
            return Err(FormatError::invalid_schema(
                structure,
                format!("stored field of kind {} has no name", member.kind),
            ));
        }

        if let StorageKind::ContainerArray(nested) = &member.kind {
            if let Some(gate) = nested.presence_gate
                && !id_arrays.contains(gate)
            {
                return Err(FormatError::invalid_schema(
                    structure,
                    format!(
                        "presence gate '{gate}' of '{}' is not an earlier stored id array",
                        member.display_name()
                    ),
                ));
            }
        }

        if let Some(name) = member.name {
            if !seen.insert(name) {
                return Err(FormatError::invalid_schema(
                    structure,
                    format!("duplicate field name '{name}'"),
                ));
            }
            if member.mode.is_stored() && matches!(member.kind, StorageKind::IdArray { .. }) {
                id_arrays.insert(name);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_display() {
        let member = read_export("terrain_count", Primitive::U16);
        assert_eq!(member.to_string(), "read_export terrain_count uint16_t");

        let member = discard(Primitive::I32);
        assert_eq!(member.to_string(), "discard _ int32_t");
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let members = vec![
            read("count", Primitive::U16),
            read("count", Primitive::U32),
        ];
        let err = validate_members("test", &members).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid schema for test: duplicate field name 'count'"
        );
    }

    #[test]
    fn test_validate_rejects_unnamed_store() {
        let members = vec![FieldDescriptor::new(ReadMode::Store, None, Primitive::U8)];
        assert!(matches!(
            validate_members("test", &members),
            Err(FormatError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_discarded_fields_may_share_absence_of_name() {
        let members = vec![
            discard(Primitive::I32),
            discard(Primitive::I32),
            skip("padding1", Primitive::I16),
        ];
        assert!(validate_members("test", &members).is_ok());
    }
}
