//! Storage kinds: how a field's bytes map to a value.

use std::fmt;

use crate::codec::Primitive;
use crate::descriptor::NestedArray;
use crate::schema::StructRef;

/// How one field is stored.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageKind {
    /// Integer or float scalar.
    Scalar(Primitive),
    /// Opaque id or pointer scalar.
    Id(Primitive),
    /// Fixed-length text.
    Text { length: LengthSource },
    /// Array of raw integers.
    IntArray {
        element: Primitive,
        length: LengthSource,
    },
    /// Array of floats.
    FloatArray {
        element: Primitive,
        length: LengthSource,
    },
    /// Array of opaque pointer/offset values. They are never dereferenced,
    /// only compared to zero (presence gates) or counted.
    IdArray {
        element: Primitive,
        length: LengthSource,
    },
    /// Array of nested structures.
    ContainerArray(NestedArray),
}

impl StorageKind {
    /// The element count source, for array and text kinds.
    #[must_use]
    pub fn length(&self) -> Option<&LengthSource> {
        match self {
            Self::Scalar(_) | Self::Id(_) => None,
            Self::Text { length }
            | Self::IntArray { length, .. }
            | Self::FloatArray { length, .. }
            | Self::IdArray { length, .. } => Some(length),
            Self::ContainerArray(nested) => Some(&nested.length),
        }
    }

    /// Short kind name used in fingerprints and diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Id(_) => "id",
            Self::Text { .. } => "text",
            Self::IntArray { .. } => "int_array",
            Self::FloatArray { .. } => "float_array",
            Self::IdArray { .. } => "id_array",
            Self::ContainerArray(_) => "container_array",
        }
    }
}

impl From<Primitive> for StorageKind {
    fn from(primitive: Primitive) -> Self {
        Self::Scalar(primitive)
    }
}

impl From<NestedArray> for StorageKind {
    fn from(nested: NestedArray) -> Self {
        Self::ContainerArray(nested)
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(p) => write!(f, "{p}"),
            Self::Id(p) => write!(f, "id {p}"),
            Self::Text { length } => write!(f, "char[{length}]"),
            Self::IntArray { element, length } | Self::FloatArray { element, length } => {
                write!(f, "{element}[{length}]")
            }
            Self::IdArray { element, length } => write!(f, "id {element}[{length}]"),
            Self::ContainerArray(nested) => write!(f, "{nested}"),
        }
    }
}

/// Where an array's element count comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LengthSource {
    /// A constant count.
    Literal(usize),
    /// The value of a sibling field decoded earlier, or of an argument
    /// forwarded by the parent structure.
    Field(&'static str),
    /// The value of `length` if the `flag` field is non-zero, else zero.
    FieldIfSet {
        flag: &'static str,
        length: &'static str,
    },
}

impl LengthSource {
    /// Field the count is read from, if any.
    #[must_use]
    pub const fn reference(&self) -> Option<&'static str> {
        match self {
            Self::Literal(_) => None,
            Self::Field(name) | Self::FieldIfSet { length: name, .. } => Some(name),
        }
    }
}

impl From<usize> for LengthSource {
    fn from(count: usize) -> Self {
        Self::Literal(count)
    }
}

impl From<&'static str> for LengthSource {
    fn from(name: &'static str) -> Self {
        Self::Field(name)
    }
}

impl fmt::Display for LengthSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(count) => write!(f, "{count}"),
            Self::Field(name) => f.write_str(name),
            Self::FieldIfSet { flag, length } => write!(f, "{flag} ? {length} : 0"),
        }
    }
}

/// Structure used for the elements of a container array.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementSchema {
    /// Every element has the same structure.
    Struct(StructRef),
    /// Each element starts with a discriminator that selects its structure.
    /// The discriminator is peeked, not consumed: the selected structure
    /// reads it again as its own first field.
    Subtype {
        discriminator: &'static str,
        primitive: Primitive,
        variants: &'static [(i64, StructRef)],
    },
}

impl ElementSchema {
    /// Structure registered for a discriminator value.
    #[must_use]
    pub fn variant(&self, value: i64) -> Option<StructRef> {
        match self {
            Self::Struct(structure) => Some(*structure),
            Self::Subtype { variants, .. } => variants
                .iter()
                .find(|(key, _)| *key == value)
                .map(|(_, structure)| *structure),
        }
    }
}

impl fmt::Display for ElementSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct(structure) => f.write_str(structure.name()),
            Self::Subtype {
                discriminator,
                primitive,
                variants,
            } => {
                write!(f, "subtype<{discriminator}: {primitive}>(")?;
                for (i, (key, structure)) in variants.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={}", structure.name())?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_source_conversions() {
        assert_eq!(LengthSource::from(19), LengthSource::Literal(19));
        assert_eq!(
            LengthSource::from("terrain_count"),
            LengthSource::Field("terrain_count")
        );
    }

    #[test]
    fn test_kind_display() {
        let kind = StorageKind::IdArray {
            element: Primitive::I32,
            length: "terrain_restriction_count".into(),
        };
        assert_eq!(kind.to_string(), "id int32_t[terrain_restriction_count]");

        let kind = StorageKind::Text {
            length: LengthSource::Literal(8),
        };
        assert_eq!(kind.to_string(), "char[8]");

        let gated = LengthSource::FieldIfSet {
            flag: "attack_sound_used",
            length: "angle_count",
        };
        assert_eq!(gated.to_string(), "attack_sound_used ? angle_count : 0");
    }

    #[test]
    fn test_length_accessor() {
        assert!(StorageKind::Scalar(Primitive::U8).length().is_none());
        let kind = StorageKind::IntArray {
            element: Primitive::U8,
            length: LengthSource::Literal(25),
        };
        assert_eq!(kind.length(), Some(&LengthSource::Literal(25)));
    }
}
