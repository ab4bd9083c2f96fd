//! Decoded tree types.
//!
//! A [`ParsedNode`] holds the stored fields of one structure instance in
//! declaration order. Nested structure arrays keep one slot per declared
//! element; slots whose presence gate was zero are `None`.

use serde::{Deserialize, Serialize};

/// One decoded structure instance.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
pub struct ParsedNode {
    /// Name of the structure type this node was decoded with.
    pub structure: String,
    /// Stored fields in declaration order.
    pub fields: Vec<Field>,
}

/// A stored field of a [`ParsedNode`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
pub struct Field {
    pub name: String,
    /// Part of the subset intended for downstream consumers.
    pub exported: bool,
    pub value: Value,
}

/// Decoded field value.
///
/// Floats compare by bit pattern, so a tree holding NaN equals its copy.
#[derive(
    Debug,
    Clone,
    Serialize,
    Deserialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[rkyv(serialize_bounds(
    __S: rkyv::ser::Writer + rkyv::ser::Allocator,
    __S::Error: rkyv::rancor::Source,
))]
#[rkyv(deserialize_bounds(__D::Error: rkyv::rancor::Source))]
#[rkyv(bytecheck(bounds(
    __C: rkyv::validation::ArchiveContext,
    __C::Error: rkyv::rancor::Source,
)))]
pub enum Value {
    /// Signed integer or opaque id.
    Int(i64),
    /// Unsigned 64-bit integer.
    UInt(u64),
    Float(f64),
    Text(String),
    IntArray(Vec<i64>),
    FloatArray(Vec<f64>),
    /// Pointer/offset values. Only ever compared to zero or counted.
    IdArray(Vec<i64>),
    /// Nested structures; `None` marks an element absent from the source.
    Nodes(#[rkyv(omit_bounds)] Vec<Option<ParsedNode>>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::IntArray(a), Self::IntArray(b)) | (Self::IdArray(a), Self::IdArray(b)) => a == b,
            (Self::FloatArray(a), Self::FloatArray(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            (Self::Nodes(a), Self::Nodes(b)) => a == b,
            _ => false,
        }
    }
}

impl ParsedNode {
    /// Create an empty node for the given structure type.
    pub fn new(structure: impl Into<String>) -> Self {
        Self {
            structure: structure.into(),
            fields: Vec::new(),
        }
    }

    /// Append a stored field.
    pub fn push(&mut self, name: impl Into<String>, exported: bool, value: Value) {
        self.fields.push(Field {
            name: name.into(),
            exported,
            value,
        });
    }

    /// Look up a field value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Integer value of a field, if present and integral.
    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    /// Text value of a field, if present and textual.
    #[must_use]
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    /// Nested nodes of a container field.
    #[must_use]
    pub fn get_nodes(&self, name: &str) -> Option<&[Option<ParsedNode>]> {
        self.get(name).and_then(Value::as_nodes)
    }

    /// Take ownership of a container field's nodes, removing the field.
    pub fn take_nodes(&mut self, name: &str) -> Option<Vec<Option<ParsedNode>>> {
        let pos = self
            .fields
            .iter()
            .position(|field| field.name == name && matches!(field.value, Value::Nodes(_)))?;
        match self.fields.remove(pos).value {
            Value::Nodes(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// Fields flagged for downstream consumption.
    pub fn exported_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.exported)
    }

    /// Number of stored fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the node has no stored fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Value {
    /// Integer view of scalar integers.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Element view of id and integer arrays.
    #[must_use]
    pub fn as_int_slice(&self) -> Option<&[i64]> {
        match self {
            Self::IntArray(v) | Self::IdArray(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_nodes(&self) -> Option<&[Option<ParsedNode>]> {
        match self {
            Self::Nodes(v) => Some(v),
            _ => None,
        }
    }

    /// Short name of the value kind, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::IntArray(_) => "int array",
            Self::FloatArray(_) => "float array",
            Self::IdArray(_) => "id array",
            Self::Nodes(_) => "nodes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedNode {
        let mut sound = ParsedNode::new("sound");
        sound.push("sound_id", true, Value::Int(7));
        sound.push("filename", true, Value::Text("arrow.wav".into()));

        let mut root = ParsedNode::new("empiresdat");
        root.push("sound_count", true, Value::UInt(2));
        root.push("graphic_ptrs", false, Value::IdArray(vec![0, 0x1234]));
        root.push("sounds", true, Value::Nodes(vec![Some(sound), None]));
        root
    }

    #[test]
    fn test_lookup_helpers() {
        let root = sample();
        assert_eq!(root.get_int("sound_count"), Some(2));
        assert_eq!(root.get_nodes("sounds").map(<[_]>::len), Some(2));
        assert!(root.get("missing").is_none());
        assert_eq!(root.exported_fields().count(), 2);
    }

    #[test]
    fn test_take_nodes_keeps_non_container() {
        let mut root = sample();
        assert!(root.take_nodes("sound_count").is_none());
        assert_eq!(root.get_int("sound_count"), Some(2));

        let sounds = root.take_nodes("sounds").unwrap();
        assert_eq!(sounds.len(), 2);
        assert!(root.get("sounds").is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let root = sample();
        let json = serde_json::to_string(&root).expect("serialize node");
        let back: ParsedNode = serde_json::from_str(&json).expect("deserialize node");
        assert_eq!(back, root);
    }

    #[test]
    fn test_floats_compare_by_bits() {
        let nan = f64::from(f32::from_le_bytes([0, 0, 0xc0, 0x7f]));
        assert_eq!(Value::Float(nan), Value::Float(nan));
        assert_eq!(
            Value::FloatArray(vec![1.5, nan]),
            Value::FloatArray(vec![1.5, nan])
        );
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
        assert_ne!(Value::IntArray(vec![1]), Value::IdArray(vec![1]));
    }

    #[test]
    fn test_rkyv_roundtrip() {
        let root = sample();
        let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(&root).expect("archive node");
        let back = rkyv::from_bytes::<ParsedNode, rkyv::rancor::Error>(&bytes)
            .expect("unarchive node");
        assert_eq!(back, root);
    }
}
