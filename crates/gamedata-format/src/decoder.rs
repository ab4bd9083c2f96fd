//! Schema interpreter.
//!
//! The decoder walks a structure's descriptor list in order. Each stored
//! field is appended to the node being built, and that node doubles as the
//! sibling map: later descriptors resolve lengths, presence gates and
//! forwarded arguments by looking up earlier fields in it. Nothing is ever
//! overwritten, so the lookup only sees values decoded before the current
//! descriptor.

use std::collections::HashMap;
use std::sync::Arc;

use gamedata_model::{GameVersion, ParsedNode, Value};
use tracing::{debug, trace};

use crate::codec::{Cursor, Primitive};
use crate::descriptor::{FieldDescriptor, NestedArray, ReadMode};
use crate::error::{FormatError, Result};
use crate::schema::StructRef;
use crate::storage::{ElementSchema, LengthSource, StorageKind};

/// Upper bound on the up-front allocation for a container array.
const MAX_PREALLOCATED_NODES: usize = 1024;

/// Values forwarded by a parent structure into each child's context.
pub type Args = HashMap<&'static str, Value>;

/// Interpreter for one game version.
///
/// Descriptor lists are built once per structure type and reused for every
/// instance decoded by this decoder. A decoder is not shared between
/// threads; independent decodes use independent decoders.
#[derive(Debug)]
pub struct Decoder {
    version: GameVersion,
    schemas: HashMap<&'static str, Arc<[FieldDescriptor]>>,
}

impl Decoder {
    pub fn new(version: GameVersion) -> Self {
        Self {
            version,
            schemas: HashMap::new(),
        }
    }

    /// Version the schemas are built for.
    pub fn version(&self) -> &GameVersion {
        &self.version
    }

    /// Descriptor list of a structure for this decoder's version.
    pub fn schema(&mut self, structure: StructRef) -> Result<Arc<[FieldDescriptor]>> {
        if let Some(members) = self.schemas.get(structure.name()) {
            return Ok(Arc::clone(members));
        }
        let members: Arc<[FieldDescriptor]> = structure.members(&self.version)?.into();
        self.schemas.insert(structure.name(), Arc::clone(&members));
        Ok(members)
    }

    /// Decode a top-level structure starting at offset 0.
    pub fn decode_root(&mut self, data: &[u8], structure: StructRef) -> Result<(usize, ParsedNode)> {
        debug!(
            structure = structure.name(),
            version = %self.version,
            len = data.len(),
            "decoding root structure"
        );
        self.decode(data, 0, structure, &Args::new())
    }

    /// Decode one instance of `structure` at `offset`.
    ///
    /// Returns the offset just past the instance and the decoded node.
    pub fn decode(
        &mut self,
        data: &[u8],
        offset: usize,
        structure: StructRef,
        args: &Args,
    ) -> Result<(usize, ParsedNode)> {
        let members = self.schema(structure)?;
        self.decode_members(data, offset, structure.name(), &members, args)
    }

    /// Decode an explicit descriptor list.
    pub fn decode_members(
        &mut self,
        data: &[u8],
        offset: usize,
        structure: &'static str,
        members: &[FieldDescriptor],
        args: &Args,
    ) -> Result<(usize, ParsedNode)> {
        let mut cursor = Cursor::at(data, offset);
        let mut ctx = DecodeContext::new(structure, args);

        for member in members {
            let value = self.read_member(data, &mut cursor, &ctx, member)?;
            match member.name {
                Some(name) if member.mode.is_stored() => ctx.store(member, name, value),
                _ => {}
            }
        }

        Ok((cursor.position(), ctx.node))
    }

    fn read_member<'d>(
        &mut self,
        data: &'d [u8],
        cursor: &mut Cursor<'d>,
        ctx: &DecodeContext<'_>,
        member: &FieldDescriptor,
    ) -> Result<Value> {
        Ok(match &member.kind {
            StorageKind::Scalar(primitive) | StorageKind::Id(primitive) => {
                cursor.read_primitive(*primitive)?.into()
            }
            StorageKind::Text { length } => {
                let len = ctx.resolve_length(member, length)?;
                Value::Text(cursor.read_text(len)?)
            }
            StorageKind::IntArray { element, length } => {
                let count = ctx.resolve_length(member, length)?;
                Value::IntArray(read_ints(cursor, *element, count)?)
            }
            StorageKind::IdArray { element, length } => {
                let count = ctx.resolve_length(member, length)?;
                Value::IdArray(read_ints(cursor, *element, count)?)
            }
            StorageKind::FloatArray { element, length } => {
                let count = ctx.resolve_length(member, length)?;
                ensure_array(cursor, *element, count)?;
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(cursor.read_primitive(*element)?.as_f64());
                }
                Value::FloatArray(values)
            }
            StorageKind::ContainerArray(nested) => {
                Value::Nodes(self.read_nested(data, cursor, ctx, member, nested)?)
            }
        })
    }

    fn read_nested<'d>(
        &mut self,
        data: &'d [u8],
        cursor: &mut Cursor<'d>,
        ctx: &DecodeContext<'_>,
        member: &FieldDescriptor,
        nested: &NestedArray,
    ) -> Result<Vec<Option<ParsedNode>>> {
        let count = ctx.resolve_length(member, &nested.length)?;
        let gate = match nested.presence_gate {
            Some(gate) => Some(ctx.presence_gate(member, gate, count)?),
            None => None,
        };

        let mut child_args = Args::new();
        for &name in &nested.passed_args {
            let value = ctx.lookup(name).ok_or_else(|| {
                FormatError::missing_length_reference(ctx.structure, member.display_name(), name)
            })?;
            child_args.insert(name, value.clone());
        }

        trace!(
            structure = ctx.structure,
            field = member.display_name(),
            count,
            gated = gate.is_some(),
            offset = cursor.position(),
            "decoding container array"
        );

        // An ungated count larger than the remaining input is only valid
        // if every element occupies bytes.
        let unbounded = gate.is_none() && count > cursor.remaining();
        let mut nodes = Vec::with_capacity(count.min(MAX_PREALLOCATED_NODES));
        for index in 0..count {
            if gate.is_some_and(|gate| gate[index] == 0) {
                nodes.push(None);
                continue;
            }
            let structure = element_structure(&nested.element, cursor, ctx, member)?;
            let start = cursor.position();
            let (end, node) = self.decode(data, start, structure, &child_args)?;
            if unbounded && end == start {
                return Err(FormatError::InvalidLength {
                    structure: ctx.structure,
                    field: member.display_name().to_string(),
                    reference: nested.length.reference().unwrap_or("<literal>"),
                    value: count as i128,
                });
            }
            *cursor = Cursor::at(data, end);
            nodes.push(Some(node));
        }
        Ok(nodes)
    }
}

/// Per-instance decode state: the node under construction, which is also
/// the append-only sibling map, and the arguments forwarded by the parent.
struct DecodeContext<'a> {
    structure: &'static str,
    node: ParsedNode,
    index: HashMap<&'static str, usize>,
    args: &'a Args,
}

impl<'a> DecodeContext<'a> {
    fn new(structure: &'static str, args: &'a Args) -> Self {
        Self {
            structure,
            node: ParsedNode::new(structure),
            index: HashMap::new(),
            args,
        }
    }

    fn store(&mut self, member: &FieldDescriptor, name: &'static str, value: Value) {
        let exported = member.mode == ReadMode::StoreExported;
        self.index.insert(name, self.node.fields.len());
        self.node.push(name, exported, value);
    }

    /// Sibling value first, then forwarded argument.
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.index
            .get(name)
            .map(|&pos| &self.node.fields[pos].value)
            .or_else(|| self.args.get(name))
    }

    fn resolve_length(&self, member: &FieldDescriptor, source: &LengthSource) -> Result<usize> {
        match *source {
            LengthSource::Literal(count) => Ok(count),
            LengthSource::Field(reference) => self.length_of(member, reference),
            LengthSource::FieldIfSet { flag, length } => {
                if self.int_of(member, flag)? == 0 {
                    Ok(0)
                } else {
                    self.length_of(member, length)
                }
            }
        }
    }

    fn length_of(&self, member: &FieldDescriptor, reference: &'static str) -> Result<usize> {
        let value = self.int_of(member, reference)?;
        usize::try_from(value).map_err(|_| FormatError::InvalidLength {
            structure: self.structure,
            field: member.display_name().to_string(),
            reference,
            value,
        })
    }

    fn int_of(&self, member: &FieldDescriptor, reference: &'static str) -> Result<i128> {
        let value = self.lookup(reference).ok_or_else(|| {
            FormatError::missing_length_reference(self.structure, member.display_name(), reference)
        })?;
        match value {
            Value::Int(v) => Ok(i128::from(*v)),
            Value::UInt(v) => Ok(i128::from(*v)),
            other => Err(FormatError::invalid_schema(
                self.structure,
                format!(
                    "'{}' refers to '{reference}', a {} field, as a length",
                    member.display_name(),
                    other.kind_name()
                ),
            )),
        }
    }

    fn presence_gate(
        &self,
        member: &FieldDescriptor,
        gate: &'static str,
        count: usize,
    ) -> Result<&[i64]> {
        let mismatch = |message: String| FormatError::PresenceGateMismatch {
            structure: self.structure,
            field: member.display_name().to_string(),
            gate,
            message,
        };
        match self.lookup(gate) {
            Some(Value::IdArray(values)) if values.len() == count => Ok(values),
            Some(Value::IdArray(values)) => Err(mismatch(format!(
                "has {} entries, array has {count}",
                values.len()
            ))),
            Some(other) => Err(mismatch(format!("is a {} field", other.kind_name()))),
            None => Err(mismatch("has not been decoded".to_string())),
        }
    }
}

fn element_structure(
    element: &ElementSchema,
    cursor: &Cursor<'_>,
    ctx: &DecodeContext<'_>,
    member: &FieldDescriptor,
) -> Result<StructRef> {
    match element {
        ElementSchema::Struct(structure) => Ok(*structure),
        &ElementSchema::Subtype {
            discriminator,
            primitive,
            ..
        } => {
            let value = cursor.peek_primitive(primitive)?.as_array_int();
            element
                .variant(value)
                .ok_or_else(|| FormatError::UnknownSubtype {
                    structure: ctx.structure,
                    field: member.display_name().to_string(),
                    discriminator,
                    value,
                })
        }
    }
}

/// Fail before allocating when the array cannot fit in the remaining input.
fn ensure_array(cursor: &Cursor<'_>, element: Primitive, count: usize) -> Result<()> {
    let need = count.saturating_mul(element.width());
    if need > cursor.remaining() {
        return Err(FormatError::TruncatedInput {
            offset: cursor.position(),
            need,
            have: cursor.remaining(),
        });
    }
    Ok(())
}

fn read_ints(cursor: &mut Cursor<'_>, element: Primitive, count: usize) -> Result<Vec<i64>> {
    ensure_array(cursor, element, count)?;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(cursor.read_primitive(element)?.as_array_int());
    }
    Ok(values)
}
