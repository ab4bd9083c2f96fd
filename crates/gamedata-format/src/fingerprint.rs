//! Structural fingerprint of a resolved schema.
//!
//! The fingerprint is a SHA-256 digest over a canonical encoding of the
//! descriptor lists a version resolves to, including every structure
//! reachable through container arrays. Two versions that resolve to the
//! same layout share a fingerprint; any change in field order, storage
//! kind, primitive, literal length, length reference, presence gate or
//! forwarded argument changes it. Lengths read from data never enter it.

use std::collections::HashSet;
use std::fmt;

use gamedata_model::GameVersion;
use sha2::{Digest, Sha256};

use crate::descriptor::{FieldDescriptor, NestedArray};
use crate::error::{FormatError, Result};
use crate::schema::StructRef;
use crate::storage::{ElementSchema, LengthSource, StorageKind};

/// SHA-256 digest identifying a resolved schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaFingerprint([u8; 32]);

impl SchemaFingerprint {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for SchemaFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Fingerprint of `root` and everything it contains, as laid out for
/// `version`.
pub fn fingerprint(root: StructRef, version: &GameVersion) -> Result<SchemaFingerprint> {
    let mut encoder = Encoder::new(version);
    encoder.structure(root)?;
    Ok(encoder.finish())
}

/// Fingerprint of an explicit descriptor list.
pub fn fingerprint_members(
    members: &[FieldDescriptor],
    version: &GameVersion,
) -> Result<SchemaFingerprint> {
    let mut encoder = Encoder::new(version);
    encoder.members(members)?;
    Ok(encoder.finish())
}

/// Depth-first canonical encoder.
///
/// A structure's definition is emitted on first visit only; later
/// references emit just the name. The traversal order is fixed by the
/// descriptor order, so the encoding is deterministic.
struct Encoder<'v> {
    version: &'v GameVersion,
    hasher: Sha256,
    emitted: HashSet<&'static str>,
    stack: Vec<&'static str>,
}

impl<'v> Encoder<'v> {
    fn new(version: &'v GameVersion) -> Self {
        Self {
            version,
            hasher: Sha256::new(),
            emitted: HashSet::new(),
            stack: Vec::new(),
        }
    }

    fn finish(self) -> SchemaFingerprint {
        SchemaFingerprint(self.hasher.finalize().into())
    }

    /// Length-prefixed token, so adjacent tokens cannot run together.
    fn token(&mut self, value: &str) {
        self.hasher.update((value.len() as u32).to_le_bytes());
        self.hasher.update(value.as_bytes());
    }

    fn number(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    fn structure(&mut self, structure: StructRef) -> Result<()> {
        let name = structure.name();
        if self.stack.contains(&name) {
            let mut path = self.stack.join(" -> ");
            path.push_str(" -> ");
            path.push_str(name);
            return Err(FormatError::RecursiveSchema { path });
        }

        self.token("ref");
        self.token(name);
        if !self.emitted.insert(name) {
            return Ok(());
        }

        let members = structure.members(self.version)?;
        self.stack.push(name);
        self.members(&members)?;
        self.stack.pop();
        Ok(())
    }

    fn members(&mut self, members: &[FieldDescriptor]) -> Result<()> {
        self.token("struct");
        self.number(members.len() as u64);
        for member in members {
            self.token(member.mode.as_str());
            self.token(member.name.unwrap_or(""));
            self.kind(&member.kind)?;
        }
        Ok(())
    }

    fn kind(&mut self, kind: &StorageKind) -> Result<()> {
        self.token(kind.kind_name());
        match kind {
            StorageKind::Scalar(primitive) | StorageKind::Id(primitive) => {
                self.token(primitive.c_name());
            }
            StorageKind::Text { length } => self.length(length),
            StorageKind::IntArray { element, length }
            | StorageKind::FloatArray { element, length }
            | StorageKind::IdArray { element, length } => {
                self.token(element.c_name());
                self.length(length);
            }
            StorageKind::ContainerArray(nested) => self.nested(nested)?,
        }
        Ok(())
    }

    fn length(&mut self, length: &LengthSource) {
        match length {
            LengthSource::Literal(count) => {
                self.token("literal");
                self.number(*count as u64);
            }
            LengthSource::Field(name) => {
                self.token("field");
                self.token(name);
            }
            LengthSource::FieldIfSet { flag, length } => {
                self.token("field_if_set");
                self.token(flag);
                self.token(length);
            }
        }
    }

    fn nested(&mut self, nested: &NestedArray) -> Result<()> {
        self.length(&nested.length);
        self.token("args");
        self.number(nested.passed_args.len() as u64);
        for arg in &nested.passed_args {
            self.token(arg);
        }
        self.token("gate");
        self.token(nested.presence_gate.unwrap_or(""));

        match &nested.element {
            ElementSchema::Struct(structure) => self.structure(*structure),
            ElementSchema::Subtype {
                discriminator,
                primitive,
                variants,
            } => {
                self.token("subtype");
                self.token(discriminator);
                self.token(primitive.c_name());
                self.number(variants.len() as u64);
                for (key, structure) in variants.iter() {
                    self.number(*key as u64);
                    self.structure(*structure)?;
                }
                Ok(())
            }
        }
    }
}
