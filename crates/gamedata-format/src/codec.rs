//! Primitive codec.
//!
//! Fixed-width little-endian scalars and fixed-length text over a byte
//! cursor. All game data files use little-endian byte order.

use std::fmt;

use gamedata_model::Value;

use crate::error::{FormatError, Result};

/// Fixed-width primitive type of a field or array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl Primitive {
    /// Width in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    /// C type name as used in the format documentation.
    #[must_use]
    pub const fn c_name(self) -> &'static str {
        match self {
            Self::I8 => "int8_t",
            Self::U8 => "uint8_t",
            Self::I16 => "int16_t",
            Self::U16 => "uint16_t",
            Self::I32 => "int32_t",
            Self::U32 => "uint32_t",
            Self::I64 => "int64_t",
            Self::U64 => "uint64_t",
            Self::F32 => "float",
            Self::F64 => "double",
        }
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_name())
    }
}

/// A decoded primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Scalar {
    /// Integer value widened for length and gate checks.
    #[must_use]
    pub fn as_i128(self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(i128::from(v)),
            Self::UInt(v) => Some(i128::from(v)),
            Self::Float(_) => None,
        }
    }

    /// Integer value as stored in arrays. `u64` values above `i64::MAX`
    /// wrap, which only affects opaque ids.
    #[must_use]
    pub fn as_array_int(self) -> i64 {
        match self {
            Self::Int(v) => v,
            Self::UInt(v) => v as i64,
            Self::Float(v) => v as i64,
        }
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::UInt(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Int(v) => Value::Int(v),
            // Everything narrower than u64 fits an i64.
            Scalar::UInt(v) => i64::try_from(v).map_or(Value::UInt(v), Value::Int),
            Scalar::Float(v) => Value::Float(v),
        }
    }
}

/// Read cursor over a byte slice. All reads are little-endian.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Create a cursor positioned at an absolute offset.
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    /// Current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Remaining bytes from current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Whether we've reached the end.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Skip `n` bytes forward.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    /// Read a slice of `n` bytes without copying.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.read_array()?))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(u8::from_le_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Read one primitive of the given type.
    pub fn read_primitive(&mut self, primitive: Primitive) -> Result<Scalar> {
        Ok(match primitive {
            Primitive::I8 => Scalar::Int(self.read_i8()?.into()),
            Primitive::U8 => Scalar::UInt(self.read_u8()?.into()),
            Primitive::I16 => Scalar::Int(self.read_i16()?.into()),
            Primitive::U16 => Scalar::UInt(self.read_u16()?.into()),
            Primitive::I32 => Scalar::Int(self.read_i32()?.into()),
            Primitive::U32 => Scalar::UInt(self.read_u32()?.into()),
            Primitive::I64 => Scalar::Int(self.read_i64()?),
            Primitive::U64 => Scalar::UInt(self.read_u64()?),
            Primitive::F32 => Scalar::Float(self.read_f32()?.into()),
            Primitive::F64 => Scalar::Float(self.read_f64()?),
        })
    }

    /// Peek one primitive without advancing.
    pub fn peek_primitive(&self, primitive: Primitive) -> Result<Scalar> {
        self.clone().read_primitive(primitive)
    }

    /// Read a fixed-length text field of `len` bytes.
    ///
    /// The value ends at the first NUL byte; the rest of the field is
    /// padding. Bytes that are not valid UTF-8 are replaced.
    pub fn read_text(&mut self, len: usize) -> Result<String> {
        let bytes = self.read_bytes(len)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(FormatError::TruncatedInput {
                offset: self.pos,
                need: n,
                have: self.remaining(),
            });
        }
        Ok(())
    }
}

/// Writer that builds a byte buffer. All writes are little-endian.
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_zeros(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    pub fn write_i8(&mut self, v: i8) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_i16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Write an integer with the width of the given primitive, truncating
    /// to that width. Float primitives store the value converted.
    pub fn write_primitive(&mut self, primitive: Primitive, value: i64) {
        match primitive {
            Primitive::I8 | Primitive::U8 => self.buf.push(value as u8),
            Primitive::I16 | Primitive::U16 => self.write_u16(value as u16),
            Primitive::I32 | Primitive::U32 => self.write_u32(value as u32),
            Primitive::I64 | Primitive::U64 => self.buf.extend_from_slice(&value.to_le_bytes()),
            Primitive::F32 => self.write_f32(value as f32),
            Primitive::F64 => self.buf.extend_from_slice(&(value as f64).to_le_bytes()),
        }
    }

    /// Write fixed-length text, NUL padded (or truncated) to `len` bytes.
    pub fn write_text(&mut self, value: &str, len: usize) {
        let bytes = value.as_bytes();
        let n = bytes.len().min(len);
        self.buf.extend_from_slice(&bytes[..n]);
        self.write_zeros(len - n);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [0xff, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0x00, 0x00, 0x80, 0x3f];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_primitive(Primitive::I8).unwrap(), Scalar::Int(-1));
        assert_eq!(
            cursor.read_primitive(Primitive::U16).unwrap(),
            Scalar::UInt(0x1234)
        );
        assert_eq!(
            cursor.read_primitive(Primitive::I32).unwrap(),
            Scalar::Int(0x1234_5678)
        );
        assert_eq!(
            cursor.read_primitive(Primitive::F32).unwrap(),
            Scalar::Float(1.0)
        );
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_truncated_read_reports_offset() {
        let data = [1, 2, 3];
        let mut cursor = Cursor::new(&data);
        cursor.skip(2).unwrap();
        let err = cursor.read_u16().unwrap_err();
        assert_eq!(
            err,
            FormatError::TruncatedInput {
                offset: 2,
                need: 2,
                have: 1,
            }
        );
        // A failed read does not move the cursor.
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_read_text_stops_at_nul() {
        let data = b"VER 5.7\0\0\0garbage";
        let mut cursor = Cursor::new(data);
        assert_eq!(cursor.read_text(10).unwrap(), "VER 5.7");
        assert_eq!(cursor.position(), 10);
        assert_eq!(cursor.read_text(7).unwrap(), "garbage");
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = [70, 0];
        let cursor = Cursor::at(&data, 0);
        assert_eq!(cursor.peek_primitive(Primitive::I8).unwrap(), Scalar::Int(70));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_writer_matches_reader() {
        let mut writer = Writer::new();
        writer.write_text("arrow", 13);
        writer.write_primitive(Primitive::I16, -5);
        writer.write_primitive(Primitive::U32, 70_000);
        writer.write_f32(2.5);
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 13 + 2 + 4 + 4);

        let mut cursor = Cursor::new(&bytes);
        assert_eq!(cursor.read_text(13).unwrap(), "arrow");
        assert_eq!(cursor.read_i16().unwrap(), -5);
        assert_eq!(cursor.read_u32().unwrap(), 70_000);
        assert_eq!(cursor.read_f32().unwrap(), 2.5);
    }

    #[test]
    fn test_scalar_to_value() {
        assert_eq!(Value::from(Scalar::UInt(3)), Value::Int(3));
        assert_eq!(Value::from(Scalar::UInt(u64::MAX)), Value::UInt(u64::MAX));
        assert_eq!(Value::from(Scalar::Float(0.5)), Value::Float(0.5));
    }
}
