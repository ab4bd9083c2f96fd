//! Cache file framing and payload encoding.

use gamedata_format::SchemaFingerprint;
use gamedata_model::ParsedNode;
use rkyv::util::AlignedVec;

use crate::error::{CacheError, Result};

/// Magic bytes at the start of every cache file.
pub const MAGIC_BYTES: [u8; 4] = [b'G', b'D', b'C', 0x01];

/// Current cache format version.
///
/// Bump this when the layout of [`ParsedNode`] changes. The loader rejects
/// files with a version greater than this.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Magic, format version and fingerprint.
pub const HEADER_LEN: usize = 4 + 4 + 32;

/// Serialize a tree with its schema fingerprint.
pub fn serialize_tree(tree: &ParsedNode, fingerprint: &SchemaFingerprint) -> Result<Vec<u8>> {
    let payload = rkyv::to_bytes::<rkyv::rancor::Error>(tree).map_err(|e| {
        CacheError::Serialization {
            source: Box::new(std::io::Error::other(format!(
                "rkyv serialization failed: {e}"
            ))),
        }
    })?;

    let mut output = Vec::with_capacity(HEADER_LEN + payload.len());
    output.extend_from_slice(&MAGIC_BYTES);
    output.extend_from_slice(&CURRENT_FORMAT_VERSION.to_le_bytes());
    output.extend_from_slice(fingerprint.as_bytes());
    output.extend_from_slice(&payload);
    Ok(output)
}

/// Validate the framing and decode the tree.
///
/// The fingerprint is compared before the payload is touched, so a cache
/// written for another layout is rejected without deserializing it.
pub fn deserialize_tree(bytes: &[u8], expected: &SchemaFingerprint) -> Result<ParsedNode> {
    if bytes.len() < HEADER_LEN {
        return Err(CacheError::invalid_format(format!(
            "file too small ({} bytes)",
            bytes.len()
        )));
    }

    let (header, payload) = bytes.split_at(HEADER_LEN);
    if header[0..4] != MAGIC_BYTES {
        return Err(CacheError::invalid_format(
            "not a game data cache file (invalid magic bytes)",
        ));
    }

    let version = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if version > CURRENT_FORMAT_VERSION {
        return Err(CacheError::UnsupportedFormatVersion {
            found: version,
            max_supported: CURRENT_FORMAT_VERSION,
        });
    }

    let mut stored = [0u8; 32];
    stored.copy_from_slice(&header[8..HEADER_LEN]);
    let found = SchemaFingerprint::from_bytes(stored);
    if found != *expected {
        return Err(CacheError::FingerprintMismatch {
            expected: *expected,
            found,
        });
    }

    // The payload sits at an arbitrary offset of the file buffer; rkyv
    // validation needs it aligned.
    let mut aligned = AlignedVec::<16>::with_capacity(payload.len());
    aligned.extend_from_slice(payload);

    rkyv::from_bytes::<ParsedNode, rkyv::rancor::Error>(&aligned).map_err(|e| {
        CacheError::Deserialization {
            source: Box::new(std::io::Error::other(format!(
                "rkyv deserialization failed: {e}"
            ))),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedata_model::Value;

    fn sample_tree() -> ParsedNode {
        let mut item = ParsedNode::new("sound_item");
        item.push("filename", true, Value::Text("wolf.wav".to_string()));
        item.push("resource_id", true, Value::Int(5000));

        let mut sound = ParsedNode::new("sound");
        sound.push("file_count", true, Value::Int(2));
        sound.push("sound_items", true, Value::Nodes(vec![Some(item), None]));
        sound.push("ratios", false, Value::FloatArray(vec![0.25, 0.75]));
        sound
    }

    fn fp(byte: u8) -> SchemaFingerprint {
        SchemaFingerprint::from_bytes([byte; 32])
    }

    #[test]
    fn test_round_trip() {
        let tree = sample_tree();
        let bytes = serialize_tree(&tree, &fp(7)).unwrap();
        assert_eq!(&bytes[0..4], &MAGIC_BYTES);
        assert_eq!(deserialize_tree(&bytes, &fp(7)).unwrap(), tree);
    }

    #[test]
    fn test_round_trip_keeps_nan_floats() {
        let nan = f64::from(f32::from_le_bytes([0, 0, 0xc0, 0x7f]));
        let mut tree = sample_tree();
        tree.push("speed", true, Value::Float(nan));
        tree.push("rates", false, Value::FloatArray(vec![nan, 2.0]));
        let bytes = serialize_tree(&tree, &fp(7)).unwrap();
        assert_eq!(deserialize_tree(&bytes, &fp(7)).unwrap(), tree);
    }

    #[test]
    fn test_rejects_other_fingerprint() {
        let bytes = serialize_tree(&sample_tree(), &fp(7)).unwrap();
        let err = deserialize_tree(&bytes, &fp(8)).unwrap_err();
        assert!(matches!(err, CacheError::FingerprintMismatch { .. }));
    }

    #[test]
    fn test_rejects_future_version() {
        let mut bytes = serialize_tree(&sample_tree(), &fp(7)).unwrap();
        bytes[4..8].copy_from_slice(&999u32.to_le_bytes());
        let err = deserialize_tree(&bytes, &fp(7)).unwrap_err();
        assert!(matches!(
            err,
            CacheError::UnsupportedFormatVersion { found: 999, .. }
        ));
    }

    #[test]
    fn test_rejects_bad_magic_and_short_files() {
        assert!(matches!(
            deserialize_tree(b"GDC", &fp(7)),
            Err(CacheError::InvalidFormat { .. })
        ));
        let mut bytes = serialize_tree(&sample_tree(), &fp(7)).unwrap();
        bytes[0] = b'X';
        assert!(matches!(
            deserialize_tree(&bytes, &fp(7)),
            Err(CacheError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let bytes = serialize_tree(&sample_tree(), &fp(7)).unwrap();
        let cut = &bytes[..bytes.len() - 9];
        assert!(matches!(
            deserialize_tree(cut, &fp(7)),
            Err(CacheError::Deserialization { .. })
        ));
    }
}
