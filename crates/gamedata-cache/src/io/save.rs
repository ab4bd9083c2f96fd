//! Cache saving.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use gamedata_format::SchemaFingerprint;
use gamedata_model::ParsedNode;

use crate::error::{CacheError, Result};
use crate::format::serialize_tree;

/// Store a decoded tree for the given schema.
///
/// Uses atomic write (temp file + rename) so a crash mid-write never
/// leaves a half-written cache that a later run would have to reject.
pub fn store(path: &Path, tree: &ParsedNode, fingerprint: &SchemaFingerprint) -> Result<()> {
    let bytes = serialize_tree(tree, fingerprint)?;
    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CacheError::io("create directory", parent, e))?;
    }

    if let Err(error) = write_and_rename(&temp_path, path, &bytes) {
        // best effort; the original error is what matters
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }

    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        fingerprint = %fingerprint,
        "stored decoded tree in cache"
    );
    Ok(())
}

fn write_and_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|e| CacheError::io("create", temp_path, e))?;
    file.write_all(bytes)
        .map_err(|e| CacheError::io("write", temp_path, e))?;
    file.sync_all()
        .map_err(|e| CacheError::io("sync", temp_path, e))?;
    drop(file);

    fs::rename(temp_path, path).map_err(|e| CacheError::AtomicWriteFailed {
        temp_path: temp_path.to_path_buf(),
        target_path: path.to_path_buf(),
        source: e,
    })
}

/// `<path>.tmp`, next to the target so the rename stays on one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
