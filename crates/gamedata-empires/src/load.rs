//! Top-level loading of a decompressed `empires.dat` payload.

use std::path::{Path, PathBuf};

use gamedata_cache::CacheOutcome;
use gamedata_format::{Decoder, SchemaFingerprint, StructRef, fingerprint};
use gamedata_model::{GameVersion, ParsedNode};

use crate::error::{LoadError, Result};
use crate::schema::EmpiresDatWrapper;

/// Where and how the decoded tree is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub path: PathBuf,
    /// Consult the cache before decoding.
    pub read: bool,
    /// Store the decoded tree after a miss.
    pub write: bool,
}

impl CacheConfig {
    /// Cache at `path`, read and written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read: true,
            write: true,
        }
    }

    #[must_use]
    pub fn with_read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    #[must_use]
    pub fn with_write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Fingerprint of the full game data schema for `version`.
///
/// This is the key cache files are validated against.
pub fn gamespec_fingerprint(version: &GameVersion) -> Result<SchemaFingerprint> {
    Ok(fingerprint(StructRef::of::<EmpiresDatWrapper>(), version)?)
}

/// Decode a decompressed `empires.dat` payload into its `empiresdat` tree.
///
/// With a cache configured, a cached tree built for the same schema is
/// returned without touching `payload`. After decoding, the tree is
/// stored if writing is enabled; a failed store is logged and ignored.
pub fn load_gamespec(
    payload: &[u8],
    version: &GameVersion,
    cache: Option<&CacheConfig>,
) -> Result<ParsedNode> {
    let expected = gamespec_fingerprint(version)?;

    if let Some(config) = cache.filter(|c| c.read)
        && let CacheOutcome::Hit(tree) = gamedata_cache::load(config.path(), &expected)
    {
        return Ok(tree);
    }

    tracing::debug!(
        version = %version,
        bytes = payload.len(),
        "decoding game data"
    );
    let mut decoder = Decoder::new(version.clone());
    let (_, mut wrapper) = decoder.decode_root(payload, StructRef::of::<EmpiresDatWrapper>())?;

    // drop the list surrounding the actual data
    let gamespec = wrapper
        .take_nodes("empiresdat")
        .and_then(|nodes| nodes.into_iter().next().flatten())
        .ok_or(LoadError::MissingRoot)?;

    if let Some(config) = cache.filter(|c| c.write) {
        tracing::debug!(path = %config.path.display(), "writing decoded tree to cache");
        if let Err(err) = gamedata_cache::store(config.path(), &gamespec, &expected) {
            tracing::warn!(
                path = %config.path.display(),
                error = %err,
                "failed to write cache file, continuing without it"
            );
        }
    }

    Ok(gamespec)
}
