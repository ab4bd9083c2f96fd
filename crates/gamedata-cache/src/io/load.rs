//! Cache loading.

use std::fmt;
use std::fs;
use std::path::Path;

use gamedata_format::SchemaFingerprint;
use gamedata_model::ParsedNode;

use crate::error::CacheError;
use crate::format::deserialize_tree;

/// Result of consulting the cache.
#[derive(Debug)]
pub enum CacheOutcome {
    Hit(ParsedNode),
    Miss(MissReason),
}

impl CacheOutcome {
    /// The cached tree, if there was one.
    pub fn into_hit(self) -> Option<ParsedNode> {
        match self {
            Self::Hit(tree) => Some(tree),
            Self::Miss(_) => None,
        }
    }

    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// Why a cache lookup missed.
#[derive(Debug)]
pub enum MissReason {
    /// No cache file exists yet.
    NotFound,
    /// A cache file exists but cannot be used.
    Rejected(CacheError),
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("no cache file"),
            Self::Rejected(err) => write!(f, "{err}"),
        }
    }
}

/// Load a cached tree built for the `expected` schema.
///
/// A missing file is an ordinary first run and is logged at debug level.
/// A file that exists but is unreadable, corrupt, from a newer format or
/// for another schema is logged as a warning so the operator learns that
/// the cache is being rebuilt.
pub fn load(path: &Path, expected: &SchemaFingerprint) -> CacheOutcome {
    let result = fs::read(path)
        .map_err(|e| CacheError::io("read", path, e))
        .and_then(|bytes| deserialize_tree(&bytes, expected));

    match result {
        Ok(tree) => {
            tracing::info!(path = %path.display(), "loaded decoded tree from cache");
            CacheOutcome::Hit(tree)
        }
        Err(err) if err.is_not_found() => {
            tracing::debug!(path = %path.display(), "no cache file");
            CacheOutcome::Miss(MissReason::NotFound)
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "ignoring unusable cache file"
            );
            CacheOutcome::Miss(MissReason::Rejected(err))
        }
    }
}
