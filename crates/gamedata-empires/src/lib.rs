//! `empires.dat` game data for Genie engine games.
//!
//! This crate holds the schemas of the `empires2_x1_p1.dat` format family
//! and the loader that turns a decompressed payload into a
//! [`ParsedNode`] tree:
//!
//! ```no_run
//! use gamedata_empires::{CacheConfig, load_gamespec};
//! use gamedata_model::GameVersion;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let payload = std::fs::read("empires2_x1_p1.dat.raw")?;
//! let version: GameVersion = "aoc".parse()?;
//! let cache = CacheConfig::new("gamedata.cache");
//! let gamespec = load_gamespec(&payload, &version, Some(&cache))?;
//! println!("{} civilisations", gamespec.get_nodes("civs").map_or(0, <[_]>::len));
//! # Ok(())
//! # }
//! ```
//!
//! Supported editions are every [`GameEdition`](gamedata_model::GameEdition)
//! except Age of Kings, for which no layout is known.

mod error;
mod load;
pub mod schema;

pub use error::{LoadError, Result};
pub use load::{CacheConfig, gamespec_fingerprint, load_gamespec};

pub use gamedata_format::SchemaFingerprint;
pub use gamedata_model::ParsedNode;
