//! Cache file I/O.
//!
//! This module handles:
//! - Loading cached trees, with every failure downgraded to a miss
//! - Storing trees with atomic writes

mod load;
mod save;

pub use load::{CacheOutcome, MissReason, load};
pub use save::store;
