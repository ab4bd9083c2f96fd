//! CLI library components for the game data decoder.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
