//! CLI argument definitions for the game data decoder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use gamedata_model::GameVersion;

#[derive(Parser)]
#[command(
    name = "gamedata",
    version,
    about = "Decode Genie engine game data (empires2_x1_p1.dat)",
    long_about = "Decode decompressed empires2_x1_p1.dat payloads into a structured tree.\n\n\
                  Supports Rise of Rome, The Conquerors, Galactic Battlegrounds,\n\
                  the HD Edition and both Definitive Editions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a payload and print its top-level fields.
    Decode(DecodeArgs),

    /// Print the schema fingerprint of a game version.
    Fingerprint(FingerprintArgs),

    /// List known editions and expansions.
    Editions,
}

#[derive(Parser)]
pub struct DecodeArgs {
    /// Decompressed empires2_x1_p1.dat payload.
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Game version, e.g. `aoc`, `hd+afri_king` or `swgb+cc`.
    #[arg(long = "game", short = 'g', value_name = "VERSION")]
    pub game: GameVersion,

    /// Cache file for the decoded tree.
    #[arg(long = "cache", value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Always decode, even if the cache holds a usable tree.
    #[arg(long = "no-cache-read", requires = "cache")]
    pub no_cache_read: bool,

    /// Do not update the cache file after decoding.
    #[arg(long = "no-cache-write", requires = "cache")]
    pub no_cache_write: bool,

    /// Export the full decoded tree as JSON.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct FingerprintArgs {
    /// Game version, e.g. `aoc`, `hd+afri_king` or `swgb+cc`.
    #[arg(long = "game", short = 'g', value_name = "VERSION")]
    pub game: GameVersion,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
