use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use gamedata_empires::{CacheConfig, gamespec_fingerprint, load_gamespec};
use gamedata_model::{GameEdition, GameExpansion, GameVersion, ParsedNode};

use crate::cli::{DecodeArgs, FingerprintArgs};
use crate::summary::apply_table_style;

pub fn run_decode(args: &DecodeArgs) -> Result<ParsedNode> {
    let span = info_span!("decode", version = %args.game);
    let _guard = span.enter();

    let payload = fs::read(&args.payload)
        .with_context(|| format!("read payload {}", args.payload.display()))?;
    let cache = cache_config(args);
    let gamespec = load_gamespec(&payload, &args.game, cache.as_ref())
        .with_context(|| format!("decode {} as {}", args.payload.display(), args.game))?;
    info!(fields = gamespec.len(), "decoded game data");

    if let Some(path) = &args.json {
        write_json(&gamespec, path)?;
        info!(path = %path.display(), "wrote JSON export");
    }
    Ok(gamespec)
}

pub fn cache_config(args: &DecodeArgs) -> Option<CacheConfig> {
    args.cache.as_ref().map(|path| {
        CacheConfig::new(path)
            .with_read(!args.no_cache_read)
            .with_write(!args.no_cache_write)
    })
}

fn write_json(gamespec: &ParsedNode, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), gamespec)
        .with_context(|| format!("write JSON export {}", path.display()))
}

pub fn run_fingerprint(args: &FingerprintArgs) -> Result<()> {
    let fingerprint = gamespec_fingerprint(&args.game)
        .with_context(|| format!("fingerprint schema for {}", args.game))?;
    println!("{fingerprint}");
    Ok(())
}

pub fn run_editions() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Edition", "Title", "Expansions", "Supported"]);
    apply_table_style(&mut table);
    for edition in GameEdition::ALL {
        let expansions: Vec<&str> = GameExpansion::ALL
            .into_iter()
            .filter(|expansion| expansion.edition() == edition)
            .map(GameExpansion::as_str)
            .collect();
        let supported = gamespec_fingerprint(&GameVersion::new(edition)).is_ok();
        table.add_row(vec![
            edition.as_str().to_string(),
            edition.title().to_string(),
            expansions.join(", "),
            if supported { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
