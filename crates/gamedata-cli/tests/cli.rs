use std::fs;

use clap::Parser;
use gamedata_cli::cli::{Cli, Command};
use gamedata_cli::commands::{cache_config, run_decode};
use gamedata_cli::summary::summarize;
use gamedata_empires::gamespec_fingerprint;
use gamedata_model::{GameEdition, GameExpansion, GameVersion, ParsedNode, Value};
use tempfile::tempdir;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("gamedata").chain(args.iter().copied()))
}

fn cached_tree() -> ParsedNode {
    let mut sound = ParsedNode::new("sound");
    sound.push("sound_id", true, Value::Int(7));

    let mut root = ParsedNode::new("empiresdat");
    root.push("versionstr", true, Value::Text("VER 5.7".to_string()));
    root.push("sound_count", false, Value::UInt(2));
    root.push("sounds", true, Value::Nodes(vec![Some(sound), None]));
    root
}

#[test]
fn test_decode_arguments_parse() {
    let cli = parse(&[
        "decode",
        "empires2_x1_p1.raw",
        "--game",
        "hd+afri_king",
        "--cache",
        "gamedata.cache",
        "--no-cache-read",
    ])
    .unwrap();
    let Command::Decode(args) = cli.command else {
        panic!("expected decode");
    };
    assert_eq!(args.game.edition, GameEdition::HdEdition);
    assert!(args.game.has_expansion(GameExpansion::AfriKing));

    let cache = cache_config(&args).unwrap();
    assert!(!cache.read);
    assert!(cache.write);
}

#[test]
fn test_cache_flags_require_a_cache_path() {
    assert!(parse(&["decode", "data.raw", "-g", "aoc", "--no-cache-write"]).is_err());
}

#[test]
fn test_unknown_version_is_a_usage_error() {
    assert!(parse(&["fingerprint", "--game", "aoe3"]).is_err());
    assert!(parse(&["fingerprint", "--game", "aoc+cc"]).is_err());
}

#[test]
fn test_missing_payload_is_reported() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.raw");
    let cli = parse(&["decode", missing.to_str().unwrap(), "-g", "aoc"]).unwrap();
    let Command::Decode(args) = cli.command else {
        panic!("expected decode");
    };
    let err = run_decode(&args).unwrap_err();
    assert!(format!("{err:#}").contains("read payload"));
}

#[test]
fn test_cached_decode_exports_json() {
    let dir = tempdir().unwrap();
    let payload = dir.path().join("empty.raw");
    let cache = dir.path().join("gamedata.cache");
    let json = dir.path().join("gamedata.json");
    fs::write(&payload, b"").unwrap();

    let version = GameVersion::new(GameEdition::Aoc);
    let fingerprint = gamespec_fingerprint(&version).unwrap();
    gamedata_cache::store(&cache, &cached_tree(), &fingerprint).unwrap();

    let cli = parse(&[
        "decode",
        payload.to_str().unwrap(),
        "-g",
        "aoc",
        "--cache",
        cache.to_str().unwrap(),
        "--json",
        json.to_str().unwrap(),
    ])
    .unwrap();
    let Command::Decode(args) = cli.command else {
        panic!("expected decode");
    };
    let gamespec = run_decode(&args).unwrap();
    assert_eq!(gamespec, cached_tree());

    let exported: serde_json::Value = serde_json::from_slice(&fs::read(&json).unwrap()).unwrap();
    assert_eq!(exported["structure"], "empiresdat");

    let rows = summarize(&gamespec);
    insta::assert_snapshot!(
        rows.iter()
            .map(|row| format!("{} {} {}", row.name, row.kind, row.value))
            .collect::<Vec<_>>()
            .join("\n"),
        @r#"
    versionstr text "VER 5.7"
    sound_count uint 2
    sounds nodes 2 elements
    "#
    );
}

#[test]
fn test_empty_payload_without_cache_fails() {
    let dir = tempdir().unwrap();
    let payload = dir.path().join("empty.raw");
    fs::write(&payload, b"").unwrap();
    let cli = parse(&["decode", payload.to_str().unwrap(), "-g", "ror"]).unwrap();
    let Command::Decode(args) = cli.command else {
        panic!("expected decode");
    };
    assert!(run_decode(&args).is_err());
}
