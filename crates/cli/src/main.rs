//! capstore CLI - inspect and manage a payload database from the shell.
//!
//! ```text
//! capstore count
//! capstore --db requests.db keys
//! capstore --bucket sessions list
//! capstore get <key>
//! capstore wipe
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

mod commands;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use capstore_core::Result;
use capstore_storage::{open_database, Cache, RedbCache, StoreConfig, CONFIG_FILE_NAME};
use clap::ArgMatches;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::build_cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let stdout = std::io::stdout();
    if let Err(e) = run(&matches, &mut stdout.lock()) {
        eprintln!("(error) {}", e);
        process::exit(1);
    }
}

/// Resolve the effective config from `--config`, `./capstore.toml` and
/// the `--db` / `--bucket` overrides.
fn resolve_config(matches: &ArgMatches) -> Result<StoreConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => StoreConfig::from_file(Path::new(path))?,
        None if Path::new(CONFIG_FILE_NAME).exists() => {
            StoreConfig::from_file(Path::new(CONFIG_FILE_NAME))?
        }
        None => StoreConfig::default(),
    };
    if let Some(db) = matches.get_one::<String>("db") {
        config.path = db.clone();
    }
    if let Some(bucket) = matches.get_one::<String>("bucket") {
        config.bucket = bucket.clone();
    }
    config.validate()?;
    Ok(config)
}

fn run(matches: &ArgMatches, out: &mut impl Write) -> Result<()> {
    if matches.subcommand_name() == Some("init") {
        let path = matches
            .get_one::<String>("config")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        StoreConfig::write_default_if_missing(&path)?;
        writeln!(out, "{}", path.display())?;
        return Ok(());
    }

    let config = resolve_config(matches)?;
    debug!(
        target: "capstore::cli",
        database = %config.path,
        bucket = %config.bucket,
        "Opening store"
    );
    let db = open_database(&config.path, &config)?;
    let cache = RedbCache::new(Arc::new(db), config.bucket.clone());

    let result = execute(&cache, matches, out);
    cache.close_db();
    result
}

fn execute(cache: &RedbCache, matches: &ArgMatches, out: &mut impl Write) -> Result<()> {
    match matches.subcommand() {
        Some(("count", _)) => {
            writeln!(out, "{}", cache.records_count()?)?;
        }
        Some(("keys", _)) => {
            for key in cache.get_all_keys()? {
                writeln!(out, "{}", String::from_utf8_lossy(&key))?;
            }
        }
        Some(("list", _)) => {
            for payload in cache.get_all_requests()? {
                writeln!(out, "{}", serde_json::to_string(&payload)?)?;
            }
        }
        Some(("get", sub)) => {
            let key = sub
                .get_one::<String>("key")
                .map(String::as_str)
                .unwrap_or_default();
            let value = cache.get(key.as_bytes())?;
            out.write_all(&value)?;
            writeln!(out)?;
        }
        Some(("wipe", _)) => {
            cache.delete_data()?;
            writeln!(out, "deleted bucket {}", cache.bucket())?;
        }
        _ => {}
    }
    Ok(())
}
