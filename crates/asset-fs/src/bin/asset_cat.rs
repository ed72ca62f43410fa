//! asset-cat: Print assets from a zip asset pack, decompressing `.gz` siblings.
//!
//! # Usage
//!
//! ```bash
//! # Print static/app.js, served from static/app.js.gz if needed
//! asset-cat assets.zip static/app.js
//!
//! # Show metadata instead of content
//! asset-cat --stat assets.zip index.html static/app.js
//! ```

use asset_fs::{FileReader, GzipOverlay, OverlayConfig, ZipStore};
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

/// Print assets from a zip asset pack.
///
/// Each PATH is looked up as stored; when only PATH.gz exists, its
/// decompressed content is printed instead.
#[derive(Parser, Debug)]
#[command(name = "asset-cat")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the zip asset pack
    #[arg(value_name = "ARCHIVE")]
    archive: PathBuf,

    /// Logical asset paths to print
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<String>,

    /// Overlay configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print mode, size, modification time and name instead of content
    #[arg(short, long)]
    stat: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    if !args.archive.is_file() {
        error!("Archive not found: {}", args.archive.display());
        process::exit(1);
    }

    let config = match &args.config {
        Some(path) => match OverlayConfig::from_toml_file(path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to load config: {}", e);
                process::exit(1);
            }
        },
        None => OverlayConfig::default(),
    };

    info!("Opening asset pack: {}", args.archive.display());
    let store = match ZipStore::load(&args.archive) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to open asset pack: {}", e);
            process::exit(1);
        }
    };
    info!("Entries: {}", store.len());

    let overlay = GzipOverlay::with_config(store, config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for path in &args.paths {
        if let Err(e) = print_asset(&overlay, path, args.stat, &mut out) {
            error!("{}: {}", path, e);
            process::exit(1);
        }
    }
}

fn print_asset(
    overlay: &GzipOverlay<ZipStore>,
    path: &str,
    stat_only: bool,
    out: &mut impl Write,
) -> asset_fs::Result<()> {
    let mut file = overlay.open(path)?;

    if stat_only {
        let stat = file.stat()?;
        let modified = stat
            .modified()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{} {:>10} {} {}",
            stat.mode(),
            stat.size(),
            modified,
            stat.name()
        )?;
    } else {
        io::copy(&mut FileReader::new(file.as_mut()), out)?;
    }

    out.flush()?;
    file.close()
}
