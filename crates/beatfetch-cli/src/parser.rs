//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for searching and downloading beatmap sets.
#[derive(Parser)]
#[command(name = "beatfetch")]
#[command(about = "Search a beatmap catalog and download sets")]
#[command(version)]
pub struct Cli {
    /// Catalog search endpoint
    #[arg(long = "catalog-url", env = "BEATFETCH_CATALOG_URL", global = true)]
    pub catalog_url: Option<String>,

    /// Directory downloaded archives are written to
    #[arg(
        long = "download-dir",
        env = "BEATFETCH_DOWNLOAD_DIR",
        default_value = "downloads",
        global = true
    )]
    pub download_dir: PathBuf,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
