//! `barbie` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and initialize the store once.
//! - Hand stdin/stdout to the interactive menu loop.

mod menu;
mod prompt;
mod render;

use anyhow::Context;
use barbie_core::db::init_store;
use barbie_core::{init_logging, CatalogConfig};
use clap::Parser;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "barbie")]
#[command(about = "Manage a personal Barbie movie collection", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite database file (defaults to the platform data directory)
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CatalogConfig::resolve(cli.db, cli.log_dir, cli.log_level);

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    init_store(&config.db_path).with_context(|| {
        format!(
            "failed to initialize movie store at `{}`",
            config.db_path.display()
        )
    })?;
    log::info!("event=cli_start module=cli status=ok");

    menu::run_menu(&config.db_path, io::stdin().lock(), io::stdout().lock())
        .context("terminal I/O failed")?;
    Ok(())
}
