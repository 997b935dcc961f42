//! Binary entry point: resolve the database, load the catalog and hand
//! stdin/stdout to the interactive shell.
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use shelf_track::{initialize, Catalog, Database, Shell};

#[derive(Parser)]
#[command(name = "shelf-track")]
#[command(about = "Manage a small bookstore inventory", long_about = None)]
struct Cli {
    /// SQLite database file (defaults to ~/.shelf-track/ebookstore.db)
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Increase log output on stderr (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let db = match cli.db {
        Some(path) => Database::new(path),
        None => Database::at_default_location()?,
    };
    log::info!("using database {}", db.path().display());

    let mut catalog = Catalog::new();
    initialize(&db, &mut catalog)
        .with_context(|| format!("failed to initialize {}", db.path().display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut shell = Shell::new(db, catalog, stdin.lock(), stdout).with_color(color);
    shell.run()
}
