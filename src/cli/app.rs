//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{book, shell};
use crate::domain::{BookId, BookStatus};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "digilib")]
#[command(author, version, about = "Track the books you have read, own and want")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Library file (overrides the configured one)
    #[arg(long, short = 'F', global = true, env = "DIGILIB_FILE")]
    pub file: Option<PathBuf>,

    /// Configuration file
    #[arg(long, short = 'c', global = true, env = "DIGILIB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run (defaults to the interactive shell)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a book
    ///
    /// Examples:
    ///   digilib add "Dune" --author Herbert --year 1965
    ///   digilib add "Hyperion" -a Simmons -y 1989 -s read
    Add {
        /// Book title
        title: String,

        /// Book author
        #[arg(long, short)]
        author: String,

        /// Publication year
        #[arg(long, short, allow_negative_numbers = true)]
        year: i32,

        /// Status: read, owned, wishlist (or 1-3)
        #[arg(long, short, default_value = "wishlist")]
        status: BookStatus,
    },

    /// List books with a status, or all books
    #[command(visible_alias = "ls")]
    List {
        /// Status: read, owned, wishlist (or 1-3)
        status: Option<BookStatus>,
    },

    /// Show book details
    Show {
        /// Book ID
        id: BookId,
    },

    /// Change the status of a book
    Update {
        /// Book ID
        id: BookId,

        /// New status: read, owned, wishlist (or 1-3)
        status: BookStatus,
    },

    /// Delete a book
    #[command(visible_alias = "rm")]
    Delete {
        /// Book ID
        id: BookId,
    },

    /// Show counts by status
    Stats,

    /// Run the interactive menu
    Shell,
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the level
fn init_logging(verbose: bool) {
    let default = if verbose { "digilib=debug" } else { "digilib=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let output = Output::new(cli.format);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let file = config.library_file(cli.file.as_deref());
    tracing::debug!(
        path = %file.path().display(),
        format = file.codec().as_str(),
        capacity = file.limits().capacity,
        "using library file"
    );

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Add {
            title,
            author,
            year,
            status,
        } => book::add(&output, &file, &title, &author, year, status)?,
        Commands::List { status } => book::list(&output, &file, status)?,
        Commands::Show { id } => book::show(&output, &file, id)?,
        Commands::Update { id, status } => book::update(&output, &file, id, status)?,
        Commands::Delete { id } => book::delete(&output, &file, id)?,
        Commands::Stats => book::stats(&output, &file)?,
        Commands::Shell => shell::run(&file)?,
    }

    tracing::debug!("command completed");
    Ok(())
}
