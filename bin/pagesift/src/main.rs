//! pagesift CLI
//!
//! Index, search and filter static pages from the command line.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for pagesift.
#[derive(Parser)]
#[command(
    name = "pagesift",
    version,
    about = "In-page text search over static HTML"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "pagesift.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Print the indexed text entries of HTML files
    Index {
        /// HTML file or directory of HTML files
        path: std::path::PathBuf,
    },
    /// Search HTML files the way the in-page widget does
    Search {
        /// HTML file or directory of HTML files
        path: std::path::PathBuf,
        /// Text to look for
        query: String,
        /// Maximum matches per file (defaults to widget.results_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Filter a roster JSON dataset
    Roster {
        /// Roster JSON file
        path: std::path::PathBuf,
        /// Filter term; all records when omitted
        query: Option<String>,
    },
    /// Validate configuration
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    pagesift::init_tracing(cli.verbose);

    match cli.command {
        Commands::Index { path } => {
            pagesift::cmd::index::run(&cli.config, &path)?;
        }
        Commands::Search { path, query, limit } => {
            pagesift::cmd::search::run(&cli.config, &path, &query, limit)?;
        }
        Commands::Roster { path, query } => {
            pagesift::cmd::roster::run(&cli.config, &path, query.as_deref())?;
        }
        Commands::Check { strict } => {
            pagesift::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
