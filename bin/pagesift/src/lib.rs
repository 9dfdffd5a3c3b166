//! pagesift CLI Library
//!
//! Headless access to the in-page search pipeline: index static HTML files,
//! run queries against them, filter a roster dataset and validate
//! configuration.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (index, search, roster, check)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use pagesift::cmd;
//!
//! cmd::search::run(Path::new("pagesift.toml"), Path::new("site"), "brown", None).unwrap();
//! ```

pub mod cmd;

pub use pagesift_core::Config;
pub use pagesift_search::{Roster, TextIndex};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// pagesift::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
