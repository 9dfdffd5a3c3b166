//! pagesift Core Library
//!
//! Configuration and error handling shared by the search engine, the
//! browser binding and the CLI.

pub mod config;
pub mod error;

pub use config::{Config, RosterConfig, WidgetConfig};
pub use error::{CoreError, Result};
