//! pagesift Search Library
//!
//! In-page text search: index the visible text of a document once, scan it
//! for case-insensitive substrings, render escaped snippets and drive the
//! keyboard/highlight flow of the results panel.
//!
//! # Features
//!
//! - **Content providers**: indexing works over any [`ContentProvider`], so the
//!   same code runs against a live DOM or an offline [`Document`]
//! - **Document-order search**: linear substring scan capped at a result limit
//! - **Search widget**: debounce, selection and highlight timers kept on a
//!   [`SearchWidget`] session object, driven through [`WidgetHost`] and [`Scheduler`]
//! - **Roster filtering**: substring filtering over a static student dataset
//!
//! # Example
//!
//! ```
//! use pagesift_core::WidgetConfig;
//! use pagesift_search::{SearchQuery, TextIndex, html};
//!
//! let doc = html::parse("<h2>Intro</h2><p>The quick brown fox jumps.</p>");
//! let index = TextIndex::build(&doc, &WidgetConfig::default());
//!
//! let matches = index.search(&SearchQuery::parse("BROWN"), 20);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(index.resolve(&matches[0]).heading, "Intro");
//! ```

pub mod document;
pub mod html;
pub mod indexer;
pub mod navigator;
pub mod query;
pub mod render;
pub mod roster;
pub mod scheduler;
pub mod snippet;
pub mod widget;

pub use document::{ContentProvider, Document, NodeId, ParentInfo, TextNode};
pub use indexer::{IndexEntry, TextIndex, collapse_whitespace, fold_case};
pub use navigator::{Direction, ResultNavigator};
pub use query::{MatchEntry, SearchQuery};
pub use render::{EMPTY_RESULTS_HTML, render_result, render_results};
pub use roster::{Roster, StudentRecord};
pub use scheduler::{ManualScheduler, Scheduler, TimerKind};
pub use snippet::{Snippet, SnippetWindow, escape_html};
pub use widget::{Key, Panel, SearchWidget, WidgetHost};
