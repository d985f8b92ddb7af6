//! # tn3270-table
//!
//! Paged results-table scraping for block-mode 3270 hosts.
//!
//! A search-results screen shows a table in a fixed row range; large result
//! sets span multiple screen pages, advanced with a function key. This crate
//! turns that into a lazy, forward-only sequence of parsed rows with clean
//! end-of-results detection and an explicit "no results at all" failure.
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on tn3270-core for the
//! terminal capability boundary and shared types. Scanning relies on the
//! session layer having already waited out the redraw of the first results
//! screen; reads against an already-rendered page need no timing guard.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod scanner;

// Re-export commonly used types
pub use scanner::{whitespace_fields, ScreenTable, TableRegion};
