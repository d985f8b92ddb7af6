//! # tn3270-core
//!
//! Core types for automating block-mode 3270 terminal sessions.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other tn3270 crates. It provides:
//!
//! - Geometry types for 1-based screen coordinates (ScreenPosition, Region)
//! - AID key types for block-mode input (Enter, Tab, Clear, PF, PA)
//! - Credentials and session configuration
//! - Status-line reading and verdict evaluation
//! - The `TerminalCapability` trait, the boundary to the emulator backend
//! - Error types
//! - A scripted terminal capability for tests
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other tn3270 crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all modules
pub mod config;
pub mod error;
pub mod geometry;
pub mod key;
pub mod session;
pub mod status;
pub mod terminal;
pub mod testing;

// Re-export commonly used types
pub use config::{Credentials, SessionConfig};
pub use error::{Error, Result};
pub use geometry::{Region, ScreenPosition};
pub use key::AidKey;
pub use session::{SessionId, SessionState};
pub use status::{StatusLine, StatusVerdict};
pub use terminal::{TerminalCapability, SCREEN_COLS, SCREEN_ROWS};
