//! # tn3270-session
//!
//! Session lifecycle automation for block-mode 3270 hosts.
//!
//! This crate provides:
//! - Bounded-time condition polling against asynchronous screen redraws
//! - Pluggable primary login strategies (ACF2 region, RACF application ID)
//! - The secondary sign-on/sign-off exchange over a named screen format
//! - The session state machine sequencing connect, login, sign-on,
//!   application work, sign-off and disconnect
//! - An injected diagnostic observer for state transitions and status text
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on tn3270-core for the
//! terminal capability boundary and shared types.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod format;
pub mod login;
pub mod observer;
pub mod session;
pub mod signon;
pub mod wait;

// Re-export commonly used types
pub use login::{Acf2Login, LoginStrategy, RacfLogin};
pub use observer::{NullObserver, SessionObserver, TransitionEvent};
pub use session::Session;
pub use signon::{FormatSignOn, SignOnStrategy};
pub use wait::{WaitOutcome, WaitUntil};
