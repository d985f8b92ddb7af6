//! Diagnostic observer for session activity.
//!
//! Instead of an ambient process-wide logger, a session reports its state
//! transitions and status-bar reads to an observer injected at construction
//! and scoped to the session object. The default observer discards
//! everything; `tracing` output is emitted by the session itself regardless
//! of the observer.

use chrono::{DateTime, Utc};

use tn3270_core::SessionState;

/// One recorded state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    /// When the transition happened
    pub at: DateTime<Utc>,
    /// State before the transition
    pub from: SessionState,
    /// State after the transition
    pub to: SessionState,
}

impl TransitionEvent {
    /// Record a transition happening now.
    pub fn now(from: SessionState, to: SessionState) -> Self {
        Self {
            at: Utc::now(),
            from,
            to,
        }
    }
}

/// Sink for session diagnostics.
pub trait SessionObserver {
    /// Called on every state transition.
    fn on_transition(&self, event: &TransitionEvent);

    /// Called with raw status-bar text after handshake status checks.
    fn on_status(&self, text: &str);
}

/// Observer that discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SessionObserver for NullObserver {
    fn on_transition(&self, _event: &TransitionEvent) {}

    fn on_status(&self, _text: &str) {}
}
