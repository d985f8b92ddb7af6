//! Session identity and lifecycle state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a terminal session, used in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a new random session ID.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a terminal session.
///
/// Exactly one session owns this value; it is mutated only by the
/// connect/disconnect sequence, never concurrently. `Disconnected` is both
/// the initial and the terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No connection to the host
    Disconnected,
    /// Opening the underlying connection
    Connecting,
    /// Driving the primary login handshake
    LoggingIn,
    /// Primary login accepted
    LoggedIn,
    /// Driving the secondary sign-on handshake
    SigningOn,
    /// Ready for application work
    Active,
    /// Driving sign-off before teardown
    SigningOff,
}

impl SessionState {
    /// Whether the underlying host connection is open in this state.
    pub fn is_established(&self) -> bool {
        !matches!(self, SessionState::Disconnected | SessionState::Connecting)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Connecting => "connecting",
            SessionState::LoggingIn => "logging_in",
            SessionState::LoggedIn => "logged_in",
            SessionState::SigningOn => "signing_on",
            SessionState::Active => "active",
            SessionState::SigningOff => "signing_off",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_session_id_display() {
        let id = SessionId::new();
        assert_eq!(id.to_string().len(), 36); // canonical uuid form
    }

    #[test]
    fn test_session_state_display() {
        assert_eq!(SessionState::Disconnected.to_string(), "disconnected");
        assert_eq!(SessionState::SigningOn.to_string(), "signing_on");
        assert_eq!(SessionState::Active.to_string(), "active");
    }

    #[test]
    fn test_session_state_is_established() {
        assert!(!SessionState::Disconnected.is_established());
        assert!(!SessionState::Connecting.is_established());
        assert!(SessionState::LoggingIn.is_established());
        assert!(SessionState::LoggedIn.is_established());
        assert!(SessionState::Active.is_established());
        assert!(SessionState::SigningOff.is_established());
    }
}
