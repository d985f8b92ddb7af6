//! The session lifecycle state machine.
//!
//! One `Session` exclusively owns one terminal capability for the session's
//! lifetime. `connect` opens the host connection and drives the primary
//! login and the optional secondary sign-on; `disconnect` drives sign-off
//! and tears the connection down. Every transition is gated by screen-text
//! evidence gathered by the injected strategies.

use tracing::{info, warn};

use tn3270_core::{
    Credentials, Error, Result, SessionConfig, SessionId, SessionState, TerminalCapability,
};

use crate::login::LoginStrategy;
use crate::observer::{NullObserver, SessionObserver, TransitionEvent};
use crate::signon::SignOnStrategy;

/// A session against one block-mode terminal host.
pub struct Session<T: TerminalCapability> {
    id: SessionId,
    host: String,
    credentials: Credentials,
    config: SessionConfig,
    login: Option<Box<dyn LoginStrategy>>,
    signon: Option<Box<dyn SignOnStrategy>>,
    observer: Box<dyn SessionObserver>,
    term: Option<T>,
    state: SessionState,
}

impl<T: TerminalCapability> Session<T> {
    /// Create a session over a capability instance.
    ///
    /// The capability is held from construction, opened on [`Session::connect`]
    /// and released on [`Session::disconnect`]. Credentials are immutable for
    /// the session's lifetime.
    pub fn new(
        term: T,
        host: impl Into<String>,
        credentials: Credentials,
        config: SessionConfig,
    ) -> Result<Self> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(Error::Config("host cannot be empty".to_string()));
        }
        credentials.validate()?;
        config.validate()?;

        Ok(Self {
            id: SessionId::new(),
            host,
            credentials,
            config,
            login: None,
            signon: None,
            observer: Box::new(NullObserver),
            term: Some(term),
            state: SessionState::Disconnected,
        })
    }

    /// Set the primary login strategy.
    pub fn with_login(mut self, strategy: impl LoginStrategy + 'static) -> Self {
        self.login = Some(Box::new(strategy));
        self
    }

    /// Set the secondary sign-on strategy.
    pub fn with_signon(mut self, strategy: impl SignOnStrategy + 'static) -> Self {
        self.signon = Some(Box::new(strategy));
        self
    }

    /// Set the diagnostic observer.
    pub fn with_observer(mut self, observer: impl SessionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Get the session ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Get the target host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Borrow the live capability, e.g. to build a table scanner against it.
    ///
    /// `None` once the session has been disconnected.
    pub fn terminal_mut(&mut self) -> Option<&mut T> {
        self.term.as_mut()
    }

    /// Connect to the host, login, and sign on where configured.
    ///
    /// On success the session is `Active`. Any failure after the connection
    /// opened triggers a release attempt before the error surfaces, so the
    /// capability is never leaked on a failed handshake.
    pub fn connect(&mut self) -> Result<()> {
        if self.term.is_none() {
            return Err(Error::SessionReleased);
        }

        info!("Connecting session: id={}, host={}", self.id, self.host);
        self.set_state(SessionState::Connecting);
        let opened = self
            .term
            .as_mut()
            .ok_or(Error::SessionReleased)
            .and_then(|term| term.connect(&self.host));
        if let Err(err) = opened {
            // Connection never opened: nothing to tear down.
            self.term = None;
            self.set_state(SessionState::Disconnected);
            return Err(err);
        }

        match self.run_handshakes() {
            Ok(()) => {
                self.set_state(SessionState::Active);
                info!("Session active: id={}, host={}", self.id, self.host);
                Ok(())
            }
            Err(err) => {
                self.release();
                Err(err)
            }
        }
    }

    /// Sign off where configured, tear down the connection, release the
    /// capability.
    ///
    /// Idempotent: on a session that is already `Disconnected` - never
    /// connected, or already torn down - this is a no-op with no capability
    /// calls. Sign-off failure is reported, never escalated, so disconnection
    /// always completes.
    pub fn disconnect(&mut self) -> Result<()> {
        if self.state == SessionState::Disconnected || self.term.is_none() {
            return Ok(());
        }

        info!("Disconnecting session: id={}", self.id);
        self.set_state(SessionState::SigningOff);

        if let (Some(strategy), Some(term)) = (self.signon.as_deref(), self.term.as_mut()) {
            match strategy.signoff(term, strategy.signoff_field()) {
                Ok(verdict) => {
                    self.observer.on_status(&verdict.raw_text);
                    if verdict.ok {
                        info!("SIGNOFF ok: status=[{}]", verdict.raw_text.trim());
                    } else {
                        warn!(
                            "SIGNOFF failed, continuing disconnect: status=[{}]",
                            verdict.raw_text.trim()
                        );
                    }
                }
                Err(err) => {
                    warn!("SIGNOFF errored, continuing disconnect: {err}");
                }
            }
        }

        let result = match self.term.take() {
            Some(mut term) => term.disconnect(),
            None => Ok(()),
        };
        self.set_state(SessionState::Disconnected);
        info!("Session disconnected: id={}", self.id);
        result
    }

    /// Login and optional sign-on, with the connection already open.
    fn run_handshakes(&mut self) -> Result<()> {
        self.set_state(SessionState::LoggingIn);
        let accepted = {
            let strategy = self.login.as_ref().ok_or(Error::LoginNotConfigured)?;
            let term = self.term.as_mut().ok_or(Error::SessionReleased)?;
            strategy.login(term, &self.credentials)?
        };
        if !accepted {
            return Err(Error::Login {
                username: self.credentials.username.clone(),
                host: self.host.clone(),
            });
        }
        self.set_state(SessionState::LoggedIn);

        if self.signon.is_some() {
            self.set_state(SessionState::SigningOn);
            let verdict = match (self.signon.as_deref(), self.term.as_mut()) {
                (Some(strategy), Some(term)) => strategy.signon(term, &self.credentials)?,
                _ => return Err(Error::SessionReleased),
            };
            self.observer.on_status(&verdict.raw_text);
            info!(
                "SIGNON={} status=[{}]",
                verdict.ok,
                verdict.raw_text.trim()
            );
            if !verdict.ok {
                let username = self
                    .credentials
                    .signon_username
                    .clone()
                    .unwrap_or_else(|| self.credentials.username.clone());
                return Err(Error::SignOn {
                    username,
                    host: self.host.clone(),
                    status: verdict.raw_text.trim().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Best-effort teardown after a failed handshake.
    fn release(&mut self) {
        if let Some(mut term) = self.term.take() {
            if let Err(err) = term.disconnect() {
                warn!("Capability teardown failed: id={}, {err}", self.id);
            }
        }
        self.set_state(SessionState::Disconnected);
    }

    fn set_state(&mut self, to: SessionState) {
        let event = TransitionEvent::now(self.state, to);
        info!(
            "Session state changed: id={}, {} → {}",
            self.id, event.from, event.to
        );
        self.state = to;
        self.observer.on_transition(&event);
    }
}
