//! Primary login strategies.
//!
//! The login handshake is the first credential exchange after connecting.
//! Both variants share the same shape: identify the target application on the
//! first screen, submit, let the host repaint, then fill the USERID and
//! PASSWORD fields on the second screen and submit again. Success or failure
//! is only observable as a rejection marker at a fixed screen coordinate, so
//! `login` reports a boolean and the session escalates it to an error.

use std::thread::sleep;
use std::time::Duration;

use tracing::debug;

use tn3270_core::{AidKey, Credentials, Result, ScreenPosition, TerminalCapability};

/// Fixed settle delay between the two login screens.
///
/// A deliberately simpler substitute for full redraw polling at this step:
/// the next screen's layout is well known.
pub const LOGIN_SCREEN_SETTLE: Duration = Duration::from_millis(300);

/// Primary login behavior, injected into a session at construction.
pub trait LoginStrategy {
    /// Drive the login handshake.
    ///
    /// Returns true on acceptance, false when the host shows the rejection
    /// marker. Never raises on rejection; capability errors propagate.
    fn login(&self, term: &mut dyn TerminalCapability, credentials: &Credentials) -> Result<bool>;
}

/// Spin until an unprotected input field is ready on the current screen.
///
/// No explicit time limit: this runs against a screen the host has already
/// presented, so the capability answers instantly in practice.
pub(crate) fn wait_for_field(term: &mut dyn TerminalCapability) -> Result<()> {
    while !term.field_ready()? {}
    Ok(())
}

/// Shared second-screen steps: USERID, Tab, PASSWORD, submit.
fn enter_user_password(
    term: &mut dyn TerminalCapability,
    credentials: &Credentials,
) -> Result<()> {
    wait_for_field(term)?;
    term.type_text(&credentials.username)?;
    term.send_key(AidKey::Tab)?;
    term.type_text(&credentials.password)?;
    term.send_key(AidKey::Enter)
}

/// ACF2-style login: the first screen asks for a REGION code.
///
/// The region code is the application ID; it is typed into a field at a
/// fixed position on the first screen.
#[derive(Debug, Clone)]
pub struct Acf2Login {
    /// Position of the REGION field on the first screen
    pub region_field: ScreenPosition,
    /// Position where a rejection marker appears on the login screen
    pub reject_marker: ScreenPosition,
    /// Rejection marker text
    pub reject_text: String,
    /// Settle delay between the two login screens
    pub settle: Duration,
}

impl Default for Acf2Login {
    fn default() -> Self {
        Self {
            region_field: ScreenPosition::new(1, 3),
            reject_marker: ScreenPosition::new(2, 2),
            reject_text: "REJECTED".to_string(),
            settle: LOGIN_SCREEN_SETTLE,
        }
    }
}

impl Acf2Login {
    /// Create the strategy with default field layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the REGION field position.
    pub fn with_region_field(mut self, pos: ScreenPosition) -> Self {
        self.region_field = pos;
        self
    }

    /// Override the rejection marker location and text.
    pub fn with_reject_marker(mut self, pos: ScreenPosition, text: impl Into<String>) -> Self {
        self.reject_marker = pos;
        self.reject_text = text.into();
        self
    }

    /// Override the settle delay between login screens.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

impl LoginStrategy for Acf2Login {
    fn login(&self, term: &mut dyn TerminalCapability, credentials: &Credentials) -> Result<bool> {
        // Screen 1: enter the REGION
        debug!("ACF2 login: region '{}'", credentials.app_id);
        wait_for_field(term)?;
        term.move_cursor(self.region_field.row, self.region_field.col)?;
        term.type_text(&credentials.app_id)?;
        term.send_key(AidKey::Enter)?;

        sleep(self.settle);

        // Screen 2: USERID and PASSWORD
        enter_user_password(term, credentials)?;

        let rejected = term.text_at(
            self.reject_marker.row,
            self.reject_marker.col,
            &self.reject_text,
        )?;
        Ok(!rejected)
    }
}

/// RACF-style login: the first screen asks for an APPLICATION ID.
#[derive(Debug, Clone)]
pub struct RacfLogin {
    /// Position of the APPLICATION field; `None` types at the current cursor
    pub app_field: Option<ScreenPosition>,
    /// Position where a rejection marker appears on the login screen
    pub reject_marker: ScreenPosition,
    /// Rejection marker text
    pub reject_text: String,
    /// Settle delay between the two login screens
    pub settle: Duration,
}

impl Default for RacfLogin {
    fn default() -> Self {
        Self {
            app_field: Some(ScreenPosition::new(3, 15)),
            reject_marker: ScreenPosition::new(17, 2),
            reject_text: "REJECTED".to_string(),
            settle: LOGIN_SCREEN_SETTLE,
        }
    }
}

impl RacfLogin {
    /// Create the strategy with default field layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the APPLICATION field position; `None` skips the cursor move.
    pub fn with_app_field(mut self, pos: Option<ScreenPosition>) -> Self {
        self.app_field = pos;
        self
    }

    /// Override the rejection marker location and text.
    pub fn with_reject_marker(mut self, pos: ScreenPosition, text: impl Into<String>) -> Self {
        self.reject_marker = pos;
        self.reject_text = text.into();
        self
    }

    /// Override the settle delay between login screens.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

impl LoginStrategy for RacfLogin {
    fn login(&self, term: &mut dyn TerminalCapability, credentials: &Credentials) -> Result<bool> {
        // Screen 1: enter the APPLICATION ID
        debug!("RACF login: application '{}'", credentials.app_id);
        wait_for_field(term)?;
        if let Some(field) = self.app_field {
            term.move_cursor(field.row, field.col)?;
        }
        term.type_text(&credentials.app_id)?;
        term.send_key(AidKey::Enter)?;

        sleep(self.settle);

        // Screen 2: USERID and PASSWORD
        enter_user_password(term, credentials)?;

        let rejected = term.text_at(
            self.reject_marker.row,
            self.reject_marker.col,
            &self.reject_text,
        )?;
        Ok(!rejected)
    }
}
