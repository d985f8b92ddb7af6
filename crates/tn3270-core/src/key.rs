//! AID key types for block-mode terminal input.
//!
//! A 3270 screen is composed locally and only submitted to the host when an
//! Attention IDentifier key is pressed. Enter, Clear, the PF keys and the PA
//! keys all transmit; Tab is a local cursor movement between fields.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Key sent to the terminal capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AidKey {
    /// Enter key, the plain submit
    Enter,
    /// Tab key, local move to the next field
    Tab,
    /// Clear key, blanks the screen
    Clear,
    /// Program Function key PF(1)..=PF(24)
    Pf(u8),
    /// Program Attention key PA(1)..=PA(3)
    Pa(u8),
}

impl AidKey {
    /// Create a PF key, validating the 1..=24 range.
    pub fn pf(number: u8) -> Result<Self> {
        if (1..=24).contains(&number) {
            Ok(AidKey::Pf(number))
        } else {
            Err(Error::InvalidKey(format!("PF({number})")))
        }
    }

    /// Create a PA key, validating the 1..=3 range.
    pub fn pa(number: u8) -> Result<Self> {
        if (1..=3).contains(&number) {
            Ok(AidKey::Pa(number))
        } else {
            Err(Error::InvalidKey(format!("PA({number})")))
        }
    }

    /// Parse a key from its string representation.
    ///
    /// Examples:
    /// - "Enter" -> AidKey::Enter
    /// - "Tab" -> AidKey::Tab
    /// - "Clear" -> AidKey::Clear
    /// - "PF(7)" -> AidKey::Pf(7)
    /// - "PA(2)" -> AidKey::Pa(2)
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        match s {
            "Enter" | "Return" => return Ok(AidKey::Enter),
            "Tab" => return Ok(AidKey::Tab),
            "Clear" => return Ok(AidKey::Clear),
            _ => {}
        }

        if let Some(number) = Self::parse_numbered(s, "PF(") {
            return Self::pf(number?);
        }
        if let Some(number) = Self::parse_numbered(s, "PA(") {
            return Self::pa(number?);
        }

        Err(Error::InvalidKey(s.to_string()))
    }

    /// Parse the numeric part of "PF(n)" / "PA(n)" forms.
    fn parse_numbered(s: &str, prefix: &str) -> Option<Result<u8>> {
        let inner = s.strip_prefix(prefix)?.strip_suffix(')')?;
        Some(
            inner
                .parse::<u8>()
                .map_err(|_| Error::InvalidKey(s.to_string())),
        )
    }

    /// Whether this key submits the screen to the host.
    ///
    /// Tab is a local field navigation key; everything else transmits and
    /// triggers a host-side redraw.
    pub fn transmits(&self) -> bool {
        !matches!(self, AidKey::Tab)
    }
}

impl std::fmt::Display for AidKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AidKey::Enter => write!(f, "Enter"),
            AidKey::Tab => write!(f, "Tab"),
            AidKey::Clear => write!(f, "Clear"),
            AidKey::Pf(n) => write!(f, "PF({n})"),
            AidKey::Pa(n) => write!(f, "PA({n})"),
        }
    }
}
