//! Credentials and session configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Credentials for a terminal session.
///
/// Immutable after session construction. The optional sign-on pair is only
/// used when the host requires a secondary, application-level credential
/// exchange after the primary login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Primary login username
    pub username: String,
    /// Primary login password
    pub password: String,
    /// Application ID; routes the user to the LOGIN (or SIGNON) screen
    pub app_id: String,
    /// Secondary sign-on username, when the host requires one
    #[serde(default)]
    pub signon_username: Option<String>,
    /// Secondary sign-on password, when the host requires one
    #[serde(default)]
    pub signon_password: Option<String>,
}

impl Credentials {
    /// Create credentials for a login-only host.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            app_id: app_id.into(),
            signon_username: None,
            signon_password: None,
        }
    }

    /// Add the secondary sign-on credential pair.
    pub fn with_signon(
        mut self,
        signon_username: impl Into<String>,
        signon_password: impl Into<String>,
    ) -> Self {
        self.signon_username = Some(signon_username.into());
        self.signon_password = Some(signon_password.into());
        self
    }

    /// Validate credential values.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::Config("username cannot be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(Error::Config("password cannot be empty".to_string()));
        }
        if self.app_id.trim().is_empty() {
            return Err(Error::Config("app_id cannot be empty".to_string()));
        }
        if self.signon_username.is_some() != self.signon_password.is_some() {
            return Err(Error::Config(
                "signon_username and signon_password must be set together".to_string(),
            ));
        }
        Ok(())
    }
}

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// When true, open an observable terminal window; false runs headless
    pub visible: bool,
    /// Capability-level connection timeout in seconds
    pub timeout_secs: u64,
    /// Row used by host applications for outcome/progress text
    pub status_row: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            visible: false,
            timeout_secs: 10,
            status_row: 24,
        }
    }
}

impl SessionConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SessionConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be > 0".to_string()));
        }
        if self.status_row == 0 {
            return Err(Error::Config("status_row must be > 0".to_string()));
        }
        Ok(())
    }
}
