//! Error types for tn3270 session automation.

use thiserror::Error;

/// Main error type for tn3270 operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid argument at construction time
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid AID key string
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A required screen condition did not appear within its time budget
    #[error("Screen condition '{condition}' not met after {waited_ms}ms")]
    ScreenWait {
        /// Description of the awaited condition
        condition: String,
        /// Time spent polling, in milliseconds
        waited_ms: u64,
    },

    /// The host rejected the primary login credentials
    #[error("User \"{username}\" could not login to \"{host}\"")]
    Login {
        /// Login username
        username: String,
        /// Target host
        host: String,
    },

    /// The secondary sign-on exchange failed after the retry path
    #[error("User \"{username}\" could not complete sign-on to \"{host}\": status=[{status}]")]
    SignOn {
        /// Sign-on username
        username: String,
        /// Target host
        host: String,
        /// Raw status-line text at the time of failure
        status: String,
    },

    /// The host reported no valid result table for a query
    #[error("No result table on screen: status=[{0}]")]
    TableNotFound(String),

    /// A session was used without a concrete login strategy
    #[error("No login strategy configured for this session")]
    LoginNotConfigured,

    /// The terminal capability was already released by a prior disconnect
    #[error("Session capability already released")]
    SessionReleased,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error from the capability transport
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = Error::InvalidArgument("time_limit must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: time_limit must be positive"
        );
    }

    #[test]
    fn test_invalid_key_error() {
        let err = Error::InvalidKey("PF(25)".to_string());
        assert_eq!(err.to_string(), "Invalid key: PF(25)");
    }

    #[test]
    fn test_screen_wait_error() {
        let err = Error::ScreenWait {
            condition: "sign-on banner".to_string(),
            waited_ms: 1350,
        };
        assert_eq!(
            err.to_string(),
            "Screen condition 'sign-on banner' not met after 1350ms"
        );
    }

    #[test]
    fn test_login_error() {
        let err = Error::Login {
            username: "OPER1".to_string(),
            host: "mainframe.example.org".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "User \"OPER1\" could not login to \"mainframe.example.org\""
        );
    }

    #[test]
    fn test_signon_error() {
        let err = Error::SignOn {
            username: "signon_user".to_string(),
            host: "mainframe.example.org".to_string(),
            status: "INVALID SIGNON".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("could not complete sign-on"));
        assert!(display.contains("INVALID SIGNON"));
    }

    #[test]
    fn test_table_not_found_error() {
        let err = Error::TableNotFound("SSC729E NO RECORDS FOUND".to_string());
        assert_eq!(
            err.to_string(),
            "No result table on screen: status=[SSC729E NO RECORDS FOUND]"
        );
    }

    #[test]
    fn test_login_not_configured_error() {
        let err = Error::LoginNotConfigured;
        assert_eq!(
            err.to_string(),
            "No login strategy configured for this session"
        );
    }

    #[test]
    fn test_session_released_error() {
        let err = Error::SessionReleased;
        assert_eq!(err.to_string(), "Session capability already released");
    }

    #[test]
    fn test_config_error() {
        let err = Error::Config("status_row must be > 0".to_string());
        assert_eq!(err.to_string(), "Configuration error: status_row must be > 0");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_result_type() {
        let success: Result<u32> = Ok(7);
        assert!(success.is_ok());

        let failure: Result<u32> = Err(Error::LoginNotConfigured);
        assert!(failure.is_err());
    }

    #[test]
    fn test_error_debug() {
        let err = Error::InvalidKey("PA(9)".to_string());
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("InvalidKey"));
    }
}
