//! Full session lifecycle against a scripted terminal: connect, ACF2 login,
//! sign-on, sign-off, disconnect.

use std::time::Duration;

use tn3270_core::testing::ScriptedTerminal;
use tn3270_core::{AidKey, Credentials, Error, SessionConfig, SessionState, TerminalCapability};
use tn3270_session::{Acf2Login, FormatSignOn, Session};

/// Build a 24-row screen with a banner on row 1 and a status on row 24.
fn screen(banner: &str, status: &str) -> String {
    let mut rows = vec![format!(" {banner}")];
    rows.extend(std::iter::repeat(String::new()).take(22));
    rows.push(format!(" {status}"));
    rows.join("\n")
}

fn signon_credentials() -> Credentials {
    Credentials::new("OPER1", "secret", "TST01").with_signon("SUSER", "spass")
}

/// Screens for the full journey, advanced one step per Enter:
/// region entry, login form, application menu, sign-on form, sign-on status,
/// sign-off form, sign-off status.
fn full_journey_terminal() -> ScriptedTerminal {
    let screens = vec![
        screen("ENTER REGION", ""),
        screen("USERID . . . :", ""),
        screen("APPLICATION MENU", ""),
        screen("SIGNON TO APPLICATION", ""),
        screen("SIGNON TO APPLICATION", "SIGNON SUCCESSFUL"),
        screen("SIGNON TO APPLICATION", ""),
        screen("SIGNON TO APPLICATION", "SIGNOFF SUCCESSFUL"),
    ];
    ScriptedTerminal::new(screens.iter().map(String::as_str).collect())
        .with_advance_on(AidKey::Enter)
}

fn build_session(term: ScriptedTerminal) -> Session<ScriptedTerminal> {
    Session::new(term, "mainframe.example.org", signon_credentials(), SessionConfig::default())
        .unwrap()
        .with_login(Acf2Login::new().with_settle(Duration::ZERO))
        .with_signon(FormatSignOn::new("VOS1SIGN"))
}

#[test]
fn full_lifecycle_with_signon() {
    let mut session = build_session(full_journey_terminal());

    session.connect().unwrap();
    assert_eq!(session.state(), SessionState::Active);

    // Application work happens against the live capability.
    let term = session.terminal_mut().unwrap();
    assert!(term.is_connected());
    assert!(term.text_at(1, 2, "APPLICATION").is_ok());

    session.disconnect().unwrap();
    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(session.terminal_mut().is_none());
}

#[test]
fn signon_failure_is_fatal_and_releases_capability() {
    let screens = vec![
        screen("ENTER REGION", ""),
        screen("USERID . . . :", ""),
        screen("APPLICATION MENU", ""),
        screen("SIGNON TO APPLICATION", ""),
        screen("SIGNON TO APPLICATION", "SECURITY VIOLATION"),
        // Retry path: format re-selection plus double submit.
        screen("SIGNON TO APPLICATION", ""),
        screen("SIGNON TO APPLICATION", ""),
        screen("SIGNON TO APPLICATION", "SECURITY VIOLATION"),
    ];
    let term = ScriptedTerminal::new(screens.iter().map(String::as_str).collect())
        .with_advance_on(AidKey::Enter);
    let mut session = build_session(term);

    match session.connect() {
        Err(Error::SignOn {
            username,
            host,
            status,
        }) => {
            assert_eq!(username, "SUSER");
            assert_eq!(host, "mainframe.example.org");
            assert!(status.contains("SECURITY VIOLATION"));
        }
        other => panic!("expected SignOn error, got {other:?}"),
    }

    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(session.terminal_mut().is_none());
}

#[test]
fn failed_signoff_does_not_block_disconnect() {
    let screens = vec![
        screen("ENTER REGION", ""),
        screen("USERID . . . :", ""),
        screen("APPLICATION MENU", ""),
        screen("SIGNON TO APPLICATION", ""),
        screen("SIGNON TO APPLICATION", "SIGNON SUCCESSFUL"),
        screen("SIGNON TO APPLICATION", ""),
        screen("SIGNON TO APPLICATION", "SIGNOFF REJECTED BY HOST"),
    ];
    let term = ScriptedTerminal::new(screens.iter().map(String::as_str).collect())
        .with_advance_on(AidKey::Enter);
    let mut session = build_session(term);

    session.connect().unwrap();
    // Sign-off fails on the host, disconnect still completes.
    session.disconnect().unwrap();
    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(session.terminal_mut().is_none());
}
