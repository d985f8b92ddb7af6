//! Named screen formats and screen commands.
//!
//! Hosts in this family expose application screens as named formats selected
//! with a "/FOR <name>" entry. A selected format may carry a command buffer
//! at a fixed position.

use tracing::debug;

use tn3270_core::{AidKey, Result, ScreenPosition, TerminalCapability};

/// Select a named screen format: Clear, home the cursor, type
/// "/FOR <name>", submit.
pub fn select_format(term: &mut dyn TerminalCapability, screen_name: &str) -> Result<()> {
    debug!("Selecting screen format: /FOR {screen_name}");
    term.send_key(AidKey::Clear)?;
    term.move_cursor(1, 1)?;
    term.type_text(&format!("/FOR {screen_name}"))?;
    term.send_key(AidKey::Enter)
}

/// Enter a command into the current format's command buffer and execute it.
///
/// The command field defaults to (1, 10) on these hosts.
pub fn send_screen_command(
    term: &mut dyn TerminalCapability,
    command_name: &str,
    at: ScreenPosition,
) -> Result<()> {
    debug!("Sending screen command '{command_name}' at {},{}", at.row, at.col);
    term.move_cursor(at.row, at.col)?;
    term.type_text(command_name)?;
    term.send_key(AidKey::Enter)
}

/// Default position of the command buffer on a formatted screen.
pub fn default_command_field() -> ScreenPosition {
    ScreenPosition::new(1, 10)
}
