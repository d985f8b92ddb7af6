//! The terminal capability boundary.
//!
//! Everything below this trait - the emulator process, its network transport,
//! character encoding - is an external collaborator. The capability is
//! assumed synchronous and reliable: calls return promptly and are not
//! separately bounded at this layer.

use crate::key::AidKey;
use crate::Result;

/// Standard 3270 model 2 screen rows.
pub const SCREEN_ROWS: u16 = 24;

/// Standard 3270 model 2 screen columns.
pub const SCREEN_COLS: u16 = 80;

/// Low-level terminal emulation capability.
///
/// Coordinates are 1-based at this interface; implementations translate to
/// any 0-based wire representation internally. One capability instance is a
/// single mutable shared resource, exclusively owned by one session for the
/// session's lifetime; all operations against it are strictly sequential.
pub trait TerminalCapability {
    /// Open the connection to a host.
    fn connect(&mut self, host: &str) -> Result<()>;

    /// Tear down the connection.
    fn disconnect(&mut self) -> Result<()>;

    /// Move the cursor to a screen position (1-based row and column).
    fn move_cursor(&mut self, row: u16, col: u16) -> Result<()>;

    /// Type text at the current cursor position.
    ///
    /// This is local key entry, not a network send; it is the workaround for
    /// entering text into protected fields such as usernames and passwords.
    fn type_text(&mut self, text: &str) -> Result<()>;

    /// Press an AID key.
    fn send_key(&mut self, key: AidKey) -> Result<()>;

    /// Read `length` characters of screen text starting at (row, col).
    fn read_region(&mut self, row: u16, col: u16, length: u16) -> Result<String>;

    /// Whether an unprotected input field is ready on the current screen.
    fn field_ready(&mut self) -> Result<bool>;

    /// Whether the given text is present at exactly (row, col).
    fn text_at(&mut self, row: u16, col: u16, text: &str) -> Result<bool> {
        let on_screen = self.read_region(row, col, text.chars().count() as u16)?;
        Ok(on_screen == text)
    }
}
