//! Test support: a scripted terminal capability.
//!
//! `ScriptedTerminal` stands in for the real emulator backend in unit and
//! integration tests. It serves screen text from a pre-scripted sequence of
//! screens, optionally advancing to the next screen when a chosen AID key is
//! pressed, and journals every capability call so tests can assert on the
//! exact interaction sequence.

use crate::key::AidKey;
use crate::terminal::{TerminalCapability, SCREEN_COLS};
use crate::{Error, Result};

/// One scripted 24x80 screen.
#[derive(Debug, Clone)]
pub struct Screen {
    rows: Vec<String>,
}

impl Screen {
    /// Build a screen from newline-separated text.
    ///
    /// Rows beyond the given text read as blank; rows are padded to 80
    /// columns on read.
    pub fn from_text(text: &str) -> Self {
        Self {
            rows: text.lines().map(str::to_string).collect(),
        }
    }

    /// Text of one row (1-based), padded to the full screen width.
    pub fn row_text(&self, row: u16) -> String {
        let raw = self
            .rows
            .get(row as usize - 1)
            .map(String::as_str)
            .unwrap_or("");
        let mut text: String = raw.chars().take(SCREEN_COLS as usize).collect();
        while text.chars().count() < SCREEN_COLS as usize {
            text.push(' ');
        }
        text
    }
}

/// Scripted in-memory terminal capability.
#[derive(Debug)]
pub struct ScriptedTerminal {
    screens: Vec<Screen>,
    current: usize,
    advance_on: Option<AidKey>,
    fail_connect: bool,
    field_ready: bool,
    connected: bool,
    journal: Vec<String>,
}

impl ScriptedTerminal {
    /// Create a scripted terminal from a sequence of screen texts.
    pub fn new(screens: Vec<&str>) -> Self {
        Self {
            screens: screens.into_iter().map(Screen::from_text).collect(),
            current: 0,
            advance_on: None,
            fail_connect: false,
            field_ready: true,
            connected: false,
            journal: Vec::new(),
        }
    }

    /// Advance to the next scripted screen whenever `key` is pressed.
    pub fn with_advance_on(mut self, key: AidKey) -> Self {
        self.advance_on = Some(key);
        self
    }

    /// Make `connect` fail with an IO error.
    pub fn with_connect_failure(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    /// Set the `field_ready` answer (default true).
    pub fn with_field_ready(mut self, ready: bool) -> Self {
        self.field_ready = ready;
        self
    }

    /// Index of the screen currently shown.
    pub fn screen_index(&self) -> usize {
        self.current
    }

    /// Jump to a scripted screen.
    pub fn set_screen(&mut self, index: usize) {
        assert!(index < self.screens.len(), "screen index out of script");
        self.current = index;
    }

    /// Whether `connect` has run without a matching `disconnect`.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Journal of capability calls, in order.
    pub fn calls(&self) -> &[String] {
        &self.journal
    }

    /// Count of journal entries matching a prefix, e.g. `"key(Enter)"`.
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.journal.iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&mut self, call: String) {
        self.journal.push(call);
    }

    fn screen(&self) -> &Screen {
        &self.screens[self.current]
    }
}

impl TerminalCapability for ScriptedTerminal {
    fn connect(&mut self, host: &str) -> Result<()> {
        self.record(format!("connect({host})"));
        if self.fail_connect {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("cannot reach {host}"),
            )));
        }
        self.connected = true;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.record("disconnect".to_string());
        self.connected = false;
        Ok(())
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        self.record(format!("move({row},{col})"));
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        self.record(format!("type({text})"));
        Ok(())
    }

    fn send_key(&mut self, key: AidKey) -> Result<()> {
        self.record(format!("key({key})"));
        if self.advance_on == Some(key) && self.current + 1 < self.screens.len() {
            self.current += 1;
        }
        Ok(())
    }

    fn read_region(&mut self, row: u16, col: u16, length: u16) -> Result<String> {
        let line = self.screen().row_text(row);
        let start = col as usize - 1;
        let text: String = line.chars().skip(start).take(length as usize).collect();
        Ok(text)
    }

    fn field_ready(&mut self) -> Result<bool> {
        Ok(self.field_ready)
    }
}
