//! Status-line reading and verdict evaluation.
//!
//! Host applications report outcome and progress as plain text on a fixed
//! screen row (row 24 by default). This is the entire "wire protocol" between
//! the automation and the host: positional text matched against
//! caller-supplied literal substrings. Matching is uppercase-normalized on
//! both sides; an overlap between terminator and passing strings is caller
//! misconfiguration and is not handled specially.

use crate::terminal::TerminalCapability;
use crate::Result;

/// Outcome of one status-line check.
///
/// Ephemeral: recomputed on every status check, never cached across reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusVerdict {
    /// Whether the status text passed the configured check
    pub ok: bool,
    /// Raw status-line text, untrimmed
    pub raw_text: String,
}

impl StatusVerdict {
    /// Evaluate raw status text against terminator and passing string sets.
    ///
    /// With terminator strings, `ok` is true iff none matched (result tables
    /// use this to keep their fetch loop running). Otherwise with passing
    /// strings, `ok` is true iff any matched. With neither, `ok` defaults to
    /// true.
    pub fn evaluate(raw_text: &str, terminators: &[String], passing: &[String]) -> Self {
        let haystack = raw_text.to_uppercase();

        let ok = if !terminators.is_empty() {
            !terminators
                .iter()
                .any(|t| haystack.contains(&t.to_uppercase()))
        } else if !passing.is_empty() {
            passing.iter().any(|p| haystack.contains(&p.to_uppercase()))
        } else {
            true
        };

        Self {
            ok,
            raw_text: raw_text.to_string(),
        }
    }
}

/// Location of the status line on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    /// Row number (1-based) holding the status text
    pub row: u16,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self { row: 24 }
    }
}

impl StatusLine {
    /// Create a status line at the given row.
    pub fn at_row(row: u16) -> Self {
        Self { row }
    }

    /// Read the status text, columns 1-80.
    pub fn read(&self, term: &mut dyn TerminalCapability) -> Result<String> {
        term.read_region(self.row, 1, 80)
    }

    /// Read the status text and check it against passing strings.
    pub fn check_passing(
        &self,
        term: &mut dyn TerminalCapability,
        passing: &[String],
    ) -> Result<StatusVerdict> {
        let raw = self.read(term)?;
        Ok(StatusVerdict::evaluate(&raw, &[], passing))
    }

    /// Read the status text and check it against terminator strings.
    pub fn check_terminators(
        &self,
        term: &mut dyn TerminalCapability,
        terminators: &[String],
    ) -> Result<StatusVerdict> {
        let raw = self.read(term)?;
        Ok(StatusVerdict::evaluate(&raw, terminators, &[]))
    }
}
