//! Geometry types for 1-based 3270 screen coordinates.
//!
//! The 3270 interface addresses the screen with 1-based row and column
//! numbers; the capability backend translates to any 0-based wire
//! representation internally.

use serde::{Deserialize, Serialize};

/// Position on the terminal screen (row, column), both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPosition {
    /// Row number (1-based)
    pub row: u16,
    /// Column number (1-based)
    pub col: u16,
}

impl ScreenPosition {
    /// Create a new screen position.
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Home position (1, 1), the top-left corner of the screen.
    pub fn home() -> Self {
        Self { row: 1, col: 1 }
    }
}

/// A horizontal run of characters on one screen row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Row number (1-based)
    pub row: u16,
    /// Starting column (1-based)
    pub col: u16,
    /// Length in columns
    pub length: u16,
}

impl Region {
    /// Create a new region.
    pub fn new(row: u16, col: u16, length: u16) -> Self {
        Self { row, col, length }
    }

    /// A full 80-column row.
    pub fn full_row(row: u16) -> Self {
        Self {
            row,
            col: 1,
            length: 80,
        }
    }

    /// Starting position of this region.
    pub fn start(&self) -> ScreenPosition {
        ScreenPosition::new(self.row, self.col)
    }

    /// Column one past the end of this region.
    pub fn end_col(&self) -> u16 {
        self.col + self.length
    }

    /// Check if a position falls inside this region.
    pub fn contains(&self, pos: &ScreenPosition) -> bool {
        pos.row == self.row && pos.col >= self.col && pos.col < self.end_col()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_position_creation() {
        let pos = ScreenPosition::new(3, 15);
        assert_eq!(pos.row, 3);
        assert_eq!(pos.col, 15);
    }

    #[test]
    fn test_screen_position_home() {
        assert_eq!(ScreenPosition::home(), ScreenPosition::new(1, 1));
    }

    #[test]
    fn test_region_full_row() {
        let region = Region::full_row(24);
        assert_eq!(region.row, 24);
        assert_eq!(region.col, 1);
        assert_eq!(region.length, 80);
        assert_eq!(region.end_col(), 81);
    }

    #[test]
    fn test_region_contains() {
        let region = Region::new(2, 10, 8);

        assert!(region.contains(&ScreenPosition::new(2, 10))); // start
        assert!(region.contains(&ScreenPosition::new(2, 17))); // last column
        assert!(!region.contains(&ScreenPosition::new(2, 18))); // one past end
        assert!(!region.contains(&ScreenPosition::new(2, 9))); // before start
        assert!(!region.contains(&ScreenPosition::new(3, 10))); // wrong row
    }

    #[test]
    fn test_region_start() {
        let region = Region::new(1, 3, 5);
        assert_eq!(region.start(), ScreenPosition::new(1, 3));
    }
}
