//! The paged screen-table scanner.

use std::collections::VecDeque;

use tracing::debug;

use tn3270_core::{AidKey, Error, Result, StatusLine, TerminalCapability};

/// Row range of a results table on the screen. Columns 1-80 are assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRegion {
    /// First table row (1-based)
    pub top_row: u16,
    /// Last table row (1-based, inclusive)
    pub bottom_row: u16,
}

impl TableRegion {
    /// Create a table region, validating the row range.
    pub fn new(top_row: u16, bottom_row: u16) -> Result<Self> {
        if top_row == 0 {
            return Err(Error::InvalidArgument(
                "top_row must be >= 1".to_string(),
            ));
        }
        if bottom_row < top_row {
            return Err(Error::InvalidArgument(format!(
                "bottom_row {bottom_row} must be >= top_row {top_row}"
            )));
        }
        Ok(Self {
            top_row,
            bottom_row,
        })
    }
}

/// Default row parser: trim and split on whitespace into fields.
pub fn whitespace_fields(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Lazy, forward-only scanner over a paginated results table.
///
/// Rows are read page-by-page from the screen region; page boundaries and
/// the end of the result set are only observable as status-line text. The
/// scanner is non-restartable and must not outlive the session backing its
/// capability; do not build a second scanner over the same capability before
/// this one is exhausted or abandoned.
pub struct ScreenTable<'a, R = Vec<String>> {
    term: &'a mut dyn TerminalCapability,
    region: TableRegion,
    status: StatusLine,
    end_markers: Vec<String>,
    found_marker: Option<String>,
    advance_key: AidKey,
    row_parser: Box<dyn Fn(&str) -> R + 'a>,
    page: VecDeque<R>,
    more_pages: bool,
}

impl<'a> ScreenTable<'a, Vec<String>> {
    /// Create a scanner with the default whitespace row parser.
    pub fn new(term: &'a mut dyn TerminalCapability, region: TableRegion) -> Self {
        Self::with_parser(term, region, whitespace_fields)
    }
}

impl<'a, R> ScreenTable<'a, R> {
    /// Create a scanner with a custom row parser.
    pub fn with_parser(
        term: &'a mut dyn TerminalCapability,
        region: TableRegion,
        row_parser: impl Fn(&str) -> R + 'a,
    ) -> Self {
        Self {
            term,
            region,
            status: StatusLine::default(),
            end_markers: vec!["LAST PAGE".to_string()],
            found_marker: None,
            advance_key: AidKey::Pf(8),
            row_parser: Box::new(row_parser),
            page: VecDeque::new(),
            more_pages: true,
        }
    }

    /// Override the status line location.
    pub fn with_status(mut self, status: StatusLine) -> Self {
        self.status = status;
        self
    }

    /// Override the end-of-results status marker.
    pub fn with_end_marker(mut self, marker: impl Into<String>) -> Self {
        self.end_markers = vec![marker.into()];
        self
    }

    /// Require a "results found" status marker before each page read.
    ///
    /// A status line missing the marker fails the scan with
    /// `Error::TableNotFound`, distinguishing "no results at all" from
    /// "ran out of pages".
    pub fn with_found_marker(mut self, marker: impl Into<String>) -> Self {
        self.found_marker = Some(marker.into());
        self
    }

    /// Override the key that advances to the next page.
    pub fn with_advance_key(mut self, key: AidKey) -> Self {
        self.advance_key = key;
        self
    }

    /// Whether any rows remain, on this page or on pages not yet fetched.
    pub fn has_more_results(&self) -> bool {
        self.more_pages || !self.page.is_empty()
    }

    /// Produce the next parsed row, fetching pages as needed.
    ///
    /// `Ok(None)` is clean exhaustion: the page buffer is empty and the host
    /// reported no more pages.
    pub fn next_row(&mut self) -> Result<Option<R>> {
        loop {
            if let Some(row) = self.page.pop_front() {
                return Ok(Some(row));
            }
            if !self.more_pages {
                return Ok(None);
            }
            self.fetch_page()?;
        }
    }

    /// Iterate the remaining rows.
    pub fn rows(&mut self) -> Rows<'_, 'a, R> {
        Rows { table: self }
    }

    /// Read the current screen's table page and decide pagination.
    fn fetch_page(&mut self) -> Result<()> {
        if let Some(marker) = &self.found_marker {
            let verdict = self
                .status
                .check_passing(self.term, std::slice::from_ref(marker))?;
            if !verdict.ok {
                return Err(Error::TableNotFound(verdict.raw_text.trim().to_string()));
            }
        }

        for row in self.region.top_row..=self.region.bottom_row {
            let line = self.term.read_region(row, 1, 80)?;
            if line.trim().is_empty() {
                // Blank line ends the table data on this page.
                break;
            }
            self.page.push_back((self.row_parser)(&line));
        }

        let verdict = self.status.check_terminators(self.term, &self.end_markers)?;
        self.more_pages = verdict.ok;
        debug!(
            "Table page read: rows={}, more_pages={}, status=[{}]",
            self.page.len(),
            self.more_pages,
            verdict.raw_text.trim()
        );

        if self.more_pages {
            // The page is captured locally; request the host's next page
            // before any row is handed back.
            self.term.send_key(self.advance_key)?;
        }

        Ok(())
    }
}

/// Iterator over the remaining rows of a [`ScreenTable`].
pub struct Rows<'t, 'a, R> {
    table: &'t mut ScreenTable<'a, R>,
}

impl<R> Iterator for Rows<'_, '_, R> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.table.next_row().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tn3270_core::testing::ScriptedTerminal;

    const TOP_ROW: u16 = 11;
    const BOTTOM_ROW: u16 = 23;

    /// Build a 24-row results screen: data rows fill the table region
    /// starting at TOP_ROW, the status text sits on row 24.
    fn results_screen(data_rows: &[&str], status: &str) -> String {
        let mut rows: Vec<String> = (1..TOP_ROW).map(|n| format!("HEADER {n}")).collect();
        rows.extend(data_rows.iter().map(|r| r.to_string()));
        while rows.len() < 23 {
            rows.push(String::new());
        }
        rows.push(format!(" {status}"));
        rows.join("\n")
    }

    fn region() -> TableRegion {
        TableRegion::new(TOP_ROW, BOTTOM_ROW).unwrap()
    }

    #[test]
    fn test_table_region_validation() {
        assert!(TableRegion::new(11, 23).is_ok());
        assert!(TableRegion::new(0, 23).is_err());
        assert!(TableRegion::new(12, 11).is_err());
    }

    #[test]
    fn test_whitespace_fields() {
        assert_eq!(
            whitespace_fields("  ORD OKC229369   B  CKT "),
            vec!["ORD", "OKC229369", "B", "CKT"]
        );
        assert!(whitespace_fields("   ").is_empty());
    }

    #[test]
    fn test_single_last_page() {
        let screen = results_screen(
            &[
                "ORD OKC229369  B",
                "TRK OKC229369001",
                "EVT DVA  ST IE",
                "CAC CXP7BJ3  TSP",
            ],
            "SSC725I FIND SUCCESSFUL - LAST PAGE OF OUTPUT DISPLAYED",
        );
        let mut term = ScriptedTerminal::new(vec![screen.as_str()]);

        let mut table = ScreenTable::new(&mut term, region());
        let mut rows = Vec::new();
        while let Some(row) = table.next_row().unwrap() {
            rows.push(row);
        }

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0], "ORD");
        assert_eq!(rows[0][1], "OKC229369");
        assert!(!table.has_more_results());
        drop(table);

        // End marker seen: no page advance was requested.
        assert_eq!(term.count_calls("key("), 0);
    }

    #[test]
    fn test_blank_row_ends_page_early() {
        let screen = results_screen(
            &["ROW ONE", "ROW TWO", "", "ROW IGNORED"],
            "LAST PAGE OF OUTPUT",
        );
        let mut term = ScriptedTerminal::new(vec![screen.as_str()]);

        let mut table = ScreenTable::new(&mut term, region());
        let mut rows = Vec::new();
        while let Some(row) = table.next_row().unwrap() {
            rows.push(row);
        }

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["ROW".to_string(), "TWO".to_string()]);
    }

    #[test]
    fn test_multi_page_advances_before_yield() {
        let page_one = results_screen(
            &["A 1", "B 2", "C 3", "D 4"],
            "FIND SUCCESSFUL - MORE OUTPUT FOLLOWS",
        );
        let page_two = results_screen(
            &["E 5", "F 6"],
            "FIND SUCCESSFUL - LAST PAGE OF OUTPUT DISPLAYED",
        );
        let mut term = ScriptedTerminal::new(vec![page_one.as_str(), page_two.as_str()])
            .with_advance_on(AidKey::Pf(8));

        let mut table = ScreenTable::new(&mut term, region());

        // First row comes from page one, but the advance request has
        // already gone out: the host redraw overlaps consumption.
        let first = table.next_row().unwrap().unwrap();
        assert_eq!(first, vec!["A".to_string(), "1".to_string()]);
        assert!(table.has_more_results());

        let mut rest = Vec::new();
        while let Some(row) = table.next_row().unwrap() {
            rest.push(row);
        }
        assert_eq!(rest.len(), 5);
        assert_eq!(rest[4], vec!["F".to_string(), "6".to_string()]);
        assert!(!table.has_more_results());
    }

    #[test]
    fn test_advance_request_precedes_first_yield() {
        let page_one = results_screen(&["A 1"], "MORE OUTPUT FOLLOWS");
        let page_two = results_screen(&["B 2"], "LAST PAGE OF OUTPUT");
        let mut term = ScriptedTerminal::new(vec![page_one.as_str(), page_two.as_str()])
            .with_advance_on(AidKey::Pf(8));

        {
            let mut table = ScreenTable::new(&mut term, region());
            table.next_row().unwrap().unwrap();
        }
        // The PF(8) went out during the first fetch, before any row was
        // handed back.
        assert_eq!(term.count_calls("key(PF(8))"), 1);
    }

    #[test]
    fn test_found_marker_missing_fails() {
        let screen = results_screen(&[], "SSC729E NO RECORDS MATCH THE SEARCH");
        let mut term = ScriptedTerminal::new(vec![screen.as_str()]);

        let mut table = ScreenTable::new(&mut term, region())
            .with_found_marker("FIND SUCCESSFUL");

        match table.next_row() {
            Err(Error::TableNotFound(status)) => {
                assert!(status.contains("NO RECORDS MATCH"));
            }
            other => panic!("expected TableNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_found_marker_present_scans() {
        let screen = results_screen(
            &["ROW ONE"],
            "FIND SUCCESSFUL - LAST PAGE OF OUTPUT DISPLAYED",
        );
        let mut term = ScriptedTerminal::new(vec![screen.as_str()]);

        let mut table = ScreenTable::new(&mut term, region())
            .with_found_marker("FIND SUCCESSFUL");
        assert_eq!(
            table.next_row().unwrap().unwrap(),
            vec!["ROW".to_string(), "ONE".to_string()]
        );
        assert!(table.next_row().unwrap().is_none());
    }

    #[test]
    fn test_exhaustion_is_sticky() {
        let screen = results_screen(&["ONLY ROW"], "LAST PAGE");
        let mut term = ScriptedTerminal::new(vec![screen.as_str()]);

        let mut table = ScreenTable::new(&mut term, region());
        assert!(table.next_row().unwrap().is_some());
        assert!(table.next_row().unwrap().is_none());
        assert!(table.next_row().unwrap().is_none());
        assert!(!table.has_more_results());
    }

    #[test]
    fn test_custom_row_parser() {
        let screen = results_screen(&[" RAW LINE CONTENT"], "LAST PAGE");
        let mut term = ScriptedTerminal::new(vec![screen.as_str()]);

        let mut table = ScreenTable::with_parser(&mut term, region(), |line| {
            format!("PARSED:{}", line.trim_end())
        });

        let row = table.next_row().unwrap().unwrap();
        assert_eq!(row, "PARSED: RAW LINE CONTENT");
    }

    #[test]
    fn test_rows_iterator() {
        let screen = results_screen(&["A 1", "B 2"], "LAST PAGE");
        let mut term = ScriptedTerminal::new(vec![screen.as_str()]);

        let mut table = ScreenTable::new(&mut term, region());
        let rows: Result<Vec<_>> = table.rows().collect();
        let rows = rows.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["A".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_custom_end_marker_and_status_row() {
        let mut rows: Vec<String> = (1..TOP_ROW).map(|_| String::new()).collect();
        rows.push("DATA ROW".to_string());
        while rows.len() < 21 {
            rows.push(String::new());
        }
        rows.push(" END OF LIST".to_string()); // status on row 22
        let screen = rows.join("\n");
        let mut term = ScriptedTerminal::new(vec![screen.as_str()]);

        let mut table = ScreenTable::new(&mut term, region())
            .with_status(StatusLine::at_row(22))
            .with_end_marker("END OF LIST");

        assert!(table.next_row().unwrap().is_some());
        assert!(table.next_row().unwrap().is_none());
        drop(table);
        assert_eq!(term.count_calls("key("), 0);
    }
}
