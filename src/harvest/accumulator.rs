//! Row accumulation across pages
//!
//! Collects one `PageTable` per visited page and produces the single
//! combined table the publisher writes. Column headers are taken from
//! the first page; later pages are assumed to match (the dashboard
//! renders the same listing throughout) and are only reshaped to the
//! header width so the published rectangle is always regular.

use super::table::PageTable;

/// Ordered concatenation of harvested page tables
#[derive(Debug, Default)]
pub struct TableAccumulator {
    headers: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl TableAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page's rows, in page-visit order.
    pub fn push_page(&mut self, page: PageTable) {
        let width = match &self.headers {
            Some(headers) => headers.len(),
            None => {
                let width = page.headers.len();
                self.headers = Some(page.headers);
                width
            }
        };

        for mut row in page.rows {
            // Missing cells become empty strings, never absent; stray
            // extra cells are dropped
            row.resize(width, String::new());
            self.rows.push(row);
        }
    }

    /// Total data rows accumulated so far
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Produce the combined table, or `None` when nothing was harvested.
    pub fn into_combined(self) -> Option<CombinedTable> {
        let headers = self.headers?;
        if self.rows.is_empty() {
            return None;
        }
        Some(CombinedTable {
            headers,
            rows: self.rows,
        })
    }
}

/// The full table to publish: header row plus all data rows
#[derive(Debug, PartialEq)]
pub struct CombinedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CombinedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Flatten into the value grid the spreadsheet write expects:
    /// header row first, then the data rows.
    pub fn into_values(self) -> Vec<Vec<String>> {
        let mut values = Vec::with_capacity(self.rows.len() + 1);
        values.push(self.headers);
        values.extend(self.rows);
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(headers: &[&str], rows: &[&[&str]]) -> PageTable {
        PageTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_rows_concatenate_in_page_order() {
        let mut acc = TableAccumulator::new();
        acc.push_page(page(&["Name", "Plan"], &[&["a", "1"], &["b", "2"]]));
        acc.push_page(page(&["Name", "Plan"], &[&["c", "3"]]));

        assert_eq!(acc.row_count(), 3);
        let combined = acc.into_combined().unwrap();
        assert_eq!(combined.rows[0][0], "a");
        assert_eq!(combined.rows[2][0], "c");
    }

    #[test]
    fn test_header_comes_from_first_page() {
        let mut acc = TableAccumulator::new();
        acc.push_page(page(&["Name", "Plan"], &[&["a", "1"]]));
        acc.push_page(page(&["Renamed", "Columns"], &[&["b", "2"]]));

        let combined = acc.into_combined().unwrap();
        assert_eq!(combined.headers, vec!["Name", "Plan"]);
        assert_eq!(combined.row_count(), 2);
    }

    #[test]
    fn test_short_rows_padded_with_empty_strings() {
        let mut acc = TableAccumulator::new();
        acc.push_page(page(&["Name", "Phone", "Plan"], &[&["a"]]));

        let combined = acc.into_combined().unwrap();
        assert_eq!(combined.rows[0], vec!["a", "", ""]);
    }

    #[test]
    fn test_long_rows_truncated_to_header_width() {
        let mut acc = TableAccumulator::new();
        acc.push_page(page(&["Name"], &[&["a", "stray"]]));

        let combined = acc.into_combined().unwrap();
        assert_eq!(combined.rows[0], vec!["a"]);
    }

    #[test]
    fn test_empty_accumulator_combines_to_none() {
        assert!(TableAccumulator::new().into_combined().is_none());
    }

    #[test]
    fn test_header_only_pages_combine_to_none() {
        let mut acc = TableAccumulator::new();
        acc.push_page(page(&["Name"], &[]));

        assert!(acc.is_empty());
        assert!(acc.into_combined().is_none());
    }

    #[test]
    fn test_into_values_leads_with_header_row() {
        let mut acc = TableAccumulator::new();
        acc.push_page(page(&["Name", "Plan"], &[&["a", "1"]]));

        let values = acc.into_combined().unwrap().into_values();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], vec!["Name", "Plan"]);
        assert_eq!(values[1], vec!["a", "1"]);
    }
}
