//! HTML table parsing
//!
//! Converts the first `<table>` in a rendered page into a structured
//! row set. The first row's cells become the column headers, matching
//! how the dashboard renders its listing table.

use scraper::{ElementRef, Html, Selector};

/// One page's harvested rows
#[derive(Debug, Clone, PartialEq)]
pub struct PageTable {
    /// Column headers, in document order
    pub headers: Vec<String>,
    /// Data rows; cell order follows the header order
    pub rows: Vec<Vec<String>>,
}

impl PageTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parse the first table found in the page source.
///
/// Returns `None` when the page contains no table, or when the first
/// table has no rows to take a header from; both are treated as "no
/// more data" by the harvester.
pub fn parse_first_table(html: &str) -> Option<PageTable> {
    let document = Html::parse_document(html);

    let table_sel = Selector::parse("table").unwrap();
    let tr_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("th, td").unwrap();

    let table = document.select(&table_sel).next()?;

    let mut trs = table.select(&tr_sel);
    let header_row = trs.next()?;
    let headers: Vec<String> = header_row
        .select(&cell_sel)
        .map(cell_text)
        .collect();

    if headers.is_empty() {
        return None;
    }

    let rows: Vec<Vec<String>> = trs
        .map(|tr| tr.select(&cell_sel).map(cell_text).collect())
        .collect();

    Some(PageTable { headers, rows })
}

/// Whitespace-normalized text content of a cell
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_with_th_headers() {
        let html = r#"
            <html><body><table>
                <tr><th>Name</th><th>Phone</th><th>Plan</th></tr>
                <tr><td>Asha</td><td>9000000001</td><td>Basic</td></tr>
                <tr><td>Ravi</td><td>9000000002</td><td>Premium</td></tr>
            </table></body></html>
        "#;

        let table = parse_first_table(html).unwrap();
        assert_eq!(table.headers, vec!["Name", "Phone", "Plan"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["Asha", "9000000001", "Basic"]);
    }

    #[test]
    fn test_first_row_of_td_cells_becomes_header() {
        let html = "<table><tr><td>A</td><td>B</td></tr><tr><td>1</td><td>2</td></tr></table>";

        let table = parse_first_table(html).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_only_first_table_is_taken() {
        let html = r#"
            <table><tr><th>First</th></tr><tr><td>x</td></tr></table>
            <table><tr><th>Second</th></tr><tr><td>y</td></tr></table>
        "#;

        let table = parse_first_table(html).unwrap();
        assert_eq!(table.headers, vec!["First"]);
    }

    #[test]
    fn test_no_table_returns_none() {
        assert!(parse_first_table("<html><body><div>empty</div></body></html>").is_none());
    }

    #[test]
    fn test_empty_table_returns_none() {
        assert!(parse_first_table("<table></table>").is_none());
    }

    #[test]
    fn test_header_only_table_has_zero_rows() {
        let html = "<table><tr><th>Name</th><th>Phone</th></tr></table>";

        let table = parse_first_table(html).unwrap();
        assert_eq!(table.headers, vec!["Name", "Phone"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_cell_text_is_whitespace_normalized() {
        let html = "<table><tr><th>  Name \n </th></tr><tr><td> <span>Asha</span>\n<b>K</b> </td></tr></table>";

        let table = parse_first_table(html).unwrap();
        assert_eq!(table.headers, vec!["Name"]);
        assert_eq!(table.rows[0], vec!["Asha K"]);
    }

    #[test]
    fn test_short_row_keeps_missing_cells_absent_here() {
        // Padding to header width is the accumulator's concern
        let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td></tr></table>";

        let table = parse_first_table(html).unwrap();
        assert_eq!(table.rows[0], vec!["1"]);
    }
}
