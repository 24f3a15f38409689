//! Locates the quarterly results grid in a company page.

use scraper::{ElementRef, Html, Selector};

use crate::{CompanyTable, ParseError};

/// The two styling classes the site puts on its results grids. The quarterly
/// grid is the first such table on a company page.
pub const RESULTS_TABLE_SELECTOR: &str = "table.data-table.responsive-text-nowrap";

/// Extracts the first table matching `table_selector` from `html`.
///
/// Headers come from the `th` cells of the table's first row; data rows are
/// every later row's `td` cells. All cell text is whitespace-trimmed, and rows
/// without any `td` cell are dropped.
pub fn parse_results_table(html: &str, table_selector: &str) -> Result<CompanyTable, ParseError> {
    let table_sel = selector(table_selector)?;
    let row_sel = selector("tr")?;
    let header_sel = selector("th")?;
    let cell_sel = selector("td")?;

    let document = Html::parse_document(html);
    let table = document
        .select(&table_sel)
        .next()
        .ok_or(ParseError::TableNotFound)?;

    let mut rows = table.select(&row_sel);
    let headers: Vec<String> = match rows.next() {
        Some(first) => first.select(&header_sel).map(cell_text).collect(),
        None => Vec::new(),
    };

    let data: Vec<Vec<String>> = rows
        .map(|row| row.select(&cell_sel).map(cell_text).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect();

    tracing::debug!(
        "Parsed results table: {} columns, {} rows",
        headers.len(),
        data.len()
    );
    Ok(CompanyTable::new(headers, data))
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector(css.to_string()))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <table class="data-table">
            <tr><th>Decoy</th></tr>
          </table>
          <table class="data-table responsive-text-nowrap">
            <thead>
              <tr><th class="text"></th><th>Mar 2024</th><th>Jun 2024</th></tr>
            </thead>
            <tbody>
              <tr class="stripe">
                <td class="text"><button>Sales&nbsp;<span>+</span></button></td>
                <td>120</td><td> 135 </td>
              </tr>
              <tr><td class="text">Expenses +</td><td>90</td></tr>
            </tbody>
          </table>
        </body></html>
    "#;

    #[test]
    fn parses_first_matching_table() {
        let table = parse_results_table(PAGE, RESULTS_TABLE_SELECTOR).unwrap();
        assert_eq!(table.headers(), &["", "Mar 2024", "Jun 2024"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][2], "135");
    }

    #[test]
    fn label_text_is_flattened_and_trimmed() {
        let table = parse_results_table(PAGE, RESULTS_TABLE_SELECTOR).unwrap();
        assert_eq!(table.rows()[0][0], "Sales\u{a0}+");
    }

    #[test]
    fn short_row_is_padded() {
        let table = parse_results_table(PAGE, RESULTS_TABLE_SELECTOR).unwrap();
        assert_eq!(table.rows()[1], vec!["Expenses +", "90", ""]);
    }

    #[test]
    fn missing_table_is_reported() {
        let err = parse_results_table("<html><body><p>nothing</p></body></html>", RESULTS_TABLE_SELECTOR)
            .unwrap_err();
        assert_eq!(err, ParseError::TableNotFound);
    }

    #[test]
    fn invalid_selector_is_reported() {
        let err = parse_results_table(PAGE, "table[").unwrap_err();
        assert_eq!(err, ParseError::InvalidSelector("table[".to_string()));
    }

    #[test]
    fn header_only_table_is_empty() {
        let html = r#"<table class="data-table responsive-text-nowrap"><tr><th></th><th>Mar 2024</th></tr></table>"#;
        let table = parse_results_table(html, RESULTS_TABLE_SELECTOR).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.periods(), &["Mar 2024"]);
    }
}
