use serde::Serialize;

/// Quarterly results grid for one company.
///
/// The first header names the label column (usually blank on the site); the
/// remaining headers are period identifiers in the site's display order,
/// which is not guaranteed to be chronological. Every row is exactly as wide
/// as the header row, with absent cells stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CompanyTable {
    /// Builds a table, padding short rows with empty cells and truncating
    /// rows that are wider than the header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() != width {
                    tracing::debug!(
                        "Normalising row of {} cells to header width {}",
                        row.len(),
                        width
                    );
                }
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Period headers, i.e. every header after the label column.
    pub fn periods(&self) -> &[String] {
        self.headers.get(1..).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Row labels in row order. Rows without a label cell yield `""`.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(|row| row.first().map(String::as_str).unwrap_or(""))
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn short_rows_are_padded() {
        let table = CompanyTable::new(
            strings(&["", "Mar 2024", "Jun 2024"]),
            vec![strings(&["Sales +", "120"])],
        );
        assert_eq!(table.rows()[0], strings(&["Sales +", "120", ""]));
    }

    #[test]
    fn long_rows_are_truncated() {
        let table = CompanyTable::new(
            strings(&["", "Mar 2024"]),
            vec![strings(&["Sales +", "120", "stray"])],
        );
        assert_eq!(table.rows()[0], strings(&["Sales +", "120"]));
    }

    #[test]
    fn periods_skip_label_column() {
        let table = CompanyTable::new(strings(&["", "Mar 2024", "Jun 2024"]), vec![]);
        assert_eq!(table.periods(), &strings(&["Mar 2024", "Jun 2024"])[..]);
        assert!(table.is_empty());
    }

    #[test]
    fn periods_of_headerless_table() {
        let table = CompanyTable::default();
        assert!(table.periods().is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn labels_in_row_order() {
        let table = CompanyTable::new(
            strings(&["", "Mar 2024"]),
            vec![strings(&["Sales +", "1"]), strings(&["Net Profit +", "2"])],
        );
        let labels: Vec<&str> = table.labels().collect();
        assert_eq!(labels, vec!["Sales +", "Net Profit +"]);
    }
}
