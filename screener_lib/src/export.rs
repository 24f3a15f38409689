//! CSV serialization of company tables and summaries.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use screener_api::CompanyTable;

use crate::summary::SummaryTable;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Anything with an ordered header row and equally wide string records.
pub trait Tabular {
    fn headers(&self) -> Vec<String>;
    fn records(&self) -> Vec<Vec<String>>;
}

impl Tabular for CompanyTable {
    fn headers(&self) -> Vec<String> {
        CompanyTable::headers(self).to_vec()
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.rows().to_vec()
    }
}

impl Tabular for SummaryTable {
    fn headers(&self) -> Vec<String> {
        SummaryTable::headers(self)
    }

    /// Missing values become empty fields.
    fn records(&self) -> Vec<Vec<String>> {
        self.rows()
            .iter()
            .map(|row| {
                std::iter::once(row.code.clone())
                    .chain(row.values.iter().map(|v| v.clone().unwrap_or_default()))
                    .collect()
            })
            .collect()
    }
}

/// `<code>_quarterly_results.csv`
pub fn company_file_name(code: &str) -> String {
    format!("{}_quarterly_results.csv", code)
}

/// Writes the header row then every record. No index column.
pub fn write_csv<W: Write, T: Tabular + ?Sized>(writer: W, table: &T) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.headers())?;
    for record in table.records() {
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `table` to `path`, creating the parent directory if needed.
pub fn export_csv<T: Tabular + ?Sized>(path: &Path, table: &T) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), table)
}
