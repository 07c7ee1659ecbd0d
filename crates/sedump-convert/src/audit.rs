//! Column width audit for generated CSV files
//!
//! Finds the longest value of one column, which is what a `VARCHAR(n)`
//! column in the destination table has to hold. Lengths are counted in
//! characters, not bytes.

use crate::error::{ConvertError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnWidth {
    pub column: String,
    /// Data rows scanned, excluding the header
    pub rows: u64,
    pub max_chars: usize,
    /// First value seen with `max_chars` characters
    pub longest: String,
}

/// Scan a CSV stream whose first record is the header row
pub fn column_width<R: Read>(input: R, column: &str) -> Result<ColumnWidth> {
    let mut reader = csv::Reader::from_reader(input);
    let index = reader
        .headers()?
        .iter()
        .position(|name| name == column)
        .ok_or_else(|| ConvertError::ColumnNotFound(column.to_string()))?;

    let mut width = ColumnWidth {
        column: column.to_string(),
        ..ColumnWidth::default()
    };
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record)? {
        width.rows += 1;
        let Some(value) = record.get(index) else {
            continue;
        };

        let chars = value.chars().count();
        if chars > width.max_chars {
            width.max_chars = chars;
            width.longest = value.to_string();
        }
    }

    debug!(column, rows = width.rows, max_chars = width.max_chars, "Audited column");
    Ok(width)
}

pub fn column_width_of_file(path: &Path, column: &str) -> Result<ColumnWidth> {
    let file = File::open(path).map_err(|source| ConvertError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    column_width(BufReader::new(file), column)
}
