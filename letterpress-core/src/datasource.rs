//! CSV data source — ordered records keyed by the header row.
//!
//! The whole file is read once, up front, in file order. Any read or parse
//! failure here is fatal for the run; blank-row filtering is the batch
//! runner's concern, so every data row becomes a [`Record`].

use std::path::Path;

use crate::error::{csv_err, DataError};
use crate::types::Record;

/// Read all records from the CSV file at `path`.
///
/// The first row is the header and defines column names; each following row
/// becomes one [`Record`] with fields in header order. Rows whose field
/// count differs from the header fail the whole load (`DataError::Csv`), as
/// does an unreadable file. A file without a header row yields
/// [`DataError::MissingHeader`].
pub fn load_records(path: &Path) -> Result<Vec<Record>, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_err(path, e))?;

    let headers = reader.headers().map_err(|e| csv_err(path, e))?.clone();
    if headers.is_empty() {
        return Err(DataError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| csv_err(path, e))?;
        records.push(headers.iter().zip(row.iter()).collect::<Record>());
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
