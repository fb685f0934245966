//! CSV output for result tables.

use std::io::Write;

use serde::Serialize;

use crate::domain::error::SignalError;

/// Write `records` as CSV with a header row taken from the field names.
///
/// An empty slice writes nothing, not even a header.
pub fn write_table<W: Write, T: Serialize>(out: W, records: &[T]) -> Result<(), SignalError> {
    let mut wtr = csv::Writer::from_writer(out);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render `records` to an in-memory CSV string.
pub fn table_to_string<T: Serialize>(records: &[T]) -> Result<String, SignalError> {
    let mut buf = Vec::new();
    write_table(&mut buf, records)?;
    String::from_utf8(buf)
        .map_err(|e| SignalError::data_source(format!("non-UTF-8 table output: {e}")))
}
