//! CSV export and re-import of squad rows.

use super::assemble::SquadRow;
use super::prepare::normalize_price;
use crate::error::{Result, SquadError};
use serde::{Deserialize, Deserializer};
use std::io::{self, Read, Write};
use tracing::warn;

/// Output column layout, in order.
pub const COLUMNS: [&str; 7] = [
    "name",
    "line",
    "position",
    "price",
    "expected_avg",
    "adjusted_avg",
    "role",
];

/// Reads a price cell through [`normalize_price`].
///
/// Empty cells and text that does not normalize become `None` instead of
/// failing the whole read.
pub(crate) fn deserialize_price<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|text| {
        let price = normalize_price(&text);
        if price.is_none() && !text.trim().is_empty() {
            warn!(cell = %text, "unparseable price cell read as missing");
        }
        price
    }))
}

/// Writes rows as CSV with a header line, in the given order.
pub fn write_csv<W: Write>(rows: &[SquadRow], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders rows as a CSV string.
pub fn to_csv_string(rows: &[SquadRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    String::from_utf8(buf).map_err(|e| SquadError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Reads rows written by [`write_csv`] (or any CSV with the same columns).
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<SquadRow>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.deserialize::<SquadRow>() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Parses rows from a CSV string.
pub fn from_csv_str(text: &str) -> Result<Vec<SquadRow>> {
    read_csv(text.as_bytes())
}
