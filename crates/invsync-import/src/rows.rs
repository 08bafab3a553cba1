//! Header-indexed CSV row reading.
//!
//! Turns file bytes into an ordered sequence of string-keyed records,
//! mirroring a header-aware CSV parse: column order is irrelevant, short
//! rows are padded with empty cells, and blank lines are skipped.

use std::collections::BTreeMap;
use std::io::Read;

use csv::ReaderBuilder;

use crate::error::ImportError;

/// One parsed CSV row, indexed by column header.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    fields: BTreeMap<String, String>,
}

impl RawRow {
    /// The cell under `header`, or `None` when the column is absent.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields.get(header).map(String::as_str)
    }

    /// The row as a plain map, used for error reporting.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.fields.clone()
    }

    #[cfg(test)]
    pub(crate) fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Reads all rows from CSV bytes, indexed by the header row.
///
/// Rows shorter than the header are padded with empty strings; extra cells
/// beyond the header are dropped.
///
/// # Errors
///
/// Returns [`ImportError::Csv`] on malformed input.
pub fn read_rows<R: Read>(input: R) -> Result<Vec<RawRow>, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(std::string::ToString::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        rows.push(RawRow { fields });
    }
    Ok(rows)
}
