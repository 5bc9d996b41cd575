// src/process/mod.rs
use csv::ReaderBuilder;
use std::io::Cursor;
use tracing::{debug, instrument};

use crate::error::{LoadError, Result};

pub mod raw_table;
pub mod utils;

pub use raw_table::RawTable;

const UTF8_BOM: &str = "\u{feff}";

/// Parse an in-memory CSV document whose first record is the header row.
///
/// Rows may carry fewer (or more) fields than the header; missing trailing
/// fields are simply absent from the row. Invalid UTF-8 or broken quoting is a
/// `LoadError::Parse`.
#[instrument(level = "debug", skip(data), fields(bytes = data.len()))]
pub fn parse_csv(name: &str, data: &[u8]) -> Result<RawTable> {
    let parse_err = |source: csv::Error| LoadError::Parse {
        name: name.to_string(),
        source,
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(data));

    let headers: Vec<String> = rdr
        .headers()
        .map_err(parse_err)?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches(UTF8_BOM).to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(parse_err)?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    debug!(columns = headers.len(), rows = rows.len(), "parsed CSV");
    Ok(RawTable::new(name, headers, rows))
}
