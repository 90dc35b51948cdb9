// src/process/mod.rs

pub mod raw_table;
pub mod reshape;
pub mod sanitize;
pub mod utils;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, instrument};

pub use raw_table::RawTable;

/// Read a CSV export of the table. The first `header_rows` records become
/// header levels (outermost first), the rest are body rows. Records may have
/// different field counts.
pub fn load_csv_table<R: Read>(reader: R, header_rows: usize) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // keep this so records with different field-counts work
        .from_reader(reader);

    let mut table = RawTable::default();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if idx < header_rows {
            table.headers.push(cells);
        } else {
            table.rows.push(cells);
        }
    }

    if table.headers.len() < header_rows {
        bail!(
            "CSV has {} records, expected at least {} header rows",
            table.headers.len(),
            header_rows
        );
    }
    debug!(headers = table.headers.len(), rows = table.rows.len(), "loaded CSV table");
    Ok(table)
}

#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv_path<P: AsRef<Path>>(path: P, header_rows: usize) -> Result<RawTable> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;
    load_csv_table(file, header_rows)
}
