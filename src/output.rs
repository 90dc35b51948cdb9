// src/output.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::record::CountryRecord;

/// How records are written for the display side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of records.
    #[default]
    Json,
    /// One row per record, the series spread over one column per year.
    Csv,
}

/// Flat CSV shape of a [`CountryRecord`]; empty cells mean no data.
#[derive(Serialize)]
struct CsvRow<'a> {
    country_name: &'a str,
    country_key: &'a str,
    #[serde(rename = "1990")]
    y1990: Option<f64>,
    #[serde(rename = "2005")]
    y2005: Option<f64>,
    #[serde(rename = "2017")]
    y2017: Option<f64>,
    #[serde(rename = "2021")]
    y2021: Option<f64>,
    pct_of_world: Option<f64>,
    pct_change: Option<f64>,
    icon: Option<&'a str>,
}

impl<'a> From<&'a CountryRecord> for CsvRow<'a> {
    fn from(r: &'a CountryRecord) -> Self {
        let [y1990, y2005, y2017, y2021] = r.series;
        Self {
            country_name: &r.country_name,
            country_key: &r.country_key,
            y1990,
            y2005,
            y2017,
            y2021,
            pct_of_world: r.pct_of_world,
            pct_change: r.pct_change,
            icon: r.icon.as_deref(),
        }
    }
}

pub fn write_records<W: Write>(mut out: W, records: &[CountryRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, records).context("writing JSON records")?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut out);
            for record in records {
                wtr.serialize(CsvRow::from(record))
                    .with_context(|| format!("writing CSV row for {}", record.country_name))?;
            }
            wtr.flush().context("flushing CSV output")?;
        }
    }
    out.flush()?;
    Ok(())
}
