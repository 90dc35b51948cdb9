// src/process/reshape.rs

use rayon::prelude::*;
use tracing::instrument;

use crate::error::{PipelineError, PipelineResult};
use crate::process::sanitize::{SanitizedRow, LABELS};
use crate::process::utils::{parse_decimal, strip_percent, Numeric};

/// A sanitized row with its numeric fields parsed. `None` means the source
/// had no observation, which is not the same as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ReshapedRow {
    pub country: String,
    /// Emissions in Mt CO2 for each reporting year, oldest first.
    pub series: [Option<f64>; 4],
    pub pct_of_world: Option<f64>,
    pub pct_change: Option<f64>,
}

/// Convert every row's year and percentage cells to numbers. Rows are
/// independent, so with `parallel` the work is spread over the rayon pool;
/// output order always matches input order.
#[instrument(level = "info", skip(rows), fields(rows = rows.len()))]
pub fn reshape(rows: Vec<SanitizedRow>, parallel: bool) -> PipelineResult<Vec<ReshapedRow>> {
    if parallel {
        rows.into_par_iter()
            .enumerate()
            .map(|(idx, row)| reshape_row(idx, row))
            .collect()
    } else {
        rows.into_iter()
            .enumerate()
            .map(|(idx, row)| reshape_row(idx, row))
            .collect()
    }
}

/// Reshape a single row; `idx` is only used for error reporting.
pub fn reshape_row(idx: usize, row: SanitizedRow) -> PipelineResult<ReshapedRow> {
    let SanitizedRow {
        country,
        years,
        pct_of_world,
        pct_change,
    } = row;

    let mut series = [None; 4];
    for (i, cell) in years.iter().enumerate() {
        series[i] = numeric_cell(idx, LABELS[i + 1], cell)?;
    }

    Ok(ReshapedRow {
        country,
        series,
        pct_of_world: numeric_cell(idx, LABELS[5], strip_percent(pct_of_world.trim()))?,
        pct_change: numeric_cell(idx, LABELS[6], strip_percent(pct_change.trim()))?,
    })
}

fn numeric_cell(row: usize, column: &'static str, raw: &str) -> PipelineResult<Option<f64>> {
    match parse_decimal(raw) {
        Numeric::Invalid => Err(PipelineError::Parse {
            row,
            column,
            value: raw.to_string(),
        }),
        parsed => Ok(parsed.value()),
    }
}
