// src/pipeline.rs

use tracing::{info, instrument};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::process::{raw_table::RawTable, reshape::reshape, sanitize::sanitize};
use crate::record::CountryRecord;
use crate::resolve::{IconVocabulary, Resolver};

/// Sanitize → reshape → resolve, over one fully loaded table.
///
/// Either every row makes it through or the first stage error is returned;
/// the only per-row partial outcome is a record without an icon.
#[instrument(level = "info", skip_all, fields(rows = table.rows.len(), variant = ?config.alias_variant))]
pub fn run(
    table: &RawTable,
    config: &PipelineConfig,
    vocab: &dyn IconVocabulary,
) -> PipelineResult<Vec<CountryRecord>> {
    let sanitized = sanitize(table)?;
    let reshaped = reshape(sanitized, config.parallel)?;
    let records = Resolver::new(config, vocab).resolve(reshaped, config.parallel)?;

    let unresolved = records.iter().filter(|r| !r.is_resolved()).count();
    info!(
        rows_in = table.rows.len(),
        records = records.len(),
        unresolved,
        "pipeline complete"
    );
    Ok(records)
}
