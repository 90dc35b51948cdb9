// src/bin/icon_misses.rs
//! Lists countries whose key has no icon, to help maintain the alias table.

use anyhow::Result;
use clap::Parser;
use co2scraper::{
    fetch::{TableSource, DEFAULT_TABLE_INDEX},
    logging::init_logging,
    pipeline,
    resolve::{load_vocabulary, AliasVariant},
    PipelineConfig,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "icon_misses")]
struct Args {
    /// Saved HTML page; fetches the default page when omitted
    html: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_TABLE_INDEX)]
    table_index: usize,

    #[arg(long, value_enum, default_value_t = AliasVariant::FixUp)]
    variant: AliasVariant,

    /// Extra icon vocabulary (YAML or JSON)
    #[arg(long)]
    vocab: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let source = match &args.html {
        Some(path) => TableSource::HtmlFile(path.clone()),
        None => TableSource::default_url()?,
    };
    let table = source.load(args.table_index)?;
    let config = PipelineConfig {
        alias_variant: args.variant,
        ..PipelineConfig::default()
    };
    let vocab = load_vocabulary(args.vocab.as_deref())?;
    let records = pipeline::run(&table, &config, vocab.as_ref())?;

    let misses: Vec<_> = records.iter().filter(|r| !r.is_resolved()).collect();
    for r in &misses {
        println!("{}\t{}", r.country_key, r.country_name);
    }
    eprintln!("{} of {} countries without an icon", misses.len(), records.len());
    Ok(())
}
