use anyhow::{Context, Result};
use clap::Parser;
use co2scraper::{
    fetch::{TableSource, DEFAULT_TABLE_INDEX},
    logging::init_logging,
    output::{write_records, OutputFormat},
    pipeline,
    resolve::{load_vocabulary, AliasVariant},
    PipelineConfig,
};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};
use tracing::info;
use url::Url;

#[derive(Parser)]
#[command(name = "co2scraper")]
#[command(about = "Clean the per-country CO2 emissions table into display-ready records")]
#[command(version)]
struct Cli {
    /// Page to fetch the table from (default: the Wikipedia list)
    #[arg(long, conflicts_with_all = ["html", "csv"])]
    url: Option<Url>,

    /// Read a saved HTML page instead of fetching
    #[arg(long, conflicts_with = "csv")]
    html: Option<PathBuf>,

    /// Read a CSV export instead of HTML
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Which <table> on the page to use, counting from zero
    #[arg(long, default_value_t = DEFAULT_TABLE_INDEX)]
    table_index: usize,

    /// Number of header rows in the CSV input
    #[arg(long, default_value_t = 2)]
    header_rows: usize,

    /// YAML pipeline configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra icon vocabulary (YAML or JSON mapping), consulted before the built-in flags
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Override the alias variant from the config
    #[arg(long, value_enum)]
    variant: Option<AliasVariant>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

impl Cli {
    fn source(&self) -> Result<TableSource> {
        Ok(match (&self.url, &self.html, &self.csv) {
            (Some(url), _, _) => TableSource::Url(url.clone()),
            (_, Some(path), _) => TableSource::HtmlFile(path.clone()),
            (_, _, Some(path)) => TableSource::CsvFile {
                path: path.clone(),
                header_rows: self.header_rows,
            },
            (None, None, None) => TableSource::default_url()?,
        })
    }

    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(variant) = self.variant {
            config.alias_variant = variant;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    info!("startup");

    let config = cli.pipeline_config()?;
    let vocab = load_vocabulary(cli.vocab.as_deref())?;
    let table = cli.source()?.load(cli.table_index)?;

    let records = pipeline::run(&table, &config, vocab.as_ref())?;

    match &cli.out {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
            write_records(BufWriter::new(file), &records, cli.format)?;
            info!(records = records.len(), path = %path.display(), "wrote records");
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_records(&mut lock, &records, cli.format)?;
            lock.flush()?;
        }
    }

    info!("all done");
    Ok(())
}
