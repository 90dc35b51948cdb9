// src/fetch/mod.rs

pub mod tables;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use std::{fs, path::PathBuf, thread::sleep, time::Duration};
use tracing::{info, instrument, warn};
use url::Url;

use crate::process::{load_csv_path, RawTable};

/// Wikipedia's list of countries by CO2 emissions.
pub const DEFAULT_SOURCE_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_countries_by_carbon_dioxide_emissions";

/// Position of the per-country table among all `<table>`s on that page.
pub const DEFAULT_TABLE_INDEX: usize = 2;

const MAX_RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Where the raw table comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    Url(Url),
    HtmlFile(PathBuf),
    CsvFile { path: PathBuf, header_rows: usize },
}

impl TableSource {
    pub fn default_url() -> Result<Self> {
        let url = Url::parse(DEFAULT_SOURCE_URL)
            .with_context(|| format!("parsing source URL {}", DEFAULT_SOURCE_URL))?;
        Ok(TableSource::Url(url))
    }

    /// Materialize the table. `table_index` picks the table on HTML pages and
    /// is ignored for CSV.
    #[instrument(level = "info", skip(self), fields(source = ?self))]
    pub fn load(&self, table_index: usize) -> Result<RawTable> {
        let table = match self {
            TableSource::Url(url) => {
                let html = fetch_html(url)?;
                tables::table_at(&html, table_index)
                    .with_context(|| format!("extracting table {} from {}", table_index, url))?
            }
            TableSource::HtmlFile(path) => {
                let html =
                    fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
                tables::table_at(&html, table_index)
                    .with_context(|| format!("extracting table {} from {:?}", table_index, path))?
            }
            TableSource::CsvFile { path, header_rows } => load_csv_path(path, *header_rows)?,
        };
        info!(
            headers = table.headers.len(),
            rows = table.rows.len(),
            "loaded raw table"
        );
        Ok(table)
    }
}

/// GET `url` and return the body, retrying transport errors and 5xx a few
/// times. 4xx responses fail immediately.
pub fn fetch_html(url: &Url) -> Result<String> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("building HTTP client")?;

    let mut attempt = 0;
    loop {
        attempt += 1;

        // 1) fetch page
        let resp = client.get(url.clone()).send();
        match resp {
            Ok(resp) if resp.status().is_success() => {
                // 2) get body text
                return resp
                    .text()
                    .with_context(|| format!("reading body from {}", url));
            }
            Ok(resp) if resp.status().is_server_error() && attempt < MAX_RETRIES => {
                warn!(status = %resp.status(), attempt, "server error, retrying");
                sleep(RETRY_DELAY);
            }
            Err(err) if attempt < MAX_RETRIES => {
                warn!(error = %err, attempt, "request failed, retrying");
                sleep(RETRY_DELAY);
            }
            Ok(resp) => return Err(anyhow!("HTTP error: {} for {}", resp.status(), url)),
            Err(err) => return Err(err).with_context(|| format!("GET {}", url)),
        }
    }
}
