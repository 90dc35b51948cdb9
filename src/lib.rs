// src/lib.rs
//! Turns the Wikipedia table of CO2 emissions by country into clean,
//! display-ready records: fixed schema, numeric series, percentages and a
//! flag per country.

pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod record;
pub mod resolve;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use process::RawTable;
pub use record::CountryRecord;
