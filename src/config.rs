// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::resolve::AliasVariant;

/// Knobs for one pipeline run. Every field has a default, so an empty file
/// (or no file) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Which historical handling of the DRC alias to use.
    pub alias_variant: AliasVariant,
    /// Replaces the non-breaking separator in display names.
    pub display_separator: String,
    /// Spread reshaping and resolution over the rayon pool.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            alias_variant: AliasVariant::default(),
            display_separator: ", ".to_string(),
            parallel: true,
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // serde_yaml reads an empty document as unit, not as an empty map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("parsing pipeline config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        Self::from_yaml_str(&text).with_context(|| format!("loading config {:?}", path))
    }
}
