// src/resolve/mod.rs

pub mod aliases;
pub mod vocab;

use rayon::prelude::*;
use tracing::{instrument, warn};

pub use aliases::{AliasTable, AliasVariant, Substitution};
pub use vocab::{load_vocabulary, FlagVocabulary, IconVocabulary, Layered, MapVocabulary};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::process::reshape::ReshapedRow;
use crate::record::CountryRecord;

/// Separates a country from its qualifier in source names,
/// e.g. "China\u{a0}(mainland)".
pub const NAME_SEPARATOR: char = '\u{a0}';

/// Lookup key for `name`: the part before the first [`NAME_SEPARATOR`], run
/// through the alias table.
pub fn derive_key(name: &str, table: &AliasTable) -> String {
    let head = name.split(NAME_SEPARATOR).next().unwrap_or(name);
    table.apply(head)
}

/// `name` with every [`NAME_SEPARATOR`] replaced by `separator`.
pub fn display_name(name: &str, separator: &str) -> String {
    name.replace(NAME_SEPARATOR, separator)
}

/// Turns reshaped rows into [`CountryRecord`]s.
pub struct Resolver<'a> {
    table: AliasTable,
    vocab: &'a dyn IconVocabulary,
    display_separator: String,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &PipelineConfig, vocab: &'a dyn IconVocabulary) -> Self {
        Self {
            table: AliasTable::for_variant(config.alias_variant),
            vocab,
            display_separator: config.display_separator.clone(),
        }
    }

    /// Resolve one row. A vocabulary miss leaves `icon` empty; only an empty
    /// country name is an error.
    pub fn resolve_row(&self, idx: usize, row: ReshapedRow) -> PipelineResult<CountryRecord> {
        if row.country.trim().is_empty() {
            return Err(PipelineError::Resolution {
                row: idx,
                reason: "country name is empty".into(),
            });
        }

        // key comes from the name as sourced, before the display rewrite
        let country_key = derive_key(&row.country, &self.table);
        let icon = self.vocab.lookup(&country_key).map(str::to_string);
        if icon.is_none() {
            warn!(country = %row.country, key = %country_key, "no icon for key");
        }

        Ok(CountryRecord {
            country_name: display_name(&row.country, &self.display_separator),
            country_key,
            series: row.series,
            pct_of_world: row.pct_of_world,
            pct_change: row.pct_change,
            icon,
        })
    }

    #[instrument(level = "info", skip(self, rows), fields(rows = rows.len()))]
    pub fn resolve(&self, rows: Vec<ReshapedRow>, parallel: bool) -> PipelineResult<Vec<CountryRecord>> {
        if parallel {
            rows.into_par_iter()
                .enumerate()
                .map(|(idx, row)| self.resolve_row(idx, row))
                .collect()
        } else {
            rows.into_iter()
                .enumerate()
                .map(|(idx, row)| self.resolve_row(idx, row))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn reshaped(country: &str) -> ReshapedRow {
        ReshapedRow {
            country: country.into(),
            series: [Some(1.0), Some(2.0), None, Some(4.0)],
            pct_of_world: Some(0.5),
            pct_change: Some(-3.0),
        }
    }

    #[test]
    fn key_uses_text_before_the_separator() {
        let table = AliasTable::default();
        assert_eq!(derive_key("China\u{a0}(mainland)", &table), "China");
        assert_eq!(derive_key("Hong Kong\u{a0}SAR\u{a0}x", &table), "Hong_Kong_SAR_China");
        assert_eq!(derive_key("United States", &table), "United_States");
    }

    #[test]
    fn equal_names_give_equal_keys() {
        let table = AliasTable::for_variant(AliasVariant::KinshasaAlias);
        let a = derive_key("Saint Lucia\u{a0}(island)", &table);
        let b = derive_key("Saint Lucia\u{a0}(island)", &table);
        assert_eq!(a, b);
        assert_eq!(a, "St._Lucia");
    }

    #[test]
    fn display_name_replaces_every_separator() {
        assert_eq!(display_name("China\u{a0}(mainland)", ", "), "China, (mainland)");
        assert_eq!(display_name("A\u{a0}B\u{a0}C", " / "), "A / B / C");
        assert_eq!(display_name("France", ", "), "France");
    }

    #[test]
    fn resolves_icon_and_reformats_name() {
        let config = PipelineConfig::default();
        let resolver = Resolver::new(&config, FlagVocabulary::builtin());
        let rec = resolver
            .resolve_row(0, reshaped("Ivory Coast\u{a0}(Côte d'Ivoire)"))
            .unwrap();
        assert_eq!(rec.country_key, "Côte_d’Ivoire");
        assert_eq!(rec.country_name, "Ivory Coast, (Côte d'Ivoire)");
        assert_eq!(rec.icon.as_deref(), Some("🇨🇮"));
        assert_eq!(rec.series, [Some(1.0), Some(2.0), None, Some(4.0)]);
    }

    #[test]
    fn vocabulary_miss_is_not_an_error() {
        let config = PipelineConfig::default();
        let vocab: HashMap<String, String> = HashMap::new();
        let resolver = Resolver::new(&config, &vocab);
        let recs = resolver
            .resolve(vec![reshaped("Atlantis"), reshaped("France")], false)
            .unwrap();
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.icon.is_none()));
        assert_eq!(recs[0].country_key, "Atlantis");
    }

    #[test]
    fn empty_name_is_a_resolution_error() {
        let config = PipelineConfig::default();
        let resolver = Resolver::new(&config, FlagVocabulary::builtin());
        let err = resolver
            .resolve(vec![reshaped("France"), reshaped("\u{a0} ")], true)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Resolution { row: 1, .. }));
    }

    #[test]
    fn drc_depends_on_variant() {
        let vocab = FlagVocabulary::builtin();
        let fix_up = PipelineConfig::default();
        let inline = PipelineConfig {
            alias_variant: AliasVariant::KinshasaAlias,
            ..PipelineConfig::default()
        };

        let rec = Resolver::new(&fix_up, vocab)
            .resolve_row(0, reshaped("Democratic Republic of the Congo"))
            .unwrap();
        assert_eq!(rec.icon.as_deref(), Some("🇨🇩"));

        let rec = Resolver::new(&inline, vocab)
            .resolve_row(0, reshaped("Democratic Republic of the Congo"))
            .unwrap();
        assert_eq!(rec.country_key, "Congo_-_Kinshasa_-_Brazzaville");
        assert_eq!(rec.icon, None);
    }
}
