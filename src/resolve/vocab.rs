// src/resolve/vocab.rs

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::{collections::HashMap, fs, path::Path};
use tracing::{debug, info};

/// Read-only mapping from a normalized key to an icon glyph. A missing key
/// is an ordinary outcome, not an error.
pub trait IconVocabulary: Send + Sync {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl IconVocabulary for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<T: IconVocabulary + ?Sized> IconVocabulary for Box<T> {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

impl<T: IconVocabulary + ?Sized> IconVocabulary for &T {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

/// Flag emojis keyed the way the icon keys are derived: the CLDR name with
/// spaces as underscores (`Congo_-_Kinshasa`, `St._Helena`), plus every
/// GitHub shortcode of a flag (`fr`, `gambia`, `myanmar`).
#[derive(Debug, Clone)]
pub struct FlagVocabulary {
    glyphs: HashMap<String, &'static str>,
}

static BUILTIN: Lazy<FlagVocabulary> = Lazy::new(FlagVocabulary::new);

impl FlagVocabulary {
    pub fn new() -> Self {
        let mut glyphs = HashMap::new();
        for emoji in emojis::Group::Flags.emojis() {
            if let Some(name) = emoji.name().strip_prefix("flag: ") {
                glyphs.insert(name.replace(' ', "_"), emoji.as_str());
            }
            for code in emoji.shortcodes() {
                glyphs.entry(code.to_string()).or_insert(emoji.as_str());
            }
        }
        Self { glyphs }
    }

    /// Shared instance, built on first use.
    pub fn builtin() -> &'static FlagVocabulary {
        &BUILTIN
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl Default for FlagVocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl IconVocabulary for FlagVocabulary {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.glyphs.get(key).copied()
    }
}

/// User-supplied key → glyph entries, read from a YAML or JSON mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapVocabulary {
    entries: HashMap<String, String>,
}

impl MapVocabulary {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Load a flat `key: glyph` mapping. `.json` files go through serde_json,
    /// anything else through serde_yaml.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        let is_json = path
            .extension()
            .and_then(|s| s.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        let entries: HashMap<String, String> = if is_json {
            serde_json::from_str(&text).with_context(|| format!("parsing {:?}", path))?
        } else {
            serde_yaml::from_str(&text).with_context(|| format!("parsing {:?}", path))?
        };
        debug!(entries = entries.len(), path = %path.display(), "loaded icon vocabulary");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IconVocabulary for MapVocabulary {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.lookup(key)
    }
}

/// Ask `primary` first, then `fallback`.
#[derive(Debug, Clone)]
pub struct Layered<A, B> {
    pub primary: A,
    pub fallback: B,
}

impl<A: IconVocabulary, B: IconVocabulary> IconVocabulary for Layered<A, B> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.primary
            .lookup(key)
            .or_else(|| self.fallback.lookup(key))
    }
}

/// The vocabulary the binaries use: the built-in flags, overlaid by the
/// entries in `extra` when given.
pub fn load_vocabulary(extra: Option<&Path>) -> Result<Box<dyn IconVocabulary>> {
    let builtin = FlagVocabulary::builtin();
    match extra {
        Some(path) => {
            let overlay = MapVocabulary::load(path)?;
            info!(overlay = overlay.len(), builtin = builtin.len(), "using layered icon vocabulary");
            Ok(Box::new(Layered {
                primary: overlay,
                fallback: builtin,
            }))
        }
        None => Ok(Box::new(builtin)),
    }
}
