// src/record.rs

use serde::{Deserialize, Serialize};

/// A country row ready for display: cleaned name, parsed numbers and the
/// resolved flag. Field names are the contract with whatever renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Name for display, with the source's non-breaking separator replaced.
    pub country_name: String,
    /// Key the icon was looked up by. Never shown.
    pub country_key: String,
    /// Emissions (Mt CO2) for 1990, 2005, 2017 and 2021; `None` is no data.
    pub series: [Option<f64>; 4],
    pub pct_of_world: Option<f64>,
    pub pct_change: Option<f64>,
    pub icon: Option<String>,
}

impl CountryRecord {
    /// Flag and name side by side, the way the table shows a country.
    pub fn display_label(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{}   {}", icon, self.country_name),
            None => self.country_name.clone(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.icon.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(icon: Option<&str>) -> CountryRecord {
        CountryRecord {
            country_name: "China, mainland".into(),
            country_key: "China".into(),
            series: [Some(2484.9), None, Some(10877.2), Some(12466.3)],
            pct_of_world: Some(29.3),
            pct_change: Some(337.8),
            icon: icon.map(String::from),
        }
    }

    #[test]
    fn display_label_puts_the_flag_first() {
        assert_eq!(record(Some("🇨🇳")).display_label(), "🇨🇳   China, mainland");
        assert_eq!(record(None).display_label(), "China, mainland");
    }

    #[test]
    fn serializes_with_null_for_missing_values() -> anyhow::Result<()> {
        let json = serde_json::to_value(record(None))?;
        assert_eq!(json["series"][1], serde_json::Value::Null);
        assert_eq!(json["icon"], serde_json::Value::Null);
        assert_eq!(json["country_key"], "China");
        Ok(())
    }
}
