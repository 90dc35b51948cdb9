// src/process/sanitize.rs

use tracing::{debug, info, instrument};

use crate::error::{PipelineError, PipelineResult};
use crate::process::raw_table::RawTable;

/// Number of leading source columns the pipeline keeps.
pub const COLUMN_COUNT: usize = 7;

/// Reporting years, in the order the source lays them out.
pub const YEARS: [&str; 4] = ["1990", "2005", "2017", "2021"];

/// Labels the kept columns are rebound to, positionally.
pub const LABELS: [&str; COLUMN_COUNT] = [
    "Country",
    YEARS[0],
    YEARS[1],
    YEARS[2],
    YEARS[3],
    "PctOfWorld",
    "PctChange",
];

/// Aggregate rows that are not countries. Compared with `==` against the
/// country cell as sourced.
pub const EXCLUDED_AGGREGATES: [&str; 4] = [
    "European Union",
    "World",
    "World – International Aviation",
    "World – International Shipping",
];

/// The source's 1990 value for Germany is wrong; this replaces it.
pub const GERMANY_1990_CORRECTION: (&str, &str) = ("Germany", "1018.097");

/// One row reduced to the fixed schema. Cells are still raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedRow {
    pub country: String,
    /// Year cells in [`YEARS`] order.
    pub years: [String; 4],
    pub pct_of_world: String,
    pub pct_change: String,
}

/// Reduce `table` to the fixed schema, drop aggregate rows and apply the
/// Germany correction. The returned rows are densely indexed from zero.
#[instrument(level = "info", skip(table), fields(rows = table.rows.len(), width = table.width()))]
pub fn sanitize(table: &RawTable) -> PipelineResult<Vec<SanitizedRow>> {
    check_header(table)?;

    let mut out = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        if row.len() < COLUMN_COUNT {
            return Err(PipelineError::Schema(format!(
                "row {} has {} cells, need at least {}",
                idx,
                row.len(),
                COLUMN_COUNT
            )));
        }

        // exclusion runs on the untouched cell, before anything else
        let country = &row[0];
        if EXCLUDED_AGGREGATES.contains(&country.as_str()) {
            debug!(country = %country, "dropping aggregate row");
            continue;
        }

        let mut years = [
            row[1].clone(),
            row[2].clone(),
            row[3].clone(),
            row[4].clone(),
        ];
        let (fixed_country, fixed_value) = GERMANY_1990_CORRECTION;
        if country == fixed_country {
            info!(
                country = %country,
                previous = %years[0],
                corrected = fixed_value,
                "applying 1990 correction"
            );
            years[0] = fixed_value.to_string();
        }

        out.push(SanitizedRow {
            country: country.clone(),
            years,
            pct_of_world: row[5].clone(),
            pct_change: row[6].clone(),
        });
    }

    debug!(kept = out.len(), dropped = table.rows.len() - out.len(), "sanitized");
    Ok(out)
}

/// Collapse to the innermost header level and check it lines up with
/// [`LABELS`]: a non-empty first label, each year label naming its year and
/// the two share columns marked as percentages.
fn check_header(table: &RawTable) -> PipelineResult<()> {
    let header = table
        .leaf_header()
        .ok_or_else(|| PipelineError::Schema("table has no header row".into()))?;

    if header.len() < COLUMN_COUNT {
        return Err(PipelineError::Schema(format!(
            "header has {} columns, need at least {}",
            header.len(),
            COLUMN_COUNT
        )));
    }

    if header[0].trim().is_empty() {
        return Err(PipelineError::Schema(
            "first header column (country) is empty".into(),
        ));
    }

    for (i, year) in YEARS.iter().enumerate() {
        let label = &header[i + 1];
        if !label.contains(year) {
            return Err(PipelineError::Schema(format!(
                "header column {} is `{}`, expected the {} column",
                i + 1,
                label,
                year
            )));
        }
    }

    for i in [5, 6] {
        let label = &header[i];
        if !label.contains('%') {
            return Err(PipelineError::Schema(format!(
                "header column {} is `{}`, expected the {} column",
                i, label, LABELS[i]
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn header() -> Vec<Vec<String>> {
        vec![
            strings(&[
                "Country",
                "Fossil CO2 emissions (Mt CO2)",
                "Fossil CO2 emissions (Mt CO2)",
                "Fossil CO2 emissions (Mt CO2)",
                "Fossil CO2 emissions (Mt CO2)",
                "Fossil CO2 emissions (% of world)",
                "Fossil CO2 emissions (% change)",
                "Per land area",
            ]),
            strings(&[
                "Country",
                "1990",
                "2005",
                "2017",
                "2021",
                "2017 (% of world)",
                "2017 vs 1990: change (%)",
                "2017 (t CO2/km2/yr)",
            ]),
        ]
    }

    fn row(country: &str) -> Vec<String> {
        strings(&[country, "380", "410", "330", "300", "0.9%", "-12.5%", "545"])
    }

    fn table(countries: &[&str]) -> RawTable {
        RawTable::new(header(), countries.iter().map(|c| row(c)).collect())
    }

    #[test]
    fn keeps_the_first_seven_columns() {
        let rows = sanitize(&table(&["France"])).unwrap();
        assert_eq!(
            rows,
            vec![SanitizedRow {
                country: "France".into(),
                years: ["380", "410", "330", "300"].map(String::from),
                pct_of_world: "0.9%".into(),
                pct_change: "-12.5%".into(),
            }]
        );
    }

    #[test]
    fn drops_aggregates_and_reindexes_densely() {
        let rows = sanitize(&table(&[
            "World",
            "China",
            "European Union",
            "World – International Aviation",
            "France",
            "World – International Shipping",
        ]))
        .unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, ["China", "France"]);
    }

    #[test]
    fn exclusion_is_exact_match_only() {
        let rows = sanitize(&table(&[
            "World Health Organization",
            "World ",
            "World\u{a0}– International Aviation",
        ]))
        .unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn germany_correction_applies_to_exact_name_only() {
        let rows = sanitize(&table(&["Germany", "Germany (West)", "France"])).unwrap();
        assert_eq!(rows[0].years[0], "1018.097");
        assert_eq!(rows[0].years[1], "410");
        assert_eq!(rows[1].years[0], "380");
        assert_eq!(rows[2].years[0], "380");
    }

    #[test]
    fn single_level_header_is_accepted() {
        let mut t = table(&["France"]);
        t.headers.remove(0);
        assert_eq!(sanitize(&t).unwrap().len(), 1);
    }

    #[test]
    fn missing_header_is_a_schema_error() {
        let t = RawTable::new(vec![], vec![row("France")]);
        assert!(matches!(sanitize(&t), Err(PipelineError::Schema(_))));
    }

    #[test]
    fn narrow_header_is_a_schema_error() {
        let t = RawTable::new(
            vec![strings(&["Country", "1990", "2005"])],
            vec![row("France")],
        );
        assert!(matches!(sanitize(&t), Err(PipelineError::Schema(_))));
    }

    #[test]
    fn shifted_year_columns_are_a_schema_error() {
        let mut t = table(&["France"]);
        t.headers[1].swap(1, 2);
        let err = sanitize(&t).unwrap_err();
        assert!(err.to_string().contains("1990"), "{err}");
    }

    #[test]
    fn short_body_row_is_a_schema_error() {
        let mut t = table(&["France"]);
        t.rows.push(strings(&["Spain", "200"]));
        assert!(matches!(sanitize(&t), Err(PipelineError::Schema(_))));
    }

    #[test]
    fn non_percentage_share_columns_are_a_schema_error() {
        let mut t = table(&["France"]);
        t.headers[1][5] = "Per capita (t)".into();
        t.headers[1][6] = "Per land area (t/km2)".into();
        let err = sanitize(&t).unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
        assert!(err.to_string().contains("PctOfWorld"), "{err}");

        let mut t = table(&["France"]);
        t.headers[1][6] = "Per land area (t/km2)".into();
        let err = sanitize(&t).unwrap_err();
        assert!(err.to_string().contains("PctChange"), "{err}");
    }
}
