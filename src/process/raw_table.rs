// src/process/raw_table.rs

/// A table exactly as a source handed it over, before any cleanup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Header levels, outermost first. A flat CSV header has one level, the
    /// emissions table on Wikipedia has two ("Fossil CO2 emissions" over the years).
    pub headers: Vec<Vec<String>>,
    /// Each body row, as a Vec of Strings (one per cell), in source order.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// The innermost header level, which is the one that names the columns.
    pub fn leaf_header(&self) -> Option<&[String]> {
        self.headers.last().map(Vec::as_slice)
    }

    /// Widest row across headers and body.
    pub fn width(&self) -> usize {
        self.headers
            .iter()
            .chain(self.rows.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn leaf_header_is_the_last_level() {
        let table = RawTable::new(
            vec![strings(&["Country", "Fossil CO2"]), strings(&["Country", "1990"])],
            vec![strings(&["France", "380", "extra"])],
        );
        assert_eq!(table.leaf_header().unwrap(), &strings(&["Country", "1990"])[..]);
        assert_eq!(table.width(), 3);
    }

    #[test]
    fn empty_table_has_no_header() {
        let table = RawTable::default();
        assert!(table.leaf_header().is_none());
        assert_eq!(table.width(), 0);
    }
}
