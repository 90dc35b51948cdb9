// src/fetch/tables.rs

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use tracing::debug;

use crate::process::raw_table::RawTable;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("table selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector"));

/// Elements whose text is not part of the cell value (footnote markers, styles).
const SKIPPED: &[&str] = &["sup", "style", "script"];

/// Spans are clamped to this so a broken attribute cannot blow up a row.
const MAX_SPAN: usize = 1_000;

/// One `<th>`/`<td>` with its text and spans.
#[derive(Debug)]
struct Cell {
    text: String,
    header: bool,
    colspan: usize,
    rowspan: usize,
}

/// Every `<table>` in `html`, in document order, each expanded to a grid.
///
/// Leading rows made only of `<th>` cells become header levels; `colspan`
/// and `rowspan` are copied into every position they cover, so a two-level
/// header lines up column by column with the body.
pub fn extract_tables(html: &str) -> Vec<RawTable> {
    let doc = Html::parse_document(html);
    doc.select(&TABLE).map(parse_table).collect()
}

/// The table at `index` (counting every `<table>` in the page from zero).
pub fn table_at(html: &str, index: usize) -> Result<RawTable> {
    let mut tables = extract_tables(html);
    let found = tables.len();
    if index >= found {
        return Err(anyhow!(
            "table index {} out of range, page has {} tables",
            index,
            found
        ));
    }
    Ok(tables.swap_remove(index))
}

fn parse_table(table: ElementRef) -> RawTable {
    // pending rowspans: column -> (text, rows still to fill)
    let mut spans: BTreeMap<usize, (String, usize)> = BTreeMap::new();
    let mut out = RawTable::default();
    let mut in_body = false;

    for tr in table.select(&ROW).filter(|tr| owning_table(*tr) == Some(table)) {
        let cells = row_cells(tr);
        let is_header = !in_body && !cells.is_empty() && cells.iter().all(|c| c.header);
        let mut cells = cells.into_iter();
        let mut row: Vec<String> = Vec::new();

        loop {
            let col = row.len();
            if let Some((text, left)) = spans.get_mut(&col) {
                row.push(text.clone());
                *left -= 1;
                if *left == 0 {
                    spans.remove(&col);
                }
                continue;
            }

            let Some(cell) = cells.next() else {
                // a rowspan further right still owes this row a value
                if spans.keys().any(|&c| c > col) {
                    row.push(String::new());
                    continue;
                }
                break;
            };

            for _ in 0..cell.colspan {
                if cell.rowspan > 1 {
                    spans.insert(row.len(), (cell.text.clone(), cell.rowspan - 1));
                }
                row.push(cell.text.clone());
            }
        }

        if row.is_empty() {
            continue;
        }
        if is_header {
            out.headers.push(row);
        } else {
            in_body = true;
            out.rows.push(row);
        }
    }

    debug!(headers = out.headers.len(), rows = out.rows.len(), "parsed table");
    out
}

/// Nearest enclosing `<table>`, so rows of nested tables are skipped.
fn owning_table(tr: ElementRef) -> Option<ElementRef> {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "table")
}

fn row_cells(tr: ElementRef) -> Vec<Cell> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| matches!(e.value().name(), "th" | "td"))
        .map(|e| Cell {
            text: cell_text(e),
            header: e.value().name() == "th",
            colspan: span_attr(e, "colspan"),
            rowspan: span_attr(e, "rowspan"),
        })
        .collect()
}

fn span_attr(e: ElementRef, name: &str) -> usize {
    e.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .map_or(1, |n| n.min(MAX_SPAN))
}

/// Visible text of a cell with ASCII whitespace collapsed and all Unicode
/// whitespace trimmed at both ends. Interior U+00A0 is kept: it separates a
/// country from its qualifier.
fn cell_text(cell: ElementRef) -> String {
    let mut raw = String::new();
    push_text(cell, &mut raw);

    let mut out = String::with_capacity(raw.len());
    let mut prev_space = false;
    for ch in raw.chars() {
        if ch.is_ascii_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

fn push_text(el: ElementRef, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(inner) = ElementRef::wrap(child) {
            if !SKIPPED.contains(&inner.value().name()) {
                push_text(inner, out);
            }
        }
    }
}
