//! Whole-document CSV parsing into header-keyed rows.
//!
//! - Lines are split on `\n`; a document needs a header plus at least one more line
//! - Header names are trimmed and inner whitespace runs collapse to one space
//! - Repeated header names get a `_N` suffix (`Robotics`, `Robotics_1`, ...)
//! - Blank data lines are skipped; short rows are padded with `""`

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::tokenizer::tokenize_line;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One unvalidated spreadsheet row: `(column, value)` pairs in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value for an exact (de-duplicated) column key.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| value.as_str())
    }

    /// Column keys in positional order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(key, _)| key.as_str())
    }

    /// `(column, value)` pairs in positional order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A parsed CSV document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Normalized, de-duplicated header keys.
    pub headers: Vec<String>,
    /// Data rows in document order.
    pub rows: Vec<RawRow>,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Matches any run of whitespace inside a header name.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Parse CSV text into rows keyed by header name.
pub fn parse_csv(text: &str) -> Vec<RawRow> {
    parse_document(text).rows
}

/// Parse CSV text into its header list and rows.
pub fn parse_document(text: &str) -> Document {
    let mut lines = text.split('\n');

    let (Some(header_line), Some(first_data)) = (lines.next(), lines.next()) else {
        return Document::default();
    };

    let headers = dedupe_headers(tokenize_line(header_line));

    let rows = std::iter::once(first_data)
        .chain(lines)
        .filter(|line| !line.trim().is_empty())
        .map(|line| zip_row(&headers, tokenize_line(line)))
        .collect();

    Document { headers, rows }
}

/// Collapse internal whitespace in a header name.
pub fn normalize_header(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

/// Normalize header names and suffix repeats with `_1`, `_2`, ...
fn dedupe_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    raw.iter()
        .map(|h| {
            let name = normalize_header(h);
            match seen.get_mut(&name) {
                Some(count) => {
                    *count += 1;
                    format!("{name}_{count}")
                }
                None => {
                    seen.insert(name.clone(), 0);
                    name
                }
            }
        })
        .collect()
}

/// Pair values with headers by position, padding missing trailing cells.
fn zip_row(headers: &[String], values: Vec<String>) -> RawRow {
    let mut values = values.into_iter();
    RawRow {
        cells: headers
            .iter()
            .map(|h| (h.clone(), values.next().unwrap_or_default()))
            .collect(),
    }
}
