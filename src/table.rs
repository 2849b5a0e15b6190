//! Parsing of the semicolon-delimited input table.
//!
//! The first line names the columns, every further line is one record.
//! Parsing is deliberately lenient: short lines leave trailing columns
//! unset, long lines drop their surplus fields, and nothing is rejected.

use crate::constants::DELIMITER;
use indexmap::IndexMap;

/// One record, keyed by upper-cased column name in column order.
pub type Row = IndexMap<String, String>;

/// A parsed input table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Upper-cased header fields as they appear, duplicates included
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Parses already decoded table content.
    ///
    /// Empty content yields an empty table. The header line never becomes
    /// a row.
    pub fn parse(content: &str) -> Self {
        let mut lines = split_lines(content);
        let Some(header_line) = lines.next() else {
            return Self::default();
        };

        let header: Vec<String> = header_line.split(DELIMITER).map(str::to_uppercase).collect();
        let rows = lines.map(|line| parse_row(&header, line)).collect();

        Self { header, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Splits on `\r\n`, `\n` or a bare `\r`.
///
/// A terminator at the very end does not start another line.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.find(['\r', '\n']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..end];
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
        Some(line)
    })
}

/// Assigns the fields of `line` to `header` by position.
///
/// The first column of a duplicated header name wins.
fn parse_row(header: &[String], line: &str) -> Row {
    let mut row = Row::with_capacity(header.len());
    for (key, value) in header.iter().zip(line.split(DELIMITER)) {
        if !row.contains_key(key) {
            row.insert(key.clone(), value.to_string());
        }
    }
    row
}
