//! Delimited-text tokenizing and table structure.
//!
//! A table is plain text: the first line names the columns, every following
//! non-blank line is a data row. Fields split on a literal delimiter
//! character with no quoting or escaping dialect and no trimming.

use std::collections::HashMap;

use log::debug;

/// Split `text` on a literal delimiter character.
///
/// Splitting is strict: fields are taken verbatim (no trimming, no quote
/// handling) and empty fields are preserved, so a trailing delimiter yields
/// a trailing empty field (`"a,b,"` gives `["a", "b", ""]`) and the empty
/// string gives one empty field.
pub fn split(text: &str, delimiter: char) -> Vec<&str> {
    text.split(delimiter).collect()
}

/// Ordered column names from the first row of a table.
///
/// Duplicate names are preserved; [`Header::resolve`] returns the first
/// occurrence (first match wins). The name-to-index map is built once so
/// later lookups avoid rescanning the header.
#[derive(Debug, Clone)]
pub struct Header<'a> {
    names: Vec<&'a str>,
    index: HashMap<&'a str, usize>,
}

impl<'a> Header<'a> {
    /// Parse the first line of a table into a header. An empty line yields
    /// a header with no columns.
    pub fn parse(line: &'a str, delimiter: char) -> Self {
        let names = if line.is_empty() {
            Vec::new()
        } else {
            split(line, delimiter)
        };
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            index.entry(*name).or_insert(i);
        }
        Header { names, index }
    }

    /// Index of the first column with this exact name, if any.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether a column with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column names in table order.
    pub fn names(&self) -> &[&'a str] {
        &self.names
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.names.len()
    }
}

/// One data row, positionally aligned to the header.
///
/// A row is a flat snapshot borrowed from the input text; it is built per
/// line and discarded after evaluation and projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    fields: Vec<&'a str>,
}

impl<'a> Row<'a> {
    /// Split a data line into a row.
    pub fn parse(line: &'a str, delimiter: char) -> Self {
        Row {
            fields: split(line, delimiter),
        }
    }

    /// Field value at a header position.
    ///
    /// A row shorter than the header has absent values at the missing
    /// positions, reported as `None`.
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// Number of fields actually present on this row.
    pub fn width(&self) -> usize {
        self.fields.len()
    }
}

/// A fully tokenized table: header plus data rows.
#[derive(Debug, Clone)]
pub struct Table<'a> {
    pub header: Header<'a>,
    pub rows: Vec<Row<'a>>,
}

impl<'a> Table<'a> {
    /// Tokenize table text. The first line is the header; every following
    /// non-blank line becomes a data row, so a trailing newline does not
    /// produce a phantom empty row.
    pub fn parse(text: &'a str, delimiter: char) -> Self {
        let mut lines = text.lines();
        let header = Header::parse(lines.next().unwrap_or(""), delimiter);
        let rows: Vec<Row<'a>> = lines
            .filter(|line| !line.is_empty())
            .map(|line| Row::parse(line, delimiter))
            .collect();
        debug!(
            "tokenized {} columns, {} data rows",
            header.width(),
            rows.len()
        );
        Table { header, rows }
    }
}
