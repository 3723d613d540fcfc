//! Column selection and projection.
//!
//! Projection always emits columns in header order, not selection order:
//! with header `a,b,c`, requesting `c,a` produces `a,c`. The empty
//! selection string is a sentinel for "all columns" and expands to the full
//! header in its natural order.

use crate::table::{Header, Row};

/// The caller-requested set of output columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Empty selection string: every header column.
    All,
    /// Explicit column names, in the order they were written.
    Columns(Vec<&'a str>),
}

impl<'a> Selection<'a> {
    /// Parse a comma-separated selection string.
    ///
    /// The empty string selects all columns. Stray empty pieces from
    /// doubled or trailing commas are ignored, and a selection with no
    /// non-empty names also means all columns.
    pub fn parse(selected: &'a str) -> Self {
        let names: Vec<&'a str> = selected.split(',').filter(|n| !n.is_empty()).collect();
        if names.is_empty() {
            Selection::All
        } else {
            Selection::Columns(names)
        }
    }

    /// The explicitly requested names; empty for the all-columns sentinel.
    pub fn names(&self) -> &[&'a str] {
        match self {
            Selection::All => &[],
            Selection::Columns(names) => names,
        }
    }

    /// Resolve to header column indices, in header order.
    ///
    /// Every header position whose name is requested is kept, so duplicate
    /// header names project all their occurrences.
    pub fn resolve(&self, header: &Header<'a>) -> Vec<usize> {
        match self {
            Selection::All => (0..header.width()).collect(),
            Selection::Columns(names) => header
                .names()
                .iter()
                .enumerate()
                .filter(|(_, name)| names.contains(name))
                .map(|(i, _)| i)
                .collect(),
        }
    }
}

/// Join the selected header names into the output header line.
pub fn project_header(header: &Header<'_>, indices: &[usize], delimiter: char) -> String {
    let names: Vec<&str> = indices.iter().map(|&i| header.names()[i]).collect();
    names.join(delimiter.to_string().as_str())
}

/// Join a row's selected field values into one output line.
///
/// Absent fields on short rows project as empty strings.
pub fn project_row(row: &Row<'_>, indices: &[usize], delimiter: char) -> String {
    let values: Vec<&str> = indices
        .iter()
        .map(|&i| row.field(i).unwrap_or(""))
        .collect();
    values.join(delimiter.to_string().as_str())
}
