//! Whole-invocation engine: validate once, then match and project per row.
//!
//! Control flow is a single linear pass: tokenize the table, run the
//! validator once against the header, compile the predicates once, then
//! decide each data row and emit the accepted ones. Any failure is terminal
//! for the whole invocation; there are no retries and no partial output.
//!
//! Both entry points are pure functions of their arguments with no shared
//! mutable state, so concurrent reentrant calls are safe. Serializing
//! writes to a shared sink, if one exists, is the caller's concern.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Diagnostic, SieveError};
use crate::filter::{FilterSet, parse_filter};
use crate::select::{Selection, project_header, project_row};
use crate::table::{Header, Table};

/// Field delimiter of the supported table format.
pub const FIELD_DELIMITER: char = ',';

/// Check every selected column and filter line against the header.
///
/// Diagnostics accumulate in scan order (selected names first, then filter
/// lines) instead of failing fast, so one run reports every problem:
/// unknown selected columns, filter lines that do not parse, and filter
/// columns missing from the header. Blank filter lines are skipped.
pub fn validate(
    header: &Header<'_>,
    selection: &Selection<'_>,
    filter_spec: &str,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for name in selection.names() {
        if !header.contains(name) {
            diagnostics.push(Diagnostic::UnknownColumn(name.to_string()));
        }
    }

    for line in filter_spec.lines().filter(|l| !l.is_empty()) {
        match parse_filter(line) {
            None => diagnostics.push(Diagnostic::InvalidFilter(line.to_string())),
            Some(filter) => {
                if !header.contains(filter.column) {
                    diagnostics.push(Diagnostic::UnknownColumn(filter.column.to_string()));
                }
            }
        }
    }

    diagnostics
}

/// Filter and project a table held in memory.
///
/// `selected_columns` is a comma-separated list of column names; the empty
/// string selects every column. `filter_spec` is newline-separated
/// `<column><op><value>` lines.
///
/// On success the returned text is the selected header line followed by
/// every accepted row, in header column order, each line terminated by a
/// single newline. If validation finds any problem the whole invocation is
/// rejected and no output is produced, not even the header. Identical
/// arguments always produce byte-identical output; nothing is carried
/// between invocations.
pub fn process_text(
    table_text: &str,
    selected_columns: &str,
    filter_spec: &str,
) -> Result<String, SieveError> {
    let table = Table::parse(table_text, FIELD_DELIMITER);
    let selection = Selection::parse(selected_columns);

    let diagnostics = validate(&table.header, &selection, filter_spec);
    if !diagnostics.is_empty() {
        return Err(SieveError::Rejected { diagnostics });
    }

    let filters = FilterSet::compile(filter_spec, &table.header);
    let indices = selection.resolve(&table.header);
    debug!(
        "{} constrained columns, {} selected columns",
        filters.len(),
        indices.len()
    );

    let mut output = String::new();
    output.push_str(&project_header(&table.header, &indices, FIELD_DELIMITER));
    output.push('\n');

    let mut emitted = 0usize;
    for row in &table.rows {
        if filters.matches(row) {
            output.push_str(&project_row(row, &indices, FIELD_DELIMITER));
            output.push('\n');
            emitted += 1;
        }
    }
    debug!("emitted {} of {} rows", emitted, table.rows.len());

    Ok(output)
}

/// Load a table from a file and delegate to [`process_text`].
///
/// Fails with [`SieveError::Source`] naming the path if the file cannot be
/// read.
pub fn process_file(
    path: impl AsRef<Path>,
    selected_columns: &str,
    filter_spec: &str,
) -> Result<String, SieveError> {
    let path = path.as_ref();
    let table_text = fs::read_to_string(path).map_err(|source| SieveError::Source {
        path: path.display().to_string(),
        source,
    })?;
    process_text(&table_text, selected_columns, filter_spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "header1,header2,header3\n1,2,3\n4,5,6\n7,8,9";

    /// Helper: run the engine and unwrap the output text.
    fn run(selected: &str, filters: &str) -> String {
        process_text(TABLE, selected, filters).unwrap()
    }

    /// Helper: run the engine and unwrap the rejection diagnostics.
    fn run_rejected(selected: &str, filters: &str) -> Vec<Diagnostic> {
        match process_text(TABLE, selected, filters) {
            Err(SieveError::Rejected { diagnostics }) => diagnostics,
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_basic_filter_and_project() {
        let output = run("header1,header3", "header1>1\nheader3<9");
        assert_eq!(output, "header1,header3\n4,6\n");
    }

    #[test]
    fn test_selection_order_does_not_matter() {
        // projection is in header order, not selection order
        let output = run("header3,header1", "header1>1\nheader3<9");
        assert_eq!(output, "header1,header3\n4,6\n");
    }

    #[test]
    fn test_filter_order_does_not_matter() {
        let output = run("header1,header3", "header3<9\nheader1>1");
        assert_eq!(output, "header1,header3\n4,6\n");
    }

    #[test]
    fn test_empty_selection_projects_every_column() {
        let output = run("", "header1>1\nheader3<9");
        assert_eq!(output, "header1,header2,header3\n4,5,6\n");
    }

    #[test]
    fn test_empty_filter_spec_accepts_every_row() {
        let output = run("header2", "");
        assert_eq!(output, "header2\n2\n5\n8\n");
    }

    #[test]
    fn test_header_emitted_even_when_nothing_matches() {
        let output = run("header1", "header1>9");
        assert_eq!(output, "header1\n");
    }

    #[test]
    fn test_multiple_filters_per_column_combine_with_or() {
        let output = run(
            "header1,header2,header3",
            "header1=1\nheader1=4\nheader2>3\nheader3>4",
        );
        assert_eq!(output, "header1,header2,header3\n4,5,6\n");
    }

    #[test]
    fn test_negation_and_bounds_operators() {
        let output = run("header1,header3", "header1!=2\nheader2>=5\nheader3<=6");
        assert_eq!(output, "header1,header3\n4,6\n");
    }

    #[test]
    fn test_comparison_is_lexicographic_not_numeric() {
        let table = "n\n9\n10\n";
        // "10" sorts before "9" as a string, so 9 is the only value above it
        let output = process_text(table, "", "n>10").unwrap();
        assert_eq!(output, "n\n9\n");
    }

    #[test]
    fn test_unknown_columns_are_collected_not_fail_fast() {
        let diagnostics = run_rejected("header4,header1", "header5>1\nheader3<9");
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::UnknownColumn("header4".to_string()),
                Diagnostic::UnknownColumn("header5".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_filter_rejects_invocation() {
        let diagnostics = run_rejected("header1,header3", "header1#2");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::InvalidFilter("header1#2".to_string())]
        );
    }

    #[test]
    fn test_diagnostics_in_selection_then_filter_scan_order() {
        let diagnostics = run_rejected("header9", "header1#2\nheader8<3");
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::UnknownColumn("header9".to_string()),
                Diagnostic::InvalidFilter("header1#2".to_string()),
                Diagnostic::UnknownColumn("header8".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_filter_lines_are_skipped() {
        let output = run("header1,header3", "header1>1\n\nheader3<9\n");
        assert_eq!(output, "header1,header3\n4,6\n");
    }

    #[test]
    fn test_trailing_delimiter_keeps_empty_field_aligned() {
        let table = "name,note\nbob,\nann,ok\n";
        let output = process_text(table, "", "note=ok").unwrap();
        assert_eq!(output, "name,note\nann,ok\n");
    }

    #[test]
    fn test_short_rows_have_absent_values() {
        let table = "h1,h2,h3\n1,2\n4,5,6\n";
        // a predicate on the missing field rejects the short row...
        let output = process_text(table, "", "h3<9").unwrap();
        assert_eq!(output, "h1,h2,h3\n4,5,6\n");
        // ...and projecting the missing field emits an empty string
        let output = process_text(table, "h1,h3", "").unwrap();
        assert_eq!(output, "h1,h3\n1,\n4,6\n");
    }

    #[test]
    fn test_duplicate_header_names() {
        let table = "a,b,a\n1,2,3\n";
        // filters bind the first occurrence, projection keeps both
        let output = process_text(table, "a", "a=1").unwrap();
        assert_eq!(output, "a,a\n1,3\n");
    }

    #[test]
    fn test_empty_table_text() {
        assert_eq!(process_text("", "", "").unwrap(), "\n");
        let diagnostics = match process_text("", "h1", "") {
            Err(SieveError::Rejected { diagnostics }) => diagnostics,
            other => panic!("expected rejection, got {:?}", other),
        };
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnknownColumn("h1".to_string())]
        );
    }

    #[test]
    fn test_identical_arguments_give_byte_identical_output() {
        let first = run("header1,header3", "header1>1\nheader3<9");
        let second = run("header1,header3", "header1>1\nheader3<9");
        assert_eq!(first, second);
    }

    #[test]
    fn test_process_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, TABLE).unwrap();

        let output = process_file(&path, "header1,header3", "header1>1\nheader3<9").unwrap();
        assert_eq!(output, "header1,header3\n4,6\n");
    }

    #[test]
    fn test_process_file_missing_is_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        match process_file(&path, "", "") {
            Err(SieveError::Source { path: p, .. }) => assert!(p.ends_with("missing.csv")),
            other => panic!("expected source error, got {:?}", other),
        }
    }
}
