//! Error taxonomy: aggregated validation diagnostics and terminal failures.

use std::io;

use thiserror::Error;

/// A single validation or parse finding.
///
/// Diagnostics are collected across the whole invocation before the engine
/// decides to abort; a non-empty set means zero output lines, never a
/// partial table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// A selected or filtered column name with no exact match in the header.
    #[error("header '{0}' not found in input")]
    UnknownColumn(String),
    /// A filter line that does not parse into column, operator and value.
    #[error("invalid filter: '{0}'")]
    InvalidFilter(String),
}

/// Terminal failure of one invocation.
///
/// There is no retry logic anywhere in the engine; transient I/O failures
/// are the caller's concern.
#[derive(Debug, Error)]
pub enum SieveError {
    /// The byte source could not be opened or read; aborts before parsing.
    #[error("unable to read '{path}': {source}")]
    Source {
        path: String,
        #[source]
        source: io::Error,
    },
    /// Validation found problems; rendered one diagnostic per line.
    #[error("{}", render(.diagnostics))]
    Rejected { diagnostics: Vec<Diagnostic> },
}

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(Diagnostic::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
