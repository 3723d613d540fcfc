//! # csvsieve
//!
//! Filtering and projection for delimited tabular text.
//!
//! A table is plain text: the first line names the columns, every following
//! line is a data row, and fields split on a literal `,` with no quoting
//! dialect. One invocation takes the table, a comma-separated list of
//! columns to keep, and a newline-separated set of `<column><op><value>`
//! filters, and returns the matching rows restricted to the selected
//! columns, always in the table's own column order.
//!
//! Several filters may target the same column: they combine with OR within
//! that column and with AND across columns. Values compare
//! lexicographically, never numerically.
//!
//! ## Example
//!
//! ```
//! use csvsieve::process_text;
//!
//! let table = "name,dept,salary\nsmith,sales,500\njones,eng,750\n";
//!
//! let output = process_text(table, "name,salary", "dept=sales").unwrap();
//! assert_eq!(output, "name,salary\nsmith,500\n");
//! ```
//!
//! Validation never fails fast: every unknown column and malformed filter
//! of an invocation is reported together, and no output is produced unless
//! the whole invocation is clean.

pub mod error;
pub mod filter;
pub mod process;
pub mod select;
pub mod table;

pub use error::{Diagnostic, SieveError};
pub use filter::{Filter, FilterSet, Op, Predicate, parse_filter};
pub use process::{FIELD_DELIMITER, process_file, process_text, validate};
pub use select::{Selection, project_header, project_row};
pub use table::{Header, Row, Table, split};
