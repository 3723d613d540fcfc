//! Filter grammar and row matching.
//!
//! A filter spec is newline-separated lines of the form
//! `<column><op><value>` with `op` one of `>`, `<`, `=`, `!=`, `>=`, `<=`
//! and no whitespace tolerance: `salary>=1000` filters on the `salary`
//! column, while spaces around the operator become part of the column name
//! or value.
//!
//! Several filters may target the same column. They combine with OR within
//! that column and with AND across columns, so
//! `dept=sales`, `dept=eng`, `salary>100` together read "dept is sales or
//! eng, and salary is above 100". Values compare as strings
//! (lexicographically), never as numbers: `"9" < "10"` is false.

use std::cmp::Ordering;
use std::fmt;

use crate::table::{Header, Row};

/// Comparison operator of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Gt,
    Lt,
    Eq,
    Ne,
    Ge,
    Le,
}

impl Op {
    /// The spelling used in filter specs.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Gt => ">",
            Op::Lt => "<",
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Ge => ">=",
            Op::Le => "<=",
        }
    }

    /// Compare a row value against the filter literal.
    ///
    /// Comparison is lexicographic for all six operators: `"9" < "10"` is
    /// false because `'9' > '1'`.
    pub fn eval(self, value: &str, literal: &str) -> bool {
        let ord = value.cmp(literal);
        match self {
            Op::Gt => ord == Ordering::Greater,
            Op::Lt => ord == Ordering::Less,
            Op::Eq => ord == Ordering::Equal,
            Op::Ne => ord != Ordering::Equal,
            Op::Ge => ord != Ordering::Less,
            Op::Le => ord != Ordering::Greater,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed filter line. The column is not yet checked against any header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter<'a> {
    pub column: &'a str,
    pub op: Op,
    pub value: &'a str,
}

/// Parse one filter line of the form `<column><op><value>`.
///
/// The operator is found by longest match at the first operator character:
/// `h>=5` is column `h`, operator `>=`, value `5`, never `h > "=5"`. The
/// value is taken verbatim, so it may itself contain operator characters
/// (`h=a=b` has value `a=b`). A line with no operator, a bare `!`, or an
/// empty column or value does not parse.
pub fn parse_filter(line: &str) -> Option<Filter<'_>> {
    let pos = line.find(['>', '<', '=', '!'])?;
    let rest = &line[pos..];
    let op = if rest.starts_with(">=") {
        Op::Ge
    } else if rest.starts_with("<=") {
        Op::Le
    } else if rest.starts_with("!=") {
        Op::Ne
    } else if rest.starts_with('>') {
        Op::Gt
    } else if rest.starts_with('<') {
        Op::Lt
    } else if rest.starts_with('=') {
        Op::Eq
    } else {
        // a bare `!` is not an operator
        return None;
    };
    let column = &line[..pos];
    let value = &line[pos + op.symbol().len()..];
    if column.is_empty() || value.is_empty() {
        return None;
    }
    Some(Filter { column, op, value })
}

/// One bound predicate: operator and literal for an already-resolved column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate<'a> {
    pub op: Op,
    pub value: &'a str,
}

/// Every predicate of an invocation, grouped by header column index.
///
/// Built once from a validated filter spec and immutable afterwards.
#[derive(Debug, Default)]
pub struct FilterSet<'a> {
    groups: Vec<(usize, Vec<Predicate<'a>>)>,
}

impl<'a> FilterSet<'a> {
    /// Group a filter spec's predicates by header column index.
    ///
    /// Lines that do not parse or that name an unknown column are skipped
    /// here, so callers must run [`crate::process::validate`] first; after
    /// a clean validation every non-blank line contributes exactly one
    /// predicate.
    pub fn compile(filter_spec: &'a str, header: &Header<'a>) -> Self {
        let mut groups: Vec<(usize, Vec<Predicate<'a>>)> = Vec::new();
        for line in filter_spec.lines().filter(|l| !l.is_empty()) {
            let Some(filter) = parse_filter(line) else {
                continue;
            };
            let Some(index) = header.resolve(filter.column) else {
                continue;
            };
            let predicate = Predicate {
                op: filter.op,
                value: filter.value,
            };
            match groups.iter_mut().find(|(i, _)| *i == index) {
                Some((_, predicates)) => predicates.push(predicate),
                None => groups.push((index, vec![predicate])),
            }
        }
        FilterSet { groups }
    }

    /// Number of distinct constrained columns.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no column is constrained.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Decide whether a row passes every column constraint.
    ///
    /// Within a column any predicate may hold (OR); across columns every
    /// group must hold (AND). A column with no predicates imposes no
    /// constraint, and a predicate against an absent field never holds.
    pub fn matches(&self, row: &Row<'_>) -> bool {
        self.groups.iter().all(|(index, predicates)| {
            let Some(value) = row.field(*index) else {
                return false;
            };
            predicates.iter().any(|p| p.op.eval(value, p.value))
        })
    }
}
