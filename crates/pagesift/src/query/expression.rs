//! Query expression types and AST nodes.

use std::fmt;

use super::parser::{AND_OPERATOR, OR_OPERATOR};

/// A parsed query expression (AST node).
///
/// Queries only ever parse into an `Or` of `And`s of `Literal`s; there is no grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpression {
    Or(Vec<QueryExpression>),
    And(Vec<QueryExpression>),
    /// Case-folded substring pattern.
    Literal(String),
}

impl QueryExpression {
    pub fn literal(value: impl Into<String>) -> Self {
        QueryExpression::Literal(value.into())
    }
}

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryExpression::Literal(value) => f.write_str(value),
            QueryExpression::Or(parts) => write_joined(f, parts, OR_OPERATOR),
            QueryExpression::And(parts) => write_joined(f, parts, AND_OPERATOR),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    parts: &[QueryExpression],
    operator: char,
) -> fmt::Result {
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            write!(f, " {operator} ")?;
        }
        write!(f, "{part}")?;
    }
    Ok(())
}
