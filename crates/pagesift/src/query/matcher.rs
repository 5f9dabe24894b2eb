//! Compiled query matcher for page text.

use super::expression::QueryExpression;
use super::parser::QueryParser;

/// A compiled query, ready to be applied to raw page text.
#[derive(Debug, Clone)]
pub struct SearchQueryMatcher {
    raw: String,
    expression: QueryExpression,
}

impl SearchQueryMatcher {
    /// Compiles a raw query string. Any string is accepted.
    pub fn compile(raw_query: &str) -> Self {
        Self {
            raw: raw_query.to_string(),
            expression: QueryParser::parse(raw_query),
        }
    }

    /// Returns the query as the user typed it.
    pub fn raw_query(&self) -> &str {
        self.raw.as_str()
    }

    /// Returns the parsed expression.
    pub fn expression(&self) -> &QueryExpression {
        &self.expression
    }

    /// Folds `page_text` and evaluates the expression against it.
    pub fn matches(&self, page_text: &str) -> bool {
        self.expression.evaluate(&page_text.to_lowercase())
    }
}
