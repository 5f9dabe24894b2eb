//! Query parsing, compilation, and matching for page search.
//!
//! This module provides the query language for page search:
//! - Expression types (OR, AND, literal terms)
//! - Flat operator-splitting parser
//! - Evaluation against case-folded page text

mod evaluate;
mod expression;
mod matcher;
mod parser;

pub use expression::QueryExpression;
pub use matcher::SearchQueryMatcher;
pub use parser::{QueryParser, AND_OPERATOR, OR_OPERATOR};
