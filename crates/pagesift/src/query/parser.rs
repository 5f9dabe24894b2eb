//! Query parser.
//!
//! The grammar is deliberately flat: the query is split on `|` first and every
//! segment on `&`. Operators are found by plain character containment, so a
//! literal `&` or `|` can never be searched for.

use super::expression::QueryExpression;

pub const AND_OPERATOR: char = '&';
pub const OR_OPERATOR: char = '|';

pub struct QueryParser;

impl QueryParser {
    /// Parses a raw query into an expression. Never fails.
    pub fn parse(input: &str) -> QueryExpression {
        parse_segment(&input.to_lowercase())
    }
}

fn parse_segment(segment: &str) -> QueryExpression {
    if segment.contains(OR_OPERATOR) {
        return QueryExpression::Or(split_operands(segment, OR_OPERATOR));
    }
    if segment.contains(AND_OPERATOR) {
        return QueryExpression::And(split_operands(segment, AND_OPERATOR));
    }
    QueryExpression::Literal(segment.to_string())
}

fn split_operands(segment: &str, operator: char) -> Vec<QueryExpression> {
    segment
        .split(operator)
        .map(|part| parse_segment(part.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> QueryExpression {
        QueryExpression::literal(s)
    }

    #[test]
    fn plain_word_is_a_literal() {
        assert_eq!(QueryParser::parse("Budget"), lit("budget"));
    }

    #[test]
    fn or_splits_before_and() {
        assert_eq!(
            QueryParser::parse("a&b|c&d"),
            QueryExpression::Or(vec![
                QueryExpression::And(vec![lit("a"), lit("b")]),
                QueryExpression::And(vec![lit("c"), lit("d")]),
            ])
        );
    }

    #[test]
    fn mixed_query_is_or_of_ands() {
        assert_eq!(
            QueryParser::parse("a & b | c"),
            QueryExpression::Or(vec![
                QueryExpression::And(vec![lit("a"), lit("b")]),
                lit("c"),
            ])
        );
    }

    #[test]
    fn segments_are_trimmed() {
        assert_eq!(
            QueryParser::parse("  export  |   import "),
            QueryExpression::Or(vec![lit("export"), lit("import")])
        );
    }

    #[test]
    fn outer_whitespace_of_a_single_literal_is_kept() {
        // Only split segments are trimmed.
        assert_eq!(QueryParser::parse(" tax "), lit(" tax "));
    }

    #[test]
    fn empty_query_is_empty_literal() {
        assert_eq!(QueryParser::parse(""), lit(""));
    }

    #[test]
    fn trailing_operator_yields_empty_operand() {
        assert_eq!(
            QueryParser::parse("report &"),
            QueryExpression::And(vec![lit("report"), lit("")])
        );
        assert_eq!(
            QueryParser::parse("|"),
            QueryExpression::Or(vec![lit(""), lit("")])
        );
    }

    #[test]
    fn query_is_lowercased_once() {
        assert_eq!(
            QueryParser::parse("ÄRGER & Tax"),
            QueryExpression::And(vec![lit("ärger"), lit("tax")])
        );
    }
}
