//! Query evaluation against case-folded page text.

use super::expression::QueryExpression;

impl QueryExpression {
    /// Evaluates the expression against text that is already lowercased.
    ///
    /// `Or` stops at the first matching operand and `And` at the first failing one.
    pub fn evaluate(&self, haystack_lower: &str) -> bool {
        match self {
            QueryExpression::Or(parts) => parts.iter().any(|part| part.evaluate(haystack_lower)),
            QueryExpression::And(parts) => parts.iter().all(|part| part.evaluate(haystack_lower)),
            QueryExpression::Literal(needle) => haystack_lower.contains(needle.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> QueryExpression {
        QueryExpression::literal(s)
    }

    #[test]
    fn literal_is_substring_containment() {
        assert!(lit("port").evaluate("annual report"));
        assert!(!lit("budget").evaluate("annual report"));
        assert!(lit("").evaluate(""));
    }

    #[test]
    fn or_is_disjunction() {
        let cases = [("alpha", true), ("beta", true), ("alphabeta", true), ("gamma", false)];
        let expr = QueryExpression::Or(vec![lit("alpha"), lit("beta")]);
        for (text, expected) in cases {
            assert_eq!(expr.evaluate(text), expected, "text: {text}");
            assert_eq!(
                expr.evaluate(text),
                lit("alpha").evaluate(text) || lit("beta").evaluate(text)
            );
        }
    }

    #[test]
    fn and_is_conjunction() {
        let cases = [("alpha", false), ("beta", false), ("alpha beta", true), ("", false)];
        let expr = QueryExpression::And(vec![lit("alpha"), lit("beta")]);
        for (text, expected) in cases {
            assert_eq!(expr.evaluate(text), expected, "text: {text}");
            assert_eq!(
                expr.evaluate(text),
                lit("alpha").evaluate(text) && lit("beta").evaluate(text)
            );
        }
    }

    #[test]
    fn empty_groups_follow_any_and_all() {
        assert!(!QueryExpression::Or(Vec::new()).evaluate("anything"));
        assert!(QueryExpression::And(Vec::new()).evaluate("anything"));
    }
}
