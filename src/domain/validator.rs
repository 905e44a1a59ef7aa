//! Well-formedness checks run before any tree is built.

use tracing::{debug, instrument};

/// Outcome of the three well-formedness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    /// Starts with `(` and ends with `)`
    pub has_bookends: bool,
    /// As many `(` as `)`
    pub balanced: bool,
    /// Contains `()` somewhere
    pub has_empty_group: bool,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.has_bookends && self.balanced && !self.has_empty_group
    }

    /// Human-readable reasons for a rejection, empty when valid.
    pub fn reasons(&self) -> Vec<&'static str> {
        let mut reasons = Vec::new();
        if !self.has_bookends {
            reasons.push("input must start with '(' and end with ')'");
        }
        if !self.balanced {
            reasons.push("parentheses are not balanced");
        }
        if self.has_empty_group {
            reasons.push("input contains an empty group '()'");
        }
        reasons
    }
}

/// Remove every whitespace character; whitespace carries no meaning.
pub fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Run all checks and report each result.
#[instrument(level = "debug")]
pub fn check(input: &str) -> ValidationReport {
    let text = strip_whitespace(input);

    let has_bookends = text.len() >= 2 && text.starts_with('(') && text.ends_with(')');
    let opening = text.matches('(').count();
    let closing = text.matches(')').count();
    let report = ValidationReport {
        has_bookends,
        balanced: opening == closing,
        has_empty_group: text.contains("()"),
    };

    debug!("Has valid bookends?: {}", report.has_bookends);
    debug!("Has even parentheses?: {} ({}/{})", report.balanced, opening, closing);
    debug!("Has empty parentheses?: {}", report.has_empty_group);
    report
}

/// True if `input` may be handed to the parser.
pub fn validate(input: &str) -> bool {
    check(input).is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("(a,b)", true)]
    #[case("(id,created,employee(id,firstname),location)", true)]
    #[case(" ( a , b ( c ) ) ", true)]
    #[case("abc", false)]
    #[case("(a,(b)", false)]
    #[case("(a,(),b)", false)]
    #[case("( )", false)]
    #[case("(", false)]
    #[case("", false)]
    #[case("a,b)", false)]
    fn test_validate(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(validate(input), expected, "input: {:?}", input);
    }

    #[test]
    fn given_unbalanced_input_when_checking_then_only_balance_fails() {
        let report = check("(a,(b)");

        assert!(report.has_bookends);
        assert!(!report.balanced);
        assert!(!report.has_empty_group);
        assert_eq!(report.reasons(), vec!["parentheses are not balanced"]);
    }

    #[test]
    fn given_bare_word_when_checking_then_bookends_fail() {
        let report = check("abc");

        assert!(!report.is_valid());
        assert!(!report.has_bookends);
        assert!(report.balanced);
    }

    #[test]
    fn given_valid_input_when_checking_then_no_reasons() {
        assert!(check("(a,b)").reasons().is_empty());
    }
}
