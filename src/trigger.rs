//! Detects chat messages asking about lunch

use std::sync::LazyLock;

use regex::Regex;

static LUNCH_QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(where.*lunch)|(lunch.*where)|(what.*lunch)|(lunch.*what)")
        .expect("lunch trigger pattern is valid")
});

/// "where"/"what" and "lunch" in either order, any case
#[must_use]
pub fn is_lunch_question(text: &str) -> bool {
    LUNCH_QUESTION.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Where should we go to lunch?")]
    #[case("lunch, where?")]
    #[case("WHAT are we doing for LUNCH")]
    #[case("so lunch... what's the plan")]
    #[case("anyone know whereabouts the lunch truck is")]
    fn test_matches(#[case] text: &str) {
        assert!(is_lunch_question(text));
    }

    #[rstest]
    #[case("lunch was great")]
    #[case("where are the keys?")]
    #[case("what time is the standup")]
    #[case("")]
    fn test_ignores(#[case] text: &str) {
        assert!(!is_lunch_question(text));
    }
}
