//! Mapping of free-text error messages to HTTP status codes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Authorization patterns, checked in order.
const AUTH_PATTERNS: [(&str, u16); 3] = [
    ("unauthorized", 401),
    ("forbidden", 403),
    ("not found", 404),
];

/// Validation patterns. All map to 422.
const VALIDATION_PATTERNS: [&str; 5] = [
    "invalid transition",
    "invalid status change",
    "invalid status",
    "invalid priority",
    "invalid agent",
];

const VALIDATION_STATUS: u16 = 422;
const FALLBACK_STATUS: u16 = 500;

/// A caller-supplied `substring -> status` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRule {
    /// Substring to look for. Compared case-insensitively.
    pub pattern: String,
    /// HTTP status to return when the pattern matches.
    pub status: u16,
}

impl ErrorRule {
    /// Build a rule. The pattern is taken as-is: an empty pattern matches
    /// every message and so shadows all built-in patterns. Use the `FromStr`
    /// impl to parse untrusted input, which rejects empty patterns.
    pub fn new(pattern: impl Into<String>, status: u16) -> Self {
        Self {
            pattern: pattern.into(),
            status,
        }
    }
}

impl FromStr for ErrorRule {
    type Err = CoreError;

    /// Parse a `SUBSTRING=STATUS` rule, e.g. `rate limited=429`.
    ///
    /// Splits on the last `=` so the substring itself may contain one.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidInput(format!("{} in rule '{}'", reason, raw));

        let (pattern, status) = raw
            .rsplit_once('=')
            .ok_or_else(|| invalid("expected SUBSTRING=STATUS"))?;

        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(invalid("empty substring"));
        }

        let status: u16 = status
            .trim()
            .parse()
            .map_err(|_| invalid("status is not a number"))?;
        if !(100..=599).contains(&status) {
            return Err(invalid("status is not an HTTP status"));
        }

        Ok(Self::new(pattern, status))
    }
}

/// HTTP status derived from an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorClassification {
    /// HTTP response status.
    pub status: u16,
    /// The original message, untouched.
    pub message: String,
}

/// Classify an error message. First match wins:
/// custom rules in order, then authorization patterns, then validation
/// patterns, then 500.
pub fn classify_error(message: &str, custom_rules: &[ErrorRule]) -> ErrorClassification {
    let lowered = message.to_lowercase();
    let matches = |pattern: &str| lowered.contains(&pattern.to_lowercase());

    let status = custom_rules
        .iter()
        .find(|rule| matches(&rule.pattern))
        .map(|rule| rule.status)
        .or_else(|| {
            AUTH_PATTERNS
                .iter()
                .find(|(pattern, _)| matches(pattern))
                .map(|(_, status)| *status)
        })
        .or_else(|| {
            VALIDATION_PATTERNS
                .iter()
                .any(|pattern| matches(pattern))
                .then_some(VALIDATION_STATUS)
        })
        .unwrap_or(FALLBACK_STATUS);

    ErrorClassification {
        status,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized() {
        assert_eq!(
            classify_error("Unauthorized access", &[]),
            ErrorClassification {
                status: 401,
                message: "Unauthorized access".to_string(),
            }
        );
    }

    #[test]
    fn test_auth_patterns_in_order() {
        assert_eq!(classify_error("FORBIDDEN", &[]).status, 403);
        assert_eq!(classify_error("Task not found: t1", &[]).status, 404);
        // "unauthorized" is checked before "not found"
        assert_eq!(classify_error("unauthorized: token not found", &[]).status, 401);
    }

    #[test]
    fn test_validation_patterns() {
        assert_eq!(classify_error("invalid status transition", &[]).status, 422);
        assert_eq!(classify_error("Invalid transition: archived -> done", &[]).status, 422);
        assert_eq!(classify_error("Invalid status change requested", &[]).status, 422);
        assert_eq!(classify_error("Invalid priority: critical", &[]).status, 422);
        assert_eq!(classify_error("Invalid agent: ghost", &[]).status, 422);
    }

    #[test]
    fn test_default_is_500() {
        let classified = classify_error("boom", &[]);
        assert_eq!(classified.status, 500);
        assert_eq!(classified.message, "boom");
    }

    #[test]
    fn test_custom_rules_win_over_builtins() {
        let rules = [ErrorRule::new("widget", 409)];
        assert_eq!(classify_error("not found widget", &rules).status, 409);
    }

    #[test]
    fn test_custom_rules_respect_insertion_order() {
        let rules = [ErrorRule::new("size", 413), ErrorRule::new("exceeds", 422)];
        assert_eq!(classify_error("exceeds max size", &rules).status, 413);

        let reversed = [ErrorRule::new("exceeds", 422), ErrorRule::new("size", 413)];
        assert_eq!(classify_error("exceeds max size", &reversed).status, 422);
    }

    #[test]
    fn test_parse_rule() {
        assert_eq!(
            "rate limited=429".parse::<ErrorRule>().unwrap(),
            ErrorRule::new("rate limited", 429)
        );
        assert_eq!("a=b=409".parse::<ErrorRule>().unwrap(), ErrorRule::new("a=b", 409));
    }

    #[test]
    fn test_empty_pattern_rule_matches_everything() {
        let rules = [ErrorRule::new("", 418)];
        assert_eq!(classify_error("Task not found: t1", &rules).status, 418);
        assert!("=418".parse::<ErrorRule>().is_err());
    }

    #[test]
    fn test_parse_rule_rejects_garbage() {
        for raw in ["no-equals", "=404", "x=abc", "x=42", "x=600"] {
            let err = raw.parse::<ErrorRule>().unwrap_err();
            assert!(matches!(err, CoreError::InvalidInput(_)), "{}", raw);
        }
    }

    #[test]
    fn test_custom_rule_matching_is_case_insensitive() {
        let rules = [ErrorRule::new("Rate Limited", 429)];
        let classified = classify_error("RATE LIMITED by upstream", &rules);
        assert_eq!(classified.status, 429);
        assert_eq!(classified.message, "RATE LIMITED by upstream");
    }
}
