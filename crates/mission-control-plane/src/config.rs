//! Control plane configuration.

use mission_core::{ErrorRule, MAX_CONTENT_MARKDOWN_BYTES};

/// Control plane configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address.
    pub http_bind_addr: String,

    /// Ceiling for skill and document bodies, in UTF-8 bytes.
    pub max_content_bytes: usize,

    /// Number of activity entries kept in memory.
    pub activity_feed_limit: usize,

    /// Extra `substring -> status` rules, checked before the built-in ones.
    pub error_rules: Vec<ErrorRule>,
}

impl Config {
    /// Rules every deployment starts with.
    pub fn default_error_rules() -> Vec<ErrorRule> {
        vec![
            // content-size violations are validation failures
            ErrorRule::new("exceeds the maximum size", 422),
            ErrorRule::new("invalid input", 400),
        ]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_bind_addr: "[::1]:50052".to_string(),
            max_content_bytes: MAX_CONTENT_MARKDOWN_BYTES,
            activity_feed_limit: 500,
            error_rules: Self::default_error_rules(),
        }
    }
}
