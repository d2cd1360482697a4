//! Shared error types

use thiserror::Error;

/// Raised when a string key does not name any variant of a selector enum
/// (fuel type, intake manifold, usage, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    /// Human name of the selector, e.g. "fuel type"
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
    /// Accepted keys, comma separated
    pub expected: &'static str,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// Normalize a selector key: trim, lowercase, and fold `-`/space to `_`.
pub(crate) fn normalize_key(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_key_folds_separators() {
        assert_eq!(normalize_key("  Single-Plane "), "single_plane");
        assert_eq!(normalize_key("dont care"), "dont_care");
    }

    #[test]
    fn parse_error_message_lists_expected() {
        let err = ParseEnumError::new("fuel type", "diesel", "pump91, pump93");
        assert_eq!(
            err.to_string(),
            "unknown fuel type 'diesel' (expected one of: pump91, pump93)"
        );
    }
}
