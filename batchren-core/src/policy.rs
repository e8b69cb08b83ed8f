use serde::{Deserialize, Serialize};

/// Heuristics baked into pattern interpretation.
///
/// Both are on by default. They are kept as named flags so callers (and
/// tests) can switch one off and observe the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// A pattern whose first token is a number and which names no extension
    /// gets an implicit leading wildcard: `231` behaves as `*231`.
    pub implicit_leading_wildcard: bool,
    /// A replacement that names an extension but contains no wildcard
    /// replaces the whole name; whatever followed the matched head is dropped.
    pub drop_tail_on_format: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            implicit_leading_wildcard: true,
            drop_tail_on_format: true,
        }
    }
}

impl Policy {
    /// The same policy with the implicit leading wildcard switched off.
    pub fn without_implicit_wildcard(self) -> Self {
        Self {
            implicit_leading_wildcard: false,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_enables_both_heuristics() {
        let policy = Policy::default();
        assert!(policy.implicit_leading_wildcard);
        assert!(policy.drop_tail_on_format);
    }

    #[test]
    fn test_partial_policy_from_toml() {
        let policy: Policy = toml::from_str("drop_tail_on_format = false").unwrap();
        assert!(policy.implicit_leading_wildcard);
        assert!(!policy.drop_tail_on_format);
    }

    #[test]
    fn test_without_implicit_wildcard() {
        let policy = Policy::default().without_implicit_wildcard();
        assert!(!policy.implicit_leading_wildcard);
        assert!(policy.drop_tail_on_format);
    }
}
