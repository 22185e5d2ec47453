//! Redirect rule definitions.

/// Leading character that marks a pattern as a delimited regular expression.
pub const REGEX_MARKER: char = '#';

/// A configured (pattern, target) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    pub pattern: String,
    pub target: String,
}

/// How a rule's pattern is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Empty pattern or empty target; never matches.
    Skip,
    /// Literal, case-sensitive path prefix.
    Prefix,
    /// Delimited regular expression (pattern starts with `#`).
    Regex,
}

impl RedirectRule {
    pub fn new(pattern: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            target: target.into(),
        }
    }

    pub fn kind(&self) -> RuleKind {
        if self.pattern.is_empty() || self.target.is_empty() {
            RuleKind::Skip
        } else if self.pattern.starts_with(REGEX_MARKER) {
            RuleKind::Regex
        } else {
            RuleKind::Prefix
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(RedirectRule::new("", "/c").kind(), RuleKind::Skip);
        assert_eq!(RedirectRule::new("/a", "").kind(), RuleKind::Skip);
        assert_eq!(RedirectRule::new("/a", "/b").kind(), RuleKind::Prefix);
        assert_eq!(RedirectRule::new("#^/a$#", "/b").kind(), RuleKind::Regex);
    }
}
