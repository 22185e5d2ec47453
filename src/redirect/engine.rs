//! Redirect rule evaluation.
//!
//! # Responsibilities
//! - Scan rules in configured order, first match wins
//! - Literal prefix rules append the unmatched remainder of the path
//! - Regex rules substitute `$N` tokens with captured groups
//! - Hand the final URL to the sanitizer
//!
//! # Design Decisions
//! - Pure: returns a `RedirectAction`, the caller issues the response
//! - Stateless across requests; regex patterns compile per evaluation
//! - A pattern that fails to compile is a non-match for that rule only

use std::fmt;
use std::sync::Arc;

use crate::redirect::pattern;
use crate::redirect::rule::{RedirectRule, RuleKind};
use crate::redirect::sanitize::{EscUrlRaw, UrlSanitizer};

/// Status code of every issued redirect.
pub const REDIRECT_STATUS: u16 = 301;

/// The redirect to issue for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectAction {
    pub url: String,
    pub status_code: u16,
}

/// Evaluate `rules` against a request path.
///
/// Returns the action of the first matching rule, or `None` when no rule
/// applies and the request should be handled as a normal not-found.
pub fn evaluate(
    path: &str,
    rules: &[RedirectRule],
    sanitizer: &dyn UrlSanitizer,
) -> Option<RedirectAction> {
    rules.iter().enumerate().find_map(|(index, rule)| {
        let url = match rule.kind() {
            RuleKind::Skip => None,
            RuleKind::Prefix => match_prefix(path, rule),
            RuleKind::Regex => match_regex(path, rule),
        }?;

        tracing::debug!(rule = index, pattern = %rule.pattern, path, url = %url, "Redirect rule matched");

        Some(RedirectAction {
            url: sanitizer.sanitize(&url),
            status_code: REDIRECT_STATUS,
        })
    })
}

fn match_prefix(path: &str, rule: &RedirectRule) -> Option<String> {
    if !path.starts_with(&rule.pattern) {
        return None;
    }

    let mut url = rule.target.clone();
    if path != rule.pattern {
        url.push_str(strip_prefix_ignore_case(path, &rule.pattern));
    }
    Some(url)
}

/// Remove `prefix` from the start of `path`, comparing ASCII letters
/// case-insensitively. `path` is returned whole when the prefix is absent.
fn strip_prefix_ignore_case<'a>(path: &'a str, prefix: &str) -> &'a str {
    match path.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &path[prefix.len()..],
        _ => path,
    }
}

fn match_regex(path: &str, rule: &RedirectRule) -> Option<String> {
    let regex = match pattern::compile(&rule.pattern) {
        Ok(regex) => regex,
        Err(e) => {
            tracing::warn!(pattern = %rule.pattern, error = %e, "Invalid redirect pattern, skipping rule");
            return None;
        }
    };

    let captures = match regex.captures(path) {
        Ok(captures) => captures?,
        Err(e) => {
            tracing::warn!(pattern = %rule.pattern, path, error = %e, "Redirect pattern failed to run, skipping rule");
            return None;
        }
    };

    // Groups after the last one that took part in the match are not
    // substituted; their tokens stay in the target as written.
    let last = (1..captures.len())
        .rev()
        .find(|&i| captures.get(i).is_some())
        .unwrap_or(0);

    let mut url = rule.target.clone();
    for i in 1..=last {
        let text = captures.get(i).map_or("", |m| m.as_str());
        url = url.replace(&format!("${i}"), text);
    }
    Some(url)
}

/// A site's redirect rules together with the sanitizer applied to targets.
#[derive(Clone)]
pub struct RedirectEngine {
    rules: Arc<[RedirectRule]>,
    sanitizer: Arc<dyn UrlSanitizer>,
}

impl RedirectEngine {
    pub fn new(rules: Vec<RedirectRule>) -> Self {
        Self::with_sanitizer(rules, Arc::new(EscUrlRaw))
    }

    pub fn with_sanitizer(rules: Vec<RedirectRule>, sanitizer: Arc<dyn UrlSanitizer>) -> Self {
        Self {
            rules: rules.into(),
            sanitizer,
        }
    }

    pub fn rules(&self) -> &[RedirectRule] {
        &self.rules
    }

    pub fn evaluate(&self, path: &str) -> Option<RedirectAction> {
        evaluate(path, &self.rules, self.sanitizer.as_ref())
    }
}

impl fmt::Debug for RedirectEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedirectEngine")
            .field("rules", &self.rules.len())
            .finish()
    }
}
