//! Development proxy rules
//!
//! During development the shell is served from a local dev server that
//! forwards API calls to the backend. A rule maps a path prefix to a target
//! origin, optionally stripping the prefix.

use serde::{Deserialize, Serialize};

/// A single prefix forwarding rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRule {
    /// Path prefix that selects this rule (e.g. `/api`)
    pub prefix: String,
    /// Origin requests are forwarded to
    pub target: String,
    /// Remove `prefix` from the forwarded path
    #[serde(default = "default_true")]
    pub strip_prefix: bool,
}

fn default_true() -> bool {
    true
}

impl ProxyRule {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target: target.into(),
            strip_prefix: true,
        }
    }

    /// Whether `path` falls under this rule
    ///
    /// Plain string prefix, so `/api` also matches `/apiary`.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(self.prefix.as_str())
    }

    /// Full upstream URL for `path`, or `None` if the rule does not apply
    pub fn rewrite(&self, path: &str) -> Option<String> {
        if !self.matches(path) {
            return None;
        }

        let forwarded = if self.strip_prefix {
            &path[self.prefix.len()..]
        } else {
            path
        };

        let target = self.target.trim_end_matches('/');
        if forwarded.is_empty() {
            Some(format!("{target}/"))
        } else if forwarded.starts_with('/') {
            Some(format!("{target}{forwarded}"))
        } else {
            Some(format!("{target}/{forwarded}"))
        }
    }
}

/// First matching rule's rewrite
pub fn rewrite_with(rules: &[ProxyRule], path: &str) -> Option<String> {
    rules.iter().find_map(|rule| rule.rewrite(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_rule() -> ProxyRule {
        ProxyRule::new("/api", "http://localhost:9090")
    }

    #[test]
    fn test_strips_prefix() {
        assert_eq!(
            api_rule().rewrite("/api/user/login").as_deref(),
            Some("http://localhost:9090/user/login")
        );
        assert_eq!(
            api_rule().rewrite("/api").as_deref(),
            Some("http://localhost:9090/")
        );
        assert_eq!(
            api_rule().rewrite("/api?x=1").as_deref(),
            Some("http://localhost:9090/?x=1")
        );
    }

    #[test]
    fn test_keeps_prefix_when_asked() {
        let rule = ProxyRule {
            strip_prefix: false,
            ..api_rule()
        };
        assert_eq!(
            rule.rewrite("/api/user").as_deref(),
            Some("http://localhost:9090/api/user")
        );
    }

    #[test]
    fn test_plain_prefix_match() {
        assert_eq!(
            api_rule().rewrite("/apiary").as_deref(),
            Some("http://localhost:9090/ary")
        );
        assert!(api_rule().rewrite("/manager").is_none());
        assert!(api_rule().rewrite("/static/api").is_none());
    }

    #[test]
    fn test_first_rule_wins() {
        let rules = vec![
            ProxyRule::new("/api/v2", "http://v2.internal"),
            api_rule(),
        ];
        assert_eq!(
            rewrite_with(&rules, "/api/v2/x").as_deref(),
            Some("http://v2.internal/x")
        );
        assert_eq!(
            rewrite_with(&rules, "/api/x").as_deref(),
            Some("http://localhost:9090/x")
        );
        assert!(rewrite_with(&rules, "/static/app.js").is_none());
    }
}
