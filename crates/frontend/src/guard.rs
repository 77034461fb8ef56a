//! Authentication guard for protected routes

use sentiscope_core::{LOGIN_PATH, REGISTER_PATH, Session};
use std::collections::HashSet;
use tracing::debug;

/// Outcome of a guard evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    RedirectTo(String),
}

/// Lets navigation through when a token is stored or the target is public
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: Session,
    allowlist: HashSet<String>,
}

impl RouteGuard {
    /// Guard with the default public pages
    pub fn new(session: Session) -> Self {
        Self::with_allowlist(session, [LOGIN_PATH, REGISTER_PATH])
    }

    pub fn with_allowlist<I, S>(session: Session, allowlist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            session,
            allowlist: allowlist.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.allowlist.contains(path)
    }

    /// Decide whether navigation from `current` to `target` may proceed
    ///
    /// Only the allowlist and the stored token are consulted; `current` is
    /// accepted for symmetry with the router hook but does not influence the
    /// decision.
    pub fn evaluate(&self, target: &str, current: Option<&str>) -> Decision {
        if self.is_public(target) {
            return Decision::Proceed;
        }

        if self.session.token().is_none() {
            debug!(
                path = target,
                from = current.unwrap_or("-"),
                "No token stored, redirecting to login"
            );
            return Decision::RedirectTo(LOGIN_PATH.to_string());
        }

        Decision::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiscope_core::Credential;

    fn authenticated() -> Session {
        let session = Session::in_memory();
        session
            .store_credential(&Credential {
                token: "abc123".to_string(),
                uuid: "u-42".to_string(),
            })
            .unwrap();
        session
    }

    #[test]
    fn test_allowlist_always_proceeds() {
        for session in [Session::in_memory(), authenticated()] {
            let guard = RouteGuard::new(session);
            assert_eq!(guard.evaluate("/login", None), Decision::Proceed);
            assert_eq!(guard.evaluate("/register", Some("/manager")), Decision::Proceed);
        }
    }

    #[test]
    fn test_protected_paths_require_token() {
        let guard = RouteGuard::new(Session::in_memory());
        for path in ["/manager", "/manager/overview", "/anything"] {
            assert_eq!(
                guard.evaluate(path, Some("/login")),
                Decision::RedirectTo("/login".to_string())
            );
        }

        let guard = RouteGuard::new(authenticated());
        assert_eq!(guard.evaluate("/manager/overview", None), Decision::Proceed);
    }

    #[test]
    fn test_allowlist_is_literal() {
        let guard = RouteGuard::new(Session::in_memory());
        assert_eq!(
            guard.evaluate("/login/", None),
            Decision::RedirectTo("/login".to_string())
        );
    }

    #[test]
    fn test_logout_takes_effect_immediately() {
        let session = authenticated();
        let guard = RouteGuard::new(session.clone());
        assert_eq!(guard.evaluate("/manager", None), Decision::Proceed);
        session.clear().unwrap();
        assert_eq!(
            guard.evaluate("/manager", None),
            Decision::RedirectTo("/login".to_string())
        );
    }

    #[test]
    fn test_custom_allowlist() {
        let guard = RouteGuard::with_allowlist(Session::in_memory(), ["/public"]);
        assert!(guard.is_public("/public"));
        assert!(!guard.is_public("/login"));
    }
}
