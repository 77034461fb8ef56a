//! Navigation
//!
//! Every navigation resolves the target against the route table, applies
//! structural redirects (the catch-all), then runs the guard. Guard
//! redirects restart the process at the new target.

use crate::guard::{Decision, RouteGuard};
use crate::routes::RouteTable;
use sentiscope_core::{LOGIN_PATH, Navigation, NavigationError, Navigator};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Longest redirect chain accepted before giving up
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Default)]
struct RouterState {
    current: Option<String>,
    history: Vec<String>,
}

/// Application router
#[derive(Debug)]
pub struct Router {
    routes: RouteTable,
    guard: RouteGuard,
    state: Mutex<RouterState>,
}

impl Router {
    pub fn new(routes: RouteTable, guard: RouteGuard) -> Self {
        Self {
            routes,
            guard,
            state: Mutex::new(RouterState::default()),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Current location, `None` before the first navigation
    pub fn current(&self) -> Option<String> {
        self.lock().current.clone()
    }

    /// Committed locations, oldest first
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Navigate to `target`
    pub fn push(&self, target: &str) -> Result<Navigation, NavigationError> {
        let requested = normalize_path(target)?;
        let mut state = self.lock();

        if state.current.as_deref() == Some(requested.as_str()) {
            return Err(NavigationError::Duplicated(requested));
        }

        let mut path = requested.clone();
        let mut redirects = Vec::new();
        loop {
            let decision = match self.routes.resolve(&path) {
                Some(matched) => match matched.redirect() {
                    Some(target) => Decision::RedirectTo(target.to_string()),
                    None => self.guard.evaluate(&path, state.current.as_deref()),
                },
                None => Decision::RedirectTo(LOGIN_PATH.to_string()),
            };

            match decision {
                Decision::Proceed => break,
                Decision::RedirectTo(next) => {
                    if redirects.len() >= MAX_REDIRECTS {
                        return Err(NavigationError::RedirectLoop {
                            path: requested,
                            hops: redirects.len(),
                        });
                    }
                    debug!(from = %path, to = %next, "Redirecting");
                    path = normalize_path(&next)?;
                    redirects.push(path.clone());
                }
            }
        }

        if state.current.as_deref() != Some(path.as_str()) {
            info!(requested = %requested, resolved = %path, "Navigated");
            state.history.push(path.clone());
            state.current = Some(path.clone());
        }

        Ok(Navigation {
            requested,
            resolved: path,
            redirects,
        })
    }

    fn lock(&self) -> MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for Router {
    fn navigate(&self, path: &str) -> Result<Navigation, NavigationError> {
        self.push(path)
    }
}

/// Canonical form used for matching: leading slash, no trailing slash,
/// no query string or fragment
pub fn normalize_path(path: &str) -> Result<String, NavigationError> {
    let path = path.trim();
    let path = path.split(['?', '#']).next().unwrap_or_default();
    if path.is_empty() {
        return Err(NavigationError::InvalidPath("empty path".to_string()));
    }
    if path.contains(char::is_whitespace) {
        return Err(NavigationError::InvalidPath(path.to_string()));
    }

    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    Ok(normalized)
}
