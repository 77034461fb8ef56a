//! Navigation seam shared by the router and the HTTP gateway
//!
//! The gateway needs to force a redirect to the login page when the backend
//! reports an expired session, but it must not depend on the router crate.
//! It holds an `Arc<dyn Navigator>` instead.

use thiserror::Error;

/// Path of the login page
pub const LOGIN_PATH: &str = "/login";

/// Path of the registration page
pub const REGISTER_PATH: &str = "/register";

/// A completed navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Path that was requested
    pub requested: String,
    /// Path that was finally committed after redirects
    pub resolved: String,
    /// Redirect hops taken, in order
    pub redirects: Vec<String>,
}

impl Navigation {
    /// Whether the navigation ended somewhere other than where it was asked to go
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Navigation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Target is the current location
    #[error("Avoided redundant navigation to current location: {0}")]
    Duplicated(String),

    /// Redirects did not settle
    #[error("Redirect loop detected while navigating to {path} ({hops} hops)")]
    RedirectLoop { path: String, hops: usize },

    /// Target is not a usable path
    #[error("Invalid navigation target: {0}")]
    InvalidPath(String),
}

/// Something that can move the application to a new location
pub trait Navigator: Send + Sync {
    /// Navigate to `path`, running any guards on the way
    fn navigate(&self, path: &str) -> Result<Navigation, NavigationError>;
}
