//! Sentiscope application shell: routes, guard, router

pub mod app;
pub mod guard;
pub mod router;
pub mod routes;

pub use app::{Shell, ShellError};
pub use guard::{Decision, RouteGuard};
pub use router::Router;
pub use routes::{Route, RouteMatch, RouteTable};
