//! Route table
//!
//! Built once at startup and never mutated. Child paths are relative to
//! their parent (`/manager` + `overview` = `/manager/overview`).

use sentiscope_core::{LOGIN_PATH, REGISTER_PATH};
use serde::Serialize;

/// Pattern matching any path no other route matches
pub const CATCH_ALL: &str = "*";

/// A node of the route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: String,
    pub name: Option<String>,
    /// View mounted for this route
    pub component: Option<String>,
    /// Unconditional redirect target
    pub redirect: Option<String>,
    pub children: Vec<Route>,
}

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            component: None,
            redirect: None,
            children: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    pub fn children(mut self, children: Vec<Route>) -> Self {
        self.children = children;
        self
    }
}

/// Result of matching a path against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// Full path of the deepest matched route
    pub path: String,
    /// Matched routes from the outermost to the innermost
    pub chain: Vec<&'a Route>,
}

impl RouteMatch<'_> {
    /// Views that mount for this match, outermost first
    pub fn components(&self) -> Vec<&str> {
        self.chain
            .iter()
            .filter_map(|route| route.component.as_deref())
            .collect()
    }

    /// Redirect declared by the deepest matched route
    pub fn redirect(&self) -> Option<&str> {
        self.chain.last().and_then(|route| route.redirect.as_deref())
    }
}

/// Immutable route configuration
#[derive(Debug, Clone, Serialize)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The application's routes
    pub fn standard() -> Self {
        let manager_children: Vec<Route> = [
            ("processing", "Manager/ProcessingView"),
            ("network", "Manager/NetworkView"),
            ("emotion", "Manager/SentimentView"),
            ("retrieval", "Manager/RetrievalView"),
            ("visual", "Manager/VisualView"),
            ("project", "Manager/ProjectView"),
            ("overview", "Manager/OverView"),
            ("userinfo", "Manager/UserInfoView"),
            ("comment-query", "Manager/CommentQueryView"),
            ("sentiment-dict", "Manager/SentimentDictView"),
        ]
        .into_iter()
        .map(|(path, component)| Route::new(path).component(component))
        .collect();

        Self::new(vec![
            Route::new(LOGIN_PATH).name("login").component("Login"),
            Route::new(REGISTER_PATH).name("register").component("Register"),
            Route::new("/manager")
                .name("manager")
                .component("Manager")
                .children(manager_children),
            Route::new(CATCH_ALL).redirect(LOGIN_PATH),
        ])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Match a normalized path
    ///
    /// Exact matches win over the catch-all, whatever the declaration order.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        let mut chain = Vec::new();
        if find(&self.routes, "", path, &mut chain) {
            return Some(RouteMatch {
                path: path.to_string(),
                chain,
            });
        }

        self.routes
            .iter()
            .find(|route| route.path == CATCH_ALL)
            .map(|route| RouteMatch {
                path: path.to_string(),
                chain: vec![route],
            })
    }

    /// Every concrete path in the table, depth first
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_paths(&self.routes, "", &mut out);
        out
    }
}

fn join(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        child.to_string()
    } else {
        format!("{}/{child}", parent.trim_end_matches('/'))
    }
}

fn find<'a>(routes: &'a [Route], parent: &str, path: &str, chain: &mut Vec<&'a Route>) -> bool {
    for route in routes.iter().filter(|r| r.path != CATCH_ALL) {
        let full = join(parent, &route.path);
        if full == path {
            chain.push(route);
            return true;
        }
        if path.starts_with(&format!("{full}/")) {
            chain.push(route);
            if find(&route.children, &full, path, chain) {
                return true;
            }
            chain.pop();
        }
    }
    false
}

fn collect_paths(routes: &[Route], parent: &str, out: &mut Vec<String>) {
    for route in routes.iter().filter(|r| r.path != CATCH_ALL) {
        let full = join(parent, &route.path);
        out.push(full.clone());
        collect_paths(&route.children, &full, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_routes() {
        let table = RouteTable::standard();
        let matched = table.resolve("/login").unwrap();
        assert_eq!(matched.components(), vec!["Login"]);
        assert_eq!(matched.redirect(), None);
    }

    #[test]
    fn test_nested_route_chain() {
        let table = RouteTable::standard();
        let matched = table.resolve("/manager/comment-query").unwrap();
        assert_eq!(
            matched.components(),
            vec!["Manager", "Manager/CommentQueryView"]
        );
    }

    #[test]
    fn test_unknown_paths_hit_catch_all() {
        let table = RouteTable::standard();
        for path in ["/", "/nope", "/manager/nope", "/login/extra"] {
            let matched = table.resolve(path).unwrap();
            assert_eq!(matched.redirect(), Some("/login"), "{path}");
        }
    }

    #[test]
    fn test_paths_lists_every_view() {
        let paths = RouteTable::standard().paths();
        assert_eq!(paths.len(), 13);
        assert!(paths.contains(&"/manager/sentiment-dict".to_string()));
        assert!(!paths.iter().any(|p| p == CATCH_ALL));
    }

    #[test]
    fn test_table_without_catch_all() {
        let table = RouteTable::new(vec![Route::new("/a")]);
        assert!(table.resolve("/b").is_none());
    }
}
