//! Application shell
//!
//! Wires the pieces together once at startup: one credential store shared
//! by the guard and the gateway, one router, one gateway that redirects
//! through that router.

use crate::guard::RouteGuard;
use crate::router::Router;
use crate::routes::RouteTable;
use sentiscope_core::{
    CoreError, FileStore, KeyValueStore, MemoryStore, Navigation, NavigationError, Session,
    ShellConfig,
};
use sentiscope_http::{Gateway, GatewayError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Shell startup and runtime errors
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// The running application
#[derive(Debug, Clone)]
pub struct Shell {
    config: ShellConfig,
    session: Session,
    router: Arc<Router>,
    gateway: Gateway,
}

impl Shell {
    /// Build the shell described by `config`
    pub fn from_config(config: ShellConfig) -> Result<Self, ShellError> {
        let store: Arc<dyn KeyValueStore> = match &config.session.store_path {
            Some(path) => Arc::new(FileStore::open(path)?),
            None => Arc::new(MemoryStore::new()),
        };
        Self::with_session(config, Session::new(store))
    }

    /// Build the shell around an existing session
    pub fn with_session(config: ShellConfig, session: Session) -> Result<Self, ShellError> {
        let router = Arc::new(Router::new(
            RouteTable::standard(),
            RouteGuard::new(session.clone()),
        ));

        let gateway = Gateway::from_config(&config.gateway)
            .session(session.clone())
            .navigator(router.clone())
            .build()?;

        info!(
            base_url = %gateway.base_url(),
            timeout_ms = config.gateway.timeout_ms,
            authenticated = session.is_authenticated(),
            "Shell ready"
        );

        Ok(Self {
            config,
            session,
            router,
            gateway,
        })
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Navigate, treating a navigation to the current location as a no-op
    pub fn navigate(&self, path: &str) -> Result<Option<Navigation>, ShellError> {
        match self.router.push(path) {
            Ok(nav) => Ok(Some(nav)),
            Err(NavigationError::Duplicated(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
