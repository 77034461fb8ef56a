//! Sentiscope core types and utilities

pub mod config;
pub mod error;
pub mod navigation;
pub mod proxy;
pub mod session;
pub mod tracing;
pub mod validation;

pub use config::{DevServerConfig, GatewayConfig, SessionConfig, ShellConfig};
pub use error::{CoreError, CoreResult};
pub use navigation::{LOGIN_PATH, Navigation, NavigationError, Navigator, REGISTER_PATH};
pub use proxy::ProxyRule;
pub use session::{Credential, FileStore, KeyValueStore, MemoryStore, Session};
pub use validation::{ValidateConfig, validators};
