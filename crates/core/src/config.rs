//! Shell configuration
//!
//! Layered as: built-in defaults, then an optional TOML file, then
//! `SENTISCOPE__*` environment variables.

use crate::proxy::ProxyRule;
use crate::validation::{ValidateConfig, validators};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Log level filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Backend gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Credential storage settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Development server settings
    #[serde(default)]
    pub dev_server: DevServerConfig,
}

/// HTTP gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Backend origin every request path is joined to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Credential storage configuration
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// JSON file holding the credential; in-memory when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevServerConfig {
    /// Port the dev server listens on
    #[serde(default = "default_dev_port")]
    pub port: u16,
    /// Forwarding rules, first match wins
    #[serde(default = "default_proxy_rules")]
    pub proxy: Vec<ProxyRule>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:9090".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_user_agent() -> String {
    format!("sentiscope/{}", env!("CARGO_PKG_VERSION"))
}

fn default_dev_port() -> u16 {
    8080
}

fn default_proxy_rules() -> Vec<ProxyRule> {
    vec![ProxyRule::new("/api", default_base_url())]
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            port: default_dev_port(),
            proxy: default_proxy_rules(),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            gateway: GatewayConfig::default(),
            session: SessionConfig::default(),
            dev_server: DevServerConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Environment variable prefix
    pub const ENV_PREFIX: &'static str = "SENTISCOPE";

    /// Load configuration from environment and files in common locations
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        let config_paths = ["sentiscope.toml", "config/sentiscope.toml"];
        for path in &config_paths {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(Self::ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific config file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config: Self = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path))
            .add_source(
                Environment::with_prefix(Self::ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl ValidateConfig for ShellConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        validators::validate_not_empty(&self.log_level, "log_level")?;
        validators::validate_url(&self.gateway.base_url, "gateway.base_url")?;
        validators::validate_range(self.gateway.timeout_ms, 1, 600_000, "gateway.timeout_ms")?;
        validators::validate_port(self.dev_server.port, "dev_server.port")?;
        for (i, rule) in self.dev_server.proxy.iter().enumerate() {
            validators::validate_path_prefix(&rule.prefix, &format!("dev_server.proxy[{i}].prefix"))?;
            validators::validate_url(&rule.target, &format!("dev_server.proxy[{i}].target"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.gateway.base_url, "http://localhost:9090");
        assert_eq!(config.gateway.timeout(), Duration::from_millis(5000));
        assert_eq!(config.dev_server.port, 8080);
        assert_eq!(config.dev_server.proxy[0].prefix, "/api");
        assert!(config.dev_server.proxy[0].strip_prefix);
        assert!(config.session.store_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[gateway]
base_url = "http://backend.internal:9090"
timeout_ms = 2500

[session]
store_path = "/tmp/sentiscope/session.json"
"#
        )
        .unwrap();

        let config = ShellConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.gateway.base_url, "http://backend.internal:9090");
        assert_eq!(config.gateway.timeout_ms, 2500);
        assert_eq!(
            config.session.store_path.as_deref(),
            Some(Path::new("/tmp/sentiscope/session.json"))
        );
        // untouched sections keep their defaults
        assert_eq!(config.dev_server.port, 8080);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ShellConfig::default();
        config.gateway.timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = ShellConfig::default();
        config.gateway.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = ShellConfig::default();
        config.dev_server.proxy[0].prefix = "api".to_string();
        assert!(config.validate().is_err());
    }
}
