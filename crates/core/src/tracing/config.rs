//! Configuration for tracing and instrumentation

use serde::{Deserialize, Serialize};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Main instrumentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentationConfig {
    /// Service name recorded at startup
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log level filter (e.g., "info", "debug", "sentiscope_http=trace")
    pub log_level: String,
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for InstrumentationConfig {
    fn default() -> Self {
        Self {
            service_name: "sentiscope".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl InstrumentationConfig {
    /// Configuration for a named service at the given level
    ///
    /// `SENTISCOPE_LOG_FORMAT=json` switches to JSON output.
    pub fn for_service(service_name: impl Into<String>, log_level: impl Into<String>) -> Self {
        let format = match std::env::var("SENTISCOPE_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            service_name: service_name.into(),
            log_level: log_level.into(),
            format,
            ..Self::default()
        }
    }
}
