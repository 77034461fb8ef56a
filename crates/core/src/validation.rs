//! Configuration validation support

use config::ConfigError;

/// Trait for validating configuration values
pub trait ValidateConfig {
    /// Validate the configuration
    ///
    /// Returns Ok(()) if valid, or an error describing what's wrong
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Common validation helpers
pub mod validators {
    use config::ConfigError;

    /// Validate that a port number is valid (1-65535)
    pub fn validate_port(port: u16, field: &str) -> Result<(), ConfigError> {
        if port == 0 {
            return Err(ConfigError::Message(format!(
                "{field}: port must be between 1 and 65535"
            )));
        }
        Ok(())
    }

    /// Validate that a string is not empty
    pub fn validate_not_empty(value: &str, field: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::Message(format!("{field}: cannot be empty")));
        }
        Ok(())
    }

    /// Validate URL format
    pub fn validate_url(url: &str, field: &str) -> Result<(), ConfigError> {
        url::Url::parse(url)
            .map_err(|e| ConfigError::Message(format!("{field}: invalid URL - {e}")))?;
        Ok(())
    }

    /// Validate that a path starts with a slash
    pub fn validate_path_prefix(path: &str, field: &str) -> Result<(), ConfigError> {
        if !path.starts_with('/') {
            return Err(ConfigError::Message(format!(
                "{field}: must start with '/'"
            )));
        }
        Ok(())
    }

    /// Validate that a value is within range
    pub fn validate_range<T: PartialOrd + std::fmt::Display>(
        value: T,
        min: T,
        max: T,
        field: &str,
    ) -> Result<(), ConfigError> {
        if value < min || value > max {
            return Err(ConfigError::Message(format!(
                "{field}: must be between {min} and {max}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;

    #[test]
    fn test_validate_port() {
        assert!(validate_port(8080, "port").is_ok());
        assert!(validate_port(0, "port").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("http://localhost:9090", "base_url").is_ok());
        assert!(validate_url("localhost", "base_url").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5000, 1, 600_000, "timeout_ms").is_ok());
        assert!(validate_range(0, 1, 600_000, "timeout_ms").is_err());
    }

    #[test]
    fn test_validate_path_prefix() {
        assert!(validate_path_prefix("/api", "prefix").is_ok());
        let err = validate_path_prefix("api", "prefix").unwrap_err();
        assert!(err.to_string().contains("prefix"));
    }
}
