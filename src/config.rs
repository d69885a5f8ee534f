//! Configuration for the SysML v2 client

use std::time::Duration;

use compact_str::CompactString;

use crate::error::{ClientError, Result};

/// Authorization tokens are forwarded verbatim and must already carry
/// this prefix, in any casing.
const BEARER_PREFIX: &str = "Bearer ";

/// Main configuration for the SysML v2 client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Repository server base URL
    pub base_url: CompactString,
    /// Pre-formatted bearer token, sent verbatim as the Authorization header
    pub bearer_token: CompactString,
    /// Request timeout applied by the transport
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new client configuration with the default timeout
    pub fn new(
        base_url: impl Into<CompactString>,
        bearer_token: impl Into<CompactString>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: bearer_token.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ClientError::config("base_url cannot be empty"));
        }

        if !has_bearer_prefix(&self.bearer_token) {
            return Err(ClientError::config(
                "bearer_token must be provided and start with 'Bearer '",
            ));
        }

        if self.timeout.is_zero() {
            return Err(ClientError::config("timeout must be greater than zero"));
        }

        Ok(())
    }
}

fn has_bearer_prefix(token: &str) -> bool {
    token
        .get(..BEARER_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(BEARER_PREFIX))
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<CompactString>,
    bearer_token: Option<CompactString>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<CompactString>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the bearer token
    pub fn bearer_token(mut self, token: impl Into<CompactString>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ClientConfig> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::config("base_url is required"))?;
        let bearer_token = self
            .bearer_token
            .ok_or_else(|| ClientError::config("bearer_token is required"))?;

        let mut config = ClientConfig::new(base_url, bearer_token);
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Traversal direction for relationship queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RelationDirection {
    /// Relationships targeting the element
    In,
    /// Relationships sourced at the element
    Out,
    /// Both directions
    #[default]
    Both,
}

impl RelationDirection {
    /// Wire value for the `direction` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            RelationDirection::In => "in",
            RelationDirection::Out => "out",
            RelationDirection::Both => "both",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .base_url("http://sysml.example.com")
            .bearer_token("Bearer test-token")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.base_url, "http://sysml.example.com");
        assert_eq!(config.bearer_token, "Bearer test-token");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientConfig::builder().bearer_token("Bearer t").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation() {
        // Valid config
        let config = ClientConfig::new("http://sysml.example.com", "Bearer token");
        assert!(config.validate().is_ok());

        // Empty base URL
        let config = ClientConfig::new("", "Bearer token");
        assert!(config.validate().is_err());

        // Empty token
        let config = ClientConfig::new("http://sysml.example.com", "");
        assert!(config.validate().is_err());

        // Token without the Bearer prefix
        let config = ClientConfig::new("http://sysml.example.com", "token");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bearer_prefix_is_case_insensitive() {
        for token in ["Bearer abc", "bearer abc", "BEARER abc", "bEaReR abc"] {
            let config = ClientConfig::new("http://sysml.example.com", token);
            assert!(config.validate().is_ok(), "rejected {token}");
        }

        // The trailing space is part of the prefix
        let config = ClientConfig::new("http://sysml.example.com", "Bearerabc");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ClientConfig::new("http://sysml.example.com", "Bearer token")
            .with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_relation_direction_wire_values() {
        assert_eq!(RelationDirection::In.as_str(), "in");
        assert_eq!(RelationDirection::Out.as_str(), "out");
        assert_eq!(RelationDirection::Both.as_str(), "both");
        assert_eq!(RelationDirection::default(), RelationDirection::Both);
    }
}
