//! Rate provider configuration.

use std::time::Duration;

/// Default daily-rate endpoint of the Croatian National Bank.
pub const DEFAULT_API_URL: &str = "https://api.hnb.hr/tecajn/v3";

/// Configuration for the outbound rate provider.
#[derive(Debug, Clone)]
pub struct FxConfig {
    /// Base URL of the daily-rate endpoint; the currency is added as a query parameter.
    pub api_url: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
    /// User agent sent with each request.
    pub user_agent: String,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(270),
            user_agent: format!("pricewise/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FxConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("HNB_API_URL") {
            config.api_url = url;
        }

        if let Ok(secs) = std::env::var("HNB_CONNECT_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.connect_timeout = Duration::from_secs(secs);
            }
        }

        if let Ok(secs) = std::env::var("HNB_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("Rate API URL cannot be empty".to_string());
        }

        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(format!("Rate API URL must be http(s): {}", self.api_url));
        }

        if self.connect_timeout.is_zero() || self.request_timeout.is_zero() {
            return Err("Timeouts must be greater than zero".to_string());
        }

        if self.connect_timeout > self.request_timeout {
            return Err("Connect timeout cannot exceed request timeout".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FxConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_config() {
        let mut config = FxConfig::default();
        config.api_url = "ftp://api.hnb.hr".to_string();
        assert!(config.validate().is_err());

        let mut config = FxConfig::default();
        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
