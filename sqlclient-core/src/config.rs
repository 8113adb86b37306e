//! Per-run configuration
//!
//! A [`Config`] is assembled once, before any connection exists, and is only
//! ever read afterwards.

use std::fmt;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Default connection timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Delay between connection attempts when retrying is enabled
pub const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Username and password handed to the driver on connect
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// Keep the password out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Immutable settings for one run of the console
#[derive(Debug, Clone)]
pub struct Config {
    /// Suppress output intended for humans (labels, prompt, summaries)
    pub quiet: bool,

    /// Print `"> "` before each read
    pub prompt_enabled: bool,

    /// Survive connection and statement failures instead of exiting
    pub retry_enabled: bool,

    /// Connection timeout
    pub timeout: Duration,

    /// Optional login for the connection
    pub credentials: Option<Credentials>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiet: false,
            prompt_enabled: true,
            retry_enabled: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            credentials: None,
        }
    }
}

impl Config {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn prompt(mut self, enabled: bool) -> Self {
        self.prompt_enabled = enabled;
        self
    }

    pub fn retry(mut self, enabled: bool) -> Self {
        self.retry_enabled = enabled;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Policy for establishing the connection: delayed retry
    pub fn connect_policy(&self) -> RetryPolicy {
        self.policy(CONNECT_RETRY_DELAY)
    }

    /// Policy for the statement loop: immediate retry
    pub fn run_policy(&self) -> RetryPolicy {
        self.policy(Duration::ZERO)
    }

    fn policy(&self, delay: Duration) -> RetryPolicy {
        if self.retry_enabled {
            RetryPolicy::forever(delay)
        } else {
            RetryPolicy::disabled()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.quiet);
        assert!(config.prompt_enabled);
        assert!(!config.retry_enabled);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_config_builder_methods() {
        let config = Config::new()
            .quiet(true)
            .prompt(false)
            .retry(true)
            .timeout_secs(3)
            .credentials(Some(Credentials::new("scott", "tiger")));

        assert!(config.quiet);
        assert!(!config.prompt_enabled);
        assert!(config.retry_enabled);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.credentials.unwrap().username(), "scott");
    }

    #[test]
    fn test_policies_follow_retry_flag() {
        let config = Config::new().retry(true);
        assert!(config.connect_policy().enabled);
        assert_eq!(config.connect_policy().delay, Duration::from_secs(10));
        assert!(config.run_policy().enabled);
        assert_eq!(config.run_policy().delay, Duration::ZERO);

        let config = Config::new();
        assert!(!config.connect_policy().enabled);
        assert!(!config.run_policy().enabled);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("scott", "tiger");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("scott"));
        assert!(!debug.contains("tiger"));
    }
}
