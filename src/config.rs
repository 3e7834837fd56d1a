//! Portal configuration.
//!
//! All externally supplied settings live here: the billing API endpoint and
//! credentials, the request timeout, the development-only member key
//! override, and the conventions (suffix casing, fetch mode) that vary
//! between deployments.

use secrecy::SecretString;
use std::time::Duration;

/// Default billing API request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Casing convention for the secondary-category account suffixes.
///
/// Deployments disagree on whether the suffix is `-svc`/`-sir` or
/// `-SVC`/`-SIR`, so the convention is configurable rather than fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuffixCase {
    /// `-svc` / `-sir`
    #[default]
    Lower,
    /// `-SVC` / `-SIR`
    Upper,
}

/// Which billing API variant the portal talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Authenticated HTTP calls against the configured endpoint.
    #[default]
    Live,
    /// Canned summaries and synthetic detail lines, no network.
    Placeholder,
}

/// Configuration for the billing portal client.
///
/// # Example
///
/// ```rust
/// use memberpay::{FetchMode, PortalConfig, SuffixCase};
/// use std::time::Duration;
///
/// let config = PortalConfig::new("https://billing.example.com/api", "svc-user", "s3cret")
///     .with_timeout(Duration::from_secs(10))
///     .with_suffix_case(SuffixCase::Upper)
///     .with_fetch_mode(FetchMode::Live);
/// ```
#[derive(Clone)]
pub struct PortalConfig {
    /// Base URL of the external billing API.
    pub endpoint: String,
    /// HTTP Basic auth username for the billing API.
    pub username: String,
    /// HTTP Basic auth password for the billing API.
    pub password: SecretString,
    /// Timeout applied to every outbound request.
    pub timeout: Duration,
    /// Whether development conveniences (the member key override) are honored.
    pub dev_mode: bool,
    /// Member key used when no cookie value is present, dev mode only.
    pub member_key_override: Option<String>,
    /// Casing convention for secondary account suffixes.
    pub suffix_case: SuffixCase,
    /// Live or placeholder data.
    pub fetch_mode: FetchMode,
}

impl PortalConfig {
    /// Create a config for the given endpoint and credentials, with defaults
    /// for everything else.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password: SecretString::new(password.into()),
            timeout: DEFAULT_TIMEOUT,
            dev_mode: false,
            member_key_override: None,
            suffix_case: SuffixCase::default(),
            fetch_mode: FetchMode::default(),
        }
    }

    /// Set the outbound request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable development mode.
    #[must_use]
    pub fn with_dev_mode(mut self, enabled: bool) -> Self {
        self.dev_mode = enabled;
        self
    }

    /// Set the development-only member key override.
    #[must_use]
    pub fn with_member_key_override(mut self, value: impl Into<String>) -> Self {
        self.member_key_override = Some(value.into());
        self
    }

    /// Set the suffix casing convention.
    #[must_use]
    pub fn with_suffix_case(mut self, case: SuffixCase) -> Self {
        self.suffix_case = case;
        self
    }

    /// Choose between live and placeholder data.
    #[must_use]
    pub fn with_fetch_mode(mut self, mode: FetchMode) -> Self {
        self.fetch_mode = mode;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Each setting is read from `MEMBERPAY_{NAME}` first, falling back to
    /// the unprefixed `{NAME}`:
    ///
    /// - `BILLING_ENDPOINT`: billing API base URL
    /// - `BILLING_USERNAME`: Basic auth username
    /// - `BILLING_PASSWORD`: Basic auth password
    /// - `TIMEOUT_SECONDS`: request timeout (default: 30)
    /// - `DEV_MODE`: honor the member key override (default: false)
    /// - `MEMBER_KEY_OVERRIDE`: development member key
    /// - `SUFFIX_CASE`: "lower" or "upper" (default: lower)
    /// - `FETCH_MODE`: "live" or "placeholder" (default: live)
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::new(
            env_with_prefix("BILLING_ENDPOINT").unwrap_or_default(),
            env_with_prefix("BILLING_USERNAME").unwrap_or_default(),
            env_with_prefix("BILLING_PASSWORD").unwrap_or_default(),
        );

        if let Some(seconds) = env_with_prefix("TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            config.timeout = Duration::from_secs(seconds);
        }

        config.dev_mode = env_with_prefix("DEV_MODE")
            .map(|v| v.parse().unwrap_or(false))
            .unwrap_or(false);

        config.member_key_override =
            env_with_prefix("MEMBER_KEY_OVERRIDE").filter(|v| !v.trim().is_empty());

        if let Some(case) = env_with_prefix("SUFFIX_CASE") {
            config.suffix_case = match case.to_ascii_lowercase().as_str() {
                "upper" => SuffixCase::Upper,
                _ => SuffixCase::Lower,
            };
        }

        if let Some(mode) = env_with_prefix("FETCH_MODE") {
            config.fetch_mode = match mode.to_ascii_lowercase().as_str() {
                "placeholder" => FetchMode::Placeholder,
                _ => FetchMode::Live,
            };
        }

        config
    }
}

// Debug implementation that doesn't expose the password
impl std::fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("timeout", &self.timeout)
            .field("dev_mode", &self.dev_mode)
            .field("member_key_override", &self.member_key_override)
            .field("suffix_case", &self.suffix_case)
            .field("fetch_mode", &self.fetch_mode)
            .finish_non_exhaustive()
    }
}

/// Get environment variable with `MEMBERPAY_` prefix, falling back to the
/// unprefixed version.
fn env_with_prefix(key: &str) -> Option<String> {
    std::env::var(format!("MEMBERPAY_{}", key))
        .or_else(|_| std::env::var(key))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PortalConfig::new("https://billing.example.com", "user", "pass")
            .with_timeout(Duration::from_secs(5))
            .with_dev_mode(true)
            .with_member_key_override("123")
            .with_suffix_case(SuffixCase::Upper)
            .with_fetch_mode(FetchMode::Placeholder);

        assert_eq!(config.endpoint, "https://billing.example.com");
        assert_eq!(config.username, "user");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.dev_mode);
        assert_eq!(config.member_key_override.as_deref(), Some("123"));
        assert_eq!(config.suffix_case, SuffixCase::Upper);
        assert_eq!(config.fetch_mode, FetchMode::Placeholder);
    }

    #[test]
    fn test_defaults() {
        let config = PortalConfig::new("x", "y", "z");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(!config.dev_mode);
        assert!(config.member_key_override.is_none());
        assert_eq!(config.suffix_case, SuffixCase::Lower);
        assert_eq!(config.fetch_mode, FetchMode::Live);
    }

    #[test]
    fn test_debug_does_not_expose_password() {
        let config = PortalConfig::new("x", "user", "super-secret-password");
        let debug_output = format!("{:?}", config);

        assert!(!debug_output.contains("super-secret-password"));
        assert!(debug_output.contains("user"));
    }

    #[test]
    fn test_env_with_prefix() {
        unsafe {
            std::env::set_var("MEMBERPAY_CONFIG_TEST_VAR", "prefixed");
        }
        assert_eq!(
            env_with_prefix("CONFIG_TEST_VAR"),
            Some("prefixed".to_string())
        );
        unsafe {
            std::env::remove_var("MEMBERPAY_CONFIG_TEST_VAR");
        }

        unsafe {
            std::env::set_var("CONFIG_TEST_FALLBACK", "unprefixed");
        }
        assert_eq!(
            env_with_prefix("CONFIG_TEST_FALLBACK"),
            Some("unprefixed".to_string())
        );
        unsafe {
            std::env::remove_var("CONFIG_TEST_FALLBACK");
        }

        assert_eq!(env_with_prefix("CONFIG_TEST_MISSING"), None);
    }
}
