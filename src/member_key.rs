//! Member key resolution.
//!
//! The member key identifies the billing account holder. It arrives on the
//! request as the `memberKey` cookie; in development the configured override
//! can stand in when the cookie is missing. The raw value is normalized by
//! left-padding with zeros to a minimum width of four characters.
//!
//! The cookie value is extracted by the caller and passed in explicitly;
//! resolution never reaches into ambient request state.

use crate::config::PortalConfig;
use crate::error::{BillingError, Result};

/// Name of the request cookie carrying the raw member key.
pub const MEMBER_KEY_COOKIE: &str = "memberKey";

/// Minimum rendered width of a member key.
const MIN_KEY_WIDTH: usize = 4;

/// A normalized member account key.
///
/// Always non-empty and at least four characters, left-padded with `'0'`.
/// Values already four or more characters long are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberKey(String);

impl MemberKey {
    /// The normalized key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalize a raw key by left-padding with zeros. No truncation.
    fn normalize(raw: &str) -> Self {
        let mut key = String::new();
        for _ in raw.len()..MIN_KEY_WIDTH {
            key.push('0');
        }
        key.push_str(raw);
        Self(key)
    }
}

impl std::fmt::Display for MemberKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolves the member key for one request.
///
/// Resolution order:
/// 1. the request-supplied cookie value, if non-blank;
/// 2. the configured override, only when dev mode is enabled;
/// 3. otherwise [`BillingError::ConfigurationMissing`].
#[derive(Debug, Clone)]
pub struct MemberKeyResolver {
    cookie_value: Option<String>,
    override_value: Option<String>,
    dev_mode: bool,
}

impl MemberKeyResolver {
    /// Build a resolver from the request's cookie value and the portal config.
    #[must_use]
    pub fn new(cookie_value: Option<String>, config: &PortalConfig) -> Self {
        Self {
            cookie_value,
            override_value: config.member_key_override.clone(),
            dev_mode: config.dev_mode,
        }
    }

    /// Resolve and normalize the member key.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::ConfigurationMissing`] when neither the cookie
    /// nor an honored override yields a non-blank value.
    pub fn resolve(&self) -> Result<MemberKey> {
        let mut value = non_blank(self.cookie_value.as_deref());

        if value.is_none() && self.dev_mode {
            value = non_blank(self.override_value.as_deref());
        }

        let raw = value.ok_or(BillingError::ConfigurationMissing)?;
        Ok(MemberKey::normalize(raw))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
