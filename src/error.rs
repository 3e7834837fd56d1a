/// The error type for billing portal operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BillingError {
    /// No member key could be resolved from the request or overrides.
    #[error("member key is required but was not found in the request cookie or development overrides")]
    ConfigurationMissing,

    /// The billing API answered with a non-success HTTP status.
    #[error("billing API returned HTTP {status} for account {account_no}")]
    Api { status: u16, account_no: String },

    /// The request never produced a usable response: connection failure,
    /// timeout, or an undecodable body.
    #[error("transport error: {0}")]
    Transport(String),
}

impl BillingError {
    /// Shorthand for an [`BillingError::Api`] carrying the failing account.
    #[must_use]
    pub fn api(status: u16, account_no: impl Into<String>) -> Self {
        Self::Api {
            status,
            account_no: account_no.into(),
        }
    }

    /// Check if this is a client error (4xx from the billing API).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx from the billing API).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (500..600).contains(status))
    }
}

impl From<reqwest::Error> for BillingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {err}"))
        } else if err.is_connect() {
            Self::Transport(format!("connection error: {err}"))
        } else if err.is_decode() {
            Self::Transport(format!("response decoding failed: {err}"))
        } else {
            Self::Transport(format!("request error: {err}"))
        }
    }
}

impl From<serde_json::Error> for BillingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(format!("JSON error: {err}"))
    }
}

/// Result type alias for billing portal operations.
pub type Result<T> = std::result::Result<T, BillingError>;
