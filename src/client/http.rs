//! Live billing API client.
//!
//! Issues authenticated GET requests against the configured billing
//! endpoint and maps the wire documents into the internal model. Every
//! request carries HTTP Basic auth and the fixed source-system query
//! identifying this portal. No retries: a failed call surfaces
//! immediately.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use super::BillingApi;
use crate::config::PortalConfig;
use crate::error::{BillingError, Result};
use crate::model::{InvoiceSummary, LatestSummary, MemberCategory, PolicyList};

/// Fixed query identifying this portal to the billing system.
const SOURCE_SYSTEM_QUERY: &[(&str, &str)] =
    &[("sourceSystemUserId", "test"), ("sourceSystemCode", "PAS")];

/// Billing API client backed by HTTP.
#[derive(Clone)]
pub struct HttpBillingApi {
    client: reqwest::Client,
    endpoint: String,
    username: String,
    password: SecretString,
}

impl HttpBillingApi {
    /// Build a client from the portal configuration.
    ///
    /// The underlying HTTP client applies the configured timeout to every
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &PortalConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent("memberpay")
            .build()
            .map_err(|e| BillingError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// URL of a billing-account resource.
    fn resource_url(&self, account_no: &str, resource: &str) -> String {
        format!(
            "{}/billing-accounts/{}/{}",
            self.endpoint, account_no, resource
        )
    }

    /// Issue one authenticated GET and decode the JSON body.
    async fn fetch<T: DeserializeOwned>(&self, account_no: &str, resource: &str) -> Result<T> {
        let url = self.resource_url(account_no, resource);

        let response = self
            .client
            .get(&url)
            .query(SOURCE_SYSTEM_QUERY)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    target: "billing.api.request_failed",
                    account_no = %account_no,
                    resource = %resource,
                    error = %e,
                    "billing API request failed"
                );
                BillingError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                target: "billing.api.error_status",
                account_no = %account_no,
                resource = %resource,
                status = status.as_u16(),
                "billing API returned error status"
            );
            return Err(BillingError::api(status.as_u16(), account_no));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!(
                target: "billing.api.decode_failed",
                account_no = %account_no,
                resource = %resource,
                error = %e,
                "failed to decode billing API response"
            );
            BillingError::Transport(format!("failed to decode response: {e}"))
        })
    }
}

// Debug implementation that doesn't expose the password
impl std::fmt::Debug for HttpBillingApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBillingApi")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl BillingApi for HttpBillingApi {
    async fn invoice_summary(
        &self,
        account_no: &str,
        category: MemberCategory,
    ) -> Result<InvoiceSummary> {
        tracing::debug!(
            account_no = %account_no,
            category = %category,
            "requesting latest summary"
        );
        let wire: LatestSummary = self.fetch(account_no, "latest-summary").await?;
        Ok(InvoiceSummary::from_latest(wire))
    }

    async fn policy_count(&self, account_no: &str, category: MemberCategory) -> Result<usize> {
        tracing::debug!(
            account_no = %account_no,
            category = %category,
            "requesting policy list"
        );
        let wire: PolicyList = self.fetch(account_no, "policy").await?;
        Ok(wire.policies.len())
    }
}
