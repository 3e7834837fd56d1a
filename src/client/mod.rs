//! Billing API access.
//!
//! Two cooperating pieces:
//!
//! - [`BillingApi`] is the seam to the external billing service. The live
//!   implementation ([`HttpBillingApi`]) issues authenticated HTTP requests;
//!   the placeholder implementation ([`PlaceholderBillingApi`]) fabricates
//!   deterministic data without touching the network. Which one a portal
//!   uses is a configuration choice, never a call-site branch.
//! - [`BillingPortal`] is the caller-facing facade: it resolves the member
//!   key, derives per-category account keys, fetches summaries and policy
//!   availability, and formats amounts for display.
//!
//! # Example
//!
//! ```rust,no_run
//! use memberpay::{BillingPortal, MemberCategory, PortalConfig};
//!
//! # async fn run() -> memberpay::Result<()> {
//! let config = PortalConfig::from_env();
//! let portal = BillingPortal::from_config(&config, Some("123".to_string()))?;
//!
//! let account_no = portal.formatted_account_key(MemberCategory::Chancery)?;
//! let summary = portal.invoice_summary(&account_no, MemberCategory::Chancery).await?;
//! println!("{}", portal.format_currency(Some(summary.account_balance)));
//! # Ok(())
//! # }
//! ```

mod http;
mod placeholder;

pub use http::HttpBillingApi;
pub use placeholder::PlaceholderBillingApi;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::config::{FetchMode, PortalConfig, SuffixCase};
use crate::currency::CurrencyFormat;
use crate::error::{BillingError, Result};
use crate::member_key::MemberKeyResolver;
use crate::model::{InvoiceSummary, MemberCategory};
use crate::random::DefaultRandomSource;

/// Client trait for the external billing service.
///
/// Implement this to provide invoice and policy data. A scripted mock is
/// available for testing.
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// Fetch the latest invoice summary for a billing account.
    async fn invoice_summary(
        &self,
        account_no: &str,
        category: MemberCategory,
    ) -> Result<InvoiceSummary>;

    /// Count the policies attached to a billing account.
    async fn policy_count(&self, account_no: &str, category: MemberCategory) -> Result<usize>;
}

#[async_trait]
impl BillingApi for Box<dyn BillingApi> {
    async fn invoice_summary(
        &self,
        account_no: &str,
        category: MemberCategory,
    ) -> Result<InvoiceSummary> {
        (**self).invoice_summary(account_no, category).await
    }

    async fn policy_count(&self, account_no: &str, category: MemberCategory) -> Result<usize> {
        (**self).policy_count(account_no, category).await
    }
}

/// Caller-facing billing portal client.
///
/// Holds the per-request member key resolver and the billing API to talk
/// to. All operations are request-scoped; the portal keeps no mutable
/// state and is safe to share across tasks.
pub struct BillingPortal<A> {
    resolver: MemberKeyResolver,
    api: A,
    suffix_case: SuffixCase,
    currency: CurrencyFormat,
}

impl<A: Clone> Clone for BillingPortal<A> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            api: self.api.clone(),
            suffix_case: self.suffix_case,
            currency: self.currency.clone(),
        }
    }
}

impl BillingPortal<Box<dyn BillingApi>> {
    /// Build a portal from configuration, selecting the live or placeholder
    /// API per [`FetchMode`].
    ///
    /// `cookie_value` is the raw `memberKey` cookie value from the current
    /// request, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the live HTTP client cannot be constructed.
    pub fn from_config(config: &PortalConfig, cookie_value: Option<String>) -> Result<Self> {
        let resolver = MemberKeyResolver::new(cookie_value, config);
        let api: Box<dyn BillingApi> = match config.fetch_mode {
            FetchMode::Live => Box::new(HttpBillingApi::new(config)?),
            FetchMode::Placeholder => Box::new(PlaceholderBillingApi::new(DefaultRandomSource)),
        };
        Ok(Self::new(resolver, api).with_suffix_case(config.suffix_case))
    }
}

impl<A: BillingApi> BillingPortal<A> {
    /// Create a portal over an explicit API implementation.
    #[must_use]
    pub fn new(resolver: MemberKeyResolver, api: A) -> Self {
        Self {
            resolver,
            api,
            suffix_case: SuffixCase::default(),
            currency: CurrencyFormat::default(),
        }
    }

    /// Set the suffix casing convention.
    #[must_use]
    pub fn with_suffix_case(mut self, case: SuffixCase) -> Self {
        self.suffix_case = case;
        self
    }

    /// Set the currency display convention.
    #[must_use]
    pub fn with_currency_format(mut self, format: CurrencyFormat) -> Self {
        self.currency = format;
        self
    }

    /// Get a reference to the underlying billing API.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Resolve the member key and append the category's account suffix.
    ///
    /// Key `"123"` under [`MemberCategory::Chancery`] yields `"0123-0000"`.
    ///
    /// # Errors
    ///
    /// Resolver failures propagate unchanged.
    pub fn formatted_account_key(&self, category: MemberCategory) -> Result<String> {
        let key = self.resolver.resolve().inspect_err(|e| {
            tracing::error!(
                category = %category,
                error = %e,
                "member key resolution failed"
            );
        })?;

        let account_no = format!("{}{}", key, category.suffix(self.suffix_case));
        tracing::debug!(
            category = %category,
            account_no = %account_no,
            "formatted account key"
        );
        Ok(account_no)
    }

    /// Fetch the latest invoice summary for an account.
    pub async fn invoice_summary(
        &self,
        account_no: &str,
        category: MemberCategory,
    ) -> Result<InvoiceSummary> {
        tracing::debug!(
            account_no = %account_no,
            category = %category,
            "fetching invoice summary"
        );

        match self.api.invoice_summary(account_no, category).await {
            Ok(summary) => {
                tracing::debug!(
                    account_no = %account_no,
                    category = %category,
                    "fetched invoice summary"
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::error!(
                    account_no = %account_no,
                    category = %category,
                    error = %e,
                    "invoice summary fetch failed"
                );
                Err(e)
            }
        }
    }

    /// Determine which member categories have billing data.
    ///
    /// Chancery is always available. The two secondary categories are
    /// probed concurrently with a policy lookup each; a category is
    /// included iff its lookup succeeds with at least one policy. A lookup
    /// rejected by the API ([`BillingError::Api`]) marks the category
    /// absent; transport failures propagate.
    ///
    /// Result order is fixed: Chancery, Svc, Sir.
    pub async fn available_categories(&self) -> Result<Vec<MemberCategory>> {
        let svc_account = self.formatted_account_key(MemberCategory::Svc)?;
        let sir_account = self.formatted_account_key(MemberCategory::Sir)?;

        let (svc, sir) = tokio::join!(
            self.api.policy_count(&svc_account, MemberCategory::Svc),
            self.api.policy_count(&sir_account, MemberCategory::Sir),
        );

        let mut available = vec![MemberCategory::Chancery];
        if Self::probe_found_policies(svc, MemberCategory::Svc, &svc_account)? {
            available.push(MemberCategory::Svc);
        }
        if Self::probe_found_policies(sir, MemberCategory::Sir, &sir_account)? {
            available.push(MemberCategory::Sir);
        }

        tracing::debug!(
            available = ?available,
            "determined available categories"
        );
        Ok(available)
    }

    /// Interpret one availability probe result.
    fn probe_found_policies(
        result: Result<usize>,
        category: MemberCategory,
        account_no: &str,
    ) -> Result<bool> {
        match result {
            Ok(count) => Ok(count > 0),
            Err(e @ BillingError::Api { .. }) => {
                tracing::warn!(
                    account_no = %account_no,
                    category = %category,
                    error = %e,
                    "policy lookup rejected, treating category as unavailable"
                );
                Ok(false)
            }
            Err(e) => {
                tracing::error!(
                    account_no = %account_no,
                    category = %category,
                    error = %e,
                    "policy lookup failed"
                );
                Err(e)
            }
        }
    }

    /// Render an optional amount with the portal's currency convention.
    ///
    /// `None` renders as the empty string.
    #[must_use]
    pub fn format_currency(&self, amount: Option<Decimal>) -> String {
        self.currency.format(amount)
    }
}

#[cfg(any(test, feature = "test-client"))]
pub mod test {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Scripted billing API for tests.
    ///
    /// Summaries and policy probe outcomes are keyed by category; requests
    /// are recorded for assertions.
    #[derive(Default)]
    pub struct MockBillingApi {
        summaries: RwLock<HashMap<MemberCategory, InvoiceSummary>>,
        policies: RwLock<HashMap<MemberCategory, Result<usize>>>,
        requests: RwLock<Vec<(String, MemberCategory)>>,
    }

    impl MockBillingApi {
        /// Create an empty mock.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Script the summary returned for a category.
        #[must_use]
        pub fn with_summary(self, category: MemberCategory, summary: InvoiceSummary) -> Self {
            self.summaries.write().unwrap().insert(category, summary);
            self
        }

        /// Script a successful policy probe for a category.
        #[must_use]
        pub fn with_policy_count(self, category: MemberCategory, count: usize) -> Self {
            self.policies.write().unwrap().insert(category, Ok(count));
            self
        }

        /// Script a failing policy probe for a category.
        #[must_use]
        pub fn with_policy_error(self, category: MemberCategory, error: BillingError) -> Self {
            self.policies.write().unwrap().insert(category, Err(error));
            self
        }

        /// Account numbers requested so far (for test assertions).
        pub fn requests(&self) -> Vec<(String, MemberCategory)> {
            self.requests.read().unwrap().clone()
        }

        fn record(&self, account_no: &str, category: MemberCategory) {
            self.requests
                .write()
                .unwrap()
                .push((account_no.to_string(), category));
        }
    }

    #[async_trait]
    impl BillingApi for MockBillingApi {
        async fn invoice_summary(
            &self,
            account_no: &str,
            category: MemberCategory,
        ) -> Result<InvoiceSummary> {
            self.record(account_no, category);
            self.summaries
                .read()
                .unwrap()
                .get(&category)
                .cloned()
                .ok_or_else(|| BillingError::api(404, account_no))
        }

        async fn policy_count(
            &self,
            account_no: &str,
            category: MemberCategory,
        ) -> Result<usize> {
            self.record(account_no, category);
            self.policies
                .read()
                .unwrap()
                .get(&category)
                .cloned()
                .unwrap_or(Ok(0))
        }
    }
}
