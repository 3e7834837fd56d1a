//! Memberpay - client library for a member billing portal
//!
//! Memberpay resolves a member's account key from request input, derives
//! per-category billing account numbers, fetches invoice summaries and
//! policy availability from an external billing API, and formats amounts
//! for display. It holds no business logic of its own: balances are
//! computed elsewhere and only requested and shown here.
//!
//! # Features
//!
//! - **Member keys**: cookie-sourced resolution with a development
//!   override, normalized to a fixed minimum width
//! - **Account keys**: per-category suffixes with a configurable casing
//!   convention
//! - **Live client**: authenticated HTTP GETs with explicit wire-to-model
//!   field mapping and a configurable timeout
//! - **Placeholder client**: deterministic canned data behind the same
//!   trait, selected by configuration
//! - **Availability**: concurrent policy probes for the secondary
//!   categories
//! - **Display**: locale-convention currency formatting
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use memberpay::{BillingPortal, MemberCategory, PortalConfig};
//!
//! #[tokio::main]
//! async fn main() -> memberpay::Result<()> {
//!     // Initialize logging
//!     memberpay::init_tracing();
//!
//!     let config = PortalConfig::from_env();
//!     let portal = BillingPortal::from_config(&config, Some("123".to_string()))?;
//!
//!     for category in portal.available_categories().await? {
//!         let account_no = portal.formatted_account_key(category)?;
//!         let summary = portal.invoice_summary(&account_no, category).await?;
//!         println!(
//!             "{account_no}: {}",
//!             portal.format_currency(Some(summary.account_balance))
//!         );
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
mod config;
mod currency;
mod error;
mod member_key;
mod model;
mod random;

// Re-exports for public API
pub use client::{BillingApi, BillingPortal, HttpBillingApi, PlaceholderBillingApi};
pub use config::{FetchMode, PortalConfig, SuffixCase};
pub use currency::CurrencyFormat;
pub use error::{BillingError, Result};
pub use member_key::{MEMBER_KEY_COOKIE, MemberKey, MemberKeyResolver};
pub use model::{
    InvoiceSummary, InvoiceSummaryDetail, LatestSummary, MemberCategory, PolicyList,
};
pub use random::{DefaultRandomSource, RandomSource};

// Test exports
#[cfg(any(test, feature = "test-client"))]
pub use client::test::MockBillingApi;
#[cfg(any(test, feature = "test-client"))]
pub use random::FixedRandomSource;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging with sensible defaults
///
/// This should be called early in your application, before building a
/// portal.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "memberpay=debug")
/// - `MEMBERPAY_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = std::env::var("MEMBERPAY_LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
