//! Billing data model.
//!
//! Internal summary types plus the wire shapes returned by the external
//! billing API. The API's field names do not line up with the internal
//! model, so the mapping is spelled out in [`InvoiceSummary::from_latest`]
//! rather than assumed.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::SuffixCase;

// =============================================================================
// Member categories
// =============================================================================

/// Classification of a member's billing sub-account.
///
/// Each category selects a fixed account-key suffix and, in placeholder
/// mode, a fixed canned summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberCategory {
    /// Primary membership account.
    Chancery,
    /// Service sub-account.
    Svc,
    /// Surplus/risk sub-account.
    Sir,
}

impl MemberCategory {
    /// All categories, primary first.
    pub const ALL: [MemberCategory; 3] = [Self::Chancery, Self::Svc, Self::Sir];

    /// The account-key suffix for this category under the given casing.
    ///
    /// The Chancery suffix is numeric and case-invariant.
    #[must_use]
    pub fn suffix(&self, case: SuffixCase) -> &'static str {
        match (self, case) {
            (Self::Chancery, _) => "-0000",
            (Self::Svc, SuffixCase::Lower) => "-svc",
            (Self::Svc, SuffixCase::Upper) => "-SVC",
            (Self::Sir, SuffixCase::Lower) => "-sir",
            (Self::Sir, SuffixCase::Upper) => "-SIR",
        }
    }

    /// Lowercase name, as used in log events.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chancery => "chancery",
            Self::Svc => "svc",
            Self::Sir => "sir",
        }
    }
}

impl std::fmt::Display for MemberCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Invoice summary
// =============================================================================

/// Aggregate balance snapshot for a billing account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    /// Balance carried over from the previous invoice.
    pub prior_balance: Decimal,
    /// Charges and fees added this period.
    pub charges_and_fees: Decimal,
    /// Payments and adjustments applied this period, typically negative.
    pub payments_and_adjustments: Decimal,
    /// Current account balance.
    pub account_balance: Decimal,
    /// Minimum amount due by the due date.
    pub minimum_due: Decimal,
    /// Payment due date, if one is set.
    pub due_date: Option<NaiveDate>,
    /// Human-readable invoice number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    /// Transaction lines backing the summary, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<InvoiceSummaryDetail>>,
}

/// One transaction line within an invoice summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummaryDetail {
    /// Date the transaction was recorded.
    pub transaction_date: Option<NaiveDate>,
    /// Certificate/policy reference, blank when not tied to one.
    pub cert_pol_no: String,
    /// Line description.
    pub description: String,
    /// Transaction amount.
    pub transaction_amount: Decimal,
    /// Credits and payments applied against this line, signed.
    pub credits_and_payments_applied: Decimal,
    /// Minimum due attributable to this line.
    pub minimum_due: Decimal,
}

impl InvoiceSummary {
    /// Map the external API's latest-summary document into the internal
    /// model.
    ///
    /// The wire names differ from the model names and are mapped
    /// field-by-field:
    ///
    /// - `lastInvoiceAmount` → prior balance
    /// - `lastPaymentAmount` → payments and adjustments (negated: the wire
    ///   reports the payment as a positive amount)
    /// - `paymentInFull` → account balance
    /// - `pleasePayAmount` → minimum due
    /// - `lastInvoiceDueDate` → due date
    /// - `sourceSystemRequestNo` → invoice number
    ///
    /// The wire document carries no per-period charges figure or line
    /// items; those map to zero and `None`.
    #[must_use]
    pub fn from_latest(wire: LatestSummary) -> Self {
        Self {
            prior_balance: wire.last_invoice_amount,
            charges_and_fees: Decimal::ZERO,
            payments_and_adjustments: -wire.last_payment_amount,
            account_balance: wire.payment_in_full,
            minimum_due: wire.please_pay_amount,
            due_date: parse_wire_date(wire.last_invoice_due_date.as_deref()),
            invoice_number: wire.source_system_request_no,
            details: None,
        }
    }
}

// =============================================================================
// Wire shapes
// =============================================================================

/// The external API's latest-summary response body, field names verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LatestSummary {
    pub account_no: Option<String>,
    pub source_system_request_no: Option<String>,
    pub last_assigned_payment_amount: Decimal,
    pub last_invoice_amount: Decimal,
    pub last_invoice_date: Option<String>,
    pub last_invoice_due_date: Option<String>,
    pub last_invoice_document_path: Option<String>,
    pub last_invoice_output_file_name: Option<String>,
    pub last_invoice_output_sequence_no: Option<i32>,
    pub last_payment_amount: Decimal,
    pub last_payment_date: Option<String>,
    pub last_payment_id: Option<String>,
    pub please_pay_amount: Decimal,
    pub payment_in_full: Decimal,
}

/// The external API's policy-lookup response body.
///
/// Policy records are opaque here: availability only depends on whether the
/// list is empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyList {
    pub policies: Vec<serde_json::Value>,
}

/// Parse a wire date, accepting `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// A value that parses as neither yields `None`; a bad date should not hide
/// an otherwise usable summary.
fn parse_wire_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| value.get(..10)?.parse().ok())
}
