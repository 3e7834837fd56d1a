//! Placeholder billing data.
//!
//! Stands in for the external billing service when no live endpoint is
//! available: each category gets one fixed canned summary, and synthetic
//! detail lines can be appended from an injected randomness source so the
//! output is pinnable in tests.

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use rust_decimal::Decimal;

use super::BillingApi;
use crate::error::Result;
use crate::model::{InvoiceSummary, InvoiceSummaryDetail, MemberCategory};
use crate::random::RandomSource;

/// Billing API returning canned data, no network.
#[derive(Debug, Clone)]
pub struct PlaceholderBillingApi<R> {
    random: R,
}

impl<R: RandomSource> PlaceholderBillingApi<R> {
    /// Create a placeholder API drawing from the given randomness source.
    #[must_use]
    pub fn new(random: R) -> Self {
        Self { random }
    }

    /// Append a random count (1–19) of synthetic detail lines.
    ///
    /// Lines alternate between installments and prior-minimum entries:
    /// even-numbered lines carry the fixed reference `8577`, odd-numbered
    /// lines a blank reference. Amounts are drawn from the randomness
    /// source in cents.
    pub fn populate_dummy_invoices(&self, list: &mut Vec<InvoiceSummaryDetail>) {
        let today = today();
        let count = self.random.next_in(1, 20);
        for i in 1..=count {
            let even = i % 2 == 0;
            let (cert_pol_no, description) = if even {
                ("8577", "Prior Minimum Amount Due")
            } else {
                ("", "Installment")
            };
            list.push(InvoiceSummaryDetail {
                transaction_date: days_before(today, i as u64),
                cert_pol_no: cert_pol_no.to_string(),
                description: description.to_string(),
                transaction_amount: self.draw_cents(100_000, 300_000),
                credits_and_payments_applied: if even {
                    -self.draw_cents(100_000, 150_000)
                } else {
                    -self.draw_cents(1_000, 5_000)
                },
                minimum_due: self.draw_cents(100_000, 150_000),
            });
        }
        tracing::debug!(count = list.len(), "populated synthetic invoice lines");
    }

    /// Draw an amount in cents from the randomness source.
    fn draw_cents(&self, min: u32, max: u32) -> Decimal {
        Decimal::new(i64::from(self.random.next_in(min, max)), 2)
    }
}

#[async_trait]
impl<R: RandomSource> BillingApi for PlaceholderBillingApi<R> {
    async fn invoice_summary(
        &self,
        account_no: &str,
        category: MemberCategory,
    ) -> Result<InvoiceSummary> {
        tracing::debug!(
            account_no = %account_no,
            category = %category,
            "returning canned invoice summary"
        );
        Ok(canned_summary(category))
    }

    async fn policy_count(&self, account_no: &str, category: MemberCategory) -> Result<usize> {
        tracing::debug!(
            account_no = %account_no,
            category = %category,
            "returning canned policy count"
        );
        Ok(1)
    }
}

/// The fixed canned summary for a category.
fn canned_summary(category: MemberCategory) -> InvoiceSummary {
    let today = today();
    match category {
        MemberCategory::Chancery => InvoiceSummary {
            prior_balance: cents(120_050),
            charges_and_fees: cents(35_075),
            payments_and_adjustments: cents(-20_000),
            account_balance: cents(135_125),
            minimum_due: cents(10_000),
            due_date: days_after(today, 10),
            invoice_number: Some("INV-1234".to_string()),
            details: Some(vec![InvoiceSummaryDetail {
                transaction_date: days_before(today, 1),
                cert_pol_no: "CH-1001".to_string(),
                description: "Chancery Installment".to_string(),
                transaction_amount: cents(50_000),
                credits_and_payments_applied: cents(-10_000),
                minimum_due: cents(10_000),
            }]),
        },
        MemberCategory::Svc => InvoiceSummary {
            prior_balance: cents(80_000),
            charges_and_fees: cents(15_000),
            payments_and_adjustments: cents(-5_000),
            account_balance: cents(90_000),
            minimum_due: cents(7_500),
            due_date: days_after(today, 15),
            invoice_number: None,
            details: Some(vec![InvoiceSummaryDetail {
                transaction_date: days_before(today, 2),
                cert_pol_no: "SVC-2002".to_string(),
                description: "SVC Service Fee".to_string(),
                transaction_amount: cents(20_000),
                credits_and_payments_applied: cents(-2_500),
                minimum_due: cents(7_500),
            }]),
        },
        MemberCategory::Sir => InvoiceSummary {
            prior_balance: cents(50_000),
            charges_and_fees: cents(10_000),
            payments_and_adjustments: cents(-2_000),
            account_balance: cents(58_000),
            minimum_due: cents(5_000),
            due_date: days_after(today, 20),
            invoice_number: None,
            details: Some(vec![InvoiceSummaryDetail {
                transaction_date: days_before(today, 3),
                cert_pol_no: "SIR-3003".to_string(),
                description: "SIR Risk Fee".to_string(),
                transaction_amount: cents(10_000),
                credits_and_payments_applied: cents(-1_000),
                minimum_due: cents(5_000),
            }]),
        },
    }
}

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn days_after(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}

fn days_before(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(days))
}
