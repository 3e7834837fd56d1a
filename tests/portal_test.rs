use memberpay::{
    BillingError, BillingPortal, FixedRandomSource, InvoiceSummary, MemberCategory,
    MemberKeyResolver, MockBillingApi, PlaceholderBillingApi, PortalConfig, SuffixCase,
};
use rust_decimal::Decimal;

fn config() -> PortalConfig {
    PortalConfig::new("https://billing.example.com", "user", "pass")
}

fn portal(api: MockBillingApi, cookie: Option<&str>) -> BillingPortal<MockBillingApi> {
    let config = config();
    let resolver = MemberKeyResolver::new(cookie.map(String::from), &config);
    BillingPortal::new(resolver, api)
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn summary(prior_balance: &str) -> InvoiceSummary {
    InvoiceSummary {
        prior_balance: dec(prior_balance),
        charges_and_fees: Decimal::ZERO,
        payments_and_adjustments: Decimal::ZERO,
        account_balance: dec(prior_balance),
        minimum_due: Decimal::ZERO,
        due_date: None,
        invoice_number: None,
        details: None,
    }
}

#[tokio::test]
async fn test_formatted_account_keys() {
    let p = portal(MockBillingApi::new(), Some("123"));
    assert_eq!(
        p.formatted_account_key(MemberCategory::Chancery).unwrap(),
        "0123-0000"
    );
    assert_eq!(
        p.formatted_account_key(MemberCategory::Svc).unwrap(),
        "0123-svc"
    );
    assert_eq!(
        p.formatted_account_key(MemberCategory::Sir).unwrap(),
        "0123-sir"
    );
}

#[tokio::test]
async fn test_formatted_account_keys_upper_convention() {
    let p = portal(MockBillingApi::new(), Some("123")).with_suffix_case(SuffixCase::Upper);
    assert_eq!(
        p.formatted_account_key(MemberCategory::Chancery).unwrap(),
        "0123-0000"
    );
    assert_eq!(
        p.formatted_account_key(MemberCategory::Svc).unwrap(),
        "0123-SVC"
    );
    assert_eq!(
        p.formatted_account_key(MemberCategory::Sir).unwrap(),
        "0123-SIR"
    );
}

#[tokio::test]
async fn test_long_member_key_is_not_truncated() {
    let p = portal(MockBillingApi::new(), Some("987654"));
    assert_eq!(
        p.formatted_account_key(MemberCategory::Chancery).unwrap(),
        "987654-0000"
    );
}

#[tokio::test]
async fn test_missing_member_key_propagates() {
    let p = portal(MockBillingApi::new(), None);
    let err = p.formatted_account_key(MemberCategory::Svc).unwrap_err();
    assert_eq!(err, BillingError::ConfigurationMissing);
}

#[tokio::test]
async fn test_invoice_summary_returns_scripted_data() {
    let api = MockBillingApi::new().with_summary(MemberCategory::Chancery, summary("1200.50"));
    let p = portal(api, Some("123"));

    let result = p
        .invoice_summary("0123-0000", MemberCategory::Chancery)
        .await
        .unwrap();
    assert_eq!(result.prior_balance, dec("1200.50"));
}

#[tokio::test]
async fn test_invoice_summary_propagates_api_error() {
    let p = portal(MockBillingApi::new(), Some("123"));

    let err = p
        .invoice_summary("0123-0000", MemberCategory::Chancery)
        .await
        .unwrap_err();
    assert_eq!(err, BillingError::api(404, "0123-0000"));
}

#[tokio::test]
async fn test_available_categories_always_contains_chancery() {
    let p = portal(MockBillingApi::new(), Some("123"));
    let available = p.available_categories().await.unwrap();
    assert_eq!(available, vec![MemberCategory::Chancery]);
}

#[tokio::test]
async fn test_available_categories_includes_nonempty_probes() {
    let api = MockBillingApi::new()
        .with_policy_count(MemberCategory::Svc, 2)
        .with_policy_count(MemberCategory::Sir, 0);
    let p = portal(api, Some("123"));

    let available = p.available_categories().await.unwrap();
    assert_eq!(available, vec![MemberCategory::Chancery, MemberCategory::Svc]);
}

#[tokio::test]
async fn test_available_categories_downgrades_api_errors() {
    let api = MockBillingApi::new()
        .with_policy_error(MemberCategory::Svc, BillingError::api(503, "0123-svc"))
        .with_policy_count(MemberCategory::Sir, 1);
    let p = portal(api, Some("123"));

    let available = p.available_categories().await.unwrap();
    assert_eq!(available, vec![MemberCategory::Chancery, MemberCategory::Sir]);
}

#[tokio::test]
async fn test_available_categories_propagates_transport_errors() {
    let api = MockBillingApi::new()
        .with_policy_error(
            MemberCategory::Svc,
            BillingError::Transport("connection refused".to_string()),
        )
        .with_policy_count(MemberCategory::Sir, 1);
    let p = portal(api, Some("123"));

    let err = p.available_categories().await.unwrap_err();
    assert!(matches!(err, BillingError::Transport(_)));
}

#[tokio::test]
async fn test_available_categories_probes_per_category_accounts() {
    let api = MockBillingApi::new()
        .with_policy_count(MemberCategory::Svc, 1)
        .with_policy_count(MemberCategory::Sir, 1);
    let p = portal(api, Some("9"));

    p.available_categories().await.unwrap();

    // Probes go out against the category-suffixed account numbers.
    let requests = p.api().requests();
    assert!(requests.contains(&("0009-svc".to_string(), MemberCategory::Svc)));
    assert!(requests.contains(&("0009-sir".to_string(), MemberCategory::Sir)));
}

#[tokio::test]
async fn test_format_currency() {
    let p = portal(MockBillingApi::new(), Some("123"));
    assert_eq!(p.format_currency(Some(dec("123.45"))), "$123.45");
    assert_eq!(p.format_currency(Some(dec("1234.5"))), "$1,234.50");
    assert_eq!(p.format_currency(None), "");
}

#[tokio::test]
async fn test_placeholder_portal_end_to_end() {
    let config = config();
    let resolver = MemberKeyResolver::new(Some("123".to_string()), &config);
    let p = BillingPortal::new(resolver, PlaceholderBillingApi::new(FixedRandomSource(5)));

    // Every category is available in placeholder mode.
    let available = p.available_categories().await.unwrap();
    assert_eq!(available, MemberCategory::ALL.to_vec());

    // Canned Chancery summary comes back with its fixed amounts.
    let account_no = p.formatted_account_key(MemberCategory::Chancery).unwrap();
    let summary = p
        .invoice_summary(&account_no, MemberCategory::Chancery)
        .await
        .unwrap();
    assert_eq!(summary.prior_balance, dec("1200.50"));
    assert_eq!(summary.account_balance, dec("1351.25"));
    assert_eq!(p.format_currency(Some(summary.minimum_due)), "$100.00");
    assert!(!summary.details.unwrap().is_empty());
}

#[tokio::test]
async fn test_placeholder_dummy_invoices_pinned() {
    let api = PlaceholderBillingApi::new(FixedRandomSource(5));
    let mut lines = Vec::new();
    api.populate_dummy_invoices(&mut lines);

    assert_eq!(lines.len(), 5);
    for (index, line) in lines.iter().enumerate() {
        let even = (index + 1) % 2 == 0;
        if even {
            assert_eq!(line.cert_pol_no, "8577");
            assert_eq!(line.description, "Prior Minimum Amount Due");
        } else {
            assert_eq!(line.cert_pol_no, "");
            assert_eq!(line.description, "Installment");
        }
        assert!(line.credits_and_payments_applied < Decimal::ZERO);
    }
}
