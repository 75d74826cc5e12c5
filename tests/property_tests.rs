/// Property-based tests using proptest
/// Tests invariants of statement selection and flag rules that should hold for all inputs
use credit_flags_api::models::{FinancialDataset, Flag};
use credit_flags_api::rules::{
    analyze_document, borrowing_to_revenue_flag, evaluate, interest_service_coverage_ratio,
    iscr_flag, select_latest_index, total_revenue_5cr_flag, RULES,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn dataset_from(financials: Vec<Value>) -> FinancialDataset {
    FinancialDataset::from_document(json!({"data": {"financials": financials}})).unwrap()
}

/// Arbitrary JSON scalar, including non-numeric junk for numeric fields
fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1e9f64..1e9f64).prop_map(|n| json!(n)),
        (0u64..100_000_000u64).prop_map(|n| json!(n)),
        "[a-z0-9]{0,8}".prop_map(Value::String),
        Just(Value::Null),
        proptest::bool::ANY.prop_map(Value::Bool),
    ]
}

fn nature() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!("STANDALONE")),
        Just(json!("CONSOLIDATED")),
        Just(Value::Null),
        Just(json!(1)),
    ]
}

fn statement() -> impl Strategy<Value = Value> {
    (nature(), scalar(), scalar(), scalar(), scalar(), scalar(), scalar()).prop_map(
        |(nature, revenue, pbit, depreciation, interest, long_term, short_term)| {
            json!({
                "nature": nature,
                "pnl": {"lineItems": {
                    "net_revenue": revenue,
                    "profit_before_interest_and_tax": pbit,
                    "depreciation": depreciation,
                    "interest": interest
                }},
                "bs": {"liabilities": {
                    "long_term_borrowings": long_term,
                    "short_term_borrowings": short_term
                }}
            })
        },
    )
}

// Property: Selection returns the first standalone statement or 0
proptest! {
    #[test]
    fn selection_is_first_standalone(natures in prop::collection::vec(nature(), 0..8)) {
        let expected = natures.iter().position(|n| n == "STANDALONE").unwrap_or(0);
        let financials = natures.into_iter().map(|n| json!({"nature": n})).collect();
        prop_assert_eq!(select_latest_index(&dataset_from(financials)), expected);
    }
}

// Property: Evaluation never fails and only produces RED, GREEN or AMBER
proptest! {
    #[test]
    fn evaluate_produces_known_flags(financials in prop::collection::vec(statement(), 0..5)) {
        let dataset = dataset_from(financials);
        let report = evaluate(&dataset);

        prop_assert_eq!(report.flags.len(), RULES.len());
        for flag in report.flags.values() {
            prop_assert!(matches!(flag, Flag::Red | Flag::Green | Flag::Amber));
        }
    }

    #[test]
    fn evaluate_is_deterministic(financials in prop::collection::vec(statement(), 0..5)) {
        let dataset = dataset_from(financials);
        prop_assert_eq!(evaluate(&dataset), evaluate(&dataset));
    }

    #[test]
    fn rules_never_cross_their_ranges(financials in prop::collection::vec(statement(), 1..5)) {
        let dataset = dataset_from(financials);
        let index = select_latest_index(&dataset);

        prop_assert_ne!(total_revenue_5cr_flag(&dataset, index), Flag::Amber);
        prop_assert_ne!(borrowing_to_revenue_flag(&dataset, index), Flag::Red);
        prop_assert_ne!(iscr_flag(&dataset, index), Flag::Amber);
    }
}

// Property: Out-of-range indices behave like an empty statement
proptest! {
    #[test]
    fn out_of_range_index_is_all_zero(
        financials in prop::collection::vec(statement(), 0..4),
        offset in 0usize..10
    ) {
        let dataset = dataset_from(financials);
        let index = dataset.financials.len() + offset;

        prop_assert_eq!(interest_service_coverage_ratio(&dataset, index), 0.0);
        prop_assert_eq!(total_revenue_5cr_flag(&dataset, index), Flag::Red);
        prop_assert_eq!(borrowing_to_revenue_flag(&dataset, index), Flag::Amber);
        prop_assert_eq!(iscr_flag(&dataset, index), Flag::Red);
    }
}

// Property: Arbitrary bytes never panic the document boundary
proptest! {
    #[test]
    fn analyze_document_never_panics(content in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = analyze_document(&content);
    }
}
