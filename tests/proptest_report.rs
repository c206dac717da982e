//! Property-based tests for normalization, classification and scoring.
//!
//! Ensures the report pipeline is total over arbitrary JSON and that the
//! score arithmetic keeps its invariants.

use mobscan::model::{Finding, SeverityTier};
use mobscan::normalize::normalize;
use mobscan::remediation::recommend;
use mobscan::reports::{truncate, HumanReport};
use mobscan::scoring::{classify, ScoreSummary};
use mobscan::Advisor;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use unicode_width::UnicodeWidthChar;

/// Arbitrary JSON, biased towards the keys the normalizer probes.
fn arb_json() -> impl Strategy<Value = Value> {
    let key = prop_oneof![
        Just("app_name".to_string()),
        Just("MD5".to_string()),
        Just("vulnerabilities".to_string()),
        Just("api".to_string()),
        Just("manifest_analysis".to_string()),
        Just("manifest_findings".to_string()),
        Just("permissions".to_string()),
        Just("title".to_string()),
        Just("severity".to_string()),
        Just("remediation".to_string()),
        "[a-zA-Z_]{1,12}",
    ];
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(|f| serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)),
        "\\PC{0,40}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 8, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::vec((key.clone(), inner), 0..8)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn arb_finding() -> impl Strategy<Value = Finding> {
    (
        "\\PC{0,30}",
        prop_oneof![
            Just("high".to_string()),
            Just("warning".to_string()),
            Just("info".to_string()),
            Just("Critical".to_string()),
            "\\PC{0,12}",
        ],
    )
        .prop_map(|(title, severity)| Finding::new(title, severity))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn normalize_never_panics_and_fills_metadata(raw in arb_json()) {
        let report = normalize(&raw);
        let meta = &report.metadata;
        for field in [
            &meta.app_name, &meta.file_name, &meta.size, &meta.package_name,
            &meta.version_name, &meta.target_sdk, &meta.min_sdk, &meta.hash,
        ] {
            prop_assert!(!field.is_empty());
        }
        // Rendering the view model never panics either
        let _ = HumanReport::build(&report, &Advisor::builtin());
    }

    #[test]
    fn normalize_is_idempotent(raw in arb_json()) {
        prop_assert_eq!(normalize(&raw), normalize(&raw));
    }

    #[test]
    fn every_finding_lands_in_exactly_one_tier(findings in prop::collection::vec(arb_finding(), 0..40)) {
        let classification = classify(&findings);
        let summary = classification.summary;
        prop_assert_eq!(summary.high + summary.medium + summary.info, findings.len());

        for tier in SeverityTier::ALL {
            let grouped = classification.tier(tier);
            prop_assert_eq!(grouped.len(), summary.count(tier));
            prop_assert!(grouped.iter().all(|f| f.severity == tier));
        }

        // Within a tier, findings keep input order
        let expected_high: Vec<&Finding> = findings.iter().filter(|f| f.severity == SeverityTier::High).collect();
        let actual_high: Vec<&Finding> = classification.tier(SeverityTier::High).iter().collect();
        prop_assert_eq!(expected_high, actual_high);
    }

    #[test]
    fn score_is_bounded_and_monotonic(high in 0usize..30, medium in 0usize..50, info in 0usize..200) {
        let base = ScoreSummary::from_counts(high, medium, info).score;
        prop_assert!(base <= 100);
        prop_assert!(ScoreSummary::from_counts(high + 1, medium, info).score <= base);
        prop_assert!(ScoreSummary::from_counts(high, medium + 1, info).score <= base);
        prop_assert!(ScoreSummary::from_counts(high, medium, info + 1).score <= base);
    }

    #[test]
    fn recommend_is_total(title in "\\PC{0,80}") {
        prop_assert!(!recommend(&title).trim().is_empty());
    }

    #[test]
    fn truncate_respects_width(text in "\\PC{0,300}", max in 1usize..200) {
        let out = truncate(&text, max);
        if out != text {
            let kept = out.strip_suffix('…').unwrap_or(&out);
            let width: usize = kept
                .chars()
                .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
                .sum();
            prop_assert!(out.ends_with('…'));
            prop_assert!(width <= max);
            prop_assert!(text.starts_with(kept));
        }
    }
}

#[test]
fn huge_counts_floor_at_zero() {
    assert_eq!(ScoreSummary::from_counts(usize::MAX, usize::MAX, usize::MAX).score, 0);
    assert_eq!(recommend(""), mobscan::remediation::FALLBACK_FIX);
    assert_eq!(normalize(&json!(null)).metadata.app_name, "(unknown)");
}
