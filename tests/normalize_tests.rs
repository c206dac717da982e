//! Normalization, scoring and rendering of real-world report shapes.

use mobscan::model::SeverityTier;
use mobscan::normalize::{normalize, normalize_str};
use mobscan::remediation::{recommend, Advisor};
use mobscan::reports::{
    create_reporter_with_options, HumanReport, RemediationSource, ReportFormat, ReportMetadata,
};
use mobscan::scoring::{classify, RiskLevel};
use serde_json::json;
use std::path::Path;

fn fixture(name: &str) -> String {
    let path = Path::new("tests/fixtures").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

#[test]
fn hardcoded_key_scores_92_with_secrets_advice() {
    let report = normalize(&json!({
        "vulnerabilities": [{"title": "Hardcoded API key", "severity": "high"}]
    }));
    let classification = classify(&report.findings);

    assert_eq!(classification.summary.high, 1);
    assert_eq!(classification.summary.score, 92);
    assert!(recommend("Hardcoded API key").starts_with("Remove hardcoded secrets"));
}

#[test]
fn dangerous_camera_permission_is_listed_once() {
    let report = normalize(&json!({
        "permissions": {"android.permission.CAMERA": "dangerous"}
    }));
    assert_eq!(report.permissions.len(), 1);
    assert_eq!(report.permissions[0].name, "android.permission.CAMERA");
}

#[test]
fn mobsf_report_metadata() {
    let report = normalize_str(&fixture("mobsf_apk_report.json")).unwrap();
    insta::assert_json_snapshot!(report.metadata, @r###"
    {
      "app_name": "DivaApplication",
      "file_name": "diva-beta.apk",
      "size": "1.43MB",
      "package_name": "jakhar.aseem.diva",
      "version_name": "1.0",
      "target_sdk": "23",
      "min_sdk": "15",
      "hash": "82ab8b2193b3cfb1c737e3a786be363a"
    }
    "###);
}

#[test]
fn mobsf_report_findings_and_score() {
    let report = normalize_str(&fixture("mobsf_apk_report.json")).unwrap();

    let titles: Vec<&str> = report.findings.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Debug Enabled For App",
            "Application Data can be Backed up",
            "Activity (jakhar.aseem.diva.APICredsActivity) is not Protected.",
            "The App uses an insecure Random Number Generator.",
            "App can write to App Directory. Sensitive Information should be encrypted.",
            "Hardcoded API key",
        ]
    );

    let classification = classify(&report.findings);
    assert_eq!(classification.summary.high, 2);
    assert_eq!(classification.summary.medium, 3);
    assert_eq!(classification.summary.info, 1);
    assert_eq!(classification.summary.score, 71);
    assert_eq!(classification.summary.risk_level(), RiskLevel::Moderate);

    let hardcoded = &classification.tier(SeverityTier::High)[1];
    assert_eq!(hardcoded.raw_severity, "high");
    assert_eq!(hardcoded.path, "jakhar/aseem/diva/APICredsActivity.java");
}

#[test]
fn mobsf_report_dangerous_permissions() {
    let report = normalize_str(&fixture("mobsf_apk_report.json")).unwrap();
    let names: Vec<&str> = report.permissions.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "android.permission.READ_PHONE_STATE",
            "android.permission.WRITE_EXTERNAL_STORAGE"
        ]
    );
    assert_eq!(
        report.permissions[0].info,
        "Allows the application to access the phone features of the device."
    );
}

#[test]
fn report_remediation_wins_over_advisor() {
    let report = normalize_str(&fixture("mobsf_apk_report.json")).unwrap();
    let view = HumanReport::build(&report, &Advisor::builtin());
    let high = view.section(SeverityTier::High).unwrap();

    assert_eq!(high.findings[0].remediation_source, RemediationSource::Advisor);
    assert!(high.findings[0].remediation.contains("debuggable"));
    assert_eq!(high.findings[1].remediation_source, RemediationSource::Report);
    assert_eq!(
        high.findings[1].remediation,
        "Move the vendor API credentials to the backend."
    );
}

#[test]
fn uppercase_service_keys_are_understood() {
    let report = normalize_str(&fixture("uppercase_keys_report.json")).unwrap();

    assert_eq!(report.metadata.app_name, "InsecureBankv2");
    assert_eq!(report.metadata.size, "3.3MB");
    assert_eq!(report.metadata.target_sdk, "22");
    assert_eq!(report.metadata.hash, "a8ac2ab3b5e8b6bb0b3d1e6ae7a1c2f0");

    let titles: Vec<&str> = report.findings.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Launch Mode of Activity is not standard",
            "Clear text traffic is Enabled For App"
        ]
    );
    assert!(report
        .findings
        .iter()
        .all(|f| f.severity == SeverityTier::High));
    assert_eq!(classify(&report.findings).summary.score, 84);

    let names: Vec<&str> = report.permissions.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "android.permission.SEND_SMS",
            "android.permission.ACCESS_COARSE_LOCATION"
        ]
    );
}

#[test]
fn unexpected_json_shape_degrades_to_placeholders() {
    let report = normalize_str(&fixture("not_a_report.json")).unwrap();
    assert_eq!(report.metadata.app_name, "(unknown)");
    assert_eq!(report.metadata.hash, "(n/a)");
    assert!(report.is_empty());
    assert_eq!(classify(&report.findings).summary.score, 100);
}

#[test]
fn normalization_is_idempotent() {
    let text = fixture("mobsf_apk_report.json");
    assert_eq!(normalize_str(&text).unwrap(), normalize_str(&text).unwrap());
}

#[test]
fn markdown_render_of_fixture() {
    let report = normalize_str(&fixture("mobsf_apk_report.json")).unwrap();
    let view = HumanReport::build(&report, &Advisor::builtin());
    let markdown = create_reporter_with_options(ReportFormat::Markdown, false)
        .generate(&view, &ReportMetadata::new())
        .unwrap();

    assert!(markdown.contains("DivaApplication"));
    assert!(markdown.contains("71/100"));
    assert!(markdown.contains("android.permission.READ_PHONE_STATE"));
}
