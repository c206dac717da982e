//! Normalization and scoring benchmarks.
//!
//! Run with: cargo bench --bench normalize_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mobscan::normalize::{normalize, normalize_str};
use mobscan::remediation::Advisor;
use mobscan::reports::HumanReport;
use mobscan::scoring::classify;
use serde_json::{json, Value};
use std::hint::black_box;

const SEVERITIES: [&str; 5] = ["high", "warning", "info", "CRITICAL", "secure"];

/// Synthetic report with `count` findings spread over every finding source.
fn generate_report(count: usize) -> Value {
    let finding = |i: usize| {
        json!({
            "title": format!("Finding {i}: hardcoded token in module {}", i % 17),
            "severity": SEVERITIES[i % SEVERITIES.len()],
            "description": "x".repeat(200 + i % 50),
            "path": format!("com/example/app/Module{}.java", i % 31),
        })
    };
    let third = count / 3;
    let manifest: Vec<Value> = (0..third).map(finding).collect();
    let api: Vec<Value> = (third..2 * third).map(finding).collect();
    let vulnerabilities: Vec<Value> = (2 * third..count).map(finding).collect();
    let permissions: serde_json::Map<String, Value> = (0..count / 10)
        .map(|i| {
            let status = if i % 2 == 0 { "dangerous" } else { "normal" };
            (
                format!("android.permission.PERM_{i}"),
                json!({"status": status, "description": "perm"}),
            )
        })
        .collect();

    json!({
        "app_name": "BenchApp",
        "md5": "0123456789abcdef0123456789abcdef",
        "manifest_analysis": {"manifest_findings": manifest},
        "api": api,
        "vulnerabilities": vulnerabilities,
        "permissions": permissions,
    })
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_classify");
    for size in &[100usize, 1_000, 10_000] {
        let raw = generate_report(*size);
        group.bench_with_input(BenchmarkId::new("findings", size), &raw, |b, raw| {
            b.iter(|| {
                let report = normalize(black_box(raw));
                black_box(classify(&report.findings))
            });
        });
    }
    group.finish();
}

fn bench_parse_and_view(c: &mut Criterion) {
    let text = generate_report(1_000).to_string();
    let advisor = Advisor::builtin();
    c.bench_function("parse_normalize_view_1000", |b| {
        b.iter(|| {
            let report = normalize_str(black_box(&text)).unwrap_or_else(|e| panic!("{e}"));
            black_box(HumanReport::build(&report, &advisor))
        });
    });
}

criterion_group!(benches, bench_normalize, bench_parse_and_view);
criterion_main!(benches);
