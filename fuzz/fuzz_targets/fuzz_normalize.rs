#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz report normalization and rendering.
///
/// Any JSON text must normalize without panicking, and the resulting view
/// model must render in every output format.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(report) = mobscan::normalize::normalize_str(s) {
            let view = mobscan::reports::HumanReport::build(&report, &mobscan::remediation::Advisor::builtin());
            for format in [
                mobscan::reports::ReportFormat::Summary,
                mobscan::reports::ReportFormat::Json,
                mobscan::reports::ReportFormat::Markdown,
            ] {
                let _ = mobscan::reports::create_reporter(format)
                    .generate(&view, &mobscan::reports::ReportMetadata::default());
            }
        }
    }
});
