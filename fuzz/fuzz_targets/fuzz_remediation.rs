#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz remediation lookup and severity classification with arbitrary titles.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        assert!(!mobscan::remediation::recommend(s).is_empty());
        let _ = mobscan::model::SeverityTier::from_raw(s);
        let _ = mobscan::reports::truncate(s, 160);
    }
});
