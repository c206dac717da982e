//! CLI command handlers.
//!
//! Handlers are invoked by main.rs and return the process exit code. Each
//! one takes the already merged [`AppConfig`](crate::config::AppConfig).

mod output;
#[cfg(feature = "remote")]
mod remote;
mod render;

pub use output::{emit_report, should_use_color, write_output, OutputTarget};
#[cfg(feature = "remote")]
pub use remote::{run_crucial, run_pdf, run_report, run_scan, run_scans};
pub use render::run_render;

/// Exit codes for CI integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// High-severity findings present with `--fail-on-high`
    pub const HIGH_FINDINGS: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::exit_codes;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::HIGH_FINDINGS, 2);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
