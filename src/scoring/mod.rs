//! Severity classification and risk scoring.
//!
//! ```
//! use mobscan::model::Finding;
//! use mobscan::scoring::classify;
//!
//! let findings = vec![Finding::new("Hardcoded API key", "high")];
//! let classification = classify(&findings);
//! assert_eq!(classification.summary.high, 1);
//! assert_eq!(classification.summary.score, 92);
//! ```

mod classifier;
mod scorer;

pub use classifier::{classify, Classification};
pub use scorer::{RiskLevel, ScoreSummary};
