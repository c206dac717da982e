//! Risk score arithmetic.

use crate::model::SeverityTier;
use serde::{Deserialize, Serialize};

/// Bucket counts and the derived 0-100 score (100 is cleanest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub high: usize,
    pub medium: usize,
    pub info: usize,
    pub score: u32,
}

impl ScoreSummary {
    /// `max(0, 100 - (8*high + 4*medium + info))`
    #[must_use]
    pub fn from_counts(high: usize, medium: usize, info: usize) -> Self {
        let penalty = [
            (high, SeverityTier::High),
            (medium, SeverityTier::Medium),
            (info, SeverityTier::Info),
        ]
        .iter()
        .fold(0u64, |acc, (count, tier)| {
            acc.saturating_add((*count as u64).saturating_mul(u64::from(tier.penalty())))
        });

        let score = 100u64.saturating_sub(penalty) as u32;
        Self {
            high,
            medium,
            info,
            score,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.high + self.medium + self.info
    }

    #[must_use]
    pub const fn count(&self, tier: SeverityTier) -> usize {
        match tier {
            SeverityTier::High => self.high,
            SeverityTier::Medium => self.medium,
            SeverityTier::Info => self.info,
        }
    }

    #[must_use]
    pub const fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.score)
    }
}

/// Display label for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// 91-100
    Low,
    /// 71-90
    Moderate,
    /// 41-70
    Elevated,
    /// 0-40
    Severe,
}

impl RiskLevel {
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        match score {
            91.. => Self::Low,
            71..=90 => Self::Moderate,
            41..=70 => Self::Elevated,
            _ => Self::Severe,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low risk",
            Self::Moderate => "Moderate risk",
            Self::Elevated => "Elevated risk",
            Self::Severe => "Severe risk",
        }
    }
}
