use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RxCheckError};
use crate::types::{Category, CategoryPair, RiskAssessment, Severity};

/// Confidence reported for high-risk pairs.
pub const HIGH_CONFIDENCE: f64 = 0.95;
/// Confidence reported for moderate-risk pairs.
pub const MODERATE_CONFIDENCE: f64 = 0.75;
/// Confidence reported for pairs in neither table.
pub const LOW_CONFIDENCE: f64 = 0.60;

/// Fixed confidence constant per severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceLevels {
    pub high: f64,
    pub moderate: f64,
    pub low: f64,
}

impl Default for ConfidenceLevels {
    fn default() -> Self {
        Self {
            high: HIGH_CONFIDENCE,
            moderate: MODERATE_CONFIDENCE,
            low: LOW_CONFIDENCE,
        }
    }
}

impl ConfidenceLevels {
    pub fn for_severity(&self, severity: Severity) -> f64 {
        match severity {
            Severity::High => self.high,
            Severity::Moderate => self.moderate,
            Severity::Low => self.low,
        }
    }

    fn validate(&self) -> Result<()> {
        for (label, value) in [("high", self.high), ("moderate", self.moderate), ("low", self.low)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RxCheckError::Config {
                    message: format!("{label} confidence {value} is outside [0, 1]"),
                });
            }
        }
        if self.high < self.moderate || self.moderate < self.low {
            return Err(RxCheckError::Config {
                message: "confidences must satisfy high >= moderate >= low".to_string(),
            });
        }
        Ok(())
    }
}

/// Severity and confidence keyed by unordered category pair.
///
/// A pair in the high set is high; otherwise a pair in the moderate set is
/// moderate; everything else is low. A pair present in both sets is high.
pub struct CategoryRiskTable {
    high: HashSet<CategoryPair>,
    moderate: HashSet<CategoryPair>,
    confidences: ConfidenceLevels,
}

impl CategoryRiskTable {
    pub fn new(
        high: impl IntoIterator<Item = CategoryPair>,
        moderate: impl IntoIterator<Item = CategoryPair>,
        confidences: ConfidenceLevels,
    ) -> Result<Self> {
        confidences.validate()?;
        Ok(Self {
            high: high.into_iter().collect(),
            moderate: moderate.into_iter().collect(),
            confidences,
        })
    }

    /// The compiled-in table.
    pub fn builtin() -> Self {
        use Category::*;

        let high = [
            (Anticoagulants, Painkillers),
            (Anticoagulants, Antibiotics),
            (Anticoagulants, Anticoagulants),
            (Psychiatric, Psychiatric),
            (Psychiatric, Painkillers),
            (Psychiatric, Neurological),
        ];
        let moderate = [
            (Cardiovascular, Cardiovascular),
            (Cardiovascular, Painkillers),
            (Cardiovascular, Antibiotics),
            (Cardiovascular, Psychiatric),
            (Cardiovascular, Respiratory),
            (Painkillers, Painkillers),
            (Antibiotics, Gastrointestinal),
            (Antibiotics, Hormones),
            (Diabetes, Hormones),
            (Anticoagulants, Hormones),
            (Neurological, Neurological),
        ];

        Self {
            high: high.iter().map(|&(a, b)| CategoryPair::new(a, b)).collect(),
            moderate: moderate.iter().map(|&(a, b)| CategoryPair::new(a, b)).collect(),
            confidences: ConfidenceLevels::default(),
        }
    }

    /// Looks up severity and confidence for two categories, in either order.
    pub fn assess(&self, a: Category, b: Category) -> RiskAssessment {
        self.assess_pair(CategoryPair::new(a, b))
    }

    pub fn assess_pair(&self, pair: CategoryPair) -> RiskAssessment {
        let severity = if self.high.contains(&pair) {
            Severity::High
        } else if self.moderate.contains(&pair) {
            Severity::Moderate
        } else {
            Severity::Low
        };

        RiskAssessment {
            severity,
            confidence: self.confidences.for_severity(severity),
        }
    }

    /// High-risk pairs, sorted.
    pub fn high_pairs(&self) -> Vec<CategoryPair> {
        sorted(&self.high)
    }

    /// Moderate-risk pairs, sorted.
    pub fn moderate_pairs(&self) -> Vec<CategoryPair> {
        sorted(&self.moderate)
    }

    pub fn confidences(&self) -> ConfidenceLevels {
        self.confidences
    }
}

fn sorted(set: &HashSet<CategoryPair>) -> Vec<CategoryPair> {
    let mut pairs: Vec<CategoryPair> = set.iter().copied().collect();
    pairs.sort();
    pairs
}
