use tracing::debug;

use crate::errors::{Result, RxCheckError};
use crate::knowledge::KnowledgeBase;
use crate::types::{PatientProfile, PredictedSideEffect, Probability, Severity};

/// Age above which a patient counts as elderly.
pub const ELDERLY_AGE: u32 = 65;
/// Body weight bounds outside of which weight counts as a risk factor.
pub const LOW_WEIGHT_KG: f64 = 50.0;
pub const HIGH_WEIGHT_KG: f64 = 100.0;

/// Number of risk factors present in a profile, from 0 to 3.
pub fn risk_score(profile: &PatientProfile) -> u32 {
    let age = u32::from(profile.age > ELDERLY_AGE);
    let weight = u32::from(
        profile
            .weight_kg
            .map(|w| !(LOW_WEIGHT_KG..=HIGH_WEIGHT_KG).contains(&w))
            .unwrap_or(false),
    );
    let conditions = u32::from(!profile.conditions.is_empty());
    age + weight + conditions
}

/// Risk tier for an effect of the given probability at `score`.
pub fn risk_level(probability: Probability, score: u32) -> Severity {
    match probability {
        Probability::Common if score >= 2 => Severity::High,
        Probability::Uncommon if score >= 1 => Severity::Moderate,
        _ => Severity::Low,
    }
}

pub struct SideEffectPredictor<'a> {
    knowledge: &'a KnowledgeBase,
}

impl<'a> SideEffectPredictor<'a> {
    pub fn new(knowledge: &'a KnowledgeBase) -> Self {
        Self { knowledge }
    }

    /// Predicts side effects for `drugs`, merged by effect name.
    ///
    /// Effects keep first-seen order and first-seen probability; associated
    /// drugs accumulate in input order and the risk level is the highest
    /// seen. Every unknown name is reported in one `UnknownDrug` error.
    pub fn predict(
        &self,
        drugs: &[&str],
        profile: &PatientProfile,
    ) -> Result<Vec<PredictedSideEffect>> {
        let catalog = self.knowledge.catalog();

        let mut distinct: Vec<&str> = Vec::new();
        for &name in drugs {
            if !distinct.contains(&name) {
                distinct.push(name);
            }
        }

        let unknown: Vec<String> = distinct
            .iter()
            .filter(|name| !catalog.contains(name))
            .map(|name| name.to_string())
            .collect();
        if !unknown.is_empty() {
            return Err(RxCheckError::UnknownDrug { names: unknown });
        }

        let score = risk_score(profile);
        let mut merged: Vec<PredictedSideEffect> = Vec::new();

        for drug in distinct {
            let Some(record) = catalog.record(drug) else {
                debug!(drug, "no side-effect data");
                continue;
            };

            for side_effect in &record.side_effects {
                let level = risk_level(side_effect.probability, score);
                match merged.iter_mut().find(|p| p.effect == side_effect.effect) {
                    Some(existing) => {
                        if !existing.associated_drugs.iter().any(|d| d == drug) {
                            existing.associated_drugs.push(drug.to_string());
                        }
                        existing.risk_level = existing.risk_level.max(level);
                    }
                    None => merged.push(PredictedSideEffect {
                        effect: side_effect.effect.clone(),
                        probability: side_effect.probability,
                        associated_drugs: vec![drug.to_string()],
                        risk_level: level,
                    }),
                }
            }
        }

        debug!(effects = merged.len(), score, "side effects predicted");
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MedicalCondition;

    #[test]
    fn test_risk_score_counts_each_factor_once() {
        let profile = PatientProfile {
            age: 70,
            weight_kg: Some(45.0),
            conditions: vec![MedicalCondition::Diabetes, MedicalCondition::Hypertension],
            ..Default::default()
        };
        assert_eq!(risk_score(&profile), 3);
    }

    #[test]
    fn test_missing_weight_is_not_a_factor() {
        let profile = PatientProfile {
            age: 30,
            ..Default::default()
        };
        assert_eq!(risk_score(&profile), 0);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        let profile = PatientProfile {
            age: 65,
            weight_kg: Some(100.0),
            ..Default::default()
        };
        assert_eq!(risk_score(&profile), 0);
    }

    #[test]
    fn test_risk_level_tiers() {
        assert_eq!(risk_level(Probability::Common, 2), Severity::High);
        assert_eq!(risk_level(Probability::Common, 1), Severity::Low);
        assert_eq!(risk_level(Probability::Uncommon, 1), Severity::Moderate);
        assert_eq!(risk_level(Probability::Rare, 3), Severity::Low);
    }
}
