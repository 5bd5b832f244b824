use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RxCheckError};
use crate::types::{
    BodySystem, Category, CategoryPair, DetailSource, InteractionDetail, InteractionType, Severity,
};

/// Pair-specific mechanism record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailEntry {
    pub pair: CategoryPair,
    pub interaction_type: InteractionType,
    pub affected_systems: Vec<BodySystem>,
    pub mechanism: String,
}

/// Mechanism and affected-system lookup keyed by unordered category pair,
/// with a severity-derived default for pairs that have no specific record.
pub struct CategoryDetailTable {
    specific: HashMap<CategoryPair, DetailEntry>,
}

impl CategoryDetailTable {
    /// Builds a table, rejecting duplicate pairs and entries with no systems
    /// or a blank mechanism.
    pub fn new(entries: Vec<DetailEntry>) -> Result<Self> {
        let mut specific = HashMap::new();
        for entry in entries {
            if entry.affected_systems.is_empty() {
                return Err(RxCheckError::Config {
                    message: format!("detail for {} lists no affected systems", entry.pair),
                });
            }
            if entry.mechanism.trim().is_empty() {
                return Err(RxCheckError::Config {
                    message: format!("detail for {} has an empty mechanism", entry.pair),
                });
            }
            let pair = entry.pair;
            if specific.insert(pair, entry).is_some() {
                return Err(RxCheckError::Config {
                    message: format!("duplicate detail entry for {pair}"),
                });
            }
        }
        Ok(Self { specific })
    }

    /// The compiled-in table.
    pub fn builtin() -> Self {
        use BodySystem as S;
        use Category::*;
        use InteractionType::*;

        let entries = [
            (
                (Anticoagulants, Painkillers),
                Pharmacodynamic,
                vec![S::Hematologic, S::Gastrointestinal],
                "Combined inhibition of clotting and platelet function increases bleeding risk, including gastrointestinal bleeding",
            ),
            (
                (Antibiotics, Anticoagulants),
                Pharmacokinetic,
                vec![S::Hematologic, S::Hepatic],
                "Antibiotic inhibition of hepatic metabolism and of gut vitamin K synthesis potentiates the anticoagulant effect",
            ),
            (
                (Anticoagulants, Anticoagulants),
                Pharmacodynamic,
                vec![S::Hematologic, S::Cardiovascular],
                "Additive anticoagulant and antiplatelet effects on hemostasis",
            ),
            (
                (Psychiatric, Psychiatric),
                Pharmacodynamic,
                vec![S::CentralNervous, S::Cardiovascular],
                "Additive serotonergic activity with risk of serotonin syndrome and QT prolongation",
            ),
            (
                (Psychiatric, Painkillers),
                Pharmacodynamic,
                vec![S::CentralNervous, S::Hematologic],
                "Serotonergic analgesics and reduced platelet serotonin uptake raise the risk of serotonin toxicity and bleeding",
            ),
            (
                (Psychiatric, Neurological),
                Pharmacodynamic,
                vec![S::CentralNervous],
                "Additive central nervous system depression and a lowered seizure threshold",
            ),
            (
                (Cardiovascular, Cardiovascular),
                Pharmacodynamic,
                vec![S::Cardiovascular, S::Renal],
                "Additive hemodynamic effects and shifts in electrolyte balance (hypotension, bradycardia, hypokalemia)",
            ),
            (
                (Cardiovascular, Painkillers),
                Pharmacodynamic,
                vec![S::Cardiovascular, S::Renal],
                "NSAID-induced sodium and fluid retention blunts antihypertensive effect and reduces renal perfusion",
            ),
            (
                (Cardiovascular, Antibiotics),
                Pharmacokinetic,
                vec![S::Cardiovascular, S::Hepatic],
                "CYP3A4 inhibition raises plasma levels of cardiac drugs and adds QT-prolonging effects",
            ),
            (
                (Painkillers, Painkillers),
                Pharmacodynamic,
                vec![S::Gastrointestinal, S::Renal],
                "Duplicate prostaglandin inhibition increases gastrointestinal and renal toxicity",
            ),
            (
                (Diabetes, Hormones),
                Pharmacodynamic,
                vec![S::Endocrine, S::Metabolic],
                "Hormonal counter-regulation raises blood glucose and opposes glucose-lowering therapy",
            ),
            (
                (Antibiotics, Hormones),
                Pharmacokinetic,
                vec![S::Endocrine, S::Hepatic],
                "Hepatic enzyme induction and altered gut flora reduce circulating hormone levels",
            ),
        ];

        let specific = entries
            .into_iter()
            .map(|((a, b), interaction_type, affected_systems, mechanism)| {
                let pair = CategoryPair::new(a, b);
                (
                    pair,
                    DetailEntry {
                        pair,
                        interaction_type,
                        affected_systems,
                        mechanism: mechanism.to_string(),
                    },
                )
            })
            .collect();

        Self { specific }
    }

    /// Returns the detail for two categories, in either order.
    ///
    /// Never fails: pairs without a specific record get the default for
    /// `severity`. Efficacy and toxicity labels always follow `severity`.
    pub fn lookup(&self, a: Category, b: Category, severity: Severity) -> InteractionDetail {
        match self.specific.get(&CategoryPair::new(a, b)) {
            Some(entry) => InteractionDetail {
                interaction_type: entry.interaction_type,
                affected_systems: entry.affected_systems.clone(),
                mechanism: entry.mechanism.clone(),
                efficacy_alteration: efficacy_label(severity).to_string(),
                toxicity_level: toxicity_label(severity).to_string(),
                source: DetailSource::Specific,
            },
            None => severity_default(severity),
        }
    }

    /// Specific entries sorted by pair.
    pub fn entries(&self) -> Vec<&DetailEntry> {
        let mut entries: Vec<&DetailEntry> = self.specific.values().collect();
        entries.sort_by_key(|e| e.pair);
        entries
    }

    pub fn len(&self) -> usize {
        self.specific.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specific.is_empty()
    }
}

/// Generic detail record derived purely from severity.
pub fn severity_default(severity: Severity) -> InteractionDetail {
    let (interaction_type, affected_systems, mechanism) = match severity {
        Severity::High => (
            InteractionType::Pharmacodynamic,
            vec![BodySystem::Cardiovascular, BodySystem::Renal, BodySystem::Hepatic],
            "Additive or synergistic effects on shared physiological pathways",
        ),
        Severity::Moderate => (
            InteractionType::Pharmacokinetic,
            vec![BodySystem::Metabolic, BodySystem::Gastrointestinal],
            "Altered absorption, distribution, metabolism or elimination of one or both drugs",
        ),
        Severity::Low => (
            InteractionType::Pharmacodynamic,
            vec![BodySystem::Systemic],
            "No clinically significant shared pathway identified",
        ),
    };

    InteractionDetail {
        interaction_type,
        affected_systems,
        mechanism: mechanism.to_string(),
        efficacy_alteration: efficacy_label(severity).to_string(),
        toxicity_level: toxicity_label(severity).to_string(),
        source: DetailSource::SeverityDefault,
    }
}

pub fn efficacy_label(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "Significantly Altered",
        Severity::Moderate => "Moderately Altered",
        Severity::Low => "Minimally Altered",
    }
}

pub fn toxicity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "High Risk",
        Severity::Moderate => "Moderate Risk",
        Severity::Low => "Low Risk",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_entry_is_symmetric() {
        let table = CategoryDetailTable::builtin();
        let ab = table.lookup(Category::Painkillers, Category::Anticoagulants, Severity::High);
        let ba = table.lookup(Category::Anticoagulants, Category::Painkillers, Severity::High);
        assert_eq!(ab, ba);
        assert_eq!(ab.source, DetailSource::Specific);
        assert!(ab.mechanism.contains("bleeding"));
    }

    #[test]
    fn test_defaults_are_complete() {
        for severity in [Severity::High, Severity::Moderate, Severity::Low] {
            let detail = severity_default(severity);
            assert!(!detail.affected_systems.is_empty());
            assert!(!detail.mechanism.is_empty());
            assert!(!detail.efficacy_alteration.is_empty());
            assert!(!detail.toxicity_level.is_empty());
        }
    }

    #[test]
    fn test_default_tiers_are_distinct() {
        let high = severity_default(Severity::High);
        let moderate = severity_default(Severity::Moderate);
        let low = severity_default(Severity::Low);
        assert_ne!(high.mechanism, moderate.mechanism);
        assert_ne!(moderate.mechanism, low.mechanism);
        assert_ne!(high.affected_systems, low.affected_systems);
    }

    #[test]
    fn test_missing_pair_falls_back() {
        let table = CategoryDetailTable::builtin();
        let detail = table.lookup(Category::Respiratory, Category::Gastrointestinal, Severity::Low);
        assert_eq!(detail, severity_default(Severity::Low));
    }

    #[test]
    fn test_labels_follow_severity() {
        let table = CategoryDetailTable::builtin();
        let detail = table.lookup(Category::Psychiatric, Category::Psychiatric, Severity::Moderate);
        assert_eq!(detail.efficacy_alteration, "Moderately Altered");
        assert_eq!(detail.toxicity_level, "Moderate Risk");
    }

    #[test]
    fn test_rejects_empty_systems() {
        let entry = DetailEntry {
            pair: CategoryPair::new(Category::Diabetes, Category::Diabetes),
            interaction_type: InteractionType::Pharmacodynamic,
            affected_systems: vec![],
            mechanism: "x".to_string(),
        };
        assert!(CategoryDetailTable::new(vec![entry]).is_err());
    }
}
