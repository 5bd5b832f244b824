use crate::types::{
    Classification, DrugSummary, InteractionDetail, InteractionVerdict, RiskAssessment, Severity,
};

/// Human-readable recommendation for a severity tier.
pub fn recommendation(severity: Severity, drug_a: &str, drug_b: &str) -> String {
    match severity {
        Severity::High => format!(
            "Avoid taking {drug_a} and {drug_b} together. This combination carries a high risk \
             of serious adverse effects; consult your healthcare provider about alternative \
             medications, non-drug therapies or timing adjustments before continuing."
        ),
        Severity::Moderate => format!(
            "Use {drug_a} and {drug_b} together with caution. Dose or timing adjustments may be \
             required; monitor for side effects and follow your healthcare provider's instructions."
        ),
        Severity::Low => format!(
            "{drug_a} and {drug_b} can generally be taken together. Continue routine monitoring \
             and report any unusual symptoms to your healthcare provider."
        ),
    }
}

/// Monitoring parameters for a severity tier.
pub fn monitoring(severity: Severity) -> Vec<String> {
    let params: &[&str] = match severity {
        Severity::High => &["Blood pressure", "Renal function", "Liver function", "ECG"],
        Severity::Moderate => &["Regular vital signs", "Symptom monitoring"],
        Severity::Low => &["Routine monitoring"],
    };
    params.iter().map(|p| p.to_string()).collect()
}

/// One-sentence summary naming both drugs.
pub fn prediction(
    drug_a: &DrugSummary,
    drug_b: &DrugSummary,
    severity: Severity,
    detail: &InteractionDetail,
) -> String {
    let systems: Vec<&str> = detail
        .affected_systems
        .iter()
        .map(|s| s.label())
        .collect();

    format!(
        "{} ({}) and {} ({}) have a {} risk {} interaction affecting {}: {}.",
        drug_a.name,
        drug_a.category,
        drug_b.name,
        drug_b.category,
        severity,
        detail.interaction_type.as_str(),
        systems.join(", "),
        detail.mechanism,
    )
}

/// Assembles a verdict from the outputs of the classification, risk and
/// detail steps.
pub fn assemble(
    a: Classification,
    b: Classification,
    risk: RiskAssessment,
    detail: InteractionDetail,
) -> InteractionVerdict {
    let drug_a = DrugSummary::from(a);
    let drug_b = DrugSummary::from(b);

    let recommendation = recommendation(risk.severity, &drug_a.name, &drug_b.name);
    let prediction = prediction(&drug_a, &drug_b, risk.severity, &detail);

    InteractionVerdict {
        severity: risk.severity,
        confidence: risk.confidence,
        interaction_type: detail.interaction_type,
        affected_systems: detail.affected_systems,
        mechanism: detail.mechanism,
        efficacy_alteration: detail.efficacy_alteration,
        toxicity_level: detail.toxicity_level,
        monitoring: monitoring(risk.severity),
        recommendation,
        prediction,
        detail_source: detail.source,
        drug_a,
        drug_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_tiers() {
        assert!(recommendation(Severity::High, "A", "B").starts_with("Avoid taking A and B"));
        assert!(recommendation(Severity::Moderate, "A", "B").contains("with caution"));
        let low = recommendation(Severity::Low, "A", "B");
        assert!(low.contains("can generally be taken together"));
        assert!(low.contains("monitoring"));
    }

    #[test]
    fn test_monitoring_tiers() {
        assert_eq!(monitoring(Severity::High).len(), 4);
        assert_eq!(monitoring(Severity::Moderate).len(), 2);
        assert_eq!(monitoring(Severity::Low), vec!["Routine monitoring".to_string()]);
    }
}
