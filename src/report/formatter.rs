use crate::types::{InteractionVerdict, PredictedSideEffect, Severity};

/// Formats one verdict as a Markdown report.
///
/// Sections: header with both drugs, risk summary, mechanism, monitoring and
/// recommendation.
pub fn format_verdict_as_markdown(verdict: &InteractionVerdict) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "## {} + {}\n",
        verdict.drug_a.name, verdict.drug_b.name
    ));
    out.push_str(&format!(
        "**Severity:** {} (confidence {:.2})\n\n",
        verdict.severity, verdict.confidence
    ));

    out.push_str("### Drugs\n");
    for drug in [&verdict.drug_a, &verdict.drug_b] {
        out.push_str(&format!(
            "- **{}** ({}, via {}) - {}\n",
            drug.name,
            drug.category,
            drug.source.as_str(),
            drug.description
        ));
    }
    out.push('\n');

    out.push_str("### Interaction\n");
    out.push_str(&format!("- Type: {}\n", verdict.interaction_type.as_str()));
    let systems: Vec<&str> = verdict.affected_systems.iter().map(|s| s.label()).collect();
    out.push_str(&format!("- Affected systems: {}\n", systems.join(", ")));
    out.push_str(&format!("- Mechanism: {}\n", verdict.mechanism));
    out.push_str(&format!("- Efficacy: {}\n", verdict.efficacy_alteration));
    out.push_str(&format!("- Toxicity: {}\n\n", verdict.toxicity_level));

    out.push_str("### Monitoring\n");
    for param in &verdict.monitoring {
        out.push_str(&format!("- {}\n", param));
    }
    out.push('\n');

    out.push_str("### Recommendation\n");
    out.push_str(&verdict.recommendation);
    out.push('\n');

    out
}

/// Formats a verdict as pretty-printed JSON.
pub fn format_verdict_as_json(verdict: &InteractionVerdict) -> String {
    serde_json::to_string_pretty(verdict).unwrap_or_default()
}

/// Formats several verdicts, separated by horizontal rules.
pub fn format_verdicts_as_markdown(verdicts: &[InteractionVerdict]) -> String {
    if verdicts.is_empty() {
        return "_No interactions to report._\n".to_string();
    }
    verdicts
        .iter()
        .map(format_verdict_as_markdown)
        .collect::<Vec<_>>()
        .join("\n---\n\n")
}

pub fn format_verdicts_as_json(verdicts: &[InteractionVerdict]) -> String {
    serde_json::to_string_pretty(verdicts).unwrap_or_default()
}

/// Formats predicted side effects grouped by risk level, highest first.
pub fn format_side_effects_as_markdown(effects: &[PredictedSideEffect]) -> String {
    let mut out = String::new();
    out.push_str("## Predicted Side Effects\n");

    if effects.is_empty() {
        out.push_str("_No side-effect data for the selected drugs._\n");
        return out;
    }

    for (severity, title) in [
        (Severity::High, "High Risk"),
        (Severity::Moderate, "Moderate Risk"),
        (Severity::Low, "Low Risk"),
    ] {
        let group: Vec<&PredictedSideEffect> =
            effects.iter().filter(|e| e.risk_level == severity).collect();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!("\n### {}\n", title));
        for effect in group {
            out.push_str(&format!(
                "- **{}** ({}) - {}\n",
                effect.effect,
                effect.probability.as_str(),
                effect.associated_drugs.join(", ")
            ));
        }
    }

    out
}

pub fn format_side_effects_as_json(effects: &[PredictedSideEffect]) -> String {
    serde_json::to_string_pretty(effects).unwrap_or_default()
}

/// One name per line.
pub fn format_drug_list(names: &[String]) -> String {
    if names.is_empty() {
        return "_No matching drugs._\n".to_string();
    }
    let mut out = String::new();
    for name in names {
        out.push_str(name);
        out.push('\n');
    }
    out
}
