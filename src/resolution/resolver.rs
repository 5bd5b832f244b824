use tracing::{debug, warn};

use crate::errors::{Result, RxCheckError};
use crate::knowledge::KnowledgeBase;
use crate::types::*;

use super::synthesis;

/// Resolves pairs of drug names into interaction verdicts.
///
/// Holds only a borrow of the knowledge base; every call is a pure function
/// of the inputs and the tables, so one resolver can be shared across
/// threads.
pub struct InteractionResolver<'a> {
    knowledge: &'a KnowledgeBase,
    /// Reject drugs whose category resolves to `unknown`.
    strict: bool,
}

impl<'a> InteractionResolver<'a> {
    pub fn new(knowledge: &'a KnowledgeBase) -> Self {
        Self {
            knowledge,
            strict: false,
        }
    }

    /// Enables or disables rejection of drugs classified as `unknown`.
    pub fn with_strict_classification(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Checks one pair of drugs.
    ///
    /// Steps:
    /// 1. **Identity** -- the same name twice is rejected before any lookup.
    /// 2. **Classification** -- both names go through the catalog; every name
    ///    that is not found is reported together, in argument order.
    /// 3. **Risk** -- severity and confidence from the category pair.
    /// 4. **Detail** -- specific record for the pair or the severity default.
    /// 5. **Synthesis** -- recommendation, monitoring and prediction text.
    pub fn resolve(&self, drug_a: &str, drug_b: &str) -> Result<InteractionVerdict> {
        if drug_a == drug_b {
            return Err(RxCheckError::IdenticalDrug {
                name: drug_a.to_string(),
            });
        }

        let (a, b) = match (self.classify_checked(drug_a), self.classify_checked(drug_b)) {
            (Some(a), Some(b)) => (a, b),
            (a, b) => {
                let mut names = Vec::new();
                if a.is_none() {
                    names.push(drug_a.to_string());
                }
                if b.is_none() {
                    names.push(drug_b.to_string());
                }
                return Err(RxCheckError::UnknownDrug { names });
            }
        };

        Ok(self.resolve_classified(a, b))
    }

    /// Checks every distinct pair among `drugs`.
    ///
    /// Duplicate names are collapsed first. All unknown names are reported
    /// together before any pair is checked. Verdicts are ordered by severity,
    /// highest first; ties keep input pair order.
    pub fn resolve_all(&self, drugs: &[&str]) -> Result<Vec<InteractionVerdict>> {
        let mut distinct: Vec<&str> = Vec::new();
        for &name in drugs {
            if !distinct.contains(&name) {
                distinct.push(name);
            }
        }

        if distinct.len() < 2 {
            return Err(RxCheckError::InvalidInput {
                message: "at least two different drugs are required".to_string(),
            });
        }

        let mut classified = Vec::with_capacity(distinct.len());
        let mut unknown = Vec::new();
        for name in &distinct {
            match self.classify_checked(name) {
                Some(classification) => classified.push(classification),
                None => unknown.push(name.to_string()),
            }
        }
        if !unknown.is_empty() {
            return Err(RxCheckError::UnknownDrug { names: unknown });
        }

        let mut verdicts = Vec::new();
        for (i, a) in classified.iter().enumerate() {
            for b in &classified[i + 1..] {
                verdicts.push(self.resolve_classified(a.clone(), b.clone()));
            }
        }
        verdicts.sort_by(|x, y| y.severity.cmp(&x.severity));
        Ok(verdicts)
    }

    /// Classifies a single drug, applying strict mode.
    pub fn classify(&self, name: &str) -> Result<Classification> {
        self.classify_checked(name)
            .ok_or_else(|| RxCheckError::UnknownDrug {
                names: vec![name.to_string()],
            })
    }

    // ------------------------------------------------------------------
    // Private helpers
    // ------------------------------------------------------------------

    /// Risk, detail and synthesis for two already classified drugs.
    fn resolve_classified(&self, a: Classification, b: Classification) -> InteractionVerdict {
        let risk = self.knowledge.risk().assess(a.category, b.category);
        let detail = self
            .knowledge
            .detail()
            .lookup(a.category, b.category, risk.severity);

        debug!(
            drug_a = %a.name,
            drug_b = %b.name,
            pair = %CategoryPair::new(a.category, b.category),
            severity = risk.severity.as_str(),
            confidence = risk.confidence,
            "interaction resolved"
        );

        synthesis::assemble(a, b, risk, detail)
    }

    /// Catalog classification, with `unknown` treated as not found in strict
    /// mode. Logs a warning when the category did not come from a membership
    /// list.
    fn classify_checked(&self, name: &str) -> Option<Classification> {
        let classification = self.knowledge.catalog().classify(name)?;

        match classification.source {
            ClassificationSource::Membership => {}
            ClassificationSource::Keyword => {
                warn!(
                    drug = name,
                    category = classification.category.as_str(),
                    "category inferred from description keyword"
                );
            }
            ClassificationSource::Unclassified => {
                if self.strict {
                    debug!(drug = name, "rejected: category unknown in strict mode");
                    return None;
                }
                warn!(drug = name, "no category matched; treating as unknown");
            }
        }

        Some(classification)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    use super::*;

    #[test]
    fn test_identical_checked_before_lookup() {
        let kb = KnowledgeBase::builtin();
        let resolver = InteractionResolver::new(&kb);
        let err = resolver.resolve("NotARealDrug", "NotARealDrug").unwrap_err();
        assert!(matches!(err, RxCheckError::IdenticalDrug { name } if name == "NotARealDrug"));
    }

    #[test]
    fn test_resolve_all_sorted_by_severity() {
        let kb = KnowledgeBase::builtin();
        let resolver = InteractionResolver::new(&kb);
        let verdicts = resolver
            .resolve_all(&["Metformin", "Warfarin", "Aspirin", "Aspirin"])
            .unwrap();
        assert_eq!(verdicts.len(), 3);
        assert_eq!(verdicts[0].severity, Severity::High);
        for pair in verdicts.windows(2) {
            assert!(pair[0].severity >= pair[1].severity);
        }
    }

    #[test]
    fn test_resolve_all_needs_two_drugs() {
        let kb = KnowledgeBase::builtin();
        let resolver = InteractionResolver::new(&kb);
        let err = resolver.resolve_all(&["Aspirin", "Aspirin"]).unwrap_err();
        assert!(matches!(err, RxCheckError::InvalidInput { .. }));
    }

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_resolve_all_classifies_each_drug_once() {
        let kb = KnowledgeBase::builtin();
        let resolver = InteractionResolver::new(&kb);
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&warnings)));

        let verdicts = tracing::subscriber::with_default(subscriber, || {
            resolver.resolve_all(&["Hydralazine", "Warfarin", "Aspirin"])
        })
        .expect("failed to resolve drugs");

        assert_eq!(verdicts.len(), 3);
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_resolve_all_matches_pairwise_resolve() {
        let kb = KnowledgeBase::builtin();
        let resolver = InteractionResolver::new(&kb);
        let all = resolver
            .resolve_all(&["Sertraline", "Tramadol"])
            .expect("failed to resolve drugs");
        let single = resolver
            .resolve("Sertraline", "Tramadol")
            .expect("failed to resolve pair");
        assert_eq!(all, vec![single]);
    }
}
