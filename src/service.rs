use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

use tracing::info;

use crate::config::RxCheckConfig;
use crate::errors::{Result, RxCheckError};
use crate::knowledge::KnowledgeBase;
use crate::resolution::InteractionResolver;
use crate::side_effects::SideEffectPredictor;
use crate::types::*;

/// Central orchestrator: owns the configuration and, once loaded, the
/// knowledge base every operation reads from.
pub struct RxCheck {
    config: RxCheckConfig,
    knowledge: OnceLock<Arc<KnowledgeBase>>,
    /// Serializes loaders so the knowledge file is read at most once.
    init_lock: Mutex<()>,
    loads: AtomicUsize,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

impl RxCheck {
    /// Creates a service with nothing loaded yet.
    pub fn new(config: RxCheckConfig) -> Self {
        Self {
            config,
            knowledge: OnceLock::new(),
            init_lock: Mutex::new(()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Creates a service and loads its knowledge base immediately.
    pub fn open(config: RxCheckConfig) -> Result<Self> {
        let service = Self::new(config);
        service.initialize()?;
        Ok(service)
    }

    /// Loads the knowledge base from `config.knowledge_path`, or the built-in
    /// tables when no path is configured.
    ///
    /// Safe to call from many threads at once: exactly one caller performs
    /// the load and the rest observe its result. Later calls are no-ops.
    pub fn initialize(&self) -> Result<()> {
        if self.knowledge.get().is_some() {
            return Ok(());
        }

        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.knowledge.get().is_some() {
            return Ok(());
        }

        let start = Instant::now();
        let kb = match &self.config.knowledge_path {
            Some(path) => KnowledgeBase::from_json_file(Path::new(path))?,
            None => KnowledgeBase::builtin(),
        };
        self.loads.fetch_add(1, Ordering::SeqCst);

        info!(
            fingerprint = kb.fingerprint(),
            source = self.config.knowledge_path.as_deref().unwrap_or("builtin"),
            duration_ms = start.elapsed().as_millis() as u64,
            "knowledge base initialized"
        );

        // Cannot already be set: every setter holds `init_lock`.
        let _ = self.knowledge.set(Arc::new(kb));
        Ok(())
    }

    /// Installs a prebuilt knowledge base, typically a test fixture.
    ///
    /// Returns `false` and leaves the current tables in place if the service
    /// is already initialized.
    pub fn install(&self, kb: KnowledgeBase) -> bool {
        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let installed = self.knowledge.set(Arc::new(kb)).is_ok();
        if installed {
            self.loads.fetch_add(1, Ordering::SeqCst);
        }
        installed
    }

    pub fn is_initialized(&self) -> bool {
        self.knowledge.get().is_some()
    }

    /// Number of times a knowledge base has been loaded or installed; never
    /// more than one.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &RxCheckConfig {
        &self.config
    }

    /// The loaded knowledge base.
    pub fn knowledge(&self) -> Result<Arc<KnowledgeBase>> {
        self.knowledge
            .get()
            .cloned()
            .ok_or(RxCheckError::NotInitialized)
    }

    fn loaded(&self) -> Result<&KnowledgeBase> {
        self.knowledge
            .get()
            .map(|kb| kb.as_ref())
            .ok_or(RxCheckError::NotInitialized)
    }

    fn resolver(&self) -> Result<InteractionResolver<'_>> {
        Ok(InteractionResolver::new(self.loaded()?)
            .with_strict_classification(self.config.strict_classification))
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

impl RxCheck {
    /// Checks two drugs against each other.
    pub fn resolve(&self, drug_a: &str, drug_b: &str) -> Result<InteractionVerdict> {
        self.resolver()?.resolve(drug_a, drug_b)
    }

    /// Checks every distinct pair among `drugs`, highest severity first.
    pub fn resolve_all(&self, drugs: &[&str]) -> Result<Vec<InteractionVerdict>> {
        self.resolver()?.resolve_all(drugs)
    }

    pub fn classify(&self, name: &str) -> Result<Classification> {
        self.resolver()?.classify(name)
    }

    /// All known drug names, sorted.
    pub fn drug_names(&self) -> Result<Vec<String>> {
        Ok(self.loaded()?.catalog().drug_names())
    }

    pub fn drugs_in(&self, category: Category) -> Result<Vec<String>> {
        Ok(self.loaded()?.catalog().drugs_in(category))
    }

    /// Case-insensitive name search for drug pickers.
    pub fn search(&self, term: &str) -> Result<Vec<String>> {
        Ok(self.loaded()?.catalog().search(term))
    }

    pub fn predict_side_effects(
        &self,
        drugs: &[&str],
        profile: &PatientProfile,
    ) -> Result<Vec<PredictedSideEffect>> {
        SideEffectPredictor::new(self.loaded()?).predict(drugs, profile)
    }

    pub fn stats(&self) -> Result<KnowledgeStats> {
        Ok(self.loaded()?.stats())
    }
}
