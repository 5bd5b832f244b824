use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::catalog::{default_rules, DrugCatalog, KeywordRule, MembershipList};
use crate::errors::Result;
use crate::resolution::detail::{CategoryDetailTable, DetailEntry};
use crate::resolution::risk::{CategoryRiskTable, ConfidenceLevels};
use crate::types::{CategoryPair, DrugRecord, KnowledgeStats};

/// On-disk representation of a knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeFile {
    #[serde(default)]
    pub drugs: Vec<DrugRecord>,
    #[serde(default)]
    pub membership: Vec<MembershipList>,
    /// Falls back to the built-in keyword rules when absent. An explicit
    /// empty list disables the keyword fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_rules: Option<Vec<KeywordRule>>,
    #[serde(default)]
    pub high_risk: Vec<CategoryPair>,
    #[serde(default)]
    pub moderate_risk: Vec<CategoryPair>,
    #[serde(default)]
    pub details: Vec<DetailEntry>,
    /// Falls back to the built-in confidence constants when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidences: Option<ConfidenceLevels>,
}

/// Catalog, risk table and detail table, plus a fingerprint of their
/// contents.
pub struct KnowledgeBase {
    catalog: DrugCatalog,
    risk: CategoryRiskTable,
    detail: CategoryDetailTable,
    fingerprint: String,
}

static SHARED_BUILTIN: OnceLock<KnowledgeBase> = OnceLock::new();

impl KnowledgeBase {
    /// Bundles already-built tables.
    pub fn new(catalog: DrugCatalog, risk: CategoryRiskTable, detail: CategoryDetailTable) -> Self {
        let mut kb = Self {
            catalog,
            risk,
            detail,
            fingerprint: String::new(),
        };
        kb.fingerprint = fingerprint_of(&kb.to_file());
        kb
    }

    /// The compiled-in tables.
    pub fn builtin() -> Self {
        Self::new(
            DrugCatalog::builtin(),
            CategoryRiskTable::builtin(),
            CategoryDetailTable::builtin(),
        )
    }

    /// A process-wide built-in knowledge base, constructed on first use.
    pub fn shared_builtin() -> &'static KnowledgeBase {
        SHARED_BUILTIN.get_or_init(|| {
            let kb = Self::builtin();
            info!(fingerprint = kb.fingerprint(), "built-in knowledge base loaded");
            kb
        })
    }

    /// Validates a knowledge file and builds the tables from it.
    pub fn from_file(file: KnowledgeFile) -> Result<Self> {
        let keyword_rules = file.keyword_rules.unwrap_or_else(default_rules);
        let catalog = DrugCatalog::new(file.drugs, file.membership, keyword_rules)?;
        let risk = CategoryRiskTable::new(
            file.high_risk,
            file.moderate_risk,
            file.confidences.unwrap_or_default(),
        )?;
        let detail = CategoryDetailTable::new(file.details)?;
        Ok(Self::new(catalog, risk, detail))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: KnowledgeFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Loads a knowledge file from disk.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let kb = Self::from_json_str(&contents)?;
        info!(
            path = %path.display(),
            fingerprint = kb.fingerprint(),
            drugs = kb.catalog.record_count(),
            "knowledge file loaded"
        );
        Ok(kb)
    }

    /// Converts the tables back into their file representation, with every
    /// collection in a deterministic order.
    pub fn to_file(&self) -> KnowledgeFile {
        KnowledgeFile {
            drugs: self.catalog.records().into_iter().cloned().collect(),
            membership: self.catalog.membership().to_vec(),
            keyword_rules: Some(self.catalog.keyword_rules().to_vec()),
            high_risk: self.risk.high_pairs(),
            moderate_risk: self.risk.moderate_pairs(),
            details: self.detail.entries().into_iter().cloned().collect(),
            confidences: Some(self.risk.confidences()),
        }
    }

    /// Pretty JSON for the file representation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_file())?)
    }

    pub fn catalog(&self) -> &DrugCatalog {
        &self.catalog
    }

    pub fn risk(&self) -> &CategoryRiskTable {
        &self.risk
    }

    pub fn detail(&self) -> &CategoryDetailTable {
        &self.detail
    }

    /// First 16 hex characters of the SHA-256 of the canonical JSON form.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn stats(&self) -> KnowledgeStats {
        KnowledgeStats {
            drug_count: self.catalog.drug_names().len(),
            record_count: self.catalog.record_count(),
            keyword_rule_count: self.catalog.keyword_rules().len(),
            high_risk_pairs: self.risk.high_pairs().len(),
            moderate_risk_pairs: self.risk.moderate_pairs().len(),
            detail_records: self.detail.len(),
            fingerprint: self.fingerprint.clone(),
        }
    }
}

fn fingerprint_of(file: &KnowledgeFile) -> String {
    let canonical = serde_json::to_vec(file).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}
