use std::fmt;

use serde::{Deserialize, Serialize};

/// Therapeutic class a drug is classified into.
///
/// Declaration order is significant: it is the fixed enumeration order used
/// when a drug appears in more than one membership list (earlier wins) and
/// when normalizing a [`CategoryPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cardiovascular,
    Antibiotics,
    Psychiatric,
    Painkillers,
    Diabetes,
    Anticoagulants,
    Respiratory,
    Gastrointestinal,
    Hormones,
    Neurological,
    Unknown,
}

#[allow(clippy::should_implement_trait)]
impl Category {
    /// Every category in enumeration order.
    pub const ALL: [Category; 11] = [
        Category::Cardiovascular,
        Category::Antibiotics,
        Category::Psychiatric,
        Category::Painkillers,
        Category::Diabetes,
        Category::Anticoagulants,
        Category::Respiratory,
        Category::Gastrointestinal,
        Category::Hormones,
        Category::Neurological,
        Category::Unknown,
    ];

    /// Returns the string representation of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cardiovascular => "cardiovascular",
            Category::Antibiotics => "antibiotics",
            Category::Psychiatric => "psychiatric",
            Category::Painkillers => "painkillers",
            Category::Diabetes => "diabetes",
            Category::Anticoagulants => "anticoagulants",
            Category::Respiratory => "respiratory",
            Category::Gastrointestinal => "gastrointestinal",
            Category::Hormones => "hormones",
            Category::Neurological => "neurological",
            Category::Unknown => "unknown",
        }
    }

    /// Parses a string into a `Category`, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-tier risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

#[allow(clippy::should_implement_trait)]
impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Severity> {
        match s {
            "low" => Some(Severity::Low),
            "moderate" => Some(Severity::Moderate),
            "high" => Some(Severity::High),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative frequency of a known side effect, ordered rare < common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Probability {
    Rare,
    Uncommon,
    Common,
}

impl Probability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Probability::Rare => "rare",
            Probability::Uncommon => "uncommon",
            Probability::Common => "common",
        }
    }
}

/// Descriptive interaction class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    Pharmacodynamic,
    Pharmacokinetic,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::Pharmacodynamic => "pharmacodynamic",
            InteractionType::Pharmacokinetic => "pharmacokinetic",
        }
    }
}

/// Body-system tag listed in a verdict's affected systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySystem {
    Cardiovascular,
    Hematologic,
    Renal,
    Hepatic,
    Metabolic,
    Gastrointestinal,
    CentralNervous,
    Respiratory,
    Endocrine,
    Musculoskeletal,
    Systemic,
}

impl BodySystem {
    /// Returns the snake_case identifier of this system.
    pub fn as_str(&self) -> &'static str {
        match self {
            BodySystem::Cardiovascular => "cardiovascular",
            BodySystem::Hematologic => "hematologic",
            BodySystem::Renal => "renal",
            BodySystem::Hepatic => "hepatic",
            BodySystem::Metabolic => "metabolic",
            BodySystem::Gastrointestinal => "gastrointestinal",
            BodySystem::CentralNervous => "central_nervous",
            BodySystem::Respiratory => "respiratory",
            BodySystem::Endocrine => "endocrine",
            BodySystem::Musculoskeletal => "musculoskeletal",
            BodySystem::Systemic => "systemic",
        }
    }

    /// Human-readable label used in rendered text.
    pub fn label(&self) -> &'static str {
        match self {
            BodySystem::Cardiovascular => "Cardiovascular",
            BodySystem::Hematologic => "Hematologic",
            BodySystem::Renal => "Renal",
            BodySystem::Hepatic => "Hepatic",
            BodySystem::Metabolic => "Metabolic",
            BodySystem::Gastrointestinal => "Gastrointestinal",
            BodySystem::CentralNervous => "Central Nervous System",
            BodySystem::Respiratory => "Respiratory",
            BodySystem::Endocrine => "Endocrine",
            BodySystem::Musculoskeletal => "Musculoskeletal",
            BodySystem::Systemic => "Minor systemic effects",
        }
    }
}

/// A known side effect of a drug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideEffect {
    pub effect: String,
    pub probability: Probability,
}

/// Immutable reference record for a drug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugRecord {
    pub name: String,
    pub generic_name: String,
    pub description: String,
    #[serde(default)]
    pub side_effects: Vec<SideEffect>,
}

/// An unordered pair of categories, stored normalized so that
/// `first <= second` in enumeration order.
///
/// The fields are private: the only way to build a pair is through
/// [`CategoryPair::new`], so `(x, y)` and `(y, x)` are always the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[Category; 2]", into = "[Category; 2]")]
pub struct CategoryPair {
    first: Category,
    second: Category,
}

impl CategoryPair {
    pub fn new(a: Category, b: Category) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> Category {
        self.first
    }

    pub fn second(&self) -> Category {
        self.second
    }

    /// Returns `true` if both sides are the same category.
    pub fn is_self_pair(&self) -> bool {
        self.first == self.second
    }

    /// Returns `true` if either side is `unknown`.
    pub fn involves_unknown(&self) -> bool {
        self.first == Category::Unknown || self.second == Category::Unknown
    }
}

impl From<[Category; 2]> for CategoryPair {
    fn from(pair: [Category; 2]) -> Self {
        CategoryPair::new(pair[0], pair[1])
    }
}

impl From<CategoryPair> for [Category; 2] {
    fn from(pair: CategoryPair) -> Self {
        [pair.first, pair.second]
    }
}

impl fmt::Display for CategoryPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.first, self.second)
    }
}

/// How a drug's category was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    /// Listed explicitly in a category membership list.
    Membership,
    /// Inferred from a keyword rule over the drug's description.
    Keyword,
    /// Catalog record exists but no list or keyword matched.
    Unclassified,
}

impl ClassificationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationSource::Membership => "membership",
            ClassificationSource::Keyword => "keyword",
            ClassificationSource::Unclassified => "unclassified",
        }
    }
}

/// Result of classifying a single drug name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub name: String,
    pub category: Category,
    pub source: ClassificationSource,
    pub description: String,
}

/// Severity and confidence for a category pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub severity: Severity,
    pub confidence: f64,
}

/// Which branch of the detail lookup produced an [`InteractionDetail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailSource {
    Specific,
    SeverityDefault,
}

/// Mechanism and effect description for an interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionDetail {
    pub interaction_type: InteractionType,
    pub affected_systems: Vec<BodySystem>,
    pub mechanism: String,
    pub efficacy_alteration: String,
    pub toxicity_level: String,
    pub source: DetailSource,
}

/// Per-drug part of a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugSummary {
    pub name: String,
    pub category: Category,
    pub source: ClassificationSource,
    pub description: String,
}

impl From<Classification> for DrugSummary {
    fn from(c: Classification) -> Self {
        DrugSummary {
            name: c.name,
            category: c.category,
            source: c.source,
            description: c.description,
        }
    }
}

/// Complete structured result of one interaction check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionVerdict {
    pub drug_a: DrugSummary,
    pub drug_b: DrugSummary,
    pub severity: Severity,
    pub confidence: f64,
    pub interaction_type: InteractionType,
    pub affected_systems: Vec<BodySystem>,
    pub mechanism: String,
    pub efficacy_alteration: String,
    pub toxicity_level: String,
    pub monitoring: Vec<String>,
    pub recommendation: String,
    pub prediction: String,
    pub detail_source: DetailSource,
}

/// Medical conditions that raise side-effect risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicalCondition {
    Diabetes,
    Hypertension,
    HeartDisease,
    KidneyDisease,
    LiverDisease,
}

#[allow(clippy::should_implement_trait)]
impl MedicalCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicalCondition::Diabetes => "diabetes",
            MedicalCondition::Hypertension => "hypertension",
            MedicalCondition::HeartDisease => "heart_disease",
            MedicalCondition::KidneyDisease => "kidney_disease",
            MedicalCondition::LiverDisease => "liver_disease",
        }
    }

    /// Accepts both `heart_disease` and `heart-disease` spellings.
    pub fn from_str(s: &str) -> Option<MedicalCondition> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "diabetes" => Some(MedicalCondition::Diabetes),
            "hypertension" => Some(MedicalCondition::Hypertension),
            "heart_disease" => Some(MedicalCondition::HeartDisease),
            "kidney_disease" => Some(MedicalCondition::KidneyDisease),
            "liver_disease" => Some(MedicalCondition::LiverDisease),
            _ => None,
        }
    }
}

/// Biological sex as entered by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Other,
}

#[allow(clippy::should_implement_trait)]
impl Sex {
    pub fn from_str(s: &str) -> Option<Sex> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Sex::Male),
            "female" | "f" => Some(Sex::Female),
            "other" => Some(Sex::Other),
            _ => None,
        }
    }
}

/// Personal factors considered by the side-effect predictor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub age: u32,
    pub sex: Sex,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub conditions: Vec<MedicalCondition>,
}

/// A side effect predicted for a set of drugs, merged across drugs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedSideEffect {
    pub effect: String,
    pub probability: Probability,
    pub associated_drugs: Vec<String>,
    pub risk_level: Severity,
}

/// Counts describing the loaded reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeStats {
    pub drug_count: usize,
    pub record_count: usize,
    pub keyword_rule_count: usize,
    pub high_risk_pairs: usize,
    pub moderate_risk_pairs: usize,
    pub detail_records: usize,
    pub fingerprint: String,
}

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Markdown,
    Json,
}

#[allow(clippy::should_implement_trait)]
impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Option<OutputFormat> {
        match s {
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}
