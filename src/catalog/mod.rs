/// Compiled-in drug records and membership lists.
pub mod builtin;

/// Ordered description-keyword classification rules.
pub mod keywords;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{Result, RxCheckError};
use crate::types::{Category, Classification, ClassificationSource, DrugRecord};

pub use keywords::{default_rules, match_keyword, KeywordRule};

/// Description reported for drugs that only appear in a membership list.
pub const NO_DESCRIPTION: &str = "No description available for this drug.";

/// Explicit list of drug names belonging to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipList {
    pub category: Category,
    pub drugs: Vec<String>,
}

/// Immutable drug reference data.
///
/// Names are matched exactly and case-sensitively, as stored.
pub struct DrugCatalog {
    /// Records keyed by drug name.
    records: HashMap<String, DrugRecord>,
    /// Membership lists, stably sorted into enumeration order.
    membership: Vec<MembershipList>,
    /// Name -> category for the first list (in enumeration order) that
    /// contains the name.
    member_index: HashMap<String, Category>,
    keyword_rules: Vec<KeywordRule>,
}

impl DrugCatalog {
    /// Builds a catalog, validating the input.
    ///
    /// Fails when a record name is empty or duplicated, when a membership list
    /// targets `unknown`, or when a keyword rule is empty or targets `unknown`.
    pub fn new(
        records: Vec<DrugRecord>,
        membership: Vec<MembershipList>,
        keyword_rules: Vec<KeywordRule>,
    ) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for record in &records {
            if record.name.is_empty() {
                return Err(RxCheckError::Config {
                    message: "drug record with empty name".to_string(),
                });
            }
            if !seen.insert(record.name.as_str()) {
                return Err(RxCheckError::Config {
                    message: format!("duplicate drug record: {}", record.name),
                });
            }
        }

        for list in &membership {
            if list.category == Category::Unknown {
                return Err(RxCheckError::Config {
                    message: "membership list cannot target the unknown category".to_string(),
                });
            }
        }

        for rule in &keyword_rules {
            if rule.keyword.trim().is_empty() {
                return Err(RxCheckError::Config {
                    message: format!("empty keyword in rule for {}", rule.category),
                });
            }
            if rule.category == Category::Unknown {
                return Err(RxCheckError::Config {
                    message: format!("keyword rule '{}' targets the unknown category", rule.keyword),
                });
            }
        }

        Ok(Self::build(records, membership, keyword_rules))
    }

    /// The compiled-in catalog.
    pub fn builtin() -> Self {
        Self::build(builtin::records(), builtin::membership(), default_rules())
    }

    fn build(
        records: Vec<DrugRecord>,
        mut membership: Vec<MembershipList>,
        keyword_rules: Vec<KeywordRule>,
    ) -> Self {
        membership.sort_by_key(|list| list.category);

        let mut member_index = HashMap::new();
        for list in &membership {
            for name in &list.drugs {
                member_index.entry(name.clone()).or_insert(list.category);
            }
        }

        let keyword_rules = keyword_rules
            .into_iter()
            .map(|rule| KeywordRule::new(&rule.keyword, rule.category))
            .collect();

        Self {
            records: records.into_iter().map(|r| (r.name.clone(), r)).collect(),
            membership,
            member_index,
            keyword_rules,
        }
    }

    /// Classifies a drug by name.
    ///
    /// Resolution order:
    /// 1. **Membership** -- the first list in enumeration order that names
    ///    the drug.
    /// 2. **Keyword** -- the first keyword rule matching the record's
    ///    description.
    /// 3. **Unclassified** -- a record exists but nothing matched; the
    ///    category is `unknown`.
    ///
    /// Returns `None` when the name is neither listed nor recorded.
    pub fn classify(&self, name: &str) -> Option<Classification> {
        let record = self.records.get(name);

        if let Some(category) = self.member_index.get(name) {
            debug!(drug = name, category = category.as_str(), "classified by membership");
            return Some(Classification {
                name: name.to_string(),
                category: *category,
                source: ClassificationSource::Membership,
                description: describe(record),
            });
        }

        let record = record?;

        match match_keyword(&self.keyword_rules, &record.description) {
            Some(rule) => {
                debug!(
                    drug = name,
                    keyword = rule.keyword.as_str(),
                    category = rule.category.as_str(),
                    "classified by description keyword"
                );
                Some(Classification {
                    name: name.to_string(),
                    category: rule.category,
                    source: ClassificationSource::Keyword,
                    description: describe(Some(record)),
                })
            }
            None => {
                debug!(drug = name, "no membership list or keyword matched");
                Some(Classification {
                    name: name.to_string(),
                    category: Category::Unknown,
                    source: ClassificationSource::Unclassified,
                    description: describe(Some(record)),
                })
            }
        }
    }

    /// Returns `true` if the name is listed or recorded.
    pub fn contains(&self, name: &str) -> bool {
        self.member_index.contains_key(name) || self.records.contains_key(name)
    }

    /// Returns the record for a drug, if one exists.
    pub fn record(&self, name: &str) -> Option<&DrugRecord> {
        self.records.get(name)
    }

    /// All known drug names, sorted and deduplicated.
    pub fn drug_names(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self
            .records
            .keys()
            .chain(self.member_index.keys())
            .collect();
        names.into_iter().cloned().collect()
    }

    /// Known drug names whose classification is `category`, sorted.
    pub fn drugs_in(&self, category: Category) -> Vec<String> {
        self.drug_names()
            .into_iter()
            .filter(|name| {
                self.classify(name)
                    .map(|c| c.category == category)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Case-insensitive substring filter over known names. An empty term
    /// returns every name.
    pub fn search(&self, term: &str) -> Vec<String> {
        let needle = term.to_lowercase();
        self.drug_names()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Records sorted by name.
    pub fn records(&self) -> Vec<&DrugRecord> {
        let mut records: Vec<&DrugRecord> = self.records.values().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    pub fn membership(&self) -> &[MembershipList] {
        &self.membership
    }

    pub fn keyword_rules(&self) -> &[KeywordRule] {
        &self.keyword_rules
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

fn describe(record: Option<&DrugRecord>) -> String {
    match record {
        Some(r) if !r.description.trim().is_empty() => r.description.clone(),
        _ => NO_DESCRIPTION.to_string(),
    }
}
