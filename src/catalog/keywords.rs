use serde::{Deserialize, Serialize};

use crate::types::Category;

/// A single description-keyword classification rule.
///
/// Rules are evaluated in list order against the lowercased description of a
/// drug that is not in any membership list; the first rule whose keyword
/// occurs as a substring decides the category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub category: Category,
}

impl KeywordRule {
    pub fn new(keyword: &str, category: Category) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            category,
        }
    }
}

/// Returns the first rule whose keyword occurs in `description`.
///
/// Matching is case-insensitive: rule keywords are stored lowercased and the
/// description is lowercased once here.
pub fn match_keyword<'r>(rules: &'r [KeywordRule], description: &str) -> Option<&'r KeywordRule> {
    let haystack = description.to_lowercase();
    rules.iter().find(|rule| haystack.contains(&rule.keyword))
}

/// Built-in keyword rules in priority order.
///
/// A description can mention several keywords ("a blood thinner that
/// prevents heart attacks"), so the rule naming the drug's own class comes
/// first. The broad analgesic words go last since many descriptions mention
/// pain in passing.
pub fn default_rules() -> Vec<KeywordRule> {
    [
        ("blood thinner", Category::Anticoagulants),
        ("anticoagulant", Category::Anticoagulants),
        ("clot", Category::Anticoagulants),
        ("blood pressure", Category::Cardiovascular),
        ("heart", Category::Cardiovascular),
        ("cholesterol", Category::Cardiovascular),
        ("infection", Category::Antibiotics),
        ("bacteri", Category::Antibiotics),
        ("antidepressant", Category::Psychiatric),
        ("depression", Category::Psychiatric),
        ("anxiety", Category::Psychiatric),
        ("blood sugar", Category::Diabetes),
        ("diabetes", Category::Diabetes),
        ("asthma", Category::Respiratory),
        ("breathing", Category::Respiratory),
        ("stomach", Category::Gastrointestinal),
        ("nausea", Category::Gastrointestinal),
        ("hormone", Category::Hormones),
        ("thyroid", Category::Hormones),
        ("seizure", Category::Neurological),
        ("migraine", Category::Neurological),
        ("pain", Category::Painkillers),
        ("fever", Category::Painkillers),
    ]
    .into_iter()
    .map(|(keyword, category)| KeywordRule::new(keyword, category))
    .collect()
}
