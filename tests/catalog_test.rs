use rxcheck::catalog::*;
use rxcheck::types::*;

#[test]
fn test_membership_precedence_aspirin_is_painkiller() {
    let catalog = DrugCatalog::builtin();
    let c = catalog.classify("Aspirin").expect("drug should classify");
    assert_eq!(c.category, Category::Painkillers);
    assert_eq!(c.source, ClassificationSource::Membership);
}

#[test]
fn test_membership_members() {
    let catalog = DrugCatalog::builtin();
    assert_eq!(catalog.classify("Warfarin").expect("drug should classify").category, Category::Anticoagulants);
    assert_eq!(catalog.classify("Metformin").expect("drug should classify").category, Category::Diabetes);
    assert_eq!(catalog.classify("Lisinopril").expect("drug should classify").category, Category::Cardiovascular);
    assert_eq!(catalog.classify("Gabapentin").expect("drug should classify").category, Category::Neurological);
}

#[test]
fn test_member_without_record_gets_placeholder_description() {
    let catalog = DrugCatalog::builtin();
    let c = catalog.classify("Heparin").expect("drug should classify");
    assert_eq!(c.category, Category::Anticoagulants);
    assert_eq!(c.description, NO_DESCRIPTION);
}

#[test]
fn test_keyword_fallback_blood_pressure() {
    let catalog = DrugCatalog::builtin();
    let c = catalog.classify("Hydralazine").expect("drug should classify");
    assert_eq!(c.category, Category::Cardiovascular);
    assert_eq!(c.source, ClassificationSource::Keyword);
}

#[test]
fn test_keyword_fallback_other_categories() {
    let catalog = DrugCatalog::builtin();
    assert_eq!(catalog.classify("Nitrofurantoin").expect("drug should classify").category, Category::Antibiotics);
    assert_eq!(catalog.classify("Melatonin").expect("drug should classify").category, Category::Hormones);
    assert_eq!(catalog.classify("St. John's Wort").expect("drug should classify").category, Category::Psychiatric);
}

#[test]
fn test_unclassified_record_is_unknown_without_error() {
    let catalog = DrugCatalog::builtin();
    let c = catalog.classify("Vitamin D3").expect("drug should classify");
    assert_eq!(c.category, Category::Unknown);
    assert_eq!(c.source, ClassificationSource::Unclassified);
}

#[test]
fn test_unknown_name_is_none() {
    let catalog = DrugCatalog::builtin();
    assert!(catalog.classify("NotARealDrug").is_none());
    assert!(catalog.classify("aspirin").is_none());
    assert!(!catalog.contains("NotARealDrug"));
}

#[test]
fn test_drug_names_sorted_and_deduplicated() {
    let catalog = DrugCatalog::builtin();
    let names = catalog.drug_names();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(names, sorted);
    assert_eq!(names.iter().filter(|n| *n == "Aspirin").count(), 1);
}

#[test]
fn test_drugs_in_category() {
    let catalog = DrugCatalog::builtin();
    let cardio = catalog.drugs_in(Category::Cardiovascular);
    assert!(cardio.contains(&"Lisinopril".to_string()));
    assert!(cardio.contains(&"Hydralazine".to_string()));
    assert!(!catalog
        .drugs_in(Category::Anticoagulants)
        .contains(&"Aspirin".to_string()));
    assert_eq!(catalog.drugs_in(Category::Unknown), vec!["Vitamin D3".to_string()]);
}

#[test]
fn test_search_is_case_insensitive() {
    let catalog = DrugCatalog::builtin();
    let hits = catalog.search("PRIL");
    assert!(hits.contains(&"Lisinopril".to_string()));
    assert!(hits.iter().all(|h| h.to_lowercase().contains("pril")));
    assert_eq!(catalog.search("").len(), catalog.drug_names().len());
}

#[test]
fn test_record_lookup() {
    let catalog = DrugCatalog::builtin();
    let record = catalog.record("Lisinopril").unwrap();
    assert_eq!(record.generic_name, "lisinopril");
    assert!(!record.side_effects.is_empty());
    assert!(catalog.record("Heparin").is_none());
}

#[test]
fn test_keyword_rule_order_first_match_wins() {
    let rules = default_rules();
    let rule = match_keyword(&rules, "Prevents clots after heart surgery").unwrap();
    assert_eq!(rule.category, Category::Anticoagulants);
}

#[test]
fn test_rejects_empty_keyword() {
    let result = DrugCatalog::new(
        vec![],
        vec![],
        vec![KeywordRule::new("  ", Category::Diabetes)],
    );
    assert!(result.is_err());
}
