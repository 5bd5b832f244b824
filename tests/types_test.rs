use rxcheck::types::*;

#[test]
fn test_category_roundtrip() {
    for category in Category::ALL {
        assert_eq!(Category::from_str(category.as_str()), Some(category));
    }
    assert_eq!(Category::from_str("Cardiovascular"), None);
    assert_eq!(Category::from_str("vitamins"), None);
}

#[test]
fn test_category_enumeration_order() {
    assert!(Category::Cardiovascular < Category::Antibiotics);
    assert!(Category::Painkillers < Category::Anticoagulants);
    assert_eq!(Category::ALL.last(), Some(&Category::Unknown));
}

#[test]
fn test_category_pair_normalizes() {
    let ab = CategoryPair::new(Category::Anticoagulants, Category::Painkillers);
    let ba = CategoryPair::new(Category::Painkillers, Category::Anticoagulants);
    assert_eq!(ab, ba);
    assert_eq!(ab.first(), Category::Painkillers);
    assert_eq!(ab.second(), Category::Anticoagulants);
    assert_eq!(ab.to_string(), "painkillers+anticoagulants");
}

#[test]
fn test_category_pair_serde_normalizes() {
    let pair: CategoryPair = serde_json::from_str(r#"["hormones", "diabetes"]"#).unwrap();
    assert_eq!(pair, CategoryPair::new(Category::Diabetes, Category::Hormones));
    assert_eq!(serde_json::to_string(&pair).unwrap(), r#"["diabetes","hormones"]"#);
}

#[test]
fn test_category_pair_flags() {
    assert!(CategoryPair::new(Category::Psychiatric, Category::Psychiatric).is_self_pair());
    assert!(CategoryPair::new(Category::Unknown, Category::Diabetes).involves_unknown());
    assert!(!CategoryPair::new(Category::Diabetes, Category::Hormones).involves_unknown());
}

#[test]
fn test_severity_ordering() {
    assert!(Severity::High > Severity::Moderate);
    assert!(Severity::Moderate > Severity::Low);
    assert_eq!(Severity::from_str("moderate"), Some(Severity::Moderate));
    assert_eq!(Severity::High.to_string(), "high");
}

#[test]
fn test_medical_condition_accepts_both_spellings() {
    assert_eq!(
        MedicalCondition::from_str("heart-disease"),
        Some(MedicalCondition::HeartDisease)
    );
    assert_eq!(
        MedicalCondition::from_str("kidney_disease"),
        Some(MedicalCondition::KidneyDisease)
    );
    assert_eq!(MedicalCondition::from_str("flu"), None);
}

#[test]
fn test_patient_profile_deserializes_with_defaults() {
    let profile: PatientProfile =
        serde_json::from_str(r#"{"age": 72, "sex": "female", "weight_kg": null, "height_cm": null}"#)
            .unwrap();
    assert_eq!(profile.age, 72);
    assert_eq!(profile.sex, Sex::Female);
    assert!(profile.conditions.is_empty());
}

#[test]
fn test_output_format_parsing() {
    assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
    assert_eq!(OutputFormat::from_str("md"), Some(OutputFormat::Markdown));
    assert_eq!(OutputFormat::from_str("xml"), None);
}
