use std::sync::Arc;
use std::thread;

use rxcheck::config::RxCheckConfig;
use rxcheck::errors::RxCheckError;
use rxcheck::knowledge::KnowledgeBase;
use rxcheck::service::RxCheck;
use rxcheck::types::*;
use tempfile::TempDir;

#[test]
fn test_operations_before_initialize_fail() {
    let rx = RxCheck::new(RxCheckConfig::default());
    assert!(!rx.is_initialized());
    assert!(matches!(
        rx.resolve("Warfarin", "Aspirin"),
        Err(RxCheckError::NotInitialized)
    ));
    assert!(matches!(rx.drug_names(), Err(RxCheckError::NotInitialized)));
    assert!(matches!(rx.stats(), Err(RxCheckError::NotInitialized)));
    assert!(matches!(
        rx.predict_side_effects(&["Aspirin"], &PatientProfile::default()),
        Err(RxCheckError::NotInitialized)
    ));
}

#[test]
fn test_open_loads_builtin() {
    let rx = RxCheck::open(RxCheckConfig::default()).expect("failed to open rxcheck");
    assert!(rx.is_initialized());
    assert_eq!(rx.load_count(), 1);

    let verdict = rx.resolve("Warfarin", "Aspirin").expect("failed to resolve pair");
    assert_eq!(verdict.severity, Severity::High);
    assert_eq!(
        rx.stats().unwrap().fingerprint,
        KnowledgeBase::shared_builtin().fingerprint()
    );
}

#[test]
fn test_initialize_is_idempotent() {
    let rx = RxCheck::new(RxCheckConfig::default());
    rx.initialize().expect("failed to initialize");
    rx.initialize().expect("failed to initialize");
    assert_eq!(rx.load_count(), 1);
}

#[test]
fn test_concurrent_initialize_loads_once() {
    let rx = Arc::new(RxCheck::new(RxCheckConfig::default()));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let rx = Arc::clone(&rx);
            thread::spawn(move || {
                rx.initialize().expect("failed to initialize");
                Arc::as_ptr(&rx.knowledge().unwrap()) as usize
            })
        })
        .collect();

    let pointers: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(rx.load_count(), 1);
    assert!(pointers.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_install_fixture_first_wins() {
    let fixture = r#"{
        "drugs": [
            {"name": "Calmex", "generic_name": "calmex", "description": "Relieves anxiety."},
            {"name": "Sootha", "generic_name": "sootha", "description": "For depression."}
        ],
        "high_risk": [["psychiatric", "psychiatric"]]
    }"#;

    let rx = RxCheck::new(RxCheckConfig::default());
    let kb = KnowledgeBase::from_json_str(fixture).expect("failed to load knowledge");
    assert!(rx.install(kb));
    assert!(!rx.install(KnowledgeBase::builtin()));
    rx.initialize().expect("failed to initialize");
    assert_eq!(rx.load_count(), 1);

    let verdict = rx.resolve("Calmex", "Sootha").expect("failed to resolve pair");
    assert_eq!(verdict.severity, Severity::High);
    assert!(matches!(
        rx.resolve("Warfarin", "Aspirin"),
        Err(RxCheckError::UnknownDrug { .. })
    ));
}

#[test]
fn test_knowledge_path_from_config() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("knowledge.json");
    let json = KnowledgeBase::builtin()
        .to_json_pretty()
        .expect("failed to serialize knowledge");
    std::fs::write(&path, json).expect("failed to write file");

    let config = RxCheckConfig {
        knowledge_path: Some(path.to_string_lossy().to_string()),
        ..RxCheckConfig::default()
    };
    let rx = RxCheck::open(config).expect("failed to open rxcheck");
    assert_eq!(
        rx.stats().unwrap().fingerprint,
        KnowledgeBase::builtin().fingerprint()
    );
}

#[test]
fn test_bad_knowledge_path_fails_open() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = RxCheckConfig {
        knowledge_path: Some(dir.path().join("missing.json").to_string_lossy().to_string()),
        ..RxCheckConfig::default()
    };
    assert!(RxCheck::open(config).is_err());
}

#[test]
fn test_strict_config_reaches_resolver() {
    let config = RxCheckConfig {
        strict_classification: true,
        ..RxCheckConfig::default()
    };
    let rx = RxCheck::open(config).expect("failed to open rxcheck");
    assert!(matches!(
        rx.resolve("Vitamin D3", "Aspirin"),
        Err(RxCheckError::UnknownDrug { .. })
    ));
    assert!(rx.classify("Vitamin D3").is_err());
}

#[test]
fn test_service_listing_operations() {
    let rx = RxCheck::open(RxCheckConfig::default()).expect("failed to open rxcheck");
    assert!(rx.drug_names().unwrap().contains(&"Warfarin".to_string()));
    assert!(rx
        .drugs_in(Category::Respiratory)
        .unwrap()
        .contains(&"Albuterol".to_string()));
    assert_eq!(rx.search("metf").unwrap(), vec!["Metformin".to_string()]);
}

#[test]
fn test_resolver_shared_across_threads() {
    let kb = KnowledgeBase::shared_builtin();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(move || {
                let resolver = rxcheck::resolution::InteractionResolver::new(kb);
                serde_json::to_string(&resolver.resolve("Sertraline", "Tramadol").expect("failed to resolve pair"))
                    .unwrap()
            })
        })
        .collect();
    let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
}
