use std::fs;
use std::time::Duration;

use tempfile::TempDir;

use lexcap_core::config::{Config, EngineKind, Settings};
use lexcap_core::pacing::{NoPause, Pacer, Pause, SleepPacer};
use lexcap_core::types::{is_actionable_query, AccessLevel, ConfidenceBand, ItemType};
use lexcap_core::{Error, KnowledgeBase};

#[test]
fn bundled_knowledge_base_loads_all_records() {
    let kb = KnowledgeBase::bundled().expect("bundled");
    assert_eq!(kb.len(), 35);
    let first = kb.get("kb-001").expect("kb-001");
    assert_eq!(first.item_type, ItemType::Contract);
    assert_eq!(first.jurisdiction.as_deref(), Some("New York"));
    assert!(first.tags.iter().any(|t| t == "MAC"));
    assert_eq!(first.related_items, vec!["kb-002", "kb-003", "kb-015"]);
}

#[test]
fn bundled_ids_are_distinct() {
    let kb = KnowledgeBase::bundled().expect("bundled");
    let mut ids: Vec<&str> = kb.items().iter().map(|i| i.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), kb.len());
}

#[test]
fn extra_directory_adds_and_replaces_records() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("nested");
    fs::create_dir_all(&nested).unwrap();

    let mut replacement = KnowledgeBase::bundled().unwrap().get("kb-002").unwrap().clone();
    replacement.title = "Replaced title".to_string();
    let mut fresh = replacement.clone();
    fresh.id = "kb-900".to_string();
    fresh.title = "Freshly captured memo".to_string();

    fs::write(tmp.path().join("a.json"), serde_json::to_string(&replacement).unwrap()).unwrap();
    fs::write(nested.join("b.json"), serde_json::to_string(&vec![fresh]).unwrap()).unwrap();
    fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

    let kb = KnowledgeBase::load(Some(tmp.path())).expect("load");
    assert_eq!(kb.len(), 36);
    assert_eq!(kb.get("kb-002").unwrap().title, "Replaced title");
    assert_eq!(kb.get("kb-900").unwrap().title, "Freshly captured memo");
}

#[test]
fn malformed_extra_file_reports_its_path() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.json"), "{ not json").unwrap();

    let err = KnowledgeBase::load(Some(tmp.path())).unwrap_err();
    match err {
        Error::Dataset { name, .. } => assert!(name.ends_with("broken.json")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_extra_directory_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = KnowledgeBase::load(Some(&tmp.path().join("absent"))).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn access_levels_follow_department_then_wall_flag() {
    let kb = KnowledgeBase::bundled().unwrap();
    let mut item = kb.get("kb-001").unwrap().clone();
    assert_eq!(item.access_level(), AccessLevel::PartnerAccess);

    item.department = Some("Litigation".to_string());
    item.ethical_wall_compliant = true;
    assert_eq!(item.access_level(), AccessLevel::Public);

    item.ethical_wall_compliant = false;
    assert_eq!(item.access_level(), AccessLevel::Confidential);
    assert_eq!(AccessLevel::Confidential.label(), "Confidential");
}

#[test]
fn item_type_parses_case_insensitively() {
    assert_eq!("Memo".parse::<ItemType>().unwrap(), ItemType::Memo);
    assert!("treatise".parse::<ItemType>().is_err());
}

#[test]
fn confidence_bands_and_query_trigger() {
    assert_eq!(ConfidenceBand::from_score(0.95), ConfidenceBand::VeryHigh);
    assert_eq!(ConfidenceBand::from_score(0.7), ConfidenceBand::High);
    assert_eq!(ConfidenceBand::from_score(0.5), ConfidenceBand::Moderate);
    assert_eq!(ConfidenceBand::from_score(0.1), ConfidenceBand::Low);

    assert!(!is_actionable_query("  ip ", 3));
    assert!(is_actionable_query("mac", 3));
}

#[test]
fn config_defaults_without_files() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_from(tmp.path(), "dev").expect("load");
    let settings = config.settings().unwrap();
    assert_eq!(settings.search.limit, 20);
    assert_eq!(settings.search.engine, EngineKind::Semantic);
    assert_eq!(settings.graph.category_cap, 5);
    assert!((settings.roi.hourly_rate - 600.0).abs() < f64::EPSILON);
}

#[test]
fn env_file_overrides_base_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[search]\nengine = \"bm25\"\nlimit = 15\n\n[data]\nexport_dir = \"out\"\n",
    )
    .unwrap();
    fs::write(tmp.path().join("config.prod.toml"), "[search]\nlimit = 10\n").unwrap();

    let config = Config::load_from(tmp.path(), "prod").expect("load");
    let settings = config.settings().unwrap();
    assert_eq!(settings.search.engine, EngineKind::Bm25);
    assert_eq!(settings.search.limit, 10);
    assert_eq!(config.get::<String>("data.export_dir").unwrap(), "out");
    assert_eq!(config.resolve("out"), tmp.path().join("out"));

    // Unknown environments only read the base file.
    let other = Config::load_from(tmp.path(), "staging").unwrap();
    assert_eq!(other.settings().unwrap().search.limit, 15);
}

#[test]
fn invalid_settings_are_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[search]\nscore_divisor = 0.0\n").unwrap();
    let err = Config::load_from(tmp.path(), "dev").err().expect("invalid");
    assert!(matches!(err, Error::InvalidConfig(_)));

    let mut settings = Settings::default();
    settings.search.score_cap = 1.5;
    assert!(settings.validate().is_err());
}

#[test]
fn pacers_report_their_delay() {
    assert_eq!(NoPause.pause(Pause::Answer), Duration::ZERO);

    let mut settings = lexcap_core::config::PacingSettings::default();
    settings.search_ms = 1;
    let pacer = SleepPacer::from_settings(&settings);
    assert_eq!(pacer.duration(Pause::Search), Duration::from_millis(1));
    assert_eq!(pacer.duration(Pause::Analysis), Duration::from_millis(2000));
    assert_eq!(pacer.pause(Pause::Search), Duration::from_millis(1));
}
