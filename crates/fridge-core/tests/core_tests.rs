use std::fs;
use tempfile::TempDir;

use fridge_core::cleaner::clean;
use fridge_core::config::CleanerConfig;
use fridge_core::error::Error;
use fridge_core::normalize::{ingredient_key, normalize, singularize};
use fridge_core::ratings::{RatingRecord, RatingsLog, Relevance, Verdict, CSV_HEADER};
use fridge_core::types::DetectedIngredient;

fn det(name: &str, confidence: f32) -> DetectedIngredient {
    DetectedIngredient {
        name: name.to_string(),
        confidence,
    }
}

#[test]
fn normalize_strips_accents_and_case() {
    assert_eq!(normalize("  Café "), "cafe");
    assert_eq!(normalize("JALAPEÑO"), "jalapeno");
    assert_eq!(normalize(""), "");
}

#[test]
fn normalize_is_idempotent() {
    for s in ["Café", "azúcar morena", "HUEVOS", "ya normalizado"] {
        let once = normalize(s);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn singularize_naive_forms() {
    assert_eq!(singularize("tomatoes"), "tomato");
    assert_eq!(singularize("huevos"), "huevo");
    assert_eq!(singularize("couscouss"), "couscouss");
    assert_eq!(singularize("queso"), "queso");
}

#[test]
fn ingredient_key_combines_both() {
    assert_eq!(ingredient_key("Tomates "), "tomate");
}

#[test]
fn clean_filters_dedups_and_keeps_highest_confidence() {
    // min_confidence=0.65; tomate appears twice, queso is below threshold
    let config = CleanerConfig {
        min_confidence: 0.65,
        ..CleanerConfig::default()
    };
    let detections = vec![det("tomate", 0.9), det("queso", 0.5), det("tomate", 0.95)];
    let cleaned = clean(&detections, &config).expect("clean");
    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned[0].name, "tomate");
    assert!((cleaned[0].confidence - 0.95).abs() < f32::EPSILON);
}

#[test]
fn clean_drops_discard_listed_labels() {
    let config = CleanerConfig::default();
    let detections = vec![det("Agua", 0.99), det("botella", 0.9), det("huevo", 0.8)];
    let cleaned = clean(&detections, &config).expect("clean");
    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned[0].name, "huevo");
}

#[test]
fn clean_discard_is_injectable() {
    let config = CleanerConfig {
        min_confidence: 0.0,
        discard: vec!["huevo".to_string()],
    };
    let cleaned = clean(&[det("huevo", 0.9), det("agua", 0.9)], &config).expect("clean");
    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned[0].name, "agua");
}

#[test]
fn clean_preserves_descending_confidence_order() {
    let config = CleanerConfig {
        min_confidence: 0.1,
        discard: vec![],
    };
    let detections = vec![det("pan", 0.4), det("leche", 0.9), det("queso", 0.7)];
    let cleaned = clean(&detections, &config).expect("clean");
    let confidences: Vec<f32> = cleaned.iter().map(|d| d.confidence).collect();
    assert_eq!(confidences, vec![0.9, 0.7, 0.4]);
}

#[test]
fn clean_dedups_singular_and_plural_forms() {
    let config = CleanerConfig {
        min_confidence: 0.0,
        discard: vec![],
    };
    let cleaned = clean(&[det("huevos", 0.9), det("huevo", 0.8)], &config).expect("clean");
    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned[0].name, "huevos");
}

#[test]
fn clean_rejects_out_of_range_confidence() {
    let config = CleanerConfig {
        min_confidence: 1.5,
        discard: vec![],
    };
    match clean(&[det("huevo", 0.9)], &config) {
        Err(Error::Range(_)) => {}
        other => panic!("expected Range error, got {other:?}"),
    }
}

#[test]
fn ratings_log_writes_header_once() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("ratings.csv");
    let log = RatingsLog::new(&path);

    let record = RatingRecord::new(
        "Tortilla De Patatas",
        "100%",
        &["huevo".to_string(), "patata".to_string()],
        Verdict::Liked,
        Relevance::UsesWhatIHave,
    );
    log.append(&record).expect("first append");
    log.append(&record).expect("second append");

    let contents = fs::read_to_string(&path).expect("read log");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADER);
    // comma-joined ingredient list gets quoted
    assert!(lines[1].contains("\"huevo, patata\""));
    assert!(lines[1].contains("me gusta"));
}
