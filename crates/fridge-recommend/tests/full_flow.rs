use std::path::PathBuf;

use fridge_core::cleaner::clean;
use fridge_core::config::CleanerConfig;
use fridge_core::types::DetectedIngredient;
use fridge_corpus::Corpus;
use fridge_recommend::Recommender;

fn repo_corpus_path() -> PathBuf {
    // crates/fridge-recommend -> crates -> repo root
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("repo root")
        .to_path_buf();
    root.join("data/recetas.json")
}

#[test]
fn shipped_corpus_full_flow() {
    let corpus = Corpus::load(&repo_corpus_path()).expect("load shipped corpus");
    let recipe_count = corpus.len();
    assert!(recipe_count >= 5);
    let recommender = Recommender::new(corpus);

    // raw detections the way the vision provider reports them
    let raw = vec![
        DetectedIngredient { name: "Huevo".to_string(), confidence: 0.92 },
        DetectedIngredient { name: "patata".to_string(), confidence: 0.88 },
        DetectedIngredient { name: "agua".to_string(), confidence: 0.95 },
        DetectedIngredient { name: "queso".to_string(), confidence: 0.4 },
        DetectedIngredient { name: "huevo".to_string(), confidence: 0.7 },
    ];
    let cleaned = clean(&raw, &CleanerConfig::default()).expect("clean");
    // agua is discard-listed, queso is under-confidence, the two huevo
    // detections collapse onto the 0.92 one
    assert_eq!(cleaned.len(), 2);

    let names: Vec<String> = cleaned.iter().map(|d| d.name.clone()).collect();
    let results = recommender.rank(&names, 5).expect("rank");
    assert!(!results.is_empty());
    assert_eq!(results[0].recipe.name, "tortilla de patatas");
    assert_eq!(results[0].match_count, 2);
    assert!((results[0].coverage - 1.0).abs() < f32::EPSILON);
    assert!(results.len() <= 5);

    eprintln!(
        "full flow: {} recipes, top hit '{}' (tfidf {:.3})",
        recipe_count, results[0].recipe.name, results[0].similarity
    );
}
