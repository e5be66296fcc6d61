use fridge_index::TfidfIndex;

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn query(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn fit_builds_one_vector_per_text() {
    let index = TfidfIndex::fit(&texts(&["huevo patata", "tomate lechuga", "arroz pollo"]));
    assert_eq!(index.doc_count(), 3);
    assert_eq!(index.vocabulary_len(), 6);
}

#[test]
fn score_returns_one_value_per_corpus_index() {
    let index = TfidfIndex::fit(&texts(&["huevo patata", "tomate lechuga"]));
    let scores = index.score(&query(&["huevo"]));
    assert_eq!(scores.len(), 2);
}

#[test]
fn scores_stay_within_unit_interval() {
    let index = TfidfIndex::fit(&texts(&[
        "tortilla huevo patata sal",
        "ensalada tomate lechuga",
        "arroz pollo ajo",
    ]));
    let scores = index.score(&query(&["huevo", "patata", "tomate", "ajo"]));
    for s in scores {
        assert!((0.0..=1.0 + 1e-6).contains(&s), "score {s} out of range");
    }
}

#[test]
fn matching_text_outranks_disjoint_text() {
    let index = TfidfIndex::fit(&texts(&["huevo patata cebolla", "tomate lechuga pepino"]));
    let scores = index.score(&query(&["huevo", "patata"]));
    assert!(scores[0] > scores[1]);
    assert!(scores[1].abs() < 1e-6, "disjoint recipe should score zero");
}

#[test]
fn identical_text_scores_one() {
    let index = TfidfIndex::fit(&texts(&["huevo patata", "pollo arroz"]));
    let scores = index.score(&query(&["huevo", "patata"]));
    assert!((scores[0] - 1.0).abs() < 1e-5);
}

#[test]
fn out_of_vocabulary_query_scores_zero_everywhere() {
    let index = TfidfIndex::fit(&texts(&["huevo patata", "tomate lechuga"]));
    let scores = index.score(&query(&["kiwi", "mango"]));
    assert!(scores.iter().all(|s| s.abs() < f32::EPSILON));
}

#[test]
fn query_side_normalization_matches_corpus_side() {
    // corpus texts arrive already normalized by the loader
    let index = TfidfIndex::fit(&texts(&["cafe azucar", "te limon"]));
    let accented = index.score(&query(&["Café", "AZÚCAR"]));
    let plain = index.score(&query(&["cafe", "azucar"]));
    assert_eq!(accented, plain);
    assert!(accented[0] > 0.9);
}

#[test]
fn scoring_is_deterministic_across_calls() {
    let index = TfidfIndex::fit(&texts(&[
        "tortilla huevo patata sal aceite",
        "ensalada tomate lechuga aceite",
        "revuelto huevo champinon ajo",
        "gazpacho tomate pepino ajo pan",
    ]));
    let q = query(&["huevo", "tomate", "ajo", "aceite"]);
    let first = index.score(&q);
    for _ in 0..10 {
        assert_eq!(index.score(&q), first);
    }
}

#[test]
fn duplicate_query_terms_weight_term_frequency() {
    let index = TfidfIndex::fit(&texts(&["huevo huevo patata", "huevo tomate"]));
    let single = index.score(&query(&["huevo", "patata"]));
    let doubled = index.score(&query(&["huevo", "huevo", "patata"]));
    // doubling "huevo" pulls the query closer to the huevo-heavy recipe
    assert!(doubled[0] > single[0]);
}

#[test]
fn rare_terms_discriminate_more_than_common_ones() {
    let index = TfidfIndex::fit(&texts(&[
        "sal huevo",
        "sal tomate",
        "sal lechuga",
        "sal pollo",
    ]));
    // "sal" is in every doc, "huevo" in one; a huevo query should single
    // out the first recipe strongly
    let scores = index.score(&query(&["huevo"]));
    assert!(scores[0] > 0.5);
    assert!(scores[1].abs() < 1e-6);
}
