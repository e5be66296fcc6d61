//! Term-frequency/inverse-document-frequency vector space over the corpus.
//!
//! Fitted once at startup from the corpus search texts and never mutated
//! afterwards, so it can be shared read-only across concurrent requests.
//! Scoring semantics follow the common vectorizer defaults: tokens are
//! runs of two or more alphanumeric characters, idf is smoothed as
//! `ln((1+n)/(1+df)) + 1`, and document vectors are L2-normalized so
//! cosine similarity reduces to a sparse dot product.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

use std::collections::HashMap;

use fridge_core::normalize::normalize;
use fridge_core::traits::SimilarityScorer;

/// Sparse term-id/weight pairs, sorted by term id. Sorted storage keeps
/// dot products summing in a fixed order, which keeps repeated scoring
/// calls byte-identical.
type SparseVector = Vec<(usize, f32)>;

pub struct TfidfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    recipe_vectors: Vec<SparseVector>,
}

impl TfidfIndex {
    /// Fit the vector space over the corpus texts, one text per recipe,
    /// in corpus order.
    pub fn fit(texts: &[String]) -> Self {
        let tokenized: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();

        // Lexicographic vocabulary order makes term-id assignment
        // independent of hash-map iteration order.
        let mut terms: Vec<&str> = tokenized
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();
        terms.sort_unstable();
        terms.dedup();
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(id, term)| ((*term).to_string(), id))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        let counts: Vec<HashMap<usize, f32>> = tokenized
            .iter()
            .map(|tokens| {
                let mut term_counts: HashMap<usize, f32> = HashMap::new();
                for token in tokens {
                    if let Some(&id) = vocabulary.get(token.as_str()) {
                        *term_counts.entry(id).or_insert(0.0) += 1.0;
                    }
                }
                for &id in term_counts.keys() {
                    document_frequency[id] += 1;
                }
                term_counts
            })
            .collect();

        let doc_count = texts.len();
        let idf: Vec<f32> = document_frequency
            .iter()
            .map(|&df| smoothed_idf(doc_count, df))
            .collect();

        let recipe_vectors = counts
            .into_iter()
            .map(|term_counts| weighted_normalized(&term_counts, &idf))
            .collect();

        Self {
            vocabulary,
            idf,
            recipe_vectors,
        }
    }

    /// Cosine similarity of the joined ingredient names against every
    /// recipe, one value per corpus index, in `[0, 1]`.
    ///
    /// Names are normalized and space-joined before projection; duplicate
    /// names are kept since they weight term frequency, exactly as the
    /// corpus side counted them. Out-of-vocabulary terms contribute zero
    /// weight; an all-unknown query scores 0.0 everywhere, which is
    /// expected and not an error.
    pub fn score(&self, ingredient_names: &[String]) -> Vec<f32> {
        let query_text = ingredient_names
            .iter()
            .map(|n| normalize(n))
            .collect::<Vec<_>>()
            .join(" ");
        let query = self.vectorize(&query_text);
        self.recipe_vectors
            .iter()
            .map(|recipe| sparse_dot(&query, recipe))
            .collect()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn doc_count(&self) -> usize {
        self.recipe_vectors.len()
    }

    fn vectorize(&self, text: &str) -> SparseVector {
        let mut term_counts: HashMap<usize, f32> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&id) = self.vocabulary.get(token.as_str()) {
                *term_counts.entry(id).or_insert(0.0) += 1.0;
            }
        }
        weighted_normalized(&term_counts, &self.idf)
    }
}

impl SimilarityScorer for TfidfIndex {
    fn score(&self, ingredient_names: &[String]) -> Vec<f32> {
        Self::score(self, ingredient_names)
    }
}

/// Runs of two or more alphanumeric characters, already lower-cased by
/// the callers' normalization.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

fn smoothed_idf(doc_count: usize, document_frequency: usize) -> f32 {
    (((1 + doc_count) as f32) / ((1 + document_frequency) as f32)).ln() + 1.0
}

/// tf×idf weights, L2-normalized, as a sorted sparse vector. The zero
/// vector (empty counts) stays empty rather than being normalized.
fn weighted_normalized(term_counts: &HashMap<usize, f32>, idf: &[f32]) -> SparseVector {
    let mut weighted: SparseVector = term_counts
        .iter()
        .map(|(&id, &tf)| (id, tf * idf[id]))
        .collect();
    weighted.sort_unstable_by_key(|&(id, _)| id);

    let norm: f32 = weighted.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in &mut weighted {
            *w /= norm;
        }
    }
    weighted
}

fn sparse_dot(a: &[(usize, f32)], b: &[(usize, f32)]) -> f32 {
    let mut sum = 0.0;
    let mut ai = 0;
    let mut bi = 0;
    while ai < a.len() && bi < b.len() {
        match a[ai].0.cmp(&b[bi].0) {
            std::cmp::Ordering::Less => ai += 1,
            std::cmp::Ordering::Greater => bi += 1,
            std::cmp::Ordering::Equal => {
                sum += a[ai].1 * b[bi].1;
                ai += 1;
                bi += 1;
            }
        }
    }
    sum
}
