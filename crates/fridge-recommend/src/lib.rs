//! Multi-criterion recipe ranking over a shared corpus and similarity index.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod filters;

use std::cmp::Ordering;
use std::collections::BTreeSet;

use fridge_core::error::{Error, Result};
use fridge_core::normalize::normalize;
use fridge_core::traits::RecipeRanker;
use fridge_core::types::MatchResult;
use fridge_corpus::Corpus;
use fridge_index::TfidfIndex;

/// Read-only recommendation context: the corpus plus its fitted similarity
/// index, built once at startup and shared across requests.
///
/// Holds no per-call mutable state, so a single instance can serve any
/// number of concurrent `rank` calls without locking.
pub struct Recommender {
    corpus: Corpus,
    index: TfidfIndex,
}

impl Recommender {
    pub fn new(corpus: Corpus) -> Self {
        let index = TfidfIndex::fit(corpus.search_texts());
        Self { corpus, index }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &TfidfIndex {
        &self.index
    }

    /// Rank the corpus against the user's ingredients.
    ///
    /// Recipes sharing no key ingredient with the user set are excluded
    /// outright, never scored. Survivors order by absolute overlap, then
    /// coverage of the recipe's key set, then TF-IDF similarity; exact
    /// ties keep corpus order. At most `top_n` results come back, fewer
    /// when fewer survive, never padded.
    pub fn rank(&self, user_ingredients: &[String], top_n: usize) -> Result<Vec<MatchResult>> {
        if top_n == 0 {
            return Err(Error::Range("top_n must be at least 1".to_string()));
        }

        // Duplicates collapse for matching but stay in the similarity
        // query, where repeated terms legitimately weight frequency.
        let normalized: Vec<String> = user_ingredients
            .iter()
            .map(|i| normalize(i))
            .filter(|i| !i.is_empty())
            .collect();
        let user_set: BTreeSet<&str> = normalized.iter().map(String::as_str).collect();
        if user_set.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut results: Vec<MatchResult> = Vec::new();
        let mut corpus_indices: Vec<usize> = Vec::new();
        for (idx, recipe) in self.corpus.recipes().iter().enumerate() {
            let key_set: BTreeSet<String> = recipe
                .key_ingredients
                .iter()
                .map(|k| normalize(&k.item))
                .collect();
            let matched: Vec<String> = key_set
                .iter()
                .filter(|item| user_set.contains(item.as_str()))
                .cloned()
                .collect();
            if matched.is_empty() {
                continue;
            }
            // key_set is non-empty by the corpus load invariant
            let coverage = matched.len() as f32 / key_set.len() as f32;
            results.push(MatchResult {
                recipe: recipe.clone(),
                match_count: matched.len(),
                coverage,
                matched_items: matched,
                similarity: 0.0,
            });
            corpus_indices.push(idx);
        }

        if results.is_empty() {
            // soft "no match": an empty list, not an error
            return Ok(results);
        }

        // One projection per rank call, not one per recipe.
        let similarities = self.index.score(&normalized);
        for (result, &idx) in results.iter_mut().zip(&corpus_indices) {
            result.similarity = similarities[idx];
        }

        // Stable sort: fully tied entries keep corpus order.
        results.sort_by(|a, b| {
            b.match_count
                .cmp(&a.match_count)
                .then_with(|| b.coverage.partial_cmp(&a.coverage).unwrap_or(Ordering::Equal))
                .then_with(|| {
                    b.similarity
                        .partial_cmp(&a.similarity)
                        .unwrap_or(Ordering::Equal)
                })
        });
        results.truncate(top_n);
        Ok(results)
    }
}

impl RecipeRanker for Recommender {
    fn rank(&self, user_ingredients: &[String], top_n: usize) -> Result<Vec<MatchResult>> {
        Self::rank(self, user_ingredients, top_n)
    }
}
