//! Post-ranking result filters mirroring the UI's quick-filter controls.

use fridge_core::normalize::normalize;
use fridge_core::types::MatchResult;

/// Optional narrowing applied after ranking. Filtering never reorders.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultFilters {
    /// Keep only recipes strictly under this many minutes. Recipes
    /// without a time estimate fail the filter.
    pub max_time_minutes: Option<u32>,
    /// Keep only recipes missing at most this many key ingredients.
    pub max_missing: Option<usize>,
}

pub fn apply(results: Vec<MatchResult>, filters: &ResultFilters) -> Vec<MatchResult> {
    results
        .into_iter()
        .filter(|r| match filters.max_time_minutes {
            Some(limit) => r.recipe.time_minutes.is_some_and(|t| t < limit),
            None => true,
        })
        .filter(|r| match filters.max_missing {
            Some(max) => missing_count(r) <= max,
            None => true,
        })
        .collect()
}

/// Key ingredients of the recipe the user does not have.
pub fn missing_count(result: &MatchResult) -> usize {
    result
        .recipe
        .key_ingredients
        .iter()
        .filter(|k| {
            let item = normalize(&k.item);
            !result.matched_items.iter().any(|m| *m == item)
        })
        .count()
}
