use std::path::Path;

use crate::error::Result;
use crate::types::{DetectedIngredient, MatchResult};

/// External vision collaborator: turns an image into name/confidence pairs.
///
/// Implementations are expected to bound their own latency (one slow
/// detection must not stall other requests) and to surface failures as
/// `Error::VisionProvider`, never by panicking.
pub trait IngredientDetector: Send + Sync {
    fn detect(&self, image_path: &Path) -> Result<Vec<DetectedIngredient>>;
}

/// Per-corpus-index similarity scoring, one value per recipe.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, ingredient_names: &[String]) -> Vec<f32>;
}

/// The query surface the core exposes to any UI.
pub trait RecipeRanker: Send + Sync {
    fn rank(&self, user_ingredients: &[String], top_n: usize) -> Result<Vec<MatchResult>>;
}
