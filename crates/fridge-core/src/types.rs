//! Domain types shared by the corpus, index, and recommendation engines.

use serde::{Deserialize, Serialize};

/// One entry of a recipe's key-ingredient list.
///
/// Only `item` participates in matching; corpus files may carry extra
/// fields (quantities, substitutions) which are ignored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyIngredient {
    pub item: String,
}

/// An immutable recipe record, loaded once at startup.
///
/// Field names follow the corpus file schema (Spanish) so existing
/// collections keep working; the struct exposes English names.
/// `key_ingredients` drives match scoring, `base_ingredients` and `tags`
/// only contribute to the similarity text, the rest is display metadata
/// passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ingredientes_clave")]
    pub key_ingredients: Vec<KeyIngredient>,
    #[serde(rename = "ingredientes_base", default)]
    pub base_ingredients: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "tiempo_min", default)]
    pub time_minutes: Option<u32>,
    #[serde(rename = "dificultad", default)]
    pub difficulty: Option<String>,
    #[serde(rename = "calorias_aprox", default)]
    pub calories: Option<u32>,
    #[serde(rename = "proceso_corto", default)]
    pub short_process: Option<String>,
    #[serde(rename = "proceso_detallado", default)]
    pub detailed_steps: Vec<String>,
}

/// A raw detection reported by the vision provider, ephemeral per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedIngredient {
    pub name: String,
    pub confidence: f32,
}

/// One scored recipe produced by the ranking engine.
///
/// Only recipes with nonzero key-ingredient overlap become results, so
/// `match_count >= 1` and `coverage` lies in `(0, 1]`. `matched_items`
/// holds the normalized overlapping item names, sorted.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub recipe: Recipe,
    pub match_count: usize,
    pub coverage: f32,
    pub matched_items: Vec<String>,
    pub similarity: f32,
}

impl MatchResult {
    /// Coverage as a whole-number percentage, the way the UI displays it.
    pub fn match_percent(&self) -> String {
        format!("{:.0}%", self.coverage * 100.0)
    }
}
