//! Recipe corpus loading and search-text derivation.
//!
//! The corpus is parsed once at startup and validated eagerly: serving
//! with a partially loaded collection is worse than failing fast, so any
//! malformed entry aborts the load with `Error::DataFormat`.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

use std::fs;
use std::path::Path;

use fridge_core::error::{Error, Result};
use fridge_core::normalize::normalize;
use fridge_core::types::Recipe;

/// The full ordered recipe collection plus the flattened text each recipe
/// contributes to the similarity space.
///
/// Index positions are stable for the lifetime of the process and are how
/// recipes correlate with their precomputed similarity vectors.
#[derive(Debug)]
pub struct Corpus {
    recipes: Vec<Recipe>,
    search_texts: Vec<String>,
}

impl Corpus {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::DataFormat(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let recipes: Vec<Recipe> =
            serde_json::from_str(raw).map_err(|e| Error::DataFormat(e.to_string()))?;
        Self::from_recipes(recipes)
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self> {
        for (idx, recipe) in recipes.iter().enumerate() {
            if recipe.name.trim().is_empty() {
                return Err(Error::DataFormat(format!("recipe #{idx} has an empty name")));
            }
            // An empty key set would divide by zero in coverage later;
            // reject it here, not at score time.
            if recipe.key_ingredients.is_empty() {
                return Err(Error::DataFormat(format!(
                    "recipe '{}' has no key ingredients",
                    recipe.name
                )));
            }
            if recipe.key_ingredients.iter().any(|k| k.item.trim().is_empty()) {
                return Err(Error::DataFormat(format!(
                    "recipe '{}' has a blank key-ingredient item",
                    recipe.name
                )));
            }
        }
        let search_texts = recipes.iter().map(search_text).collect();
        Ok(Self { recipes, search_texts })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn search_texts(&self) -> &[String] {
        &self.search_texts
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Flattened text fed to the similarity index: normalized name, normalized
/// key-ingredient items, lower-cased tags, lower-cased base ingredients,
/// single-space joined. Must use the same normalization as query text or
/// the vector space becomes inconsistent.
fn search_text(recipe: &Recipe) -> String {
    let items: Vec<String> = recipe
        .key_ingredients
        .iter()
        .map(|k| normalize(&k.item))
        .collect();
    format!(
        "{} {} {} {}",
        normalize(&recipe.name),
        items.join(" "),
        recipe.tags.join(" ").to_lowercase(),
        recipe.base_ingredients.join(" ").to_lowercase(),
    )
}
