//! Deduplication and filtering of raw vision detections.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::config::CleanerConfig;
use crate::error::{Error, Result};
use crate::normalize::ingredient_key;
use crate::types::DetectedIngredient;

/// Filter, normalize, and deduplicate raw detections.
///
/// Detections are ordered by descending confidence (stable on ties, so
/// the provider's order breaks them), low-confidence and discard-listed
/// labels are dropped, and duplicates collapse onto their
/// highest-confidence instance. Display names keep the original spelling,
/// lower-cased. Pure function, no side effects.
pub fn clean(
    detections: &[DetectedIngredient],
    config: &CleanerConfig,
) -> Result<Vec<DetectedIngredient>> {
    if !(0.0..=1.0).contains(&config.min_confidence) {
        return Err(Error::Range(format!(
            "min_confidence must be within [0, 1], got {}",
            config.min_confidence
        )));
    }

    let discard: HashSet<String> = config
        .discard
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();

    let mut ordered: Vec<&DetectedIngredient> = detections.iter().collect();
    ordered.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    let mut seen: HashSet<String> = HashSet::new();
    let mut cleaned = Vec::new();
    for det in ordered {
        if det.confidence < config.min_confidence {
            continue;
        }
        let key = ingredient_key(&det.name);
        if discard.contains(&key) || discard.contains(&det.name.to_lowercase()) {
            continue;
        }
        if seen.insert(key) {
            cleaned.push(DetectedIngredient {
                name: det.name.to_lowercase(),
                confidence: det.confidence,
            });
        }
    }
    Ok(cleaned)
}
