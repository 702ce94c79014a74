//! Outfit matcher: scores every top × bottom pairing of the closet.
//!
//! Pure and synchronous. No I/O, no hidden randomness: identical inputs give
//! identical scores, explanations and suggestion ids.

pub mod color;
pub mod scoring;
pub mod types;

pub use color::ColorHarmony;
pub use scoring::{combine, fabric_compatibility, score_pair, style_compatibility};
pub use types::{MatchWeights, MatcherConfig, PairScore, Reason, SubScores};

use crate::database::models::{ClothingItem, OutfitSuggestion};
use crate::services::ranking::sort_suggestions_deterministic;
use crate::types::errors::ClosetError;
use rayon::prelude::*;

/// Stable id for a pairing, so recomputation supersedes rather than duplicates.
pub fn suggestion_id(top_id: &str, bottom_id: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(top_id.len() as u64).to_le_bytes());
    hasher.update(top_id.as_bytes());
    hasher.update(&(bottom_id.len() as u64).to_le_bytes());
    hasher.update(bottom_id.as_bytes());
    let hex = hasher.finalize().to_hex();
    format!("sg-{}", &hex.as_str()[..24])
}

/// Score one pair. See [`score_pair`] for the slot precondition.
pub fn score(
    top: &ClothingItem,
    bottom: &ClothingItem,
    config: &MatcherConfig,
) -> Result<PairScore, ClosetError> {
    score_pair(top, bottom, &config.weights)
}

/// One suggestion per (top, bottom) pair, best first.
///
/// When the cross product exceeds `config.max_suggestions` (non-zero), only
/// the best-scoring pairs are kept. Any item in the wrong slot fails the
/// whole batch.
pub fn match_all(
    tops: &[ClothingItem],
    bottoms: &[ClothingItem],
    config: &MatcherConfig,
) -> Result<Vec<OutfitSuggestion>, ClosetError> {
    if tops.is_empty() || bottoms.is_empty() {
        return Ok(Vec::new());
    }

    let mut suggestions = tops
        .par_iter()
        .flat_map_iter(|top| bottoms.iter().map(move |bottom| (top, bottom)))
        .map(|(top, bottom)| {
            let scored = score_pair(top, bottom, &config.weights)?;
            Ok(OutfitSuggestion {
                id: suggestion_id(&top.id, &bottom.id),
                top_id: top.id.clone(),
                bottom_id: bottom.id.clone(),
                score: scored.score,
                match_reason: scored.explanation,
            })
        })
        .collect::<Result<Vec<_>, ClosetError>>()?;

    sort_suggestions_deterministic(&mut suggestions);

    let total = suggestions.len();
    if config.max_suggestions > 0 && total > config.max_suggestions {
        suggestions.truncate(config.max_suggestions);
        log::debug!(
            "Matcher capped {total} pairings to {}",
            config.max_suggestions
        );
    }

    log::debug!(
        "Matched {} tops x {} bottoms -> {} suggestions",
        tops.len(),
        bottoms.len(),
        suggestions.len()
    );
    Ok(suggestions)
}

#[cfg(test)]
#[path = "tests/match_all_tests.rs"]
mod tests;
