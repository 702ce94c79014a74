//! Ordering and filtering of outfit suggestions for display surfaces
//! (podium, swipe deck, search results, chat references).

pub mod swipe;

pub use swipe::SwipeSession;

use crate::database::models::{ClothingItem, ClothingType, OutfitSuggestion};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Non-finite scores rank below every real score.
fn rank_score(suggestion: &OutfitSuggestion) -> f64 {
    if suggestion.score.is_finite() {
        suggestion.score
    } else {
        f64::NEG_INFINITY
    }
}

/// Sort deterministically: score desc → id asc. NaN sorts last.
pub fn sort_suggestions_deterministic(suggestions: &mut [OutfitSuggestion]) {
    suggestions.sort_by(|a, b| {
        rank_score(b)
            .total_cmp(&rank_score(a))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// The best `min(k, len)` suggestions, ties broken by id. Non-finite scores are dropped.
pub fn top_k(suggestions: &[OutfitSuggestion], k: usize) -> Vec<OutfitSuggestion> {
    let mut ranked: Vec<OutfitSuggestion> = suggestions
        .iter()
        .filter(|suggestion| suggestion.score.is_finite())
        .cloned()
        .collect();
    let skipped = suggestions.len() - ranked.len();
    if skipped > 0 {
        log::warn!("Skipped {skipped} suggestion(s) with a non-finite score");
    }
    sort_suggestions_deterministic(&mut ranked);
    ranked.truncate(k);
    ranked
}

/// The `size` best suggestions.
pub fn podium(suggestions: &[OutfitSuggestion], size: usize) -> Vec<OutfitSuggestion> {
    top_k(suggestions, size)
}

/// Left-to-right slots for a podium of `len` places: 2nd, 1st, 3rd, then the rest in rank order.
pub fn podium_display_order(len: usize) -> Vec<usize> {
    match len {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let mut order = vec![1, 0];
            order.extend(2..len);
            order
        }
    }
}

/// Id → item lookup over a closet snapshot.
pub struct ItemIndex<'a> {
    by_id: HashMap<&'a str, &'a ClothingItem>,
}

impl<'a> ItemIndex<'a> {
    pub fn new(items: &'a [ClothingItem]) -> Self {
        Self {
            by_id: items.iter().map(|item| (item.id.as_str(), item)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a ClothingItem> {
        self.by_id.get(id).copied()
    }

    /// Both sides of the suggestion, if each resolves to an item of the right type.
    pub fn resolve(
        &self,
        suggestion: &OutfitSuggestion,
    ) -> Option<(&'a ClothingItem, &'a ClothingItem)> {
        let top = self
            .get(&suggestion.top_id)
            .filter(|item| item.item_type == ClothingType::Top)?;
        let bottom = self
            .get(&suggestion.bottom_id)
            .filter(|item| item.item_type == ClothingType::Bottom)?;
        Some((top, bottom))
    }
}

/// Drops suggestions whose `top_id`/`bottom_id` no longer resolve. Order is preserved.
pub fn exclude_dangling(
    suggestions: &[OutfitSuggestion],
    items: &[ClothingItem],
) -> Vec<OutfitSuggestion> {
    let index = ItemIndex::new(items);
    let kept: Vec<OutfitSuggestion> = suggestions
        .iter()
        .filter(|suggestion| index.resolve(suggestion).is_some())
        .cloned()
        .collect();

    let dropped = suggestions.len() - kept.len();
    if dropped > 0 {
        log::debug!("Excluded {dropped} dangling suggestion(s)");
    }
    kept
}

/// Case-insensitive substring search over either item's name, style or fabric.
/// Dangling suggestions never match.
pub fn filter_by_search(
    suggestions: &[OutfitSuggestion],
    items: &[ClothingItem],
    query: &str,
) -> Vec<OutfitSuggestion> {
    let needle = query.to_lowercase();
    let index = ItemIndex::new(items);

    suggestions
        .iter()
        .filter(|suggestion| {
            index
                .resolve(suggestion)
                .is_some_and(|(top, bottom)| {
                    item_matches(top, &needle) || item_matches(bottom, &needle)
                })
        })
        .cloned()
        .collect()
}

pub fn item_matches(item: &ClothingItem, needle: &str) -> bool {
    let name_hit = item
        .name
        .as_deref()
        .is_some_and(|name| name.to_lowercase().contains(needle));
    name_hit || item.style.as_str().contains(needle) || item.fabric.as_str().contains(needle)
}

/// A suggestion joined with the items it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOutfit {
    pub suggestion: OutfitSuggestion,
    pub top: ClothingItem,
    pub bottom: ClothingItem,
}

/// Joins suggestions with their items, silently skipping dangling ones.
pub fn resolve_outfits(
    suggestions: &[OutfitSuggestion],
    items: &[ClothingItem],
) -> Vec<ResolvedOutfit> {
    let index = ItemIndex::new(items);
    suggestions
        .iter()
        .filter_map(|suggestion| {
            let (top, bottom) = index.resolve(suggestion)?;
            Some(ResolvedOutfit {
                suggestion: suggestion.clone(),
                top: top.clone(),
                bottom: bottom.clone(),
            })
        })
        .collect()
}

/// Display band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchQuality {
    Exceptional,
    Excellent,
    Great,
    Good,
}

impl MatchQuality {
    pub fn from_score(score: f64) -> Self {
        match score_percent(score) {
            90..=u8::MAX => MatchQuality::Exceptional,
            80..=89 => MatchQuality::Excellent,
            70..=79 => MatchQuality::Great,
            _ => MatchQuality::Good,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchQuality::Exceptional => "Exceptional",
            MatchQuality::Excellent => "Excellent",
            MatchQuality::Great => "Great",
            MatchQuality::Good => "Good",
        }
    }
}

/// Score as a rounded percentage, clamped to `0..=100`.
pub fn score_percent(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
#[path = "tests/ranking_tests.rs"]
mod tests;
