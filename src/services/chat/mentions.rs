//! Links an assistant reply back to closet items and outfits.
//!
//! Plain substring matching on lowercased text. Good enough to decorate a
//! reply with cards; nothing downstream relies on it being exact.

use crate::database::models::ClothingItem;
use crate::services::ranking::ResolvedOutfit;

pub const MAX_RELATED_OUTFITS: usize = 3;

/// Short label used when the assistant names an item inside an outfit.
fn outfit_label(item: &ClothingItem) -> String {
    match item.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("{} {}", item.color, item.item_type),
    }
}

fn item_identifiers(item: &ClothingItem) -> [String; 4] {
    [
        item.display_name(),
        format!("{} {}", item.color, item.item_type),
        format!("{} {}", item.style, item.item_type),
        item.id.clone(),
    ]
}

/// Items the reply mentions by display name, `"{color} {type}"`,
/// `"{style} {type}"` or id. Closet order is kept.
pub fn identify_clothing_mentions(reply: &str, items: &[ClothingItem]) -> Vec<ClothingItem> {
    let haystack = reply.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item_identifiers(item)
                .iter()
                .any(|identifier| haystack.contains(&identifier.to_lowercase()))
        })
        .cloned()
        .collect()
}

fn is_relevant(haystack: &str, outfit: &ResolvedOutfit) -> bool {
    [&outfit.top, &outfit.bottom].iter().any(|item| {
        haystack.contains(&item.id.to_lowercase())
            || haystack.contains(item.style.as_str())
            || haystack.contains(&item.color.to_lowercase())
    })
}

/// Up to three outfits to show next to a reply.
///
/// Outfits touching an id, style or color from the reply come first, in rank
/// order; the rest of the slots are filled with the best remaining outfits.
pub fn related_outfits(reply: &str, outfits: &[ResolvedOutfit]) -> Vec<ResolvedOutfit> {
    let haystack = reply.to_lowercase();
    let (relevant, rest): (Vec<&ResolvedOutfit>, Vec<&ResolvedOutfit>) =
        outfits.iter().partition(|outfit| is_relevant(&haystack, outfit));

    relevant
        .into_iter()
        .chain(rest)
        .take(MAX_RELATED_OUTFITS)
        .cloned()
        .collect()
}

/// First outfit the reply names as `"<top> and <bottom>"` or by suggestion id.
pub fn identify_outfit_reference(reply: &str, outfits: &[ResolvedOutfit]) -> Option<ResolvedOutfit> {
    let haystack = reply.to_lowercase();
    outfits
        .iter()
        .find(|outfit| {
            let description = format!(
                "{} and {}",
                outfit_label(&outfit.top),
                outfit_label(&outfit.bottom)
            )
            .to_lowercase();
            haystack.contains(&description) || reply.contains(&outfit.suggestion.id)
        })
        .cloned()
}

#[cfg(test)]
#[path = "tests/mentions_tests.rs"]
mod tests;
