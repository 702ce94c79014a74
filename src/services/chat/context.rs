//! Plain-text wardrobe summary handed to the assistant as context.

use crate::database::models::ClothingItem;
use crate::services::closet::ClosetSnapshot;
use crate::services::ranking::{resolve_outfits, score_percent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write;

const MOST_COMMON_LIMIT: usize = 3;

/// Top values with counts, e.g. `"navy (2), white (1)"`.
/// Higher counts first; equal counts in value order.
pub fn most_common<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(MOST_COMMON_LIMIT)
        .map(|(value, count)| format!("{value} ({count})"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeStats {
    pub top_colors: String,
    pub bottom_colors: String,
    pub styles: String,
    pub fabrics: String,
}

impl WardrobeStats {
    pub fn from_snapshot(snapshot: &ClosetSnapshot) -> Self {
        let all = || snapshot.tops.iter().chain(&snapshot.bottoms);
        Self {
            top_colors: most_common(snapshot.tops.iter().map(|i| i.color.as_str())),
            bottom_colors: most_common(snapshot.bottoms.iter().map(|i| i.color.as_str())),
            styles: most_common(all().map(|i| i.style.as_str())),
            fabrics: most_common(all().map(|i| i.fabric.as_str())),
        }
    }
}

fn write_inventory(out: &mut String, heading: &str, items: &[ClothingItem]) {
    let _ = writeln!(out, "{heading} ({} items):", items.len());
    for item in items {
        let _ = writeln!(
            out,
            "- {} (ID: {}): {} {} {}",
            item.display_name(),
            item.id,
            item.color,
            item.style,
            item.fabric
        );
    }
    out.push('\n');
}

/// Inventory, the best `suggestion_limit` outfits and a style analysis.
pub fn build_wardrobe_context(snapshot: &ClosetSnapshot, suggestion_limit: usize) -> String {
    let mut out = String::from("USER'S WARDROBE INVENTORY:\n\n");
    write_inventory(&mut out, "TOPS", &snapshot.tops);
    write_inventory(&mut out, "BOTTOMS", &snapshot.bottoms);

    let outfits = resolve_outfits(&snapshot.suggestions, &snapshot.items());
    let _ = writeln!(out, "EXISTING OUTFIT COMBINATIONS ({} saved):", outfits.len());
    for (rank, outfit) in outfits.iter().take(suggestion_limit).enumerate() {
        let _ = writeln!(
            out,
            "{}. {} + {} (Score: {}% - {})",
            rank + 1,
            outfit.top.display_name(),
            outfit.bottom.display_name(),
            score_percent(outfit.suggestion.score),
            outfit.suggestion.match_reason
        );
    }
    if outfits.len() > suggestion_limit {
        out.push_str("... and more combinations available\n");
    }

    let stats = WardrobeStats::from_snapshot(snapshot);
    out.push_str("\nSTYLE ANALYSIS:\n");
    let _ = writeln!(out, "- Most common top colors: {}", stats.top_colors);
    let _ = writeln!(out, "- Most common bottom colors: {}", stats.bottom_colors);
    let _ = writeln!(out, "- Preferred styles: {}", stats.styles);
    let _ = writeln!(out, "- Fabric types: {}", stats.fabrics);

    out
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
