use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Slot an item fills in an outfit. Fixed at creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClothingType {
    Top,
    Bottom,
}

impl ClothingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClothingType::Top => "top",
            ClothingType::Bottom => "bottom",
        }
    }
}

impl fmt::Display for ClothingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClothingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(ClothingType::Top),
            "bottom" => Ok(ClothingType::Bottom),
            _ => Err(format!("Unknown clothing type: {s}")),
        }
    }
}

/// Style vocabulary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Casual,
    Formal,
    Sporty,
    Business,
    Streetwear,
    Bohemian,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Style::Casual,
        Style::Formal,
        Style::Sporty,
        Style::Business,
        Style::Streetwear,
        Style::Bohemian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Casual => "casual",
            Style::Formal => "formal",
            Style::Sporty => "sporty",
            Style::Business => "business",
            Style::Streetwear => "streetwear",
            Style::Bohemian => "bohemian",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Style::ALL
            .into_iter()
            .find(|style| style.as_str() == lowered)
            .ok_or_else(|| format!("Unknown style: {s}"))
    }
}

/// Fabric vocabulary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Fabric {
    Cotton,
    Denim,
    Silk,
    Wool,
    Linen,
    Polyester,
    Leather,
}

impl Fabric {
    pub const ALL: [Fabric; 7] = [
        Fabric::Cotton,
        Fabric::Denim,
        Fabric::Silk,
        Fabric::Wool,
        Fabric::Linen,
        Fabric::Polyester,
        Fabric::Leather,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Fabric::Cotton => "cotton",
            Fabric::Denim => "denim",
            Fabric::Silk => "silk",
            Fabric::Wool => "wool",
            Fabric::Linen => "linen",
            Fabric::Polyester => "polyester",
            Fabric::Leather => "leather",
        }
    }
}

impl fmt::Display for Fabric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Fabric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Fabric::ALL
            .into_iter()
            .find(|fabric| fabric.as_str() == lowered)
            .ok_or_else(|| format!("Unknown fabric: {s}"))
    }
}

/// A single clothing piece in the closet.
///
/// Never mutated after creation; removal is the only lifecycle change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ClothingType,
    pub image_url: String,
    /// Representative color, usually `#rrggbb`; plain color names are accepted.
    pub color: String,
    pub style: Style,
    pub fabric: Fabric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub added: DateTime<Utc>,
}

impl ClothingItem {
    /// Human label: the explicit name, or `"{color} {style}"`.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{} {}", self.color, self.style),
        }
    }
}

/// A scored top/bottom pairing. Never mutated; superseded by recomputation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutfitSuggestion {
    pub id: String,
    pub top_id: String,
    pub bottom_id: String,
    /// Compatibility confidence in `[0, 1]`.
    pub score: f64,
    pub match_reason: String,
}

impl OutfitSuggestion {
    pub fn references(&self, item_id: &str) -> bool {
        self.top_id == item_id || self.bottom_id == item_id
    }
}

/// Raw `clothing_items` row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClothingItemRow {
    pub id: String,
    pub item_type: String,
    pub image_url: String,
    pub color: String,
    pub style: String,
    pub fabric: String,
    pub name: Option<String>,
    pub added: String,
}

impl TryFrom<ClothingItemRow> for ClothingItem {
    type Error = String;

    fn try_from(row: ClothingItemRow) -> Result<Self, Self::Error> {
        let added = DateTime::parse_from_rfc3339(&row.added)
            .map_err(|e| format!("Invalid timestamp for item {}: {e}", row.id))?
            .with_timezone(&Utc);

        Ok(ClothingItem {
            item_type: row.item_type.parse()?,
            style: row.style.parse()?,
            fabric: row.fabric.parse()?,
            id: row.id,
            image_url: row.image_url,
            color: row.color,
            name: row.name,
            added,
        })
    }
}

/// Raw `outfit_suggestions` row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OutfitSuggestionRow {
    pub id: String,
    pub top_id: String,
    pub bottom_id: String,
    pub score: f64,
    pub match_reason: String,
}

impl TryFrom<OutfitSuggestionRow> for OutfitSuggestion {
    type Error = String;

    fn try_from(row: OutfitSuggestionRow) -> Result<Self, Self::Error> {
        if !row.score.is_finite() || !(0.0..=1.0).contains(&row.score) {
            return Err(format!(
                "Score {} out of range for suggestion {}",
                row.score, row.id
            ));
        }

        Ok(OutfitSuggestion {
            id: row.id,
            top_id: row.top_id,
            bottom_id: row.bottom_id,
            score: row.score,
            match_reason: row.match_reason,
        })
    }
}

#[cfg(test)]
#[path = "tests/models_tests.rs"]
mod tests;
