//! Scoring primitives: per-factor compatibility tables and the weighted total.
//!
//! Every factor is a pure function of item attributes, never of ids, so two
//! items with equal attributes always score the same.

use super::color::{classify_harmony, ColorHarmony};
use super::types::{MatchWeights, PairScore, Reason, SubScores, SCORE_MAX, SCORE_MIN};
use crate::database::models::{ClothingItem, ClothingType, Fabric, Style};
use crate::types::errors::ClosetError;

/// Scores are stored with this many decimals.
const SCORE_PRECISION: f64 = 10_000.0;

/// Symmetric style table. Identical styles always get the maximum.
pub fn style_compatibility(top: Style, bottom: Style) -> f64 {
    use Style::*;

    if top == bottom {
        return 1.0;
    }
    let pair = if top < bottom { (top, bottom) } else { (bottom, top) };
    match pair {
        (Formal, Business) => 0.85,
        (Casual, Streetwear) => 0.8,
        (Sporty, Streetwear) => 0.75,
        (Casual, Sporty) | (Casual, Bohemian) => 0.7,
        (Casual, Business) => 0.5,
        (Streetwear, Bohemian) => 0.45,
        (Casual, Formal) => 0.4,
        (Business, Streetwear) | (Business, Bohemian) => 0.35,
        (Formal, Bohemian) | (Sporty, Bohemian) => 0.3,
        (Formal, Streetwear) | (Sporty, Business) => 0.2,
        (Formal, Sporty) => 0.1,
        _ => 0.5,
    }
}

/// Symmetric fabric table.
pub fn fabric_compatibility(top: Fabric, bottom: Fabric) -> f64 {
    use Fabric::*;

    if top == bottom {
        return match top {
            Denim => 0.45,
            Leather => 0.3,
            Polyester => 0.6,
            _ => 0.7,
        };
    }
    let pair = if top < bottom { (top, bottom) } else { (bottom, top) };
    match pair {
        (Cotton, Denim) | (Silk, Wool) => 1.0,
        (Cotton, Linen) | (Cotton, Wool) | (Silk, Leather) | (Denim, Leather) => 0.85,
        (Cotton, Silk) | (Denim, Wool) | (Denim, Linen) | (Wool, Leather) => 0.75,
        (Cotton, Polyester) | (Cotton, Leather) | (Silk, Linen) | (Wool, Linen) => 0.7,
        (Denim, Silk) | (Denim, Polyester) | (Silk, Polyester) => 0.6,
        (Wool, Polyester) | (Polyester, Leather) => 0.5,
        (Linen, Leather) | (Linen, Polyester) => 0.4,
        _ => 0.6,
    }
}

/// Score a (top, bottom) pair with the given weights.
///
/// Precondition: `top.item_type == Top` and `bottom.item_type == Bottom`.
/// Violations are caller bugs and return [`ClosetError::InvalidPair`].
///
/// The total is a non-negative weighted mean of the sub-scores, so raising
/// any single sub-score never lowers it.
pub fn score_pair(
    top: &ClothingItem,
    bottom: &ClothingItem,
    weights: &MatchWeights,
) -> Result<PairScore, ClosetError> {
    ensure_slot(top, ClothingType::Top)?;
    ensure_slot(bottom, ClothingType::Bottom)?;

    let harmony = classify_harmony(&top.color, &bottom.color);
    let sub_scores = SubScores {
        color: harmony.score(),
        style: style_compatibility(top.style, bottom.style),
        fabric: fabric_compatibility(top.fabric, bottom.fabric),
    };

    let score = combine(&sub_scores, weights);
    let reasons = vec![
        Reason::ColorHarmony {
            harmony,
            score: sub_scores.color,
        },
        Reason::StyleMatch {
            top: top.style,
            bottom: bottom.style,
            score: sub_scores.style,
        },
        Reason::FabricPairing {
            top: top.fabric,
            bottom: bottom.fabric,
            score: sub_scores.fabric,
        },
    ];
    let explanation = explain(harmony, &reasons);

    Ok(PairScore {
        score,
        sub_scores,
        reasons,
        explanation,
    })
}

pub fn combine(sub_scores: &SubScores, weights: &MatchWeights) -> f64 {
    let w = weights.normalized();
    let raw = sub_scores.color.clamp(0.0, 1.0) * w.color
        + sub_scores.style.clamp(0.0, 1.0) * w.style
        + sub_scores.fabric.clamp(0.0, 1.0) * w.fabric;
    ((raw * SCORE_PRECISION).round() / SCORE_PRECISION).clamp(SCORE_MIN, SCORE_MAX)
}

fn ensure_slot(item: &ClothingItem, expected: ClothingType) -> Result<(), ClosetError> {
    if item.item_type == expected {
        return Ok(());
    }
    Err(ClosetError::InvalidPair(format!(
        "expected a {expected} in the {expected} slot, got {} '{}'",
        item.item_type, item.id
    )))
}

fn explain(harmony: ColorHarmony, reasons: &[Reason]) -> String {
    let mut parts: Vec<String> = vec![harmony.describe().to_string()];

    for reason in reasons {
        match reason {
            Reason::StyleMatch { top, bottom, score } => {
                parts.push(describe_style(*top, *bottom, *score));
            }
            Reason::FabricPairing { top, bottom, score } => {
                parts.push(describe_fabric(*top, *bottom, *score));
            }
            Reason::ColorHarmony { .. } => {}
        }
    }

    let mut text = parts.join("; ");
    if let Some(first) = text.get(..1) {
        text = format!("{}{}.", first.to_uppercase(), &text[1..]);
    }
    text
}

fn describe_style(top: Style, bottom: Style, score: f64) -> String {
    if top == bottom {
        format!("both pieces share a {top} style")
    } else if score >= 0.7 {
        format!("{top} and {bottom} styles work well together")
    } else if score >= 0.4 {
        format!("a {top} top with a {bottom} bottom is an unexpected mix")
    } else {
        format!("{top} and {bottom} styles clash")
    }
}

fn describe_fabric(top: Fabric, bottom: Fabric, score: f64) -> String {
    if top == bottom {
        if score >= 0.6 {
            format!("matching {top} textures")
        } else {
            format!("doubling up on {top} is hard to pull off")
        }
    } else if score >= 0.9 {
        format!("{top} and {bottom} pair naturally")
    } else if score >= 0.7 {
        format!("{top} with {bottom} is a comfortable combination")
    } else if score >= 0.5 {
        format!("{top} and {bottom} make a workable texture mix")
    } else {
        format!("{top} with {bottom} is an awkward texture mix")
    }
}

#[cfg(test)]
#[path = "tests/scoring_tests.rs"]
mod tests;
