//! Domain types for outfit matching.
//!
//! Contains: MatchWeights, MatcherConfig, SubScores, Reason, PairScore.

use super::color::ColorHarmony;
use crate::database::models::{Fabric, Style};
use serde::{Deserialize, Serialize};

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 1.0;

/// Default cap on suggestions kept from one `match_all` run.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 500;
pub const DEFAULT_PODIUM_SIZE: usize = 3;

/// Relative importance of each sub-score. Negative weights are treated as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub color: f64,
    pub style: f64,
    pub fabric: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            color: 0.4,
            style: 0.35,
            fabric: 0.25,
        }
    }
}

impl MatchWeights {
    /// Weights scaled to sum to 1. All-zero (or non-finite) input falls back to equal thirds.
    pub fn normalized(&self) -> MatchWeights {
        let sanitize = |w: f64| if w.is_finite() { w.max(0.0) } else { 0.0 };
        let (color, style, fabric) = (
            sanitize(self.color),
            sanitize(self.style),
            sanitize(self.fabric),
        );
        let total = color + style + fabric;
        if total <= f64::EPSILON {
            return MatchWeights {
                color: 1.0 / 3.0,
                style: 1.0 / 3.0,
                fabric: 1.0 / 3.0,
            };
        }
        MatchWeights {
            color: color / total,
            style: style / total,
            fabric: fabric / total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub weights: MatchWeights,
    /// 0 disables the cap.
    pub max_suggestions: usize,
    pub podium_size: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            podium_size: DEFAULT_PODIUM_SIZE,
        }
    }
}

/// Per-factor compatibility, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub color: f64,
    pub style: f64,
    pub fabric: f64,
}

/// Structured reason explaining a pair's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Reason {
    ColorHarmony { harmony: ColorHarmony, score: f64 },
    StyleMatch { top: Style, bottom: Style, score: f64 },
    FabricPairing { top: Fabric, bottom: Fabric, score: f64 },
}

impl Reason {
    pub fn score(&self) -> f64 {
        match self {
            Reason::ColorHarmony { score, .. }
            | Reason::StyleMatch { score, .. }
            | Reason::FabricPairing { score, .. } => *score,
        }
    }
}

/// Result of scoring one (top, bottom) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    /// Weighted total in `[0, 1]`.
    pub score: f64,
    pub sub_scores: SubScores,
    /// Ordered color, style, fabric.
    pub reasons: Vec<Reason>,
    /// Human-readable summary stored as the suggestion's `match_reason`.
    pub explanation: String,
}
