//! Attribute tagging for newly uploaded items.
//!
//! Tagging is a capability injected into the closet service. A failing
//! tagger never blocks item creation: callers fall back to [`TagSet::neutral`].

pub mod heuristic;

pub use heuristic::HeuristicTagger;

use crate::database::models::{Fabric, Style};
use crate::types::errors::ClosetError;
use serde::{Deserialize, Serialize};

pub const NEUTRAL_COLOR: &str = "#808080";

/// Attributes assigned to an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    pub color: String,
    pub style: Style,
    pub fabric: Fabric,
}

impl TagSet {
    pub fn neutral() -> Self {
        Self {
            color: NEUTRAL_COLOR.to_string(),
            style: Style::Casual,
            fabric: Fabric::Cotton,
        }
    }
}

pub trait AttributeTagger: Send + Sync {
    /// Tag the image behind `image_url` (a `data:` URL or a local file path).
    fn tag(&self, image_url: &str) -> Result<TagSet, ClosetError>;
}

/// Tag with `tagger`, falling back to the neutral set on failure.
pub fn tag_or_neutral(tagger: &dyn AttributeTagger, image_url: &str) -> TagSet {
    match tagger.tag(image_url) {
        Ok(tags) => tags,
        Err(e) => {
            log::warn!("Attribute tagging failed, using neutral tags: {e}");
            TagSet::neutral()
        }
    }
}

#[cfg(test)]
#[path = "tests/tagger_tests.rs"]
mod tests;
