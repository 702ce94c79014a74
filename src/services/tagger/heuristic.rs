use super::{AttributeTagger, TagSet};
use crate::database::models::{Fabric, Style};
use crate::services::matcher::color::Rgb;
use crate::types::errors::ClosetError;
use anyhow::{anyhow, Context};
use base64::Engine;
use std::collections::BTreeMap;

/// Longest edge images are reduced to before counting colors.
const SAMPLE_SIZE: u32 = 64;
/// Bits kept per channel when bucketing pixels.
const BUCKET_BITS: u8 = 4;
/// Pixels at or below this alpha are background.
const ALPHA_CUTOFF: u8 = 16;

/// Dominant color from the pixels; style and fabric derived from a seeded
/// hash of the image bytes, so the same image and seed always get the same tags.
#[derive(Debug, Clone, Default)]
pub struct HeuristicTagger {
    seed: u64,
}

impl HeuristicTagger {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn analyze(&self, image_url: &str) -> anyhow::Result<TagSet> {
        let bytes = load_image_bytes(image_url)?;
        let color = dominant_color(&bytes)?;

        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed.to_le_bytes());
        hasher.update(&bytes);
        let digest = hasher.finalize();
        let digest = digest.as_bytes();

        Ok(TagSet {
            color: color.to_hex(),
            style: Style::ALL[usize::from(digest[0]) % Style::ALL.len()],
            fabric: Fabric::ALL[usize::from(digest[1]) % Fabric::ALL.len()],
        })
    }
}

impl AttributeTagger for HeuristicTagger {
    fn tag(&self, image_url: &str) -> Result<TagSet, ClosetError> {
        self.analyze(image_url)
            .map_err(|e| ClosetError::Tagging(format!("{e:#}")))
    }
}

/// Bytes behind a `data:` URL (base64 payload) or a local file path.
pub fn load_image_bytes(image_url: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = image_url.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("empty image reference"));
    }

    if let Some(rest) = trimmed.strip_prefix("data:") {
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| anyhow!("malformed data URL"))?;
        if !meta.ends_with(";base64") {
            return Err(anyhow!("data URL is not base64 encoded"));
        }
        return base64::engine::general_purpose::STANDARD
            .decode(payload)
            .context("invalid base64 image payload");
    }

    std::fs::read(trimmed).with_context(|| format!("failed to read image {trimmed}"))
}

/// Most common color bucket, averaged over the pixels that fell into it.
pub fn dominant_color(bytes: &[u8]) -> anyhow::Result<Rgb> {
    let img = image::load_from_memory(bytes).context("unsupported or corrupt image")?;
    let sample = if img.width() > SAMPLE_SIZE || img.height() > SAMPLE_SIZE {
        img.thumbnail(SAMPLE_SIZE, SAMPLE_SIZE).to_rgba8()
    } else {
        img.to_rgba8()
    };

    let shift = 8 - BUCKET_BITS;
    // BTreeMap keeps tie-breaking deterministic (lowest bucket wins).
    let mut buckets: BTreeMap<(u8, u8, u8), (u64, [u64; 3])> = BTreeMap::new();
    for pixel in sample.pixels() {
        let [r, g, b, a] = pixel.0;
        if a <= ALPHA_CUTOFF {
            continue;
        }
        let entry = buckets
            .entry((r >> shift, g >> shift, b >> shift))
            .or_insert((0, [0; 3]));
        entry.0 += 1;
        entry.1[0] += u64::from(r);
        entry.1[1] += u64::from(g);
        entry.1[2] += u64::from(b);
    }

    let mut best: Option<(u64, [u64; 3])> = None;
    for (count, sums) in buckets.into_values() {
        if best.map_or(true, |(best_count, _)| count > best_count) {
            best = Some((count, sums));
        }
    }
    let (count, sums) = best.ok_or_else(|| anyhow!("image has no opaque pixels"))?;

    let channel = |sum: u64| u8::try_from(sum / count).unwrap_or(u8::MAX);
    Ok(Rgb {
        r: channel(sums[0]),
        g: channel(sums[1]),
        b: channel(sums[2]),
    })
}
