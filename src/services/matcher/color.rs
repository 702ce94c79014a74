//! Color model for pairing: parse a tag color, place it on the hue wheel and
//! classify how two colors relate.

use serde::{Deserialize, Serialize};

/// Saturation below this reads as gray.
const NEUTRAL_SATURATION: f64 = 0.15;
const NEUTRAL_DARK: f64 = 0.12;
const NEUTRAL_LIGHT: f64 = 0.92;

/// Names the tagger or a user may store instead of a hex value.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("white", (255, 255, 255)),
    ("black", (0, 0, 0)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("charcoal", (54, 69, 79)),
    ("silver", (192, 192, 192)),
    ("beige", (245, 245, 220)),
    ("cream", (255, 253, 208)),
    ("ivory", (255, 255, 240)),
    ("khaki", (195, 176, 145)),
    ("tan", (210, 180, 140)),
    ("brown", (139, 69, 19)),
    ("navy", (0, 0, 128)),
    ("blue", (0, 0, 255)),
    ("denim", (21, 96, 189)),
    ("teal", (0, 128, 128)),
    ("green", (0, 128, 0)),
    ("olive", (128, 128, 0)),
    ("yellow", (255, 255, 0)),
    ("mustard", (225, 173, 1)),
    ("orange", (255, 165, 0)),
    ("red", (255, 0, 0)),
    ("burgundy", (128, 0, 32)),
    ("pink", (255, 192, 203)),
    ("purple", (128, 0, 128)),
    ("lavender", (230, 230, 250)),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Accepts `#rgb`, `#rrggbb` (hash optional) or a known color name.
    pub fn parse(value: &str) -> Option<Rgb> {
        let trimmed = value.trim().to_lowercase();
        if let Some(&(_, (r, g, b))) = NAMED_COLORS.iter().find(|(name, _)| *name == trimmed) {
            return Some(Rgb { r, g, b });
        }

        let hex = trimmed.strip_prefix('#').unwrap_or(&trimmed);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
                Some(Rgb {
                    r: digit(0)?,
                    g: digit(1)?,
                    b: digit(2)?,
                })
            }
            6 => {
                let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Rgb {
                    r: pair(0)?,
                    g: pair(2)?,
                    b: pair(4)?,
                })
            }
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;
        let delta = max - min;

        if delta <= f64::EPSILON {
            return Hsl {
                hue: 0.0,
                saturation: 0.0,
                lightness,
            };
        }

        let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());
        let hue = if max == r {
            60.0 * (((g - b) / delta).rem_euclid(6.0))
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };

        Hsl {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 1.0),
            lightness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Degrees in `[0, 360)`.
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    /// Grays, near-black, near-white, navy and beige all pair with anything.
    pub fn is_neutral(&self) -> bool {
        if self.saturation < NEUTRAL_SATURATION
            || self.lightness < NEUTRAL_DARK
            || self.lightness > NEUTRAL_LIGHT
        {
            return true;
        }
        let navy = (200.0..=250.0).contains(&self.hue) && self.lightness < 0.3;
        let beige = (25.0..=60.0).contains(&self.hue)
            && self.lightness > 0.6
            && self.saturation < 0.6;
        navy || beige
    }
}

/// How two colors relate on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorHarmony {
    /// Exactly one side is neutral.
    NeutralAccent,
    BothNeutral,
    /// Hues roughly opposite.
    Complementary,
    /// Hues a few steps apart.
    Analogous,
    /// Hues about a third of the wheel apart.
    Triadic,
    /// Same hue family.
    Monochrome,
    Clash,
    /// At least one color could not be read.
    Unknown,
}

impl ColorHarmony {
    pub fn score(&self) -> f64 {
        match self {
            ColorHarmony::Complementary => 1.0,
            ColorHarmony::NeutralAccent => 0.9,
            ColorHarmony::Analogous => 0.85,
            ColorHarmony::BothNeutral => 0.8,
            ColorHarmony::Triadic => 0.75,
            ColorHarmony::Monochrome => 0.7,
            ColorHarmony::Unknown => 0.5,
            ColorHarmony::Clash => 0.35,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ColorHarmony::Complementary => "complementary colors create striking contrast",
            ColorHarmony::NeutralAccent => "a neutral piece lets the other color stand out",
            ColorHarmony::Analogous => "neighbouring hues blend smoothly",
            ColorHarmony::BothNeutral => "two neutrals keep the look clean",
            ColorHarmony::Triadic => "triadic colors give a balanced, playful mix",
            ColorHarmony::Monochrome => "a tonal, single-hue look",
            ColorHarmony::Unknown => "colors could not be compared",
            ColorHarmony::Clash => "the colors compete with each other",
        }
    }
}

/// Shortest angular distance between two hues, in `[0, 180]`.
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs().rem_euclid(360.0);
    diff.min(360.0 - diff)
}

pub fn classify_harmony(top_color: &str, bottom_color: &str) -> ColorHarmony {
    let (Some(top), Some(bottom)) = (Rgb::parse(top_color), Rgb::parse(bottom_color)) else {
        return ColorHarmony::Unknown;
    };
    let (top, bottom) = (top.to_hsl(), bottom.to_hsl());

    match (top.is_neutral(), bottom.is_neutral()) {
        (true, true) => return ColorHarmony::BothNeutral,
        (true, false) | (false, true) => return ColorHarmony::NeutralAccent,
        (false, false) => {}
    }

    let distance = hue_distance(top.hue, bottom.hue);
    if distance < 15.0 {
        ColorHarmony::Monochrome
    } else if distance <= 45.0 {
        ColorHarmony::Analogous
    } else if (105.0..=135.0).contains(&distance) {
        ColorHarmony::Triadic
    } else if distance >= 150.0 {
        ColorHarmony::Complementary
    } else {
        ColorHarmony::Clash
    }
}

#[cfg(test)]
#[path = "tests/color_tests.rs"]
mod tests;
