//! Color harmony classification
//!
//! Classifies how a set of colors relate on the hue wheel from the mean of
//! consecutive hue differences. This is a heuristic: hues are compared
//! linearly, so 350 and 10 degrees count as 340 apart, and saturation and
//! lightness are ignored. It is good enough to label matches, not a
//! perceptual model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::conversion::{hex_to_rgb, rgb_to_hsl};
use crate::constants::harmony;
use crate::error::MatchError;

/// Relationship between hues on the color wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Harmony {
    /// Same hue family
    Monochromatic,
    /// Neighboring hues
    Analogous,
    /// Evenly spaced hues, roughly 120 degrees apart
    Triadic,
    /// Opposite hues
    Complementary,
}

impl Harmony {
    /// All harmony kinds, in the order they are offered for filtering
    pub const ALL: [Harmony; 4] = [
        Self::Monochromatic,
        Self::Complementary,
        Self::Analogous,
        Self::Triadic,
    ];

    /// Lowercase identifier used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monochromatic => "monochromatic",
            Self::Analogous => "analogous",
            Self::Triadic => "triadic",
            Self::Complementary => "complementary",
        }
    }

    /// Typical outfit this harmony suits
    pub fn use_case(&self) -> &'static str {
        match self {
            Self::Monochromatic => "Formal office wear (shades of one color)",
            Self::Complementary => "Party and ceremony wear (e.g. red with green)",
            Self::Analogous => "Traditional combinations (e.g. orange, red and yellow borders)",
            Self::Triadic => "Modern fashion (e.g. bold red, blue and yellow)",
        }
    }
}

impl fmt::Display for Harmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Harmony {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Harmony::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MatchError::invalid_parameter("harmony", s))
    }
}

/// Hue of a hex color in degrees; unparseable colors count as hue 0
fn hue_of(hex: &str) -> f64 {
    hex_to_rgb(hex).map(|rgb| rgb_to_hsl(rgb).h).unwrap_or(0.0)
}

/// Classify the overall harmony of a sequence of hex colors
///
/// Fewer than two colors is always monochromatic. Otherwise the absolute
/// hue differences between neighbors are averaged over `n - 1` pairs:
/// below 30 is monochromatic, above 150 complementary, above 90 triadic,
/// anything else analogous.
pub fn classify_harmony<S: AsRef<str>>(colors: &[S]) -> Harmony {
    if colors.len() < 2 {
        return Harmony::Monochromatic;
    }

    let hues: Vec<f64> = colors.iter().map(|c| hue_of(c.as_ref())).collect();
    let total: f64 = hues.windows(2).map(|pair| (pair[1] - pair[0]).abs()).sum();
    let average = total / (hues.len() - 1) as f64;

    if average < harmony::MONOCHROMATIC_MAX {
        Harmony::Monochromatic
    } else if average > harmony::COMPLEMENTARY_MIN {
        Harmony::Complementary
    } else if average > harmony::TRIADIC_MIN {
        Harmony::Triadic
    } else {
        Harmony::Analogous
    }
}
