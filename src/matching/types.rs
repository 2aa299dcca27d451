//! Match engine output types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Harmony;
use crate::constants::thresholds;
use crate::error::MatchError;
use crate::sample::Point;

/// Strictness of the RGB distance test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl Sensitivity {
    /// Euclidean RGB distance below which two colors are considered related
    pub fn threshold(&self) -> f64 {
        match self {
            Self::Low => thresholds::LOW,
            Self::Medium => thresholds::MEDIUM,
            Self::High => thresholds::HIGH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sensitivity {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(MatchError::invalid_parameter("sensitivity", s)),
        }
    }
}

/// Marker location in each coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionData {
    /// As reported for the source image
    pub raw: Point,
    /// Scaled into preview space
    pub scaled: Point,
    /// Scaled and clamped inside the preview margins
    pub bounded: Point,
}

/// One pairing of a source color with a target color at a marker position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Discovery order within one run, starting at 1
    pub id: u32,
    pub source_color: String,
    pub target_color: String,
    /// Best rule score for the pair, strictly above 70 and at most 100
    pub confidence: f64,
    /// Harmony of the source/target pair
    pub harmony: Harmony,
    /// Reasons in the order the rules fired, without repeats
    pub reasoning: Vec<String>,
    pub position: PositionData,
    /// Name of the target color, or a generated placeholder
    pub label: String,
    /// Complement of the source followed by its first two analogous colors
    pub suggested_colors: Vec<String>,
}

impl Match {
    /// Confidence rounded to a whole percentage
    pub fn display_confidence(&self) -> u8 {
        self.confidence.round().clamp(0.0, 100.0) as u8
    }

    /// Reasons joined for display
    pub fn reasoning_text(&self) -> String {
        self.reasoning.join(", ")
    }

    /// Where the marker is drawn
    pub fn display_position(&self) -> Point {
        self.position.bounded
    }
}
