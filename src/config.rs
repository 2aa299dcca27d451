//! Configuration for the matching pipeline.
//!
//! All tunable parameters of the match engine and the analysis scheduler
//! live in [`MatcherConfig`]. The defaults reproduce the documented
//! behavior; a JSON file may override any subset of them.
//!
//! ```no_run
//! use harmony_match::MatcherConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = MatcherConfig::from_json_file(Path::new("matcher.json"))?;
//!
//! // Or use defaults
//! let config = MatcherConfig::default();
//! # Ok::<(), harmony_match::MatchError>(())
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{placement, scheduling, scoring};
use crate::error::{MatchError, Result};
use crate::layout::FallbackGrid;
use crate::matching::Sensitivity;

/// Complete matcher configuration.
///
/// Fields missing from a JSON file take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Distance threshold level used when the caller does not pick one
    pub sensitivity: Sensitivity,

    /// Marker positions used per matching target color
    pub max_positions_per_color: usize,

    /// Number of matches kept after ranking
    pub max_matches: usize,

    /// Markers closer than this (preview units) are collapsed
    pub dedup_distance: f64,

    /// Distance kept between markers and the preview edges
    pub marker_margin: f64,

    /// A pair must score strictly above this to produce matches; may be
    /// raised above 70 but never lowered
    pub min_confidence: f64,

    /// HSL saturation (percent) below which a color counts as neutral
    pub neutral_saturation: f64,

    /// Quiet period before a scheduled analysis fires, in milliseconds
    pub debounce_ms: u64,

    /// Grid used when a target color arrives without positions
    pub fallback_grid: FallbackGrid,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            sensitivity: Sensitivity::Medium,
            max_positions_per_color: placement::MAX_POSITIONS_PER_COLOR,
            max_matches: placement::MAX_MATCHES,
            dedup_distance: placement::DEDUP_DISTANCE,
            marker_margin: placement::MARKER_MARGIN,
            min_confidence: scoring::MIN_CONFIDENCE,
            neutral_saturation: scoring::NEUTRAL_SATURATION,
            debounce_ms: scheduling::DEBOUNCE_DELAY.as_millis() as u64,
            fallback_grid: FallbackGrid::default(),
        }
    }
}

impl MatcherConfig {
    /// Debounce delay as a [`Duration`]
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<()> {
        if self.max_matches == 0 {
            return Err(MatchError::invalid_parameter("max_matches", self.max_matches));
        }
        if self.max_positions_per_color == 0 {
            return Err(MatchError::invalid_parameter(
                "max_positions_per_color",
                self.max_positions_per_color,
            ));
        }
        if !self.dedup_distance.is_finite() || self.dedup_distance < 0.0 {
            return Err(MatchError::invalid_parameter("dedup_distance", self.dedup_distance));
        }
        if !self.marker_margin.is_finite() || self.marker_margin < 0.0 {
            return Err(MatchError::invalid_parameter("marker_margin", self.marker_margin));
        }
        if !(scoring::MIN_CONFIDENCE..100.0).contains(&self.min_confidence) {
            return Err(MatchError::invalid_parameter("min_confidence", self.min_confidence));
        }
        if !(0.0..=100.0).contains(&self.neutral_saturation) {
            return Err(MatchError::invalid_parameter(
                "neutral_saturation",
                self.neutral_saturation,
            ));
        }
        if self.fallback_grid.rows == 0 || self.fallback_grid.columns == 0 {
            return Err(MatchError::invalid_parameter(
                "fallback_grid",
                format!("{}x{}", self.fallback_grid.rows, self.fallback_grid.columns),
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MatchError::io(format!("Failed to read {}", path.display()), e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| MatchError::json(format!("Invalid config {}", path.display()), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| MatchError::json("Failed to encode config", e))?;
        std::fs::write(path, json)
            .map_err(|e| MatchError::io(format!("Failed to write {}", path.display()), e))?;
        Ok(())
    }
}
