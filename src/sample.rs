//! Input data for the match engine
//!
//! The remote analysis service replies with a JSON object of the form
//! `{"colors": [{"hex": "#aabbcc", "positions": [{"x": 1, "y": 2}], "colorName": "Navy"}]}`.
//! These types decode that reply; transport and retries belong to the caller.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::canonical_hex;
use crate::error::{MatchError, Result};

/// Pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One dominant color detected in an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSample {
    /// Six-digit hex code, optionally prefixed with `#`
    pub hex: String,

    /// Pixel positions where the color was observed, in source image space
    #[serde(default)]
    pub positions: Vec<Point>,

    /// Human-readable color name
    #[serde(
        rename = "colorName",
        alias = "label",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
}

impl ColorSample {
    pub fn new(hex: impl Into<String>) -> Self {
        Self {
            hex: hex.into(),
            positions: Vec::new(),
            label: None,
        }
    }

    pub fn with_positions(mut self, positions: impl IntoIterator<Item = Point>) -> Self {
        self.positions = positions.into_iter().collect();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Lowercase `#rrggbb` form of [`Self::hex`], if it parses
    pub fn canonical_hex(&self) -> Option<String> {
        canonical_hex(&self.hex)
    }

    /// `"Name (#hex)"`, or just the hex when the sample is unnamed
    pub fn describe(&self) -> String {
        match &self.label {
            Some(label) => format!("{} ({})", label, self.hex),
            None => self.hex.clone(),
        }
    }
}

/// Reply of the remote color analysis service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub colors: Vec<ColorSample>,
}

impl AnalysisResponse {
    /// Decode a JSON reply
    ///
    /// A missing or `null` `colors` field yields an empty color list.
    pub fn from_json_str(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(default)]
            colors: Option<Vec<ColorSample>>,
        }

        let wire: Wire = serde_json::from_str(json)
            .map_err(|e| MatchError::json("Failed to decode analysis response", e))?;
        Ok(Self {
            colors: wire.colors.unwrap_or_default(),
        })
    }

    /// Load a saved JSON reply from disk
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MatchError::io(format!("Failed to read {}", path.display()), e))?;
        Self::from_json_str(&content)
    }
}

/// Pixel size of the analyzed source image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: f64,
    pub height: f64,
}

impl ImageDimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Reject dimensions that would make the scale factor infinite or NaN
    pub fn validate(&self) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(MatchError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Size of the on-screen preview the markers are placed on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewSize {
    pub width: f64,
    pub height: f64,
}

impl PreviewSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Ensure a marker kept `margin` away from every edge still fits
    pub fn validate(&self, margin: f64) -> Result<()> {
        let minimum = 2.0 * margin;
        let valid = |v: f64| v.is_finite() && v >= minimum;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(MatchError::InvalidPreviewSize {
                width: self.width,
                height: self.height,
                minimum,
            })
        }
    }
}
