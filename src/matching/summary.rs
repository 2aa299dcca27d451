//! Per-run analysis summary
//!
//! Bundles a run's matches with what the caller needs to present them: the
//! colors found in each image, the overall harmony of all colors, one line
//! of reasoning per match and the time the run took.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::{canonical_hex, classify_harmony, Harmony};
use crate::matching::types::Match;
use crate::sample::ColorSample;

/// Summary of one matching run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub matches: Vec<Match>,
    pub processing_time_ms: u64,
    /// Hex codes detected in the source image
    pub dominant_colors: Vec<String>,
    /// Hex codes detected in the target image
    pub color_palette: Vec<String>,
    /// Harmony of all source colors followed by all target colors
    pub overall_harmony: Harmony,
    /// `"Name (#hex)"` for each source color
    pub source_descriptions: Vec<String>,
    /// `"Name (#hex)"` for each target color
    pub target_descriptions: Vec<String>,
    /// One sentence per match
    pub reasoning: Vec<String>,
}

impl AnalysisSummary {
    /// Build the summary for a completed run
    pub fn build(
        source: &[ColorSample],
        target: &[ColorSample],
        matches: Vec<Match>,
        processing_time: Duration,
    ) -> Self {
        let dominant_colors: Vec<String> = source.iter().map(|c| c.hex.clone()).collect();
        let color_palette: Vec<String> = target.iter().map(|c| c.hex.clone()).collect();

        let all_colors: Vec<&String> = dominant_colors.iter().chain(&color_palette).collect();
        let overall_harmony = classify_harmony(&all_colors);

        let reasoning = matches
            .iter()
            .map(|m| {
                format!(
                    "Matched source {} with target {} ({} harmony, confidence {}%)",
                    m.source_color,
                    m.target_color,
                    m.harmony,
                    m.display_confidence()
                )
            })
            .collect();

        Self {
            processing_time_ms: u64::try_from(processing_time.as_millis()).unwrap_or(u64::MAX),
            overall_harmony,
            source_descriptions: source.iter().map(ColorSample::describe).collect(),
            target_descriptions: target.iter().map(ColorSample::describe).collect(),
            reasoning,
            dominant_colors,
            color_palette,
            matches,
        }
    }

    /// Keep only matches of the selected harmony
    pub fn filtered(mut self, harmony: Option<Harmony>) -> Self {
        if harmony.is_some() {
            let keep: Vec<bool> = self
                .matches
                .iter()
                .map(|m| Some(m.harmony) == harmony)
                .collect();
            let mut flags = keep.iter();
            self.reasoning.retain(|_| *flags.next().unwrap_or(&false));
            self.matches = filter_by_harmony(self.matches, harmony);
        }
        self
    }
}

/// Keep matches whose pair harmony equals `harmony`; `None` keeps everything
pub fn filter_by_harmony(matches: Vec<Match>, harmony: Option<Harmony>) -> Vec<Match> {
    match harmony {
        Some(selected) => matches.into_iter().filter(|m| m.harmony == selected).collect(),
        None => matches,
    }
}

/// Lookup of color names by canonical hex code
#[derive(Debug, Clone, Default)]
pub struct ColorNameIndex {
    names: HashMap<String, String>,
}

impl ColorNameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every labeled sample; later entries overwrite earlier ones
    pub fn from_samples<'a>(samples: impl IntoIterator<Item = &'a ColorSample>) -> Self {
        let mut index = Self::new();
        for sample in samples {
            if let Some(label) = &sample.label {
                index.insert(&sample.hex, label);
            }
        }
        index
    }

    /// Learn target names from matches that carry a real label
    pub fn extend_from_matches<'a>(&mut self, matches: impl IntoIterator<Item = &'a Match>) {
        for m in matches {
            if !m.label.trim().is_empty() && !is_placeholder(&m.label) {
                self.insert(&m.target_color, &m.label);
            }
        }
    }

    /// Record a name; ignored when `hex` is malformed or `name` blank
    pub fn insert(&mut self, hex: &str, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if let Some(key) = canonical_hex(hex) {
            self.names.insert(key, name.to_string());
        }
    }

    /// Name for a hex code in any case, with or without `#`
    pub fn get(&self, hex: &str) -> Option<&str> {
        canonical_hex(hex).and_then(|key| self.names.get(&key).map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn is_placeholder(label: &str) -> bool {
    label
        .strip_prefix(crate::constants::display::PLACEHOLDER_LABEL)
        .map(|rest| rest.trim().chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}
