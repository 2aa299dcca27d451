//! Color-harmony match engine
//!
//! Compares every source color against every target color and scores the
//! pair with four rules:
//! - Direct similarity of the two colors
//! - Similarity of the target to the source's complement
//! - Similarity of the target to each of the source's analogous colors
//! - A fixed score when either color is close to gray
//!
//! The best rule wins. Pairs scoring above the minimum confidence become
//! one match per marker position, after which near-duplicate markers are
//! collapsed and the rest ranked.

use log::{debug, trace};
use palette::Srgb;

use crate::color::conversion::{
    analogous_rgb, complementary_rgb, hex_to_rgb, rgb_distance, rgb_to_hex, rgb_to_hsl,
};
use crate::color::classify_harmony;
use crate::config::MatcherConfig;
use crate::constants::{display, reasons, scoring};
use crate::error::Result;
use crate::matching::types::{Match, PositionData, Sensitivity};
use crate::sample::{ColorSample, ImageDimensions, Point, PreviewSize};

/// Score of one source/target pair before it is placed on the preview
#[derive(Debug, Clone, PartialEq)]
pub struct PairScore {
    /// Best candidate across the rules that fired, 0 when none did
    pub confidence: f64,
    /// Reasons of the rules that fired, in evaluation order, without repeats
    pub reasons: Vec<String>,
}

impl PairScore {
    fn empty() -> Self {
        Self {
            confidence: 0.0,
            reasons: Vec::new(),
        }
    }

    fn record(&mut self, candidate: f64, reason: &str) {
        trace!("rule fired: {} ({:.1})", reason, candidate);
        self.confidence = self.confidence.max(candidate);
        if !self.reasons.iter().any(|r| r == reason) {
            self.reasons.push(reason.to_string());
        }
    }
}

/// A sample whose hex parsed, with the values every rule needs
struct ParsedColor<'a> {
    sample: &'a ColorSample,
    rgb: Srgb<u8>,
    saturation: f64,
}

impl<'a> ParsedColor<'a> {
    fn parse(sample: &'a ColorSample, role: &str) -> Option<Self> {
        match hex_to_rgb(&sample.hex) {
            Some(rgb) => Some(Self {
                sample,
                rgb,
                saturation: rgb_to_hsl(rgb).s,
            }),
            None => {
                debug!("skipping {} color with malformed hex {:?}", role, sample.hex);
                None
            }
        }
    }
}

/// Source color with its derived complement and analogous colors
struct SourceColor<'a> {
    color: ParsedColor<'a>,
    complement: Srgb<u8>,
    analogous: [Srgb<u8>; 4],
}

impl<'a> SourceColor<'a> {
    fn new(color: ParsedColor<'a>) -> Self {
        Self {
            complement: complementary_rgb(color.rgb),
            analogous: analogous_rgb(color.rgb),
            color,
        }
    }

    fn suggested_colors(&self) -> Vec<String> {
        std::iter::once(self.complement)
            .chain(self.analogous.iter().copied().take(2))
            .map(rgb_to_hex)
            .collect()
    }
}

/// Match engine implementing the color-harmony rules
pub struct MatchEngine {
    config: MatcherConfig,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchEngine {
    /// Create a match engine with default parameters
    pub fn new() -> Self {
        Self {
            config: MatcherConfig::default(),
        }
    }

    /// Create a match engine with custom parameters
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidParameter` if `config` fails
    /// [`MatcherConfig::validate`]
    pub fn with_config(config: MatcherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Find the best marker placements for target colors matching the source colors
    ///
    /// # Arguments
    ///
    /// * `source` - Colors of the garment being matched
    /// * `target` - Colors of the candidate items, with positions in the source image
    /// * `fallback_positions` - Used for target colors reported without positions
    /// * `sensitivity` - Selects the RGB distance threshold
    /// * `source_dimensions` - Pixel size of the image the target positions refer to
    /// * `preview` - Size of the preview the markers are drawn on
    ///
    /// # Returns
    ///
    /// At most `max_matches` matches, ordered by descending confidence. Empty
    /// when either color set is empty or nothing scores high enough.
    ///
    /// # Errors
    ///
    /// Returns `MatchError` if:
    /// - `source_dimensions` is zero, negative or not finite
    /// - `preview` cannot fit a marker inside its margins
    pub fn find_matches(
        &self,
        source: &[ColorSample],
        target: &[ColorSample],
        fallback_positions: &[Point],
        sensitivity: Sensitivity,
        source_dimensions: ImageDimensions,
        preview: PreviewSize,
    ) -> Result<Vec<Match>> {
        source_dimensions.validate()?;
        preview.validate(self.config.marker_margin)?;

        let threshold = sensitivity.threshold();
        let scale_x = preview.width / source_dimensions.width;
        let scale_y = preview.height / source_dimensions.height;

        let sources: Vec<SourceColor> = source
            .iter()
            .filter_map(|s| ParsedColor::parse(s, "source"))
            .map(SourceColor::new)
            .collect();
        let targets: Vec<ParsedColor> = target
            .iter()
            .filter_map(|s| ParsedColor::parse(s, "target"))
            .collect();

        let mut matches = Vec::new();
        let mut next_id = 1u32;

        for src in &sources {
            for tgt in &targets {
                let score = self.score_pair(src, tgt, threshold);
                if score.confidence <= self.config.min_confidence {
                    continue;
                }

                let positions = if tgt.sample.positions.is_empty() {
                    fallback_positions
                } else {
                    tgt.sample.positions.as_slice()
                };
                let harmony = classify_harmony(&[&src.color.sample.hex, &tgt.sample.hex]);
                let suggested = src.suggested_colors();

                for raw in positions.iter().take(self.config.max_positions_per_color) {
                    let scaled = Point::new(raw.x * scale_x, raw.y * scale_y);
                    let id = next_id;
                    next_id += 1;

                    matches.push(Match {
                        id,
                        source_color: src.color.sample.hex.clone(),
                        target_color: tgt.sample.hex.clone(),
                        confidence: score.confidence,
                        harmony,
                        reasoning: score.reasons.clone(),
                        position: PositionData {
                            raw: *raw,
                            scaled,
                            bounded: self.bound(scaled, preview),
                        },
                        label: tgt.sample.label.clone().unwrap_or_else(|| {
                            format!("{} {}", display::PLACEHOLDER_LABEL, id)
                        }),
                        suggested_colors: suggested.clone(),
                    });
                }
            }
        }

        let found = matches.len();
        let mut ranked = remove_duplicate_positions(matches, self.config.dedup_distance);
        let unique = ranked.len();
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        ranked.truncate(self.config.max_matches);

        debug!(
            "matched {} source x {} target colors: {} candidates, {} unique, {} returned",
            sources.len(),
            targets.len(),
            found,
            unique,
            ranked.len()
        );
        Ok(ranked)
    }

    /// Score a source/target pair
    fn score_pair(&self, src: &SourceColor, tgt: &ParsedColor, threshold: f64) -> PairScore {
        let mut score = PairScore::empty();

        let delta = rgb_distance(src.color.rgb, tgt.rgb);
        if delta < threshold {
            score.record(
                scoring::DIRECT_BASE - (delta / threshold) * scoring::DIRECT_SPAN,
                reasons::DIRECT,
            );
        }

        let comp_delta = rgb_distance(src.complement, tgt.rgb);
        if comp_delta < threshold {
            score.record(
                scoring::COMPLEMENTARY_BASE - (comp_delta / threshold) * scoring::COMPLEMENTARY_SPAN,
                reasons::COMPLEMENTARY,
            );
        }

        for analogous in src.analogous {
            let ana_delta = rgb_distance(analogous, tgt.rgb);
            if ana_delta < threshold {
                score.record(
                    scoring::ANALOGOUS_BASE - (ana_delta / threshold) * scoring::ANALOGOUS_SPAN,
                    reasons::ANALOGOUS,
                );
            }
        }

        let neutral = self.config.neutral_saturation;
        if src.color.saturation < neutral || tgt.saturation < neutral {
            score.record(scoring::NEUTRAL_SCORE, reasons::NEUTRAL);
        }

        score
    }

    /// Clamp a scaled point inside the preview margins
    fn bound(&self, scaled: Point, preview: PreviewSize) -> Point {
        let margin = self.config.marker_margin;
        Point::new(
            scaled.x.clamp(margin, preview.width - margin),
            scaled.y.clamp(margin, preview.height - margin),
        )
    }
}

/// Score a single pair of hex colors with the default rules
///
/// Returns `None` when either color cannot be parsed.
pub fn score_colors(source_hex: &str, target_hex: &str, sensitivity: Sensitivity) -> Option<PairScore> {
    let source = ColorSample::new(source_hex);
    let target = ColorSample::new(target_hex);
    let src = SourceColor::new(ParsedColor::parse(&source, "source")?);
    let tgt = ParsedColor::parse(&target, "target")?;
    Some(MatchEngine::new().score_pair(&src, &tgt, sensitivity.threshold()))
}

/// Drop matches whose display position is within `threshold` of an earlier kept match
///
/// Matches are visited in their given order, so the first one discovered at
/// a location wins.
pub fn remove_duplicate_positions(matches: Vec<Match>, threshold: f64) -> Vec<Match> {
    let mut kept: Vec<Match> = Vec::with_capacity(matches.len());
    for candidate in matches {
        let here = candidate.display_position();
        let duplicate = kept
            .iter()
            .any(|existing| existing.display_position().distance(&here) < threshold);
        if !duplicate {
            kept.push(candidate);
        }
    }
    kept
}

/// Find matches with the default configuration
///
/// See [`MatchEngine::find_matches`].
pub fn find_matches(
    source: &[ColorSample],
    target: &[ColorSample],
    fallback_positions: &[Point],
    sensitivity: Sensitivity,
    source_dimensions: ImageDimensions,
    preview: PreviewSize,
) -> Result<Vec<Match>> {
    MatchEngine::new().find_matches(
        source,
        target,
        fallback_positions,
        sensitivity,
        source_dimensions,
        preview,
    )
}
