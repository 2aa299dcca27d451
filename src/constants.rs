//! Matching constants and reference values
//!
//! Compile-time defaults for the match engine, the harmony classifier and
//! the analysis scheduler. [`crate::MatcherConfig`] starts from these values.

/// RGB distance thresholds, one per sensitivity level
///
/// Distances are Euclidean in 0..=255 RGB space, so the largest possible
/// value is roughly 441.7 (black to white).
pub mod thresholds {
    /// Threshold for [`crate::Sensitivity::Low`]
    pub const LOW: f64 = 80.0;

    /// Threshold for [`crate::Sensitivity::Medium`]
    pub const MEDIUM: f64 = 60.0;

    /// Threshold for [`crate::Sensitivity::High`]
    pub const HIGH: f64 = 40.0;
}

/// Scoring rules applied to each source/target pair
pub mod scoring {
    /// A pair must score strictly above this to produce matches
    pub const MIN_CONFIDENCE: f64 = 70.0;

    /// Direct similarity: score at zero distance, lost linearly to the threshold
    pub const DIRECT_BASE: f64 = 100.0;
    pub const DIRECT_SPAN: f64 = 100.0;

    /// Complementary match
    pub const COMPLEMENTARY_BASE: f64 = 95.0;
    pub const COMPLEMENTARY_SPAN: f64 = 15.0;

    /// Analogous match
    pub const ANALOGOUS_BASE: f64 = 85.0;
    pub const ANALOGOUS_SPAN: f64 = 15.0;

    /// Fixed score when either color is close to gray
    pub const NEUTRAL_SCORE: f64 = 80.0;

    /// HSL saturation (percent) below which a color counts as neutral
    pub const NEUTRAL_SATURATION: f64 = 20.0;

    /// Hue offsets in degrees used for analogous colors, ascending
    pub const ANALOGOUS_OFFSETS: [f64; 4] = [-30.0, -15.0, 15.0, 30.0];
}

/// Reason strings attached to matches, in rule evaluation order
pub mod reasons {
    pub const DIRECT: &str = "Direct color similarity";
    pub const COMPLEMENTARY: &str = "Complementary color match";
    pub const ANALOGOUS: &str = "Analogous color match";
    pub const NEUTRAL: &str = "Neutral tone combination";
}

/// Harmony classification boundaries on the average hue difference (degrees)
pub mod harmony {
    /// Below this the colors are monochromatic
    pub const MONOCHROMATIC_MAX: f64 = 30.0;

    /// Above this the colors are triadic (unless complementary)
    pub const TRIADIC_MIN: f64 = 90.0;

    /// Above this the colors are complementary
    pub const COMPLEMENTARY_MIN: f64 = 150.0;
}

/// Marker placement and result shaping
pub mod placement {
    /// Distance kept between a marker and the preview edge
    pub const MARKER_MARGIN: f64 = 25.0;

    /// Markers closer than this collapse into the first one found
    pub const DEDUP_DISTANCE: f64 = 30.0;

    /// Maximum number of matches returned from one run
    pub const MAX_MATCHES: usize = 8;

    /// Positions used per matching target color
    pub const MAX_POSITIONS_PER_COLOR: usize = 5;

    /// Fallback marker grid
    pub const FALLBACK_ROWS: u32 = 3;
    pub const FALLBACK_COLUMNS: u32 = 4;

    /// Fraction of the preview kept free on each side of the fallback grid
    pub const FALLBACK_INSET: f64 = 0.1;
}

/// Display helpers
pub mod display {
    /// Perceived brightness above which dark text is used on a color
    pub const TEXT_BRIGHTNESS_THRESHOLD: f64 = 150.0;

    pub const DARK_TEXT: &str = "#000000";
    pub const LIGHT_TEXT: &str = "#ffffff";

    /// Prefix of the generated label for unnamed target colors
    pub const PLACEHOLDER_LABEL: &str = "Rack Color";
}

/// Analysis scheduling
pub mod scheduling {
    use std::time::Duration;

    /// Quiet period after the last input change before analysis starts
    pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(800);
}
