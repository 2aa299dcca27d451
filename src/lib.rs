//! # Harmony Match
//!
//! A Rust crate for matching garment colors against accessory colors using
//! simple color theory.
//!
//! Given the dominant colors of two photographs, as reported by a remote
//! analysis service, this library:
//! - Scores every color pair for direct, complementary, analogous and
//!   neutral-tone relations
//! - Classifies each pair's color harmony
//! - Places markers on a scaled preview, collapsing near duplicates
//! - Returns the best matches ranked by confidence
//!
//! ## Example
//!
//! ```rust
//! use harmony_match::{find_matches, ColorSample, ImageDimensions, Point, PreviewSize, Sensitivity};
//!
//! let garment = vec![ColorSample::new("#ff0000")];
//! let rack = vec![ColorSample::new("#00ffff").with_positions([Point::new(400.0, 300.0)])];
//!
//! let matches = find_matches(
//!     &garment,
//!     &rack,
//!     &[],
//!     Sensitivity::Medium,
//!     ImageDimensions::new(800.0, 600.0),
//!     PreviewSize::new(400.0, 300.0),
//! )?;
//! println!("{} at {:?}: {}%", matches[0].harmony, matches[0].position.bounded, matches[0].display_confidence());
//! # Ok::<(), harmony_match::MatchError>(())
//! ```

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod layout;
pub mod matching;
pub mod sample;
pub mod scheduler;

pub use color::{classify_harmony, Harmony};
pub use config::MatcherConfig;
pub use error::{MatchError, Result};
pub use layout::{fallback_positions, FallbackGrid};
pub use matching::{
    filter_by_harmony, find_matches, AnalysisSummary, ColorNameIndex, Match, MatchEngine,
    PositionData, Sensitivity,
};
pub use sample::{AnalysisResponse, ColorSample, ImageDimensions, Point, PreviewSize};
pub use scheduler::{AnalysisScheduler, Schedule};
