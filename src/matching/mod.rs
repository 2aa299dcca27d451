//! Match engine module
//!
//! This module scores source/target color pairs, places markers on the
//! preview, and summarizes a run for presentation.

pub mod engine;
pub mod summary;
pub mod types;

pub use engine::{find_matches, remove_duplicate_positions, score_colors, MatchEngine, PairScore};
pub use summary::{filter_by_harmony, AnalysisSummary, ColorNameIndex};
pub use types::{Match, PositionData, Sensitivity};
