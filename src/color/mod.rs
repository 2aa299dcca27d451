//! Color conversion and harmony module
//!
//! This module handles conversions between hex, RGB and HSL, derives
//! complementary and analogous colors, and classifies color harmony.

pub mod conversion;
pub mod harmony;

pub use conversion::{
    analogous_colors, canonical_hex, complementary_color, hex_to_rgb, hsl_to_rgb,
    readable_text_color, rgb_distance, rgb_to_hex, rgb_to_hsl, HslColor,
};
pub use harmony::{classify_harmony, Harmony};
