//! Color space conversion utilities
//!
//! Provides conversions between the representations the matcher works with:
//! - Hex strings (`#rrggbb`) to and from 8-bit sRGB
//! - sRGB to HSL (hue in degrees, saturation and lightness in percent)
//! - Complementary and analogous color derivation
//! - Euclidean RGB distance and readable text color selection
//!
//! All functions are pure. Only hex parsing can fail; it returns `None`
//! and callers are expected to skip the color.

use palette::Srgb;

use crate::constants::{display, scoring};

/// HSL color with hue in degrees and saturation/lightness in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    /// Hue in `[0, 360)`, 0 for achromatic colors
    pub h: f64,
    /// Saturation in `[0, 100]`
    pub s: f64,
    /// Lightness in `[0, 100]`
    pub l: f64,
}

impl HslColor {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// Parse a hexadecimal color string to 8-bit sRGB
///
/// Accepts exactly six hex digits with an optional leading `#`, in any
/// case. Shorthand (`#fff`), alpha channels and surrounding whitespace
/// are rejected.
///
/// # Returns
///
/// `None` if the string is not a strict 6-digit hex color
pub fn hex_to_rgb(hex: &str) -> Option<Srgb<u8>> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Srgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Convert 8-bit sRGB to a lowercase `#rrggbb` string
pub fn rgb_to_hex(rgb: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

/// Normalize a hex color to lowercase `#rrggbb`, the form used for comparisons
pub fn canonical_hex(hex: &str) -> Option<String> {
    hex_to_rgb(hex).map(rgb_to_hex)
}

/// Convert 8-bit sRGB to HSL
///
/// Channels are divided by 255 and the hexcone model is evaluated in
/// `f64`. Exact channel ratios give exact percentages: `#060609` has
/// `s == 20.0`, which the neutral rule depends on.
///
/// # Returns
///
/// HSL color with `h` in `[0, 360)` and `s`, `l` in `[0, 100]`.
/// The hue is 0 when all three channels are equal.
pub fn rgb_to_hsl(rgb: Srgb<u8>) -> HslColor {
    let r = f64::from(rgb.red) / 255.0;
    let g = f64::from(rgb.green) / 255.0;
    let b = f64::from(rgb.blue) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return HslColor::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    HslColor::new(sector / 6.0 * 360.0, s * 100.0, l * 100.0)
}

/// Convert HSL back to RGB
///
/// # Returns
///
/// Unrounded `(r, g, b)` on the `[0, 255]` scale. Use [`round_rgb`] before
/// encoding the result as hex.
pub fn hsl_to_rgb(hsl: HslColor) -> (f64, f64, f64) {
    let h = hsl.h / 360.0;
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    if s == 0.0 {
        return (l * 255.0, l * 255.0, l * 255.0);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    (
        hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
        hue_to_channel(p, q, h) * 255.0,
        hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
    )
}

/// One channel of the HSL to RGB conversion, `t` being the hue fraction
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Round floating point RGB components to an 8-bit color
pub fn round_rgb((r, g, b): (f64, f64, f64)) -> Srgb<u8> {
    let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    Srgb::new(channel(r), channel(g), channel(b))
}

/// Compute the complementary color by inverting each RGB channel
pub fn complementary_rgb(rgb: Srgb<u8>) -> Srgb<u8> {
    Srgb::new(255 - rgb.red, 255 - rgb.green, 255 - rgb.blue)
}

/// Compute the complementary color of a hex string
///
/// # Returns
///
/// `#rrggbb` complement, or `None` when `hex` cannot be parsed
pub fn complementary_color(hex: &str) -> Option<String> {
    hex_to_rgb(hex).map(|rgb| rgb_to_hex(complementary_rgb(rgb)))
}

/// Compute the analogous colors of an 8-bit color
///
/// Hue is shifted by -30, -15, +15 and +30 degrees while saturation and
/// lightness stay fixed. The zero offset is not included.
pub fn analogous_rgb(rgb: Srgb<u8>) -> [Srgb<u8>; 4] {
    let hsl = rgb_to_hsl(rgb);
    scoring::ANALOGOUS_OFFSETS.map(|offset| {
        let hue = (hsl.h + offset + 360.0) % 360.0;
        round_rgb(hsl_to_rgb(HslColor::new(hue, hsl.s, hsl.l)))
    })
}

/// Compute the four analogous colors of a hex string, in ascending offset order
pub fn analogous_colors(hex: &str) -> Option<Vec<String>> {
    let rgb = hex_to_rgb(hex)?;
    Some(analogous_rgb(rgb).into_iter().map(rgb_to_hex).collect())
}

/// Euclidean distance between two colors in 0..=255 RGB space
pub fn rgb_distance(a: Srgb<u8>, b: Srgb<u8>) -> f64 {
    let dr = f64::from(a.red) - f64::from(b.red);
    let dg = f64::from(a.green) - f64::from(b.green);
    let db = f64::from(a.blue) - f64::from(b.blue);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Pick black or white text for legibility on a colored background
///
/// Uses perceived brightness `(299 r + 587 g + 114 b) / 1000`; anything
/// brighter than 150 gets dark text.
pub fn readable_text_color(background: &str) -> Option<&'static str> {
    let rgb = hex_to_rgb(background)?;
    let brightness = (299.0 * f64::from(rgb.red)
        + 587.0 * f64::from(rgb.green)
        + 114.0 * f64::from(rgb.blue))
        / 1000.0;

    Some(if brightness > display::TEXT_BRIGHTNESS_THRESHOLD {
        display::DARK_TEXT
    } else {
        display::LIGHT_TEXT
    })
}
