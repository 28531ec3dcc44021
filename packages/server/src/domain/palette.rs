//! Curated participant color palette.
//!
//! Ten base hues are expanded into three lightness variants each, so every
//! participant in a typical session gets a color nobody else holds.

use std::collections::HashSet;

use super::HexColor;

/// Base hues, in the order colors are handed out.
const BASE_PALETTE: [(u8, u8, u8); 10] = [
    (0xE5, 0x39, 0x35), // red
    (0x1E, 0x88, 0xE5), // blue
    (0x43, 0xA0, 0x47), // green
    (0xFB, 0x8C, 0x00), // orange
    (0x8E, 0x24, 0xAA), // purple
    (0x00, 0x89, 0x7B), // teal
    (0xFD, 0xD8, 0x35), // yellow
    (0x6D, 0x4C, 0x41), // brown
    (0x39, 0x49, 0xAB), // indigo
    (0xD8, 0x1B, 0x60), // pink
];

/// HSL lightness levels (percent) of each variant. Extremes are avoided.
const LIGHTNESS_LEVELS: [f64; 3] = [45.0, 55.0, 65.0];

/// Saturation floor (percent) for the variants.
const MIN_SATURATION: f64 = 55.0;

/// Ordered, finite set of participant colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    colors: Vec<HexColor>,
}

impl ColorPalette {
    /// The curated 30-color palette.
    pub fn curated() -> Self {
        let colors = BASE_PALETTE
            .iter()
            .flat_map(|&(r, g, b)| {
                let (h, s, _) = rgb_to_hsl(r, g, b);
                LIGHTNESS_LEVELS
                    .iter()
                    .map(move |&l| hsl_to_color(h, s.max(MIN_SATURATION), l))
            })
            .collect();
        Self { colors }
    }

    /// Palette with explicit colors. An empty list falls back to the curated palette.
    pub fn from_colors(colors: Vec<HexColor>) -> Self {
        if colors.is_empty() {
            return Self::curated();
        }
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[HexColor] {
        &self.colors
    }

    pub fn contains(&self, color: &HexColor) -> bool {
        self.colors.contains(color)
    }

    /// Pick a color for a new participant.
    ///
    /// Returns the first entry not in `in_use`. Once every entry is taken the
    /// choice cycles: `palette[participant_count % len]`.
    pub fn pick(&self, in_use: &HashSet<&HexColor>, participant_count: usize) -> HexColor {
        self.colors
            .iter()
            .find(|c| !in_use.contains(c))
            .unwrap_or(&self.colors[participant_count % self.colors.len()])
            .clone()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::curated()
    }
}

/// RGB (0-255) to HSL (degrees, percent, percent).
fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0 * 360.0, s * 100.0, l * 100.0)
}

/// HSL (degrees, percent, percent) to a hex color.
fn hsl_to_color(h: f64, s: f64, l: f64) -> HexColor {
    let s = s / 100.0;
    let l = l / 100.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    HexColor::from_rgb(channel(r), channel(g), channel(b))
}
