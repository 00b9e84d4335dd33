// File: crates/tickmark-core/src/theme.rs
// Summary: Colour palettes for candles, volume, indicator lines and event markers.

use std::fmt;

use serde::{Serialize, Serializer};

/// Straight (non-premultiplied) RGBA colour. Serializes as a CSS colour string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a } }
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self::from_argb(255, r, g, b) }

    /// Same colour with alpha set from a 0..=1 opacity.
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self { a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = (self.a as f64 / 255.0 * 100.0).round() / 100.0;
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub candle_up: Rgba,
    pub candle_down: Rgba,
    /// Opacity applied to `candle_up`/`candle_down` for volume bars.
    pub volume_opacity: f64,
    /// Opacity applied to `candle_up`/`candle_down` for MACD histogram bars.
    pub histogram_opacity: f64,
    /// Moving-average line colours, cycled by overlay index.
    pub ma_lines: [Rgba; 3],
    pub macd_line: Rgba,
    pub signal_line: Rgba,
    pub rsi_line: Rgba,
    pub rsi_guide: Rgba,
    pub marker_bullish: Rgba,
    pub marker_bearish: Rgba,
    pub marker_neutral: Rgba,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            candle_up: Rgba::rgb(0x26, 0xa6, 0x9a),
            candle_down: Rgba::rgb(0xef, 0x53, 0x50),
            volume_opacity: 0.3,
            histogram_opacity: 0.5,
            ma_lines: [Rgba::rgb(0x29, 0x62, 0xff), Rgba::rgb(0xff, 0x6d, 0x00), Rgba::rgb(0x00, 0xbf, 0xa5)],
            macd_line: Rgba::rgb(0x29, 0x62, 0xff),
            signal_line: Rgba::rgb(0xff, 0x6d, 0x00),
            rsi_line: Rgba::rgb(0x9c, 0x27, 0xb0),
            rsi_guide: Rgba::from_argb(26, 255, 255, 255), // white @ 0.1
            marker_bullish: Rgba::rgb(0x26, 0xa6, 0x9a),
            marker_bearish: Rgba::rgb(0xef, 0x53, 0x50),
            marker_neutral: Rgba::rgb(0x88, 0x88, 0x88),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            candle_up: Rgba::rgb(0x14, 0xa0, 0x5a),
            candle_down: Rgba::rgb(0xc8, 0x3c, 0x3c),
            volume_opacity: 0.35,
            histogram_opacity: 0.6,
            ma_lines: [Rgba::rgb(0x20, 0x78, 0xc8), Rgba::rgb(0xe6, 0x5c, 0x00), Rgba::rgb(0x00, 0x89, 0x7b)],
            macd_line: Rgba::rgb(0x20, 0x78, 0xc8),
            signal_line: Rgba::rgb(0xe6, 0x5c, 0x00),
            rsi_line: Rgba::rgb(0x7b, 0x1f, 0xa2),
            rsi_guide: Rgba::from_argb(64, 0x3c, 0x3c, 0x46),
            marker_bullish: Rgba::rgb(0x14, 0xa0, 0x5a),
            marker_bearish: Rgba::rgb(0xc8, 0x3c, 0x3c),
            marker_neutral: Rgba::rgb(0x64, 0x64, 0x6e),
        }
    }

    pub fn volume_color(&self, up: bool) -> Rgba {
        let base = if up { self.candle_up } else { self.candle_down };
        base.with_opacity(self.volume_opacity)
    }

    pub fn histogram_color(&self, value: f64) -> Rgba {
        let base = if value >= 0.0 { self.candle_up } else { self.candle_down };
        base.with_opacity(self.histogram_opacity)
    }

    pub fn ma_color(&self, index: usize) -> Rgba { self.ma_lines[index % self.ma_lines.len()] }
}

impl Default for Theme {
    fn default() -> Self { Self::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_strings() {
        assert_eq!(Rgba::rgb(0x26, 0xa6, 0x9a).to_string(), "#26a69a");
        assert_eq!(Theme::dark().volume_color(true).to_string(), "rgba(38, 166, 154, 0.3)");
        assert_eq!(Theme::dark().histogram_color(-0.1).to_string(), "rgba(239, 83, 80, 0.5)");
    }

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        assert_eq!(find("LIGHT").name, "light");
        assert_eq!(find("sepia").name, "dark");
    }
}
