//! Color handling for chart rendering.
//!
//! Colors stay CSS strings end to end, since Canvas 2D and SVG both take
//! them directly. This module validates user-supplied colors, derives the
//! translucent area fill, and owns the series palette.

use crate::types::ChartConfig;

/// A CSS color string (e.g., "#FF0000", "rgba(255, 0, 0, 0.5)")
pub type CssColor = String;

/// Series palette, cycled by series (or slice) index.
pub const SERIES_PALETTE: [&str; 8] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#06B6D4", "#84CC16",
];

/// Palette color for the series or slice at `idx`.
#[allow(clippy::indexing_slicing)] // Safe: modulo ensures index is within bounds
pub fn palette_color(idx: usize) -> &'static str {
    SERIES_PALETTE[idx % SERIES_PALETTE.len()]
}

/// Color for series `key` at position `idx`: the configured color when it
/// is a usable CSS color, otherwise the palette color.
pub fn series_color(config: &ChartConfig, key: &str, idx: usize) -> CssColor {
    config
        .color_for(key)
        .and_then(parse_color)
        .unwrap_or_else(|| palette_color(idx).to_string())
}

/// RGB color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from a hex string (with or without #).
    /// Returns None if the format is invalid.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Convert to CSS hex string (#RRGGBB).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Validate a CSS color string and normalize hex forms to upper case.
///
/// Supports formats:
/// - "#RGB", "#RRGGBB", "#RRGGBBAA" (hex, expanded and upper-cased)
/// - "RRGGBB" (hex without # prefix)
/// - "rgb(r, g, b)", "rgba(r, g, b, a)"
/// - "hsl(...)", "hsla(...)" (passed through)
///
/// Anything referencing a stylesheet variable (`var(--chart-1)`) is
/// rejected, since neither backend can resolve it.
pub fn parse_color(s: &str) -> Option<CssColor> {
    let s = s.trim();

    if s.contains("var(") {
        None
    } else if s.starts_with('#') {
        parse_hex_color(s)
    } else if s.starts_with("rgb") {
        parse_color_rgba(s).map(|_| s.to_string())
    } else if s.starts_with("hsl(") || s.starts_with("hsla(") {
        s.ends_with(')').then(|| s.to_string())
    } else {
        // Try as plain hex without #
        parse_hex_color(&format!("#{}", s))
    }
}

fn parse_hex_color(s: &str) -> Option<CssColor> {
    let hex = s.strip_prefix('#')?;

    match hex.len() {
        3 => {
            // #RGB shorthand
            let mut expanded = String::with_capacity(7);
            expanded.push('#');
            for c in hex.chars() {
                c.to_digit(16)?;
                expanded.push(c);
                expanded.push(c);
            }
            Some(expanded.to_ascii_uppercase())
        }
        6 => Rgb::from_hex(hex).map(Rgb::to_hex),
        8 => {
            // #RRGGBBAA
            let (r, g, b, _) = parse_hex_rgba(s)?;
            let a = hex.get(6..8)?;
            Some(format!("{}{}", Rgb::new(r, g, b).to_hex(), a.to_ascii_uppercase()))
        }
        _ => None,
    }
}

/// Append a two-digit hex alpha to a color, e.g. `#3B82F6` + `33`.
///
/// Non-hex colors are converted to `rgba()` with the equivalent alpha; when
/// the color has no RGB form (e.g. `hsl()`), it is returned unchanged.
pub fn with_alpha(color: &str, alpha_hex: &str) -> CssColor {
    let alpha = u8::from_str_radix(alpha_hex, 16).unwrap_or(u8::MAX);
    if let Some(rgb) = Rgb::from_hex(color) {
        return format!("{}{:02X}", rgb.to_hex(), alpha);
    }
    match parse_color_rgba(color) {
        Some((r, g, b, a)) => {
            let combined = a * f64::from(alpha) / 255.0;
            format!("rgba({}, {}, {}, {:.2})", r, g, b, combined)
        }
        None => color.to_string(),
    }
}

/// Parse color and return RGBA components (0-255 for RGB, 0.0-1.0 for alpha)
pub fn parse_color_rgba(s: &str) -> Option<(u8, u8, u8, f64)> {
    let s = s.trim();

    if s.starts_with('#') {
        parse_hex_rgba(s)
    } else if s.starts_with("rgba(") {
        parse_rgba_string(s)
    } else if s.starts_with("rgb(") {
        parse_rgb_string(s)
    } else {
        None
    }
}

fn parse_hex_rgba(s: &str) -> Option<(u8, u8, u8, f64)> {
    let hex = s.strip_prefix('#')?;

    match hex.len() {
        3 => {
            let expanded = parse_hex_color(s)?;
            parse_hex_rgba(&expanded)
        }
        6 => {
            let rgb = Rgb::from_hex(hex)?;
            Some((rgb.r, rgb.g, rgb.b, 1.0))
        }
        8 => {
            // CSS RRGGBBAA order
            let rgb = Rgb::from_hex(hex.get(0..6)?)?;
            let a = u8::from_str_radix(hex.get(6..8)?, 16).ok()?;
            Some((rgb.r, rgb.g, rgb.b, f64::from(a) / 255.0))
        }
        _ => None,
    }
}

fn parse_rgb_string(s: &str) -> Option<(u8, u8, u8, f64)> {
    let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim());
    let r: u8 = parts.next()?.parse().ok()?;
    let g: u8 = parts.next()?.parse().ok()?;
    let b: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((r, g, b, 1.0))
}

fn parse_rgba_string(s: &str) -> Option<(u8, u8, u8, f64)> {
    let inner = s.strip_prefix("rgba(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim());
    let r: u8 = parts.next()?.parse().ok()?;
    let g: u8 = parts.next()?.parse().ok()?;
    let b: u8 = parts.next()?.parse().ok()?;
    let a: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((r, g, b, a.clamp(0.0, 1.0)))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        let color = parse_color("#ff0000").unwrap();
        assert_eq!(color, "#FF0000");
    }

    #[test]
    fn test_parse_hex_3() {
        assert_eq!(parse_color("#4af").unwrap(), "#44AAFF");
        assert!(parse_color("#4ag").is_none());
    }

    #[test]
    fn test_parse_hex_8_is_css_order() {
        let (r, g, b, a) = parse_color_rgba("#FF000080").unwrap();
        assert_eq!((r, g, b), (255, 0, 0));
        assert!((a - 128.0 / 255.0).abs() < 0.001);
        assert_eq!(parse_color("#ff000080").unwrap(), "#FF000080");
    }

    #[test]
    fn test_parse_rgb_and_hsl_pass_through() {
        assert_eq!(parse_color("rgb(255, 128, 64)").unwrap(), "rgb(255, 128, 64)");
        assert_eq!(parse_color("hsl(210, 80%, 60%)").unwrap(), "hsl(210, 80%, 60%)");
        assert!(parse_color("rgb(300, 0, 0)").is_none());
    }

    #[test]
    fn test_stylesheet_variables_rejected() {
        assert!(parse_color("hsl(var(--chart-1))").is_none());
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(with_alpha("#3B82F6", "33"), "#3B82F633");
        assert_eq!(with_alpha("rgb(255, 0, 0)", "80"), "rgba(255, 0, 0, 0.50)");
        assert_eq!(with_alpha("hsl(0, 50%, 50%)", "33"), "hsl(0, 50%, 50%)");
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), palette_color(8));
        assert_ne!(palette_color(0), palette_color(1));
    }

    #[test]
    fn test_series_color_prefers_valid_config() {
        let config = ChartConfig::new()
            .with_series("a", "A", "#10b981")
            .with_series("b", "B", "hsl(var(--chart-2))");
        assert_eq!(series_color(&config, "a", 3), "#10B981");
        assert_eq!(series_color(&config, "b", 1), palette_color(1));
        assert_eq!(series_color(&config, "c", 2), palette_color(2));
    }
}
