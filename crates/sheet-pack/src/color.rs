//! Color parsing and canonical comparison
//!
//! Supported input grammars, nothing else:
//! - `#rgb`
//! - `#rrggbb`
//! - `rgb(r, g, b)`
//! - `rgba(r, g, b, a)`
//! - the named color `black`
//!
//! Channels inside `rgb()`/`rgba()` may be integers, decimals or
//! percentages, separated by commas or whitespace.

use std::fmt;

/// An sRGB color with alpha in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 1.0,
    };

    /// Parse a color value, `None` for anything outside the supported grammars
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let lower = value.to_ascii_lowercase();

        if lower == "black" {
            return Some(Self::BLACK);
        }
        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(args) = function_args(&lower, "rgba") {
            return parse_rgb_args(args, true);
        }
        if let Some(args) = function_args(&lower, "rgb") {
            return parse_rgb_args(args, false);
        }
        None
    }

    /// Canonical lowercase `#rrggbb` form, alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Pure black that is actually visible
    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0 && self.a != 0.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Canonical hex for a color value, if it parses
pub fn normalize_color(value: &str) -> Option<String> {
    Color::parse(value).map(|c| c.to_hex())
}

/// Whether two color values denote the same RGB color
pub fn colors_match(a: &str, b: &str) -> bool {
    match (normalize_color(a), normalize_color(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Whether a color value is visible pure black
pub fn is_black(value: &str) -> bool {
    Color::parse(value).is_some_and(|c| c.is_black())
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
            Some(Color {
                r: expand(0)?,
                g: expand(1)?,
                b: expand(2)?,
                a: 1.0,
            })
        }
        6 => Some(Color {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
            a: 1.0,
        }),
        _ => None,
    }
}

fn function_args<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    value
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_rgb_args(args: &str, with_alpha: bool) -> Option<Color> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let a = if with_alpha {
        parse_alpha(parts[3])?
    } else {
        1.0
    };

    Some(Color {
        r: parse_channel(parts[0])?,
        g: parse_channel(parts[1])?,
        b: parse_channel(parts[2])?,
        a,
    })
}

fn parse_channel(s: &str) -> Option<u8> {
    let value = match s.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? * 255.0 / 100.0,
        None => s.parse::<f64>().ok()?,
    };
    value.is_finite().then(|| value.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(s: &str) -> Option<f64> {
    let value = match s.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? / 100.0,
        None => s.parse::<f64>().ok()?,
    };
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(normalize_color("#FFF").as_deref(), Some("#ffffff"));
        assert_eq!(normalize_color("#1a2B3c").as_deref(), Some("#1a2b3c"));
        assert_eq!(normalize_color(" #abc ").as_deref(), Some("#aabbcc"));
        assert_eq!(normalize_color("#abcd"), None);
        assert_eq!(normalize_color("#ggg"), None);
    }

    #[test]
    fn test_rgb_forms() {
        assert_eq!(normalize_color("rgb(255, 0, 128)").as_deref(), Some("#ff0080"));
        assert_eq!(normalize_color("RGB(255 0 128)").as_deref(), Some("#ff0080"));
        assert_eq!(normalize_color("rgb(100%, 0%, 0%)").as_deref(), Some("#ff0000"));
        assert_eq!(normalize_color("rgba(0,0,255,0.5)").as_deref(), Some("#0000ff"));
        assert_eq!(normalize_color("rgb(1,2)"), None);
        assert_eq!(normalize_color("rgba(1,2,3)"), None);
    }

    #[test]
    fn test_unsupported_names() {
        assert_eq!(normalize_color("red"), None);
        assert_eq!(normalize_color("none"), None);
        assert_eq!(normalize_color(""), None);
    }

    #[test]
    fn test_black_detection() {
        assert!(is_black("#000"));
        assert!(is_black("#000000"));
        assert!(is_black("Black"));
        assert!(is_black("rgb(0,0,0)"));
        assert!(is_black("rgba(0, 0, 0, 0.3)"));
        assert!(!is_black("rgba(0,0,0,0)"));
        assert!(!is_black("#010101"));
        assert!(!is_black("none"));
    }

    #[test]
    fn test_colors_match_across_grammars() {
        assert!(colors_match("#F0A", "rgb(255, 0, 170)"));
        assert!(colors_match("rgba(255,0,170,1)", "#ff00aa"));
        assert!(!colors_match("#ff00aa", "#ff00ab"));
        assert!(!colors_match("none", "none"));
    }
}
