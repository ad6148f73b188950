//! Color types for rendering
//!
//! This module provides the RGBA color used by themes, regions and
//! color maps, plus the contiguous span form handed to renderers.

use crate::error::{HighlightError, Result};

/// An RGBA display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Create a color with alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional)
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Parse a color for a named setting, reporting the key on failure
    pub fn parse_setting(key: &str, value: &str) -> Result<Self> {
        Self::from_hex(value).ok_or_else(|| HighlightError::InvalidColor {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// A colored span of text within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Character column where this span starts (inclusive)
    pub start: usize,
    /// Character column where this span ends (exclusive)
    pub end: usize,
    /// Color to apply to this span
    pub color: Color,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, color: Color) -> Self {
        Self { start, end, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#ff8000"), Some(Color::rgb(0xff, 0x80, 0x00)));
        assert_eq!(Color::from_hex("ff800080"), Some(Color::rgba(0xff, 0x80, 0x00, 0x80)));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }

    #[test]
    fn test_parse_setting_reports_key() {
        let err = Color::parse_setting("keyword_color", "red").unwrap_err();
        assert!(err.to_string().contains("keyword_color"));
    }
}
