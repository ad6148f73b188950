//! Theme file support
//!
//! Loads colors from ~/.gdcolor.toml (or %USERPROFILE%\.gdcolor.toml on Windows)
//!
//! Format: TOML with three tables. `[colors]` holds the named editor
//! colors, `[keywords]` and `[members]` map identifiers to colors.
//! Colors are `#rrggbb` or `#rrggbbaa`.
//!
//! Example:
//! ```text
//! [colors]
//! keyword_color = "#ff7085"
//! comment_color = "#676767"
//!
//! [keywords]
//! print = "#ff8ccc"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{HighlightError, Result};
use crate::syntax::{Color, ThemeSource};

/// Default editor palette
const DEFAULT_COLORS: &[(&str, Color)] = &[
    ("font_color", Color::rgb(0xe0, 0xe0, 0xe0)),
    ("comment_color", Color::rgb(0x67, 0x67, 0x67)),
    ("keyword_color", Color::rgb(0xff, 0x70, 0x85)),
    ("symbol_color", Color::rgb(0xab, 0xc9, 0xff)),
    ("function_color", Color::rgb(0x57, 0xb3, 0xff)),
    ("string_color", Color::rgb(0xff, 0xed, 0xa1)),
    ("number_color", Color::rgb(0xa1, 0xff, 0xe0)),
    ("member_variable_color", Color::rgb(0xbc, 0xe0, 0xff)),
    ("built_in_type_color", Color::rgb(0x42, 0xff, 0xc2)),
    ("get_node_shortcut_color", Color::rgb(0xb8, 0xe3, 0xa5)),
];

/// Look up a color in the default palette
pub fn default_color(name: &str) -> Option<Color> {
    DEFAULT_COLORS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, color)| *color)
}

/// Theme settings
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Named editor colors
    colors: HashMap<String, Color>,
    /// Identifier -> color overrides for keywords
    keywords: HashMap<String, Color>,
    /// Identifier -> color overrides for members
    members: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS
                .iter()
                .map(|(name, color)| (name.to_string(), *color))
                .collect(),
            keywords: HashMap::new(),
            members: HashMap::new(),
        }
    }
}

impl Theme {
    /// Get the theme file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".gdcolor.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".gdcolor.toml"))
        }
    }

    /// Load the user theme, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(theme) => theme,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring unreadable theme");
                Self::default()
            }
        }
    }

    /// Load a theme file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let theme = Self::parse(&contents)?;
        debug!(path = %path.display(), "loaded theme");
        Ok(theme)
    }

    /// Parse theme contents on top of the default palette
    pub fn parse(contents: &str) -> Result<Self> {
        let table: toml::Table = contents.parse()?;
        let mut theme = Self::default();

        if let Some(colors) = table.get("colors") {
            theme.colors.extend(parse_color_table("colors", colors)?);
        }
        if let Some(keywords) = table.get("keywords") {
            theme.keywords = parse_color_table("keywords", keywords)?;
        }
        if let Some(members) = table.get("members") {
            theme.members = parse_color_table("members", members)?;
        }

        Ok(theme)
    }

    /// Set a named color
    pub fn set_color(&mut self, name: &str, color: Color) {
        self.colors.insert(name.to_string(), color);
    }

    /// Set a keyword color override
    pub fn set_keyword_color(&mut self, word: &str, color: Color) {
        self.keywords.insert(word.to_string(), color);
    }

    /// Set a member color override
    pub fn set_member_color(&mut self, word: &str, color: Color) {
        self.members.insert(word.to_string(), color);
    }
}

/// Parse a `name = "#color"` table
fn parse_color_table(section: &str, value: &toml::Value) -> Result<HashMap<String, Color>> {
    let table = value
        .as_table()
        .ok_or_else(|| HighlightError::Message(format!("[{}] must be a table", section)))?;

    let mut colors = HashMap::new();
    for (key, value) in table {
        let text = value.as_str().ok_or_else(|| HighlightError::InvalidColor {
            key: format!("{}.{}", section, key),
            value: value.to_string(),
        })?;
        let color = Color::parse_setting(&format!("{}.{}", section, key), text)?;
        colors.insert(key.clone(), color);
    }
    Ok(colors)
}

impl ThemeSource for Theme {
    fn color(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    fn keyword_colors(&self) -> HashMap<String, Color> {
        self.keywords.clone()
    }

    fn member_colors(&self) -> HashMap<String, Color> {
        self.members.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme() {
        let contents = r##"
# Comment
[colors]
keyword_color = "#010203"

[keywords]
print = "#ff000080"

[members]
position = "00ff00"
        "##;

        let theme = Theme::parse(contents).unwrap();
        assert_eq!(theme.color("keyword_color"), Some(Color::rgb(1, 2, 3)));
        // Untouched names keep the default palette
        assert_eq!(theme.color("font_color"), default_color("font_color"));
        assert_eq!(theme.keyword_colors().get("print"), Some(&Color::rgba(0xff, 0, 0, 0x80)));
        assert_eq!(theme.member_colors().get("position"), Some(&Color::rgb(0, 0xff, 0)));
    }

    #[test]
    fn test_invalid_color() {
        let err = Theme::parse("[colors]\nfont_color = \"blue\"").unwrap_err();
        assert!(matches!(err, HighlightError::InvalidColor { ref key, .. } if key == "colors.font_color"));

        let err = Theme::parse("[colors]\nfont_color = 3").unwrap_err();
        assert!(matches!(err, HighlightError::InvalidColor { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(Theme::parse("[colors"), Err(HighlightError::ThemeParse(_))));
        assert!(matches!(Theme::parse("colors = 1"), Err(HighlightError::Message(_))));
    }

    #[test]
    fn test_default_palette_complete() {
        let theme = Theme::default();
        for (name, _) in DEFAULT_COLORS {
            assert!(theme.color(name).is_some(), "missing {}", name);
        }
    }
}
