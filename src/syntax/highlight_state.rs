//! Resolved theme colors
//!
//! The highlight state is rebuilt from a [`ThemeSource`] on every theme
//! change and is read-only while lines are being colored.

use std::collections::HashMap;

use tracing::debug;

use super::color::Color;
use super::region::RegionColor;
use crate::theme::default_color;

/// Anything that can supply named colors and identifier color tables
pub trait ThemeSource {
    /// Look up a named color (`keyword_color`, `font_color`, ...)
    fn color(&self, name: &str) -> Option<Color>;

    /// Identifier -> color overrides applied as keyword colors
    fn keyword_colors(&self) -> HashMap<String, Color>;

    /// Identifier -> color overrides applied as member colors
    fn member_colors(&self) -> HashMap<String, Color>;
}

/// Colors used by the highlighter
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightState {
    pub font_color: Color,
    pub comment_color: Color,
    pub keyword_color: Color,
    pub symbol_color: Color,
    pub function_color: Color,
    pub string_color: Color,
    pub number_color: Color,
    pub member_color: Color,
    pub built_in_type_color: Color,
    pub node_path_color: Color,
    keyword_colors: HashMap<String, Color>,
    member_colors: HashMap<String, Color>,
}

impl HighlightState {
    /// Resolve every color from `theme`
    ///
    /// Names the theme does not define fall back to the default palette.
    pub fn rebuild(theme: &dyn ThemeSource) -> Self {
        let get = |name: &str| {
            theme
                .color(name)
                .or_else(|| default_color(name))
                .unwrap_or(Color::WHITE)
        };

        let state = Self {
            font_color: get("font_color"),
            comment_color: get("comment_color"),
            keyword_color: get("keyword_color"),
            symbol_color: get("symbol_color"),
            function_color: get("function_color"),
            string_color: get("string_color"),
            number_color: get("number_color"),
            member_color: get("member_variable_color"),
            built_in_type_color: get("built_in_type_color"),
            node_path_color: get("get_node_shortcut_color"),
            keyword_colors: theme.keyword_colors(),
            member_colors: theme.member_colors(),
        };
        debug!(
            keywords = state.keyword_colors.len(),
            members = state.member_colors.len(),
            "rebuilt highlight state"
        );
        state
    }

    /// Color override for a keyword-like identifier
    pub fn keyword_color_of(&self, word: &str) -> Option<Color> {
        self.keyword_colors.get(word).copied()
    }

    /// Color override for a member-like identifier
    pub fn member_color_of(&self, word: &str) -> Option<Color> {
        self.member_colors.get(word).copied()
    }

    /// Resolve a region's color against the current theme
    pub fn region_color(&self, color: RegionColor) -> Color {
        match color {
            RegionColor::Fixed(color) => color,
            RegionColor::Comment => self.comment_color,
            RegionColor::String => self.string_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    struct Sparse;

    impl ThemeSource for Sparse {
        fn color(&self, name: &str) -> Option<Color> {
            (name == "keyword_color").then_some(Color::rgb(1, 1, 1))
        }

        fn keyword_colors(&self) -> HashMap<String, Color> {
            HashMap::from([("print".to_string(), Color::rgb(2, 2, 2))])
        }

        fn member_colors(&self) -> HashMap<String, Color> {
            HashMap::new()
        }
    }

    #[test]
    fn test_rebuild_falls_back_to_defaults() {
        let state = HighlightState::rebuild(&Sparse);
        assert_eq!(state.keyword_color, Color::rgb(1, 1, 1));
        assert_eq!(Some(state.font_color), default_color("font_color"));
        assert_eq!(state.keyword_color_of("print"), Some(Color::rgb(2, 2, 2)));
        assert_eq!(state.member_color_of("print"), None);
    }

    #[test]
    fn test_rebuild_reads_member_name() {
        let mut theme = Theme::default();
        theme.set_color("member_variable_color", Color::rgb(9, 9, 9));
        theme.set_color("get_node_shortcut_color", Color::rgb(8, 8, 8));
        let state = HighlightState::rebuild(&theme);
        assert_eq!(state.member_color, Color::rgb(9, 9, 9));
        assert_eq!(state.node_path_color, Color::rgb(8, 8, 8));
    }

    #[test]
    fn test_region_color_follows_rebuild() {
        let mut theme = Theme::default();
        theme.set_color("string_color", Color::rgb(7, 7, 7));
        let state = HighlightState::rebuild(&theme);
        assert_eq!(state.region_color(RegionColor::String), Color::rgb(7, 7, 7));
        assert_eq!(state.region_color(RegionColor::Comment), state.comment_color);
        assert_eq!(state.region_color(Color::WHITE.into()), Color::WHITE);
    }
}
