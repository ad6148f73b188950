//! Line highlighters
//!
//! A [`SyntaxHighlighter`] turns one line of a buffer into a
//! [`ColorMap`]. [`GdScriptHighlighter`] resolves the region the line
//! starts in and hands the line to the token classifier.

use tracing::trace;

use super::classifier::classify_line;
use super::color_map::ColorMap;
use super::highlight_state::{HighlightState, ThemeSource};
use super::region::RegionTable;
use super::resolver::resolve_entry_region;
use crate::buffer::TextSource;
use crate::error::{HighlightError, Result};
use crate::tokenizer::{TokenCursor, Tokenizer};

/// Text plus its region table, as a highlighter reads it
pub trait HighlightSource: TextSource + RegionTable {}

impl<T: TextSource + RegionTable + ?Sized> HighlightSource for T {}

/// A per-line syntax highlighter
pub trait SyntaxHighlighter {
    /// Display name
    fn name(&self) -> &str;

    /// Languages this highlighter handles
    fn supported_languages(&self) -> Vec<String>;

    /// Color one line of `source`
    fn get_line_colors(&mut self, source: &dyn HighlightSource, line: usize) -> Result<ColorMap>;
}

/// GDScript highlighter
///
/// Owns its token cursor and the colors resolved from the last theme.
#[derive(Debug)]
pub struct GdScriptHighlighter<L: TokenCursor = Tokenizer> {
    tokenizer: L,
    state: HighlightState,
}

impl GdScriptHighlighter {
    /// Create a highlighter using the built-in GDScript tokenizer
    pub fn new(theme: &dyn ThemeSource) -> Self {
        Self::with_tokenizer(Tokenizer::new(), theme)
    }
}

impl<L: TokenCursor> GdScriptHighlighter<L> {
    /// Create a highlighter driving a custom token cursor
    pub fn with_tokenizer(tokenizer: L, theme: &dyn ThemeSource) -> Self {
        Self {
            tokenizer,
            state: HighlightState::rebuild(theme),
        }
    }

    /// Rebuild the cached colors after a theme change
    pub fn update_cache(&mut self, theme: &dyn ThemeSource) {
        self.state = HighlightState::rebuild(theme);
    }

    pub fn state(&self) -> &HighlightState {
        &self.state
    }
}

impl<L: TokenCursor> SyntaxHighlighter for GdScriptHighlighter<L> {
    fn name(&self) -> &str {
        "GDScript"
    }

    fn supported_languages(&self) -> Vec<String> {
        vec!["GDScript".to_string()]
    }

    fn get_line_colors(&mut self, source: &dyn HighlightSource, line: usize) -> Result<ColorMap> {
        let count = source.line_count();
        let text = source
            .line_text(line)
            .ok_or(HighlightError::LineOutOfRange { line, count })?;

        let entry = resolve_entry_region(source, line);
        let map = classify_line(&self.state, source, &mut self.tokenizer, line, text, entry);
        trace!(line, entries = map.len(), "colored line");
        Ok(map)
    }
}
