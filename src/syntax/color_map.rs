//! Per-line color maps
//!
//! A [`ColorMap`] is the sparse `column -> color` result for one line.
//! Each entry paints from its column up to the next entry. The builder
//! resolves default columns from the token being classified and
//! implements last-write-wins for retroactive recoloring.

use std::collections::BTreeMap;

use super::color::{Color, Span};

/// Sparse column -> color mapping for one line, ascending by column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    entries: BTreeMap<usize, Color>,
}

impl ColorMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color at a column, returning the color it replaced
    pub fn insert(&mut self, column: usize, color: Color) -> Option<Color> {
        self.entries.insert(column, color)
    }

    /// Color starting at exactly this column
    pub fn get(&self, column: usize) -> Option<Color> {
        self.entries.get(&column).copied()
    }

    /// Entries in ascending column order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.entries.iter().map(|(col, color)| (*col, *color))
    }

    /// Columns with an entry, ascending
    pub fn columns(&self) -> Vec<usize> {
        self.entries.keys().copied().collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expand into contiguous spans covering `0..line_len`
    ///
    /// Text before the first entry gets `default`.
    pub fn to_spans(&self, line_len: usize, default: Color) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut pos = 0;
        let mut color = default;

        for (col, next) in self.iter() {
            if col >= line_len {
                break;
            }
            if col > pos {
                spans.push(Span::new(pos, col, color));
            }
            pos = col;
            color = next;
        }
        if pos < line_len {
            spans.push(Span::new(pos, line_len, color));
        }
        spans
    }
}

/// Accumulates entries while a line is classified
#[derive(Debug, Default)]
pub(crate) struct ColorMapBuilder {
    map: ColorMap,
    /// Absolute 1-based reported column of the token being classified
    token_column: usize,
    /// Column of the most recent push
    last_column: usize,
}

impl ColorMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the reported column of the token about to be classified
    pub fn track(&mut self, reported_column: usize) {
        self.token_column = reported_column;
    }

    /// Push a color at `column`, or at the tracked token's column
    ///
    /// Writing to an existing column replaces its color.
    pub fn push(&mut self, color: Color, column: Option<usize>) {
        let column = column.unwrap_or_else(|| self.token_column.saturating_sub(1));
        self.map.insert(column, color);
        self.last_column = column;
    }

    /// Column of the most recent push
    pub fn last_column(&self) -> usize {
        self.last_column
    }

    pub fn finish(self) -> ColorMap {
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: Color = Color::rgb(0xff, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 0xff);

    #[test]
    fn test_builder_default_and_explicit_columns() {
        let mut builder = ColorMapBuilder::new();
        builder.track(5);
        builder.push(RED, None);
        assert_eq!(builder.last_column(), 4);
        builder.push(BLUE, Some(1));
        assert_eq!(builder.last_column(), 1);

        let map = builder.finish();
        assert_eq!(map.columns(), vec![1, 4]);
    }

    #[test]
    fn test_last_write_wins() {
        let mut builder = ColorMapBuilder::new();
        builder.track(1);
        builder.push(RED, None);
        builder.push(BLUE, Some(0));
        let map = builder.finish();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(0), Some(BLUE));
    }

    #[test]
    fn test_to_spans() {
        let mut map = ColorMap::new();
        map.insert(2, RED);
        map.insert(5, BLUE);
        map.insert(20, RED);
        assert_eq!(
            map.to_spans(8, Color::WHITE),
            vec![
                Span::new(0, 2, Color::WHITE),
                Span::new(2, 5, RED),
                Span::new(5, 8, BLUE),
            ]
        );
        assert!(ColorMap::new().to_spans(0, Color::WHITE).is_empty());
    }
}
