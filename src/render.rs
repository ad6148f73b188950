//! Terminal rendering of colored lines
//!
//! Writes each colored span with a 24-bit foreground color using
//! crossterm commands. Output is queued; callers flush.

use std::io::Write;
use std::ops::Range;

use crossterm::queue;
use crossterm::style::{self, Print, ResetColor, SetForegroundColor};

use crate::buffer::TextSource;
use crate::error::{HighlightError, Result};
use crate::syntax::{Color, ColorMap, HighlightSource, SyntaxHighlighter};

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Queue one line of text colored by `colors`, followed by a newline
///
/// Text before the first color entry uses `default`.
pub fn write_line<W: Write>(out: &mut W, text: &str, colors: &ColorMap, default: Color) -> Result<()> {
    let chars: Vec<char> = text.chars().collect();
    for span in colors.to_spans(chars.len(), default) {
        let piece: String = chars[span.start..span.end].iter().collect();
        queue!(out, SetForegroundColor(term_color(span.color)), Print(piece))?;
    }
    queue!(out, ResetColor, Print("\n"))?;
    Ok(())
}

/// Color and write a range of lines
pub fn write_lines<W: Write>(
    out: &mut W,
    highlighter: &mut dyn SyntaxHighlighter,
    source: &dyn HighlightSource,
    lines: Range<usize>,
    default: Color,
) -> Result<()> {
    let count = source.line_count();
    for line in lines {
        let text = source
            .line_text(line)
            .ok_or(HighlightError::LineOutOfRange { line, count })?;
        let colors = highlighter.get_line_colors(source, line)?;
        write_line(out, text, &colors, default)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;
    use crate::syntax::GdScriptHighlighter;
    use crate::theme::Theme;
    use pretty_assertions::assert_eq;

    /// Drop `ESC [ ... m` sequences
    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_write_line_keeps_text() {
        let mut colors = ColorMap::new();
        colors.insert(2, Color::rgb(1, 2, 3));
        let mut out = Vec::new();
        write_line(&mut out, "é = 1", &colors, Color::WHITE).unwrap();

        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("\x1b[38;2;1;2;3m"));
        assert_eq!(strip_ansi(&s), "é = 1\n");
    }

    #[test]
    fn test_write_lines() {
        let theme = Theme::default();
        let mut hl = GdScriptHighlighter::new(&theme);
        let buf = TextBuffer::from_text("var x = 1\n# done").with_gdscript_regions();
        let default = hl.state().font_color;

        let mut out = Vec::new();
        write_lines(&mut out, &mut hl, &buf, 0..2, default).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert_eq!(strip_ansi(&s), "var x = 1\n# done\n");

        let mut out = Vec::new();
        let err = write_lines(&mut out, &mut hl, &buf, 1..3, default).unwrap_err();
        assert!(matches!(err, HighlightError::LineOutOfRange { line: 2, count: 2 }));
    }
}
