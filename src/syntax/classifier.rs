//! Token classification for one line
//!
//! The classifier alternates between two modes. Inside a region it
//! paints one entry at the region's start and jumps past the region's
//! closing key using the region table. In normal mode it feeds the rest
//! of the line to the token cursor and colors each token from its kind,
//! the previous token, and a bounded look at the raw characters.

use tracing::trace;

use super::color_map::{ColorMap, ColorMapBuilder};
use super::highlight_state::HighlightState;
use super::region::{RegionId, RegionMarker, RegionTable};
use crate::tokenizer::{LiteralValue, TokenCursor, TokenKind};

/// Color one line
///
/// `entry` is the region open at column 0, as resolved from earlier
/// lines. Never fails: a lexer error or end of input ends the pass and
/// whatever was colored so far is returned.
pub(crate) fn classify_line<L, T>(
    state: &HighlightState,
    table: &T,
    tokenizer: &mut L,
    line: usize,
    text: &str,
    entry: Option<RegionId>,
) -> ColorMap
where
    L: TokenCursor + ?Sized,
    T: RegionTable + ?Sized,
{
    let mut classifier = LineClassifier {
        state,
        table,
        tokenizer,
        line,
        chars: text.chars().collect(),
        markers: table.region_markers(line),
        builder: ColorMapBuilder::new(),
    };
    classifier.run(entry);
    classifier.builder.finish()
}

/// Literal facts copied out of the cursor
enum Literal {
    Number,
    Str { decoded_len: usize },
    Word,
}

impl Literal {
    fn of(value: Option<&LiteralValue>) -> Option<Self> {
        let value = value?;
        if value.is_num() {
            return Some(Literal::Number);
        }
        Some(match value.decoded_len() {
            Some(decoded_len) => Literal::Str { decoded_len },
            None => Literal::Word,
        })
    }

    fn is_end_anchored(&self) -> bool {
        !matches!(self, Literal::Word)
    }
}

/// What came before the token being classified
#[derive(Debug, Clone, Copy)]
struct Prior {
    kind: TokenKind,
    /// Kind of the token before `kind`
    before: TokenKind,
    /// `kind` ended a node path
    node_path: bool,
}

impl Prior {
    fn start() -> Self {
        Self {
            kind: TokenKind::Empty,
            before: TokenKind::Empty,
            node_path: false,
        }
    }

    fn then(self, kind: TokenKind, node_path: bool) -> Self {
        Self {
            kind,
            before: self.kind,
            node_path,
        }
    }

    /// A `-` that negates the following literal rather than subtracting
    fn is_unary_minus(&self) -> bool {
        use TokenKind::*;

        self.kind == OpSub
            && !matches!(
                self.before,
                Identifier
                    | Constant
                    | SelfKw
                    | BuiltInType
                    | ConstPi
                    | ConstTau
                    | ConstInf
                    | ConstNan
                    | ParenthesisClose
                    | BracketClose
                    | CurlyBracketClose
            )
    }
}

struct LineClassifier<'a, L: ?Sized, T: ?Sized> {
    state: &'a HighlightState,
    table: &'a T,
    tokenizer: &'a mut L,
    line: usize,
    chars: Vec<char>,
    markers: &'a [RegionMarker],
    builder: ColorMapBuilder,
}

impl<'a, L, T> LineClassifier<'a, L, T>
where
    L: TokenCursor + ?Sized,
    T: RegionTable + ?Sized,
{
    fn run(&mut self, entry: Option<RegionId>) {
        let mut resume = 0;
        if let Some(id) = entry {
            match self.paint_region(id, 0, 0) {
                Some(next) => resume = next,
                None => return,
            }
        }
        while let Some(next) = self.run_segment(resume) {
            resume = next;
        }
    }

    /// Paint region `id` from `column` and find where it closes
    ///
    /// Returns the column just past the closing key, or `None` when the
    /// region runs to the end of the line.
    fn paint_region(&mut self, id: RegionId, column: usize, search_from: usize) -> Option<usize> {
        let table = self.table;
        let Some(region) = table.region(id) else {
            trace!(line = self.line, ?id, "unknown region, tokenizing instead");
            return Some(search_from);
        };

        self.builder.push(self.state.region_color(region.color), Some(column));
        let close = self
            .markers
            .iter()
            .find(|m| m.column >= search_from && region.is_closed_by(id, m));

        match close {
            Some(marker) => {
                trace!(line = self.line, ?id, from = column, to = marker.column, "region closes on line");
                Some(marker.column + region.end_len())
            }
            None => {
                trace!(line = self.line, ?id, from = column, "region runs to end of line");
                None
            }
        }
    }

    fn open_marker(&mut self, marker: RegionMarker) -> Option<usize> {
        let start_len = self.table.region(marker.region).map_or(1, |r| r.start_len());
        self.paint_region(marker.region, marker.column, marker.column + start_len)
    }

    /// Tokenize and classify from `resume` until a region opens or the
    /// token stream ends
    ///
    /// Returns where to resume after a region that closes on this line.
    fn run_segment(&mut self, resume: usize) -> Option<usize> {
        let rest: String = self.chars.get(resume..).unwrap_or_default().iter().collect();
        self.tokenizer.set_source(&rest);

        let pending = self.markers.iter().find(|m| m.column >= resume).copied();
        let mut prior = Prior::start();
        // Backward scans never reach below this column
        let mut floor = resume;

        loop {
            let kind = self.tokenizer.current_token();
            let reported = self.tokenizer.current_column() + resume;
            let literal = Literal::of(self.tokenizer.current_literal_value());
            let end_anchored = literal.as_ref().is_some_and(Literal::is_end_anchored);

            if let Some(marker) = pending {
                // Last column the token covers: its start, or the last
                // character of an end-anchored literal
                let reach = if end_anchored {
                    reported.saturating_sub(2)
                } else {
                    reported.saturating_sub(1)
                };
                if marker.column <= reach {
                    return self.open_marker(marker);
                }
            }

            if kind.is_terminal() {
                trace!(line = self.line, ?kind, column = reported, "token stream stopped");
                self.paint_tail(reported);
                return None;
            }

            self.builder.track(reported);
            match self.classify(kind, prior, reported, floor, literal.as_ref()) {
                Some(path_end) => {
                    // The cursor already sits on the token after the node path
                    floor = path_end + resume;
                    prior = prior.then(kind, true);
                }
                None => {
                    floor = if end_anchored { reported.saturating_sub(1) } else { reported };
                    prior = prior.then(kind, false);
                    self.tokenizer.advance();
                }
            }
        }
    }

    /// Color one token
    ///
    /// Returns the cursor column of the last path token when a node path
    /// swallowed tokens.
    fn classify(
        &mut self,
        kind: TokenKind,
        prior: Prior,
        reported: usize,
        floor: usize,
        literal: Option<&Literal>,
    ) -> Option<usize> {
        use TokenKind::*;

        let state = self.state;
        let start = reported.saturating_sub(1);

        match kind {
            OpIn | OpNot | OpOr | OpAnd => {
                let symbolic = self.chars.get(start).is_some_and(|&c| is_symbol(c));
                let color = if symbolic { state.symbol_color } else { state.keyword_color };
                self.builder.push(color, None);
            }
            PrClass | PrExtends | PrIs | PrOnready | PrTool | PrStatic | PrExport | PrSetget
            | PrVar | PrPreload | PrAssert | PrYield | PrSignal | PrBreakpoint | PrRemote
            | PrMaster | PrPuppet | PrSync | PrConst | PrEnum | PrFunction | CfIf | CfElif
            | CfElse | CfFor | CfWhile | CfBreak | CfContinue | CfReturn | CfMatch | CfPass
            | SelfKw | ConstPi | ConstTau | ConstInf | ConstNan => {
                self.builder.push(state.keyword_color, None);
            }
            Constant => match literal {
                Some(Literal::Number) => {
                    let mut column = self.number_start(reported, floor);
                    if prior.is_unary_minus() && column > 0 && self.chars.get(column - 1) == Some(&'-') {
                        column -= 1;
                    }
                    self.builder.push(state.number_color, Some(column));
                }
                Some(Literal::Str { decoded_len }) => {
                    let column = self.string_start(reported, *decoded_len, floor);
                    self.builder.push(state.string_color, Some(column));
                }
                Some(Literal::Word) => self.builder.push(state.keyword_color, None),
                None => {}
            },
            Identifier => match prior.kind {
                PrFunction => self.builder.push(state.function_color, None),
                Period => self.builder.push(state.member_color, None),
                Dollar => {
                    let dollar = self.builder.last_column();
                    self.builder.push(state.node_path_color, Some(dollar));
                    let own = self.tokenizer.current_column();
                    return Some(self.swallow_node_path(own));
                }
                _ => {
                    let word = self.tokenizer.current_identifier_text();
                    let color = state
                        .keyword_color_of(word)
                        .or_else(|| state.member_color_of(word))
                        .unwrap_or(state.font_color);
                    self.builder.push(color, None);
                }
            },
            BuiltInFunc => self.builder.push(state.keyword_color, None),
            BuiltInType => self.builder.push(state.built_in_type_color, None),
            BracketOpen | BracketClose | CurlyBracketOpen | CurlyBracketClose | ParenthesisClose
            | Comma | Semicolon | Period | QuestionMark | Colon | Dollar | ForwardArrow | OpEqual
            | OpNotEqual | OpLess | OpLessEqual | OpGreater | OpGreaterEqual | OpAdd | OpSub
            | OpMul | OpDiv | OpMod | OpShiftLeft | OpShiftRight | OpAssign | OpAssignAdd
            | OpAssignSub | OpAssignMul | OpAssignDiv | OpAssignMod | OpAssignShiftLeft
            | OpAssignShiftRight | OpAssignBitAnd | OpAssignBitOr | OpAssignBitXor | OpBitAnd
            | OpBitOr | OpBitXor | OpBitInvert | Wildcard => {
                self.builder.push(state.symbol_color, None);
            }
            ParenthesisOpen => {
                // A node path is not a callee
                if prior.kind == Identifier && !prior.node_path {
                    let callee = self.builder.last_column();
                    self.builder.push(state.function_color, Some(callee));
                }
                self.builder.push(state.symbol_color, None);
            }
            Empty | Error | Eof => {}
        }
        None
    }

    /// Advance past `/` and identifier tokens following a node path
    /// start, leaving the cursor on the first token that is neither
    ///
    /// `last` is the cursor column of the path's first identifier; the
    /// cursor column of the final path token is returned.
    fn swallow_node_path(&mut self, mut last: usize) -> usize {
        let mut swallowed = 0;
        loop {
            let next = self.tokenizer.advance();
            if !matches!(next.kind, TokenKind::OpDiv | TokenKind::Identifier) {
                break;
            }
            last = next.column;
            swallowed += 1;
        }
        trace!(line = self.line, swallowed, "node path");
        last
    }

    /// First column of a number whose last character is at `reported - 2`
    fn number_start(&self, reported: usize, floor: usize) -> usize {
        let last = reported.saturating_sub(2);
        let mut col = last;
        while col > floor && self.chars.get(col - 1).is_some_and(|&c| is_num_char(c)) {
            col -= 1;
        }
        col
    }

    /// Opening quote of a string whose closing quote is at `reported - 1`
    fn string_start(&self, reported: usize, decoded_len: usize, floor: usize) -> usize {
        let closing = reported.saturating_sub(1);
        let quote = match self.chars.get(closing) {
            Some(&q) if q == '"' || q == '\'' => q,
            _ => return reported.saturating_sub(2 + decoded_len).max(floor),
        };

        // Escapes make the decoded text shorter than the source, so the
        // estimate can land inside the literal
        let mut col = reported.saturating_sub(2 + decoded_len).clamp(floor.min(closing), closing);
        while col > floor && self.chars[col] != quote {
            col -= 1;
        }
        // Triple quotes
        while col > floor && self.chars[col - 1] == quote {
            col -= 1;
        }
        col
    }

    /// Color a region that starts where the token stream stopped but is
    /// not (yet) in the region table
    fn paint_tail(&mut self, reported: usize) {
        let stop = reported.saturating_sub(1);
        let Some(rest) = self.chars.get(stop..).filter(|r| !r.is_empty()) else {
            return;
        };
        let rest: String = rest.iter().collect();
        let table = self.table;
        if let Some(region) = table.region_starting_at(&rest).and_then(|id| table.region(id)) {
            trace!(line = self.line, column = stop, region = %region.name, "unscanned region tail");
            self.builder.push(self.state.region_color(region.color), Some(stop));
        }
    }
}

/// Punctuation as opposed to word characters
fn is_symbol(c: char) -> bool {
    c != '_' && (c.is_ascii_punctuation() || c == ' ' || c == '\t')
}

/// Characters that can appear inside a number literal
fn is_num_char(c: char) -> bool {
    c.is_ascii_hexdigit() || matches!(c, '.' | 'x' | 'X' | '-' | '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_symbol() {
        assert!(is_symbol('&'));
        assert!(is_symbol('!'));
        assert!(!is_symbol('_'));
        assert!(!is_symbol('a'));
    }

    #[test]
    fn test_is_num_char() {
        for c in "0123456789abcdefABCDEF.x-_".chars() {
            assert!(is_num_char(c), "{}", c);
        }
        assert!(!is_num_char(' '));
        assert!(!is_num_char('='));
        assert!(!is_num_char('g'));
    }
}
