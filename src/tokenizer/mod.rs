//! Single-line GDScript tokenizer
//!
//! The highlighter drives any [`TokenCursor`]; [`Tokenizer`] is the
//! GDScript 3 implementation. A cursor is re-seeded with
//! [`TokenCursor::set_source`] for every line (or line remainder) and
//! then advanced until it reports [`TokenKind::Eof`] or
//! [`TokenKind::Error`].
//!
//! Column convention (1-based):
//! - most tokens report their first character
//! - number literals report one past their last character
//! - string literals report their closing quote
//! - end of input reports the `#` that started a comment, or one past
//!   the end of the text

mod keywords;
mod token;

pub use token::{LiteralValue, Token, TokenKind};

/// Forward token cursor over one line of source
pub trait TokenCursor {
    /// Reset the cursor onto new text and read its first token
    fn set_source(&mut self, text: &str);
    /// Move to the next token and return it
    ///
    /// Once a terminal token is reached the cursor stays on it.
    fn advance(&mut self) -> Token;
    /// Kind of the current token
    fn current_token(&self) -> TokenKind;
    /// Reported column of the current token
    fn current_column(&self) -> usize;
    /// Decoded value of the current literal token
    fn current_literal_value(&self) -> Option<&LiteralValue>;
    /// Text of the current identifier token (empty for other kinds)
    fn current_identifier_text(&self) -> &str;
}

/// GDScript tokenizer
#[derive(Debug, Default)]
pub struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
    current: Token,
    literal: Option<LiteralValue>,
    identifier: String,
}

impl Tokenizer {
    /// Create a tokenizer with no source
    pub fn new() -> Self {
        Self::default()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn emit(&mut self, kind: TokenKind, column: usize) {
        self.current = Token::new(kind, column);
    }

    fn error_at(&mut self, start: usize) {
        self.pos = self.chars.len();
        self.literal = None;
        self.emit(TokenKind::Error, start + 1);
    }

    fn read_token(&mut self) {
        self.literal = None;
        self.identifier.clear();

        while let Some(c) = self.peek(0) {
            match c {
                ' ' | '\t' | '\r' => self.pos += 1,
                // Line continuation
                '\\' if self.peek(1).is_none() => self.pos += 1,
                _ => break,
            }
        }

        let start = self.pos;
        let c = match self.peek(0) {
            Some(c) => c,
            None => {
                self.emit(TokenKind::Eof, start + 1);
                return;
            }
        };

        match c {
            '#' => {
                self.pos = self.chars.len();
                self.emit(TokenKind::Eof, start + 1);
            }
            '"' | '\'' => self.read_string(c, start),
            '0'..='9' => self.read_number(start),
            '.' if self.peek(1).is_some_and(|n| n.is_ascii_digit()) => self.read_number(start),
            c if c.is_alphabetic() || c == '_' => self.read_word(start),
            _ => self.read_operator(c, start),
        }
    }

    fn read_word(&mut self, start: usize) {
        while self.peek(0).is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();

        if let Some(kind) = keywords::reserved(&word) {
            self.emit(kind, start + 1);
        } else if let Some(value) = keywords::literal(&word) {
            self.literal = Some(value);
            self.emit(TokenKind::Constant, start + 1);
        } else {
            let kind = if keywords::is_built_in_type(&word) {
                TokenKind::BuiltInType
            } else if keywords::is_built_in_func(&word) {
                TokenKind::BuiltInFunc
            } else {
                TokenKind::Identifier
            };
            self.identifier = word;
            self.emit(kind, start + 1);
        }
    }

    fn consume_digits(&mut self, radix: u32) {
        while self.peek(0).is_some_and(|c| c.is_digit(radix) || c == '_') {
            self.pos += 1;
        }
    }

    fn read_number(&mut self, start: usize) {
        let prefixed = match (self.peek(0), self.peek(1)) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };

        let value = if let Some(radix) = prefixed {
            self.pos += 2;
            let digits_start = self.pos;
            self.consume_digits(radix);
            let digits: String = self.chars[digits_start..self.pos]
                .iter()
                .filter(|&&c| c != '_')
                .collect();
            i64::from_str_radix(&digits, radix).ok().map(LiteralValue::Int)
        } else {
            let mut is_real = false;
            self.consume_digits(10);
            if self.peek(0) == Some('.') && self.peek(1) != Some('.') {
                is_real = true;
                self.pos += 1;
                self.consume_digits(10);
            }
            if matches!(self.peek(0), Some('e' | 'E')) {
                let sign = usize::from(matches!(self.peek(1), Some('+' | '-')));
                if self.peek(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                    is_real = true;
                    self.pos += 1 + sign;
                    self.consume_digits(10);
                }
            }
            let text: String = self.chars[start..self.pos]
                .iter()
                .filter(|&&c| c != '_')
                .collect();
            if is_real {
                text.parse::<f64>().ok().map(LiteralValue::Real)
            } else {
                text.parse::<i64>().ok().map(LiteralValue::Int)
            }
        };

        match value {
            Some(value) => {
                self.literal = Some(value);
                self.emit(TokenKind::Constant, self.pos + 1);
            }
            None => self.error_at(start),
        }
    }

    fn read_string(&mut self, quote: char, start: usize) {
        if quote == '"' && self.peek(1) == Some('"') && self.peek(2) == Some('"') {
            self.read_triple_string(start);
            return;
        }

        self.pos = start + 1;
        let mut value = String::new();
        loop {
            match self.peek(0) {
                None => {
                    self.error_at(start);
                    return;
                }
                Some(c) if c == quote => break,
                Some('\\') => match self.read_escape() {
                    Some(c) => value.push(c),
                    None => {
                        self.error_at(start);
                        return;
                    }
                },
                Some(c) => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }

        let closing = self.pos;
        self.pos += 1;
        self.literal = Some(LiteralValue::Str(value));
        self.emit(TokenKind::Constant, closing + 1);
    }

    fn read_triple_string(&mut self, start: usize) {
        let body = start + 3;
        let closing = (body..self.chars.len().saturating_sub(2))
            .find(|&i| self.chars[i..i + 3] == ['"', '"', '"']);

        match closing {
            Some(closing) => {
                let value: String = self.chars[body..closing].iter().collect();
                self.pos = closing + 3;
                self.literal = Some(LiteralValue::Str(value));
                self.emit(TokenKind::Constant, closing + 1);
            }
            None => self.error_at(start),
        }
    }

    /// Decode an escape sequence at the cursor (which sits on the `\`)
    fn read_escape(&mut self) -> Option<char> {
        let c = self.peek(1)?;
        self.pos += 2;
        let decoded = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'v' => '\u{0b}',
            '0' => '\0',
            '\\' | '"' | '\'' => c,
            'u' => {
                let hex: String = (0..4).filter_map(|i| self.peek(i)).collect();
                if hex.chars().count() != 4 {
                    return None;
                }
                let code = u32::from_str_radix(&hex, 16).ok()?;
                self.pos += 4;
                char::from_u32(code)?
            }
            _ => return None,
        };
        Some(decoded)
    }

    fn read_operator(&mut self, c: char, start: usize) {
        use TokenKind::*;

        let (kind, len) = match (c, self.peek(1), self.peek(2)) {
            ('<', Some('<'), Some('=')) => (OpAssignShiftLeft, 3),
            ('>', Some('>'), Some('=')) => (OpAssignShiftRight, 3),
            ('<', Some('<'), _) => (OpShiftLeft, 2),
            ('>', Some('>'), _) => (OpShiftRight, 2),
            ('<', Some('='), _) => (OpLessEqual, 2),
            ('>', Some('='), _) => (OpGreaterEqual, 2),
            ('=', Some('='), _) => (OpEqual, 2),
            ('!', Some('='), _) => (OpNotEqual, 2),
            ('+', Some('='), _) => (OpAssignAdd, 2),
            ('-', Some('='), _) => (OpAssignSub, 2),
            ('*', Some('='), _) => (OpAssignMul, 2),
            ('/', Some('='), _) => (OpAssignDiv, 2),
            ('%', Some('='), _) => (OpAssignMod, 2),
            ('&', Some('='), _) => (OpAssignBitAnd, 2),
            ('|', Some('='), _) => (OpAssignBitOr, 2),
            ('^', Some('='), _) => (OpAssignBitXor, 2),
            ('&', Some('&'), _) => (OpAnd, 2),
            ('|', Some('|'), _) => (OpOr, 2),
            ('-', Some('>'), _) => (ForwardArrow, 2),
            ('<', _, _) => (OpLess, 1),
            ('>', _, _) => (OpGreater, 1),
            ('=', _, _) => (OpAssign, 1),
            ('!', _, _) => (OpNot, 1),
            ('+', _, _) => (OpAdd, 1),
            ('-', _, _) => (OpSub, 1),
            ('*', _, _) => (OpMul, 1),
            ('/', _, _) => (OpDiv, 1),
            ('%', _, _) => (OpMod, 1),
            ('&', _, _) => (OpBitAnd, 1),
            ('|', _, _) => (OpBitOr, 1),
            ('^', _, _) => (OpBitXor, 1),
            ('~', _, _) => (OpBitInvert, 1),
            ('[', _, _) => (BracketOpen, 1),
            (']', _, _) => (BracketClose, 1),
            ('{', _, _) => (CurlyBracketOpen, 1),
            ('}', _, _) => (CurlyBracketClose, 1),
            ('(', _, _) => (ParenthesisOpen, 1),
            (')', _, _) => (ParenthesisClose, 1),
            (',', _, _) => (Comma, 1),
            (';', _, _) => (Semicolon, 1),
            ('.', _, _) => (Period, 1),
            ('?', _, _) => (QuestionMark, 1),
            (':', _, _) => (Colon, 1),
            ('$', _, _) => (Dollar, 1),
            _ => {
                self.error_at(start);
                return;
            }
        };

        self.pos = start + len;
        self.emit(kind, start + 1);
    }
}

impl TokenCursor for Tokenizer {
    fn set_source(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.pos = 0;
        self.read_token();
    }

    fn advance(&mut self) -> Token {
        if !self.current.kind.is_terminal() {
            self.read_token();
        }
        self.current
    }

    fn current_token(&self) -> TokenKind {
        self.current.kind
    }

    fn current_column(&self) -> usize {
        self.current.column
    }

    fn current_literal_value(&self) -> Option<&LiteralValue> {
        self.literal.as_ref()
    }

    fn current_identifier_text(&self) -> &str {
        &self.identifier
    }
}
