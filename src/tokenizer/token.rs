//! Token kinds produced by the GDScript tokenizer
//!
//! This module defines the lexical units a token cursor reports, and
//! the decoded values carried by literal tokens.

/// GDScript token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// No token read yet
    Empty,
    Identifier,
    /// Literal value (number, string, bool, null)
    Constant,
    SelfKw,
    BuiltInType,
    BuiltInFunc,
    // Logical operators (word or symbol spelling)
    OpIn,
    OpAnd,
    OpOr,
    OpNot,
    // Comparison
    OpEqual,
    OpNotEqual,
    OpLess,
    OpLessEqual,
    OpGreater,
    OpGreaterEqual,
    // Arithmetic
    OpAdd,
    OpSub,
    OpMul,
    OpDiv,
    OpMod,
    OpShiftLeft,
    OpShiftRight,
    // Assignment
    OpAssign,
    OpAssignAdd,
    OpAssignSub,
    OpAssignMul,
    OpAssignDiv,
    OpAssignMod,
    OpAssignShiftLeft,
    OpAssignShiftRight,
    OpAssignBitAnd,
    OpAssignBitOr,
    OpAssignBitXor,
    // Bitwise
    OpBitAnd,
    OpBitOr,
    OpBitXor,
    OpBitInvert,
    // Control flow
    CfIf,
    CfElif,
    CfElse,
    CfFor,
    CfWhile,
    CfBreak,
    CfContinue,
    CfPass,
    CfReturn,
    CfMatch,
    // Declarations and modifiers
    PrFunction,
    PrClass,
    PrExtends,
    PrIs,
    PrOnready,
    PrTool,
    PrStatic,
    PrExport,
    PrSetget,
    PrConst,
    PrVar,
    PrEnum,
    PrPreload,
    PrAssert,
    PrYield,
    PrSignal,
    PrBreakpoint,
    PrRemote,
    PrMaster,
    PrPuppet,
    PrSync,
    // Punctuation
    BracketOpen,
    BracketClose,
    CurlyBracketOpen,
    CurlyBracketClose,
    ParenthesisOpen,
    ParenthesisClose,
    Comma,
    Semicolon,
    Period,
    QuestionMark,
    Colon,
    Dollar,
    ForwardArrow,
    // Built-in constants
    ConstPi,
    ConstTau,
    ConstInf,
    ConstNan,
    Wildcard,
    Error,
    Eof,
}

impl TokenKind {
    /// Whether this token ends the token stream for a line
    pub fn is_terminal(&self) -> bool {
        matches!(self, TokenKind::Eof | TokenKind::Error)
    }
}

/// A token as reported by a cursor
///
/// `column` is 1-based. It marks the first character for most tokens
/// and one past the last character for literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub column: usize,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, column: usize) -> Self {
        Self { kind, column }
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::new(TokenKind::Empty, 0)
    }
}

/// Decoded value of a literal token
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Real(f64),
    Str(String),
    Bool(bool),
    Null,
}

impl LiteralValue {
    /// Whether this is a numeric literal
    pub fn is_num(&self) -> bool {
        matches!(self, LiteralValue::Int(_) | LiteralValue::Real(_))
    }

    /// Decoded length in characters for string literals
    pub fn decoded_len(&self) -> Option<usize> {
        match self {
            LiteralValue::Str(s) => Some(s.chars().count()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_kinds() {
        assert!(TokenKind::Eof.is_terminal());
        assert!(TokenKind::Error.is_terminal());
        assert!(!TokenKind::Identifier.is_terminal());
    }

    #[test]
    fn test_literal_helpers() {
        assert!(LiteralValue::Int(3).is_num());
        assert!(LiteralValue::Real(0.5).is_num());
        assert!(!LiteralValue::Bool(true).is_num());
        assert_eq!(LiteralValue::Str("héllo".into()).decoded_len(), Some(5));
        assert_eq!(LiteralValue::Null.decoded_len(), None);
    }
}
