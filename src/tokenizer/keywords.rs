//! GDScript word tables
//!
//! Reserved words map straight to token kinds; built-in type and
//! function names are matched after reserved words.

use super::token::{LiteralValue, TokenKind};

/// Look up a reserved word
pub fn reserved(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "func" => TokenKind::PrFunction,
        "class" => TokenKind::PrClass,
        "extends" => TokenKind::PrExtends,
        "is" => TokenKind::PrIs,
        "onready" => TokenKind::PrOnready,
        "tool" => TokenKind::PrTool,
        "static" => TokenKind::PrStatic,
        "export" => TokenKind::PrExport,
        "setget" => TokenKind::PrSetget,
        "const" => TokenKind::PrConst,
        "var" => TokenKind::PrVar,
        "enum" => TokenKind::PrEnum,
        "preload" => TokenKind::PrPreload,
        "assert" => TokenKind::PrAssert,
        "yield" => TokenKind::PrYield,
        "signal" => TokenKind::PrSignal,
        "breakpoint" => TokenKind::PrBreakpoint,
        "remote" => TokenKind::PrRemote,
        "master" => TokenKind::PrMaster,
        "puppet" | "slave" => TokenKind::PrPuppet,
        "sync" => TokenKind::PrSync,
        "if" => TokenKind::CfIf,
        "elif" => TokenKind::CfElif,
        "else" => TokenKind::CfElse,
        "for" => TokenKind::CfFor,
        "while" => TokenKind::CfWhile,
        "break" => TokenKind::CfBreak,
        "continue" => TokenKind::CfContinue,
        "pass" => TokenKind::CfPass,
        "return" => TokenKind::CfReturn,
        "match" => TokenKind::CfMatch,
        "self" => TokenKind::SelfKw,
        "in" => TokenKind::OpIn,
        "and" => TokenKind::OpAnd,
        "or" => TokenKind::OpOr,
        "not" => TokenKind::OpNot,
        "PI" => TokenKind::ConstPi,
        "TAU" => TokenKind::ConstTau,
        "INF" => TokenKind::ConstInf,
        "NAN" => TokenKind::ConstNan,
        "_" => TokenKind::Wildcard,
        _ => return None,
    };
    Some(kind)
}

/// Look up a word-spelled literal
pub fn literal(word: &str) -> Option<LiteralValue> {
    match word {
        "true" => Some(LiteralValue::Bool(true)),
        "false" => Some(LiteralValue::Bool(false)),
        "null" => Some(LiteralValue::Null),
        _ => None,
    }
}

const BUILT_IN_TYPES: &[&str] = &[
    "bool", "int", "float", "String", "Vector2", "Rect2", "Vector3", "Transform2D",
    "Plane", "Quat", "AABB", "Basis", "Transform", "Color", "NodePath", "RID",
    "Object", "Dictionary", "Array", "PoolByteArray", "PoolIntArray", "PoolRealArray",
    "PoolStringArray", "PoolVector2Array", "PoolVector3Array", "PoolColorArray",
];

const BUILT_IN_FUNCS: &[&str] = &[
    "sin", "cos", "tan", "sinh", "cosh", "tanh", "asin", "acos", "atan", "atan2",
    "sqrt", "fmod", "fposmod", "floor", "ceil", "round", "abs", "sign", "pow", "log",
    "exp", "is_nan", "is_inf", "ease", "decimals", "stepify", "lerp", "inverse_lerp",
    "range_lerp", "dectime", "randomize", "randi", "randf", "rand_range", "seed",
    "rand_seed", "deg2rad", "rad2deg", "linear2db", "db2linear", "polar2cartesian",
    "cartesian2polar", "wrapi", "wrapf", "max", "min", "clamp", "nearest_po2",
    "weakref", "funcref", "convert", "typeof", "type_exists", "char", "str", "print",
    "printt", "prints", "printerr", "printraw", "print_debug", "push_error",
    "push_warning", "var2str", "str2var", "var2bytes", "bytes2var", "range", "load",
    "inst2dict", "dict2inst", "validate_json", "parse_json", "to_json", "hash",
    "Color8", "ColorN", "print_stack", "get_stack", "instance_from_id", "len",
    "is_instance_valid",
];

/// Whether `word` names a built-in type
pub fn is_built_in_type(word: &str) -> bool {
    BUILT_IN_TYPES.contains(&word)
}

/// Whether `word` names a built-in function
pub fn is_built_in_func(word: &str) -> bool {
    BUILT_IN_FUNCS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved() {
        assert_eq!(reserved("func"), Some(TokenKind::PrFunction));
        assert_eq!(reserved("slave"), Some(TokenKind::PrPuppet));
        assert_eq!(reserved("and"), Some(TokenKind::OpAnd));
        assert_eq!(reserved("function"), None);
    }

    #[test]
    fn test_builtins() {
        assert!(is_built_in_type("Vector2"));
        assert!(!is_built_in_type("vector2"));
        assert!(is_built_in_func("print"));
        assert!(!is_built_in_func("foo"));
        assert_eq!(literal("null"), Some(LiteralValue::Null));
        assert_eq!(literal("True"), None);
    }
}
