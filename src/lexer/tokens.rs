use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Keys are operators; values are the characters that can make a longer
    /// operator. Every prefix of a valid operator is itself a key, so the
    /// longest-match scan can look up each intermediate spelling.
    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        // Only a plain operator inside a macro body
        map.insert("#", "#");
        map.insert("##", "");

        map.insert("+", "+=");
        map.insert("++", "");
        map.insert("+=", "");

        map.insert("-", "-=>");
        map.insert("--", "");
        map.insert("-=", "");
        map.insert("->", "*");
        map.insert("->*", "");

        map.insert("*", "=");
        map.insert("*=", "");

        map.insert("/", "=/*");
        map.insert("/=", "");
        // comments hand off to their own scanners
        map.insert("//", "");
        map.insert("/*", "");

        map.insert("%", "=");
        map.insert("%=", "");

        map.insert("=", "=");
        map.insert("==", "");

        map.insert("!", "=");
        map.insert("!=", "");

        map.insert("~", "");

        map.insert("|", "|=");
        map.insert("||", "");
        map.insert("|=", "");

        map.insert("&", "&=");
        map.insert("&&", "");
        map.insert("&=", "");

        map.insert("^", "=");
        map.insert("^=", "");

        map.insert("<", "<=");
        map.insert("<=", "");
        map.insert("<<", "=");
        map.insert("<<=", "");

        map.insert(">", ">=");
        map.insert(">=", "");
        map.insert(">>", "=");
        map.insert(">>=", "");

        map.insert(".", ".*");
        map.insert("..", ".");
        map.insert(".*", "");
        map.insert("...", "");

        map.insert(":", ":");
        map.insert("::", "");

        map.insert("(", "");
        map.insert(")", "");

        map.insert("[", "");
        map.insert("]", "");

        map.insert("{", "");
        map.insert("}", "");

        map.insert("?", "");

        map.insert(",", "");
        map.insert(";", "");
        map
    };

    /// Spellings whose category is fixed regardless of capitalization.
    pub static ref FLAVOR_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("_", TokenKind::Value);
        map.insert("char", TokenKind::Type);
        map.insert("int", TokenKind::Type);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Eof,

    Directive,
    LineComment,
    BlockComment,

    Literal,
    // All operators, parens, etc. go here
    Operator,

    // All identifiers (and keywords) go under here
    Type,
    Value,

    // Reserved for later rewrite passes; the engine never produces these
    TypeExpr,
    Attribute,
    Ignored,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One lexical token, paired with the exact whitespace that preceded it.
/// Concatenating `white` and `text` for every token in order reproduces the
/// input byte for byte.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub white: String,
    pub text: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\ntext: {:?}}}", self.kind, self.text)
    }
}

impl Token {
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Assigns a grammatical category to an identifier from its capitalization
/// pattern alone; there is no symbol table behind this. The rules fire in
/// order and later rules are unreachable once an earlier one matches.
pub fn flavor(text: &str) -> TokenKind {
    if let Some(kind) = FLAVOR_LOOKUP.get(text) {
        return *kind;
    }

    let mut has_caps = false;
    let mut all_caps = true;
    for c in text.chars() {
        if c.is_ascii_uppercase() {
            has_caps = true;
        } else if c.is_ascii_lowercase() {
            all_caps = false;
        }
    }

    if all_caps {
        // LIKE_THIS
        return TokenKind::Value;
    }
    if text.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        // LikeThis
        return TokenKind::Type;
    }
    if has_caps {
        // likeThis
        return TokenKind::Value;
    }
    // like_this
    TokenKind::Value
}
