//! Lexer token types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token kinds for envtag annotations.
///
/// Only four characters are structural; everything else is literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Comma,
    Equals,
    LBracket,
    RBracket,
    /// Trimmed, never empty.
    Literal(String),
}

impl TokenKind {
    /// Structural token for `c`, if it is one of `,` `=` `[` `]`.
    pub fn delimiter(c: char) -> Option<TokenKind> {
        match c {
            ',' => Some(TokenKind::Comma),
            '=' => Some(TokenKind::Equals),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            _ => None,
        }
    }

    /// Source text of the token (trimmed for literals).
    pub fn text(&self) -> &str {
        match self {
            TokenKind::Comma => ",",
            TokenKind::Equals => "=",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Literal(s) => s,
        }
    }

    pub fn is_literal(&self, word: &str) -> bool {
        matches!(self, TokenKind::Literal(s) if s == word)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Byte range of a token within the tag string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A token with its kind and source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span { start, end },
        }
    }

    pub fn text(&self) -> &str {
        self.kind.text()
    }
}
