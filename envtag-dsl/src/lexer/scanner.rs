//! Lexer implementation

use super::token::*;

// ============================================================================
// LEXER IMPLEMENTATION
// ============================================================================

/// Single-pass lexer for one tag string.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    /// Byte offset where the pending literal run started.
    literal_start: Option<usize>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given tag.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            literal_start: None,
        }
    }

    /// Tokenize the entire tag. Never fails; malformed tags are the parser's problem.
    pub fn tokenize(mut self) -> Vec<Token> {
        for (pos, c) in self.source.char_indices() {
            match TokenKind::delimiter(c) {
                Some(kind) => {
                    self.flush_literal(pos);
                    self.tokens.push(Token::new(kind, pos, pos + c.len_utf8()));
                }
                None => {
                    if self.literal_start.is_none() {
                        self.literal_start = Some(pos);
                    }
                }
            }
        }

        self.flush_literal(self.source.len());
        self.tokens
    }

    /// Emit the pending literal ending at `end`, trimmed. Blank runs are dropped.
    fn flush_literal(&mut self, end: usize) {
        let Some(start) = self.literal_start.take() else {
            return;
        };

        let run = &self.source[start..end];
        let trimmed = run.trim();
        if trimmed.is_empty() {
            return;
        }

        let leading = run.len() - run.trim_start().len();
        let start = start + leading;
        self.tokens.push(Token::new(
            TokenKind::Literal(trimmed.to_string()),
            start,
            start + trimmed.len(),
        ));
    }
}

/// Tokenize a tag string.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
