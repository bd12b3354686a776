//! Parser implementation
//!
//! `tag := LOOKUP (',' option)*`
//! `option := 'optional' | 'default' '=' value | 'split' '=' DELIM`
//!
//! A single forward cursor over the token list. Each option sub-parser
//! advances the cursor and returns; nothing rewinds.

use crate::lexer::*;
use envtag_core::{ParseError, ParseErrorKind, TagDescriptor};

const OPTIONAL: &str = "optional";
const DEFAULT: &str = "default";
const SPLIT: &str = "split";

// ============================================================================
// PARSER
// ============================================================================

/// Parser for one tag's token stream.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser. `source` is the tag text, used for error reporting.
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    /// Parse the tokens into a descriptor.
    pub fn parse(&mut self) -> Result<TagDescriptor, ParseError> {
        // The first token is the lookup key, whatever it contains.
        let lookup_key = match self.current() {
            Some(token) => token.text().to_string(),
            None => return Err(self.error(ParseErrorKind::EmptyTag)),
        };
        self.advance();

        let mut descriptor = TagDescriptor::new(lookup_key);

        while let Some(token) = self.current() {
            match &token.kind {
                TokenKind::Comma => {
                    self.advance();
                }
                kind if kind.is_literal(OPTIONAL) => {
                    self.advance();
                    descriptor.optional = true;
                    self.expect_separator(OPTIONAL)?;
                }
                kind if kind.is_literal(SPLIT) => {
                    descriptor.split_on = Some(self.parse_split_option()?);
                    self.expect_separator(SPLIT)?;
                }
                kind if kind.is_literal(DEFAULT) => {
                    descriptor.default_value = Some(self.parse_default_option()?);
                    self.expect_separator(DEFAULT)?;
                }
                other => {
                    let kind = ParseErrorKind::InvalidToken {
                        token: other.text().to_string(),
                    };
                    return Err(self.error(kind));
                }
            }
        }

        Ok(descriptor)
    }

    /// `split=<token>`; the delimiter must be followed by ',' or the end.
    fn parse_split_option(&mut self) -> Result<String, ParseError> {
        self.advance();
        self.expect_equals(SPLIT)?;

        let delimiter = match self.current() {
            Some(token) => token.text().to_string(),
            None => return Err(self.error(ParseErrorKind::MissingDelimiter)),
        };

        if let Some(next) = self.peek() {
            if next.kind != TokenKind::Comma {
                let kind = ParseErrorKind::AmbiguousDelimiter {
                    delimiter,
                    next: next.text().to_string(),
                };
                return Err(self.error_at(next.span.start, kind));
            }
        }

        self.advance();
        Ok(delimiter)
    }

    /// `default=<literal>` or `default=[<anything but brackets>]`.
    fn parse_default_option(&mut self) -> Result<String, ParseError> {
        self.advance();
        self.expect_equals(DEFAULT)?;

        match self.current().map(|token| &token.kind) {
            None | Some(TokenKind::Comma) => Err(self.error(ParseErrorKind::MissingDefault)),
            Some(TokenKind::LBracket) => self.parse_escaped_default(),
            Some(TokenKind::Literal(value)) => {
                let value = value.clone();
                self.advance();
                Ok(value)
            }
            Some(other) => {
                let kind = ParseErrorKind::InvalidDefault {
                    token: other.text().to_string(),
                };
                Err(self.error(kind))
            }
        }
    }

    /// Everything between '[' and the next ']' is concatenated verbatim.
    fn parse_escaped_default(&mut self) -> Result<String, ParseError> {
        let open = self.offset();
        self.advance();

        let mut value = String::new();
        loop {
            match self.current().map(|token| &token.kind) {
                None => return Err(self.error_at(open, ParseErrorKind::UnterminatedDefault)),
                Some(TokenKind::RBracket) => break,
                Some(TokenKind::LBracket) => return Err(self.error(ParseErrorKind::NestedBracket)),
                Some(kind) => {
                    value.push_str(kind.text());
                    self.advance();
                }
            }
        }

        if value.is_empty() {
            return Err(self.error_at(open, ParseErrorKind::EmptyDefault));
        }

        // closing ]
        self.advance();
        Ok(value)
    }

    // ========================================================================
    // CURSOR HELPERS
    // ========================================================================

    pub(crate) fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    pub(crate) fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Byte offset of the current token, or the end of the tag.
    fn offset(&self) -> usize {
        self.current()
            .map(|token| token.span.start)
            .unwrap_or(self.source.len())
    }

    fn expect_equals(&mut self, option: &'static str) -> Result<(), ParseError> {
        match self.current() {
            Some(token) if token.kind == TokenKind::Equals => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error(ParseErrorKind::MissingEquals { option })),
        }
    }

    fn expect_separator(&self, option: &'static str) -> Result<(), ParseError> {
        match self.current() {
            None => Ok(()),
            Some(token) if token.kind == TokenKind::Comma => Ok(()),
            Some(token) => {
                let kind = ParseErrorKind::MissingSeparator {
                    option,
                    found: token.text().to_string(),
                };
                Err(self.error(kind))
            }
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(self.offset(), kind)
    }

    fn error_at(&self, offset: usize, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.source, offset, kind)
    }
}

/// Tokenize and parse a tag string.
pub fn parse_tag(source: &str) -> Result<TagDescriptor, ParseError> {
    Parser::new(source, tokenize(source)).parse()
}

// =============================================================================
// TESTS
// =============================================================================
