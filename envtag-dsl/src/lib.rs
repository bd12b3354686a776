//! envtag DSL - Field Annotation Grammar
//!
//! Tokenizer, parser and canonical printer for the tag strings attached to
//! configuration fields.
//!
//! ```text
//! "PORTS,split=,,default=[80,443],optional"
//!     ↓
//! tokenize()   (delimiters , = [ ] plus trimmed literals)
//!     ↓
//! Parser       (single forward pass)
//!     ↓
//! TagDescriptor
//!     ↓
//! render_tag() (canonical text, for round-trip testing)
//! ```

pub mod lexer;
pub mod parser;
pub mod pretty_printer;

pub use lexer::{tokenize, Span, Token, TokenKind};
pub use parser::{parse_tag, Parser};
pub use pretty_printer::{render_tag, write_tag};

// Descriptor and error types live in core; re-exported so callers only
// need this crate to parse tags.
pub use envtag_core::{ParseError, ParseErrorKind, TagDescriptor};
