//! Lexer module for envtag annotations

pub mod scanner;
pub mod token;

pub use scanner::*;
pub use token::*;
