//! Parser module for envtag annotations

pub mod parser;

pub use parser::*;
