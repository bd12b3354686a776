//! Fuzz target for the tag tokenizer
//!
//! Run with: cargo +nightly fuzz run tokenizer_fuzz -- -max_total_time=60

#![no_main]

use envtag_dsl::{tokenize, TokenKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let tokens = tokenize(input);

        let mut previous_end = 0;
        for token in &tokens {
            // Spans are ordered, in bounds and on char boundaries.
            assert!(token.span.start >= previous_end);
            assert!(token.span.start < token.span.end);
            assert_eq!(&input[token.span.start..token.span.end], token.text());
            previous_end = token.span.end;

            if let TokenKind::Literal(text) = &token.kind {
                assert!(!text.is_empty());
                assert_eq!(text.trim(), text);
            }
        }
    }
});
