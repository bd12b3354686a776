//! Fuzz target for the tag parser
//!
//! Run with: cargo +nightly fuzz run parser_fuzz -- -max_total_time=60

#![no_main]

use envtag_dsl::{parse_tag, render_tag};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        match parse_tag(input) {
            Ok(descriptor) => {
                if let Some(default) = &descriptor.default_value {
                    assert!(!default.is_empty());
                }

                // Canonical form must parse back to the same descriptor.
                let rendered = render_tag(&descriptor);
                assert_eq!(parse_tag(&rendered).as_ref(), Ok(&descriptor), "{rendered}");
            }
            Err(err) => {
                assert!(err.offset <= input.len());
                assert_eq!(err.tag, input);
            }
        }
    }
});
