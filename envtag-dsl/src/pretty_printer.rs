//! Pretty printer for tag descriptors
//!
//! Produces the canonical tag text: lookup key first, then `optional`,
//! `split=` and `default=` in that order. Any descriptor produced by
//! [`parse_tag`](crate::parser::parse_tag) renders to a tag that parses
//! back to an equal descriptor.

use envtag_core::TagDescriptor;
use std::fmt::{self, Write};

/// Render a descriptor to its canonical tag string.
pub fn render_tag(descriptor: &TagDescriptor) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_tag(&mut out, descriptor);
    out
}

/// Write the canonical tag for `descriptor` into `out`.
pub fn write_tag<W: Write>(out: &mut W, descriptor: &TagDescriptor) -> fmt::Result {
    out.write_str(&descriptor.lookup_key)?;

    if descriptor.optional {
        out.write_str(",optional")?;
    }

    if let Some(delimiter) = &descriptor.split_on {
        write!(out, ",split={delimiter}")?;
    }

    if let Some(default) = &descriptor.default_value {
        if needs_brackets(default) {
            write!(out, ",default=[{default}]")?;
        } else {
            write!(out, ",default={default}")?;
        }
    }

    Ok(())
}

fn needs_brackets(value: &str) -> bool {
    value.contains(|c: char| c == ',' || c == '=')
}
