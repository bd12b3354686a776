//! Record loading
//!
//! Builds a [`ResolutionContext`] from [`LoadOptions`] and runs a
//! [`FieldVisitor`] over the record. Loading is fail-fast: the first field
//! error aborts the record, and fields visited before it keep their new values.

use crate::dotenv::read_env_files;
use crate::error::LoadResult;
use crate::options::LoadOptions;
use crate::record::{EnvRecord, FieldDescription, FieldVisitor};
use envtag_core::{MapSource, ResolutionContext};
use std::fmt::Write;
use tracing::debug;

/// Name of the source holding [`LoadOptions::with_overrides`] values.
pub const OVERRIDES_SOURCE: &str = "overrides";

/// Build the resolution context described by `options`.
///
/// Reads every configured env file.
pub fn build_context(options: &LoadOptions) -> LoadResult<ResolutionContext> {
    let mut context = ResolutionContext::new()
        .with_prefix(options.prefix())
        .with_source(options.environment());

    if !options.overrides().is_empty() {
        context = context.with_source(MapSource::with_values(
            OVERRIDES_SOURCE,
            options.overrides().clone(),
        ));
    }

    let files = read_env_files(options.files())?;
    if !files.is_empty() {
        context = context.with_source(files);
    }

    debug!(?context, "built resolution context");
    Ok(context)
}

/// Fill `record` from the sources described by `options`.
pub fn load<R: EnvRecord + ?Sized>(record: &mut R, options: &LoadOptions) -> LoadResult<()> {
    let context = build_context(options)?;
    load_with_context(record, &context)
}

/// Fill `record` from an already built context.
pub fn load_with_context<R: EnvRecord + ?Sized>(
    record: &mut R,
    context: &ResolutionContext,
) -> LoadResult<()> {
    let mut visitor = FieldVisitor::loading(context);
    record.visit(&mut visitor)?;
    Ok(())
}

/// Build a record from its `Default` and load it.
pub fn from_env<T: EnvRecord + Default>(options: &LoadOptions) -> LoadResult<T> {
    let mut record = T::default();
    load(&mut record, options)?;
    Ok(record)
}

/// List every field of `T` without resolving any value.
pub fn describe<T: EnvRecord + Default>() -> LoadResult<Vec<FieldDescription>> {
    let mut visitor = FieldVisitor::describing();
    T::default().visit(&mut visitor)?;
    Ok(visitor.into_descriptions())
}

/// Render a `.env.example` template for `T`.
///
/// One `KEY=default` line per field, preceded by a comment naming the field
/// path and its type.
pub fn env_example<T: EnvRecord + Default>(prefix: &str) -> LoadResult<String> {
    let keys = ResolutionContext::new().with_prefix(prefix);
    let mut out = String::new();

    for (index, field) in describe::<T>()?.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }

        let key = keys.effective_key(&field.descriptor.lookup_key);
        let default = field.descriptor.default_value.as_deref().unwrap_or("");

        // Writing to a String cannot fail.
        let _ = write!(out, "# {} ({})", field.path, field.target);
        if field.descriptor.optional {
            out.push_str(", optional");
        }
        if field.target.is_collection() {
            let _ = write!(out, ", split on '{}'", field.descriptor.delimiter());
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{key}={default}");
    }

    Ok(out)
}
