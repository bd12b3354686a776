//! Record registration
//!
//! A record lists its fields by implementing [`EnvRecord`]; the loader drives
//! a [`FieldVisitor`] over them, either filling each slot or collecting a
//! description. [`env_record!`](crate::env_record) writes the impl.

use envtag_core::{
    coerce, resolve, CoercionTarget, EnvValue, FieldError, ResolutionContext, Resolved,
    TagDescriptor, ValueOrigin,
};
use envtag_dsl::parse_tag;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A struct whose fields are loaded from tagged values.
pub trait EnvRecord {
    /// Visit every field in declaration order.
    ///
    /// Implementations return the first error the visitor reports.
    fn visit(&mut self, visitor: &mut FieldVisitor<'_>) -> Result<(), FieldError>;
}

/// One field as seen by [`describe`](crate::describe).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescription {
    /// Dotted path inside the record.
    pub path: String,
    pub descriptor: TagDescriptor,
    pub target: CoercionTarget,
}

enum Mode<'a> {
    Load(&'a ResolutionContext),
    Describe(Vec<FieldDescription>),
}

/// Walks a record's fields for the loader.
pub struct FieldVisitor<'a> {
    mode: Mode<'a>,
    /// Names of the nested records currently being visited.
    scope: Vec<String>,
}

impl<'a> FieldVisitor<'a> {
    /// Visitor that resolves and writes every field.
    pub fn loading(context: &'a ResolutionContext) -> Self {
        Self {
            mode: Mode::Load(context),
            scope: Vec::new(),
        }
    }

    /// Visitor that only parses tags and records field descriptions.
    pub fn describing() -> FieldVisitor<'static> {
        FieldVisitor {
            mode: Mode::Describe(Vec::new()),
            scope: Vec::new(),
        }
    }

    /// Handle a leaf field tagged with `tag`.
    pub fn field<T: EnvValue>(
        &mut self,
        name: &str,
        tag: &str,
        slot: &mut T,
    ) -> Result<(), FieldError> {
        let path = self.path_of(name);
        let descriptor = parse_tag(tag).map_err(|err| FieldError::new(&path, err))?;

        match &mut self.mode {
            Mode::Load(context) => load_field(&path, &descriptor, *context, slot),
            Mode::Describe(fields) => {
                fields.push(FieldDescription {
                    path,
                    descriptor,
                    target: T::target(),
                });
                Ok(())
            }
        }
    }

    /// Descend into a nested record. Its fields are reported as `name.field`.
    pub fn nested<R: EnvRecord + ?Sized>(
        &mut self,
        name: &str,
        record: &mut R,
    ) -> Result<(), FieldError> {
        self.scope.push(name.to_string());
        let result = record.visit(self);
        self.scope.pop();
        result
    }

    /// Descriptions collected so far; empty for a loading visitor.
    pub fn into_descriptions(self) -> Vec<FieldDescription> {
        match self.mode {
            Mode::Describe(fields) => fields,
            Mode::Load(_) => Vec::new(),
        }
    }

    fn path_of(&self, name: &str) -> String {
        if self.scope.is_empty() {
            return name.to_string();
        }
        let mut path = self.scope.join(".");
        path.push('.');
        path.push_str(name);
        path
    }
}

fn load_field<T: EnvValue>(
    path: &str,
    descriptor: &TagDescriptor,
    context: &ResolutionContext,
    slot: &mut T,
) -> Result<(), FieldError> {
    let resolved = resolve(descriptor, context).map_err(|err| FieldError::new(path, err))?;

    match resolved {
        Resolved::Absent { key } => {
            debug!(field = path, key = %key, "optional field absent, writing zero value");
            *slot = T::default();
        }
        Resolved::Value { key, raw, origin } => {
            let typed = coerce(&raw, &T::target(), descriptor.split_on.as_deref())
                .map_err(|err| FieldError::new(path, err))?;
            *slot = T::from_typed(typed).map_err(|err| FieldError::new(path, err))?;

            let origin = match &origin {
                ValueOrigin::Source(name) => name.as_str(),
                ValueOrigin::Default => "default",
            };
            debug!(field = path, key = %key, origin, "loaded field");
        }
    }

    Ok(())
}

/// Implement [`EnvRecord`] for a struct from its field list.
///
/// Leaf fields are written `name = "TAG"`; a bare `name` is a nested record.
///
/// ```
/// use envtag_loader::env_record;
///
/// #[derive(Default)]
/// struct Database {
///     url: String,
///     pool: u32,
/// }
///
/// #[derive(Default)]
/// struct Config {
///     port: u16,
///     database: Database,
/// }
///
/// env_record!(Database {
///     url = "DATABASE_URL",
///     pool = "DATABASE_POOL,default=4",
/// });
///
/// env_record!(Config {
///     port = "PORT,default=8080",
///     database,
/// });
/// ```
#[macro_export]
macro_rules! env_record {
    (@fields $record:ident, $visitor:ident $(,)?) => {};
    (@fields $record:ident, $visitor:ident, $field:ident = $tag:expr $(, $($rest:tt)*)?) => {
        $visitor.field(::std::stringify!($field), $tag, &mut $record.$field)?;
        $crate::env_record!(@fields $record, $visitor $(, $($rest)*)?);
    };
    (@fields $record:ident, $visitor:ident, $field:ident $(, $($rest:tt)*)?) => {
        $visitor.nested(::std::stringify!($field), &mut $record.$field)?;
        $crate::env_record!(@fields $record, $visitor $(, $($rest)*)?);
    };
    ($ty:ty { $($fields:tt)* }) => {
        impl $crate::EnvRecord for $ty {
            fn visit(
                &mut self,
                visitor: &mut $crate::FieldVisitor<'_>,
            ) -> ::std::result::Result<(), $crate::FieldError> {
                let record = self;
                $crate::env_record!(@fields record, visitor, $($fields)*);
                ::std::result::Result::Ok(())
            }
        }
    };
}
