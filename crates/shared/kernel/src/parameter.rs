//! Parameter descriptors and the types they bind to.

use crate::error::DataError;
use crate::model::{ModelSchema, ModelStack};
use crate::reflect::{Describable, ReflectiveDataModel};
use crate::types::TypeInfo;
use databind_domain::ParameterFlags;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// One named, typed binding target of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct DataModelParameter {
    name: Cow<'static, str>,
    ty: ParameterType,
    flags: ParameterFlags,
    help: Option<Cow<'static, str>>,
}

impl DataModelParameter {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, ty: ParameterType, mandatory: bool) -> Self {
        Self { name: name.into(), ty, flags: ParameterFlags::required(mandatory), help: None }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<Cow<'static, str>>) -> Self {
        self.help = Some(help.into());
        self
    }

    #[must_use]
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.flags.set(ParameterFlags::DEPRECATED, deprecated);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn parameter_type(&self) -> &ParameterType {
        &self.ty
    }

    #[must_use]
    pub const fn flags(&self) -> ParameterFlags {
        self.flags
    }

    #[must_use]
    pub const fn is_mandatory(&self) -> bool {
        self.flags.contains(ParameterFlags::MANDATORY)
    }

    #[must_use]
    pub const fn is_deprecated(&self) -> bool {
        self.flags.contains(ParameterFlags::DEPRECATED)
    }

    /// Plain-text help attached to the declaration.
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Appends `name`, `?` when optional, and `=Nested(...)` when the type reaches a model.
    ///
    /// # Errors
    /// Propagates failures to build a nested model.
    pub fn render(&self, out: &mut String, stack: &mut ModelStack) -> Result<(), DataError> {
        out.push_str(&self.name);
        if !self.is_mandatory() {
            out.push('?');
        }
        if self.ty.model().is_some() {
            out.push('=');
            self.ty.render(out, stack)?;
        }
        Ok(())
    }
}

/// Leaf types of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomicType {
    Boolean,
    Integer,
    Number,
    String,
}

impl AtomicType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

/// Shape of the value a parameter binds to.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterType {
    Atomic(AtomicType),
    Sequence(Box<Self>),
    /// String-keyed map.
    Map(Box<Self>),
    Model(ModelRef),
    /// Raw tree pass-through.
    Any,
}

impl ParameterType {
    /// The nested model this type reaches through sequences and maps, if any.
    #[must_use]
    pub fn model(&self) -> Option<&ModelRef> {
        match self {
            Self::Model(model) => Some(model),
            Self::Sequence(inner) | Self::Map(inner) => inner.model(),
            Self::Atomic(_) | Self::Any => None,
        }
    }

    /// Recursive rendering: nested models expand, sequences get `[]`, maps get `{}`.
    ///
    /// # Errors
    /// Propagates failures to build a nested model.
    pub fn render(&self, out: &mut String, stack: &mut ModelStack) -> Result<(), DataError> {
        match self {
            Self::Atomic(atomic) => out.push_str(atomic.as_str()),
            Self::Any => out.push_str("any"),
            Self::Sequence(inner) => {
                inner.render(out, stack)?;
                out.push_str("[]");
            },
            Self::Map(inner) => {
                inner.render(out, stack)?;
                out.push_str("{}");
            },
            Self::Model(model) => model.resolve()?.render(out, stack)?,
        }
        Ok(())
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic(atomic) => f.write_str(atomic.as_str()),
            Self::Any => f.write_str("any"),
            Self::Sequence(inner) => write!(f, "{inner}[]"),
            Self::Map(inner) => write!(f, "{inner}{{}}"),
            Self::Model(model) => f.write_str(model.type_info().simple_name()),
        }
    }
}

/// Lazily resolved reference to a nested model.
///
/// Resolution happens on demand, so a type may refer to itself.
#[derive(Clone, Copy)]
pub struct ModelRef {
    ty: TypeInfo,
    resolve: fn() -> Result<Arc<dyn ModelSchema>, DataError>,
}

impl ModelRef {
    #[must_use]
    pub fn of<T: Describable>() -> Self {
        Self { ty: TypeInfo::of::<T>().deprecated(T::deprecated()), resolve: resolve_reflective::<T> }
    }

    #[must_use]
    pub const fn type_info(&self) -> &TypeInfo {
        &self.ty
    }

    /// Builds the referenced model.
    ///
    /// # Errors
    /// Fails when the referenced type declares an invalid parameter set.
    pub fn resolve(&self) -> Result<Arc<dyn ModelSchema>, DataError> {
        (self.resolve)()
    }
}

fn resolve_reflective<T: Describable>() -> Result<Arc<dyn ModelSchema>, DataError> {
    Ok(Arc::new(ReflectiveDataModel::<T>::new()?))
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelRef").field(&self.ty.name()).finish()
    }
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}
