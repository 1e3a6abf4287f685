//! The model contract and its factories.

use crate::context::DataContext;
use crate::error::DataError;
use crate::parameter::DataModelParameter;
use crate::reflect::{Describable, ReflectiveDataModel};
use crate::types::TypeInfo;
use databind_domain::TreeNode;
use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::warn;

/// Type-erased part of a model: everything that does not need the instance type.
pub trait ModelSchema: Send + Sync + fmt::Debug {
    /// The exact type this model describes.
    fn model_type(&self) -> &TypeInfo;

    /// Mandatory parameters in declaration order, then optional ones.
    fn parameters(&self) -> &[DataModelParameter];

    /// Rendered HTML help. `Ok(None)` when the type has none.
    ///
    /// # Errors
    /// `Io` when help content exists but cannot be loaded.
    fn help(&self) -> Result<Option<String>, DataError>;

    fn parameter(&self, name: &str) -> Option<&DataModelParameter> {
        self.parameters().iter().find(|p| p.name() == name)
    }

    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.model_type().simple_name())
    }

    /// Whether the type itself is deprecated. Parameter deprecation does not count.
    fn is_deprecated(&self) -> bool {
        self.model_type().is_deprecated()
    }

    /// Rendered HTML help for one parameter.
    ///
    /// # Errors
    /// `Io` when help content exists but cannot be loaded.
    fn parameter_help(&self, _name: &str) -> Result<Option<String>, DataError> {
        Ok(None)
    }

    /// Appends `TypeName(param, nested=Other(...), ...)` to `out`.
    ///
    /// A type already on `stack` renders as `TypeName…` instead of recursing.
    ///
    /// # Errors
    /// Propagates failures to build nested models. `stack` is restored either way.
    fn render(&self, out: &mut String, stack: &mut ModelStack) -> Result<(), DataError> {
        let ty = self.model_type();
        out.push_str(ty.simple_name());
        if stack.contains(ty.id()) {
            out.push('…');
            return Ok(());
        }

        let mut frame = stack.enter(ty.id());
        out.push('(');
        for (index, parameter) in self.parameters().iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            parameter.render(out, &mut frame)?;
        }
        out.push(')');
        Ok(())
    }

    /// Top-level rendering with a fresh stack.
    ///
    /// # Errors
    /// Propagates failures to build nested models.
    fn describe(&self) -> Result<String, DataError> {
        let mut out = String::new();
        self.render(&mut out, &mut ModelStack::new())?;
        Ok(out)
    }
}

/// Binding schema for instances of `T`.
pub trait DataModel<T>: ModelSchema {
    /// Serializes `value` into a tree.
    ///
    /// # Errors
    /// Propagates failures of nested writes.
    fn write(&self, value: &T, context: &mut DataContext) -> Result<TreeNode, DataError>;

    /// Reconstructs an instance from a tree.
    ///
    /// # Errors
    /// `Read` when the parameter contract cannot be satisfied.
    fn read(&self, node: &TreeNode, context: &mut DataContext) -> Result<T, DataError>;
}

/// Types currently being rendered, innermost last.
#[derive(Debug, Default)]
pub struct ModelStack {
    types: Vec<TypeId>,
}

impl ModelStack {
    #[must_use]
    pub const fn new() -> Self {
        Self { types: Vec::new() }
    }

    #[must_use]
    pub fn contains(&self, id: TypeId) -> bool {
        self.types.contains(&id)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Pushes `id` until the returned frame is dropped.
    pub fn enter(&mut self, id: TypeId) -> StackFrame<'_> {
        self.types.push(id);
        StackFrame { stack: self }
    }
}

/// Scope guard returned by [`ModelStack::enter`]; pops its type on drop.
#[derive(Debug)]
pub struct StackFrame<'a> {
    stack: &'a mut ModelStack,
}

impl Deref for StackFrame<'_> {
    type Target = ModelStack;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl DerefMut for StackFrame<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl Drop for StackFrame<'_> {
    fn drop(&mut self) {
        self.stack.types.pop();
    }
}

/// Builds the model of `T` from its declared parameters.
///
/// # Errors
/// `Internal` when two parameters share a name.
pub fn by_reflection<T: Describable>() -> Result<Arc<dyn DataModel<T>>, DataError> {
    Ok(Arc::new(ReflectiveDataModel::<T>::new()?))
}

/// Model binding `Y` through the transfer type `X`. Not available: always fails.
///
/// # Errors
/// Always `Unsupported`.
#[allow(clippy::needless_pass_by_value)]
pub fn by_translation<X, Y, R, W>(_reader: R, _writer: W) -> Result<Arc<dyn DataModel<Y>>, DataError>
where
    Y: 'static,
    R: Fn(X) -> Y + Send + Sync + 'static,
    W: Fn(&Y) -> X + Send + Sync + 'static,
{
    warn!(model = type_name::<Y>(), via = type_name::<X>(), "translation models are not implemented");
    Err(DataError::unsupported(format!(
        "binding {} through {} is not implemented",
        type_name::<Y>(),
        type_name::<X>()
    )))
}
