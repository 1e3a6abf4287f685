//! Shared catalog of models, addressable by type or by name.

use crate::context::DataContext;
use crate::error::DataError;
use crate::help::HelpSource;
use crate::model::{DataModel, ModelSchema};
use crate::reflect::{Describable, ReflectiveDataModel};
use databind_domain::TreeNode;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Operations available on a registered model without knowing its type.
trait ErasedCodec: Send + Sync + fmt::Debug {
    fn schema(&self) -> Arc<dyn ModelSchema>;
    fn read_erased(&self, node: &TreeNode, context: &mut DataContext) -> Result<Box<dyn Any + Send>, DataError>;
    fn write_erased(&self, value: &dyn Any, context: &mut DataContext) -> Result<TreeNode, DataError>;
    fn normalize(&self, node: &TreeNode, context: &mut DataContext) -> Result<TreeNode, DataError>;
    fn as_any(&self) -> &dyn Any;
}

struct TypedCodec<T: 'static> {
    model: Arc<dyn DataModel<T>>,
}

impl<T: 'static> fmt::Debug for TypedCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedCodec").field("model", &self.model).finish()
    }
}

impl<T: Send + Sync + 'static> ErasedCodec for TypedCodec<T> {
    fn schema(&self) -> Arc<dyn ModelSchema> {
        self.model.clone()
    }

    fn read_erased(&self, node: &TreeNode, context: &mut DataContext) -> Result<Box<dyn Any + Send>, DataError> {
        Ok(Box::new(self.model.read(node, context)?))
    }

    fn write_erased(&self, value: &dyn Any, context: &mut DataContext) -> Result<TreeNode, DataError> {
        let value = value.downcast_ref::<T>().ok_or_else(|| {
            DataError::internal(format!(
                "value handed to {} has a different type",
                self.model.model_type().name()
            ))
        })?;
        self.model.write(value, context)
    }

    fn normalize(&self, node: &TreeNode, context: &mut DataContext) -> Result<TreeNode, DataError> {
        let value = self.model.read(node, context)?;
        self.model.write(&value, context)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    by_type: FxHashMap<TypeId, Arc<dyn ErasedCodec>>,
    by_name: FxHashMap<String, TypeId>,
}

/// Thread-safe model catalog. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    help: Option<Arc<dyn HelpSource>>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Models registered through [`Self::register`] consult `source` for help.
    #[must_use]
    pub fn with_help_source(mut self, source: Arc<dyn HelpSource>) -> Self {
        self.help = Some(source);
        self
    }

    /// Builds the reflective model of `T` and registers it.
    ///
    /// # Errors
    /// Fails when `T` declares an invalid parameter set.
    pub fn register<T: Describable>(&self) -> Result<Arc<dyn DataModel<T>>, DataError> {
        let mut model = ReflectiveDataModel::<T>::new()?;
        if let Some(help) = &self.help {
            model = model.with_help_source(Arc::clone(help));
        }
        let model: Arc<dyn DataModel<T>> = Arc::new(model);
        self.register_model(Arc::clone(&model));
        Ok(model)
    }

    /// Registers `model` under its simple and display names, replacing any model of the same type.
    pub fn register_model<T: Send + Sync + 'static>(&self, model: Arc<dyn DataModel<T>>) {
        let id = TypeId::of::<T>();
        let simple = model.model_type().simple_name().to_owned();
        let display = model.display_name().into_owned();
        let codec: Arc<dyn ErasedCodec> = Arc::new(TypedCodec { model });

        let mut inner = self.inner.write();
        if inner.by_type.insert(id, codec).is_some() {
            debug!(model = %simple, "replacing registered model");
            inner.by_name.retain(|_, entry| *entry != id);
        }
        for name in [simple, display] {
            if let Some(previous) = inner.by_name.insert(name.clone(), id)
                && previous != id
            {
                debug!(name = %name, "model name now refers to a different type");
            }
        }
    }

    #[must_use]
    pub fn model<T: 'static>(&self) -> Option<Arc<dyn DataModel<T>>> {
        let inner = self.inner.read();
        let codec = inner.by_type.get(&TypeId::of::<T>())?;
        codec.as_any().downcast_ref::<TypedCodec<T>>().map(|typed| Arc::clone(&typed.model))
    }

    #[must_use]
    pub fn schema<T: 'static>(&self) -> Option<Arc<dyn ModelSchema>> {
        self.inner.read().by_type.get(&TypeId::of::<T>()).map(|codec| codec.schema())
    }

    /// Finds a model by simple or display name (case-sensitive).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ModelSchema>> {
        self.codec(name).map(|codec| codec.schema())
    }

    /// Every registered model, sorted by simple name.
    #[must_use]
    pub fn schemas(&self) -> Vec<Arc<dyn ModelSchema>> {
        let mut schemas: Vec<_> = self.inner.read().by_type.values().map(|codec| codec.schema()).collect();
        schemas.sort_by_key(|schema| schema.model_type().simple_name());
        schemas
    }

    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.inner.read().by_type.contains_key(&TypeId::of::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().by_type.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().by_type.is_empty()
    }

    /// Reads `node` with the model called `name`. Downcast the result to the model's type.
    ///
    /// # Errors
    /// `Read` for an unknown name or when the node does not bind.
    pub fn read_erased(
        &self,
        name: &str,
        node: &TreeNode,
        context: &mut DataContext,
    ) -> Result<Box<dyn Any + Send>, DataError> {
        self.require(name)?.read_erased(node, context)
    }

    /// Writes `value` with the model called `name`.
    ///
    /// # Errors
    /// `Read` for an unknown name, `Internal` when `value` is not of the model's type.
    pub fn write_erased(&self, name: &str, value: &dyn Any, context: &mut DataContext) -> Result<TreeNode, DataError> {
        self.require(name)?.write_erased(value, context)
    }

    /// Reads `node` with the model called `name` and writes the instance back.
    ///
    /// # Errors
    /// `Read` for an unknown name or when the node does not bind; write failures propagate.
    pub fn normalize(&self, name: &str, node: &TreeNode, context: &mut DataContext) -> Result<TreeNode, DataError> {
        self.require(name)?.normalize(node, context)
    }

    fn codec(&self, name: &str) -> Option<Arc<dyn ErasedCodec>> {
        let inner = self.inner.read();
        let id = inner.by_name.get(name)?;
        inner.by_type.get(id).cloned()
    }

    fn require(&self, name: &str) -> Result<Arc<dyn ErasedCodec>, DataError> {
        self.codec(name).ok_or_else(|| DataError::read(format!("no model named '{name}' is registered")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_has_nothing() {
        let registry = ModelRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup("Anything").is_none());
        assert!(registry.model::<u8>().is_none());
        let err = registry.normalize("Anything", &TreeNode::Null, &mut DataContext::new()).unwrap_err();
        assert_eq!(err.to_string(), "Read failed: no model named 'Anything' is registered");
    }
}
