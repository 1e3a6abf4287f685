//! Models derived from a type's own parameter declarations.

use crate::arguments::Arguments;
use crate::context::DataContext;
use crate::error::DataError;
use crate::help::{HelpSource, doc_to_html};
use crate::model::{DataModel, ModelSchema};
use crate::parameter::DataModelParameter;
use crate::types::TypeInfo;
use databind_domain::config::UnknownParameters;
use databind_domain::{Mapping, TreeNode};
use fxhash::FxHashSet;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, trace};

/// A type that declares its parameters and binds itself from [`Arguments`].
///
/// Usually implemented by `#[data_model]`.
pub trait Describable: Sized + Send + Sync + 'static {
    /// Parameters in declaration order.
    fn parameters() -> Vec<DataModelParameter>;

    /// Builds an instance, taking each parameter out of `arguments`.
    ///
    /// # Errors
    /// `Read` when a parameter is missing or does not bind.
    fn instantiate(arguments: &mut Arguments, context: &mut DataContext) -> Result<Self, DataError>;

    /// Writes every parameter of `self` into `arguments`.
    ///
    /// # Errors
    /// Propagates failures of parameter writes.
    fn uninstantiate(&self, arguments: &mut Arguments, context: &mut DataContext) -> Result<(), DataError>;

    fn deprecated() -> bool {
        false
    }

    fn display_name() -> Option<&'static str> {
        None
    }

    /// Plain-text help, typically the type's doc comment.
    fn help() -> Option<&'static str> {
        None
    }
}

/// The model returned by [`crate::by_reflection`].
pub struct ReflectiveDataModel<T> {
    ty: TypeInfo,
    parameters: Vec<DataModelParameter>,
    help: Option<Arc<dyn HelpSource>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Describable> ReflectiveDataModel<T> {
    /// # Errors
    /// `Internal` when two parameters share a name.
    pub fn new() -> Result<Self, DataError> {
        let ty = TypeInfo::of::<T>().deprecated(T::deprecated());
        let declared = T::parameters();

        let mut seen = FxHashSet::default();
        if let Some(duplicate) = declared.iter().find(|p| !seen.insert(p.name().to_owned())) {
            return Err(DataError::internal(format!(
                "parameter '{}' is declared twice on {}",
                duplicate.name(),
                ty.name()
            )));
        }

        let (mut parameters, optional): (Vec<_>, Vec<_>) = declared.into_iter().partition(DataModelParameter::is_mandatory);
        parameters.extend(optional);

        debug!(model = ty.name(), parameters = parameters.len(), "built reflective model");
        Ok(Self { ty, parameters, help: None, _marker: PhantomData })
    }

    /// Consults `source` before the type's own help.
    #[must_use]
    pub fn with_help_source(mut self, source: Arc<dyn HelpSource>) -> Self {
        self.help = Some(source);
        self
    }

    fn sole_mandatory(&self) -> Option<&DataModelParameter> {
        let mut mandatory = self.parameters.iter().filter(|p| p.is_mandatory());
        match (mandatory.next(), mandatory.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    fn arguments_from(&self, node: &TreeNode, context: &DataContext) -> Result<Arguments, DataError> {
        match node {
            TreeNode::Mapping(mapping) => Ok(Arguments::from_mapping(mapping.clone())),
            other => match self.sole_mandatory() {
                Some(parameter) if context.single_parameter_shorthand() => {
                    let mut arguments = Arguments::new();
                    arguments.insert_node(parameter.name(), other.clone());
                    Ok(arguments)
                },
                _ => Err(DataError::read(format!(
                    "expected a mapping for {} at {}, found {}",
                    self.ty.simple_name(),
                    context.location(),
                    other.kind()
                ))),
            },
        }
    }

    fn check_leftovers(&self, leftovers: &Arguments, context: &mut DataContext) -> Result<(), DataError> {
        if leftovers.is_empty() {
            return Ok(());
        }
        let names = leftovers.names().map(|n| format!("'{n}'")).collect::<Vec<_>>().join(", ");
        let message = format!(
            "unknown parameter(s) {names} for {} at {}",
            self.ty.simple_name(),
            context.location()
        );
        match context.unknown_parameters() {
            UnknownParameters::Reject => Err(DataError::read(message)),
            UnknownParameters::Warn => {
                context.warn(message);
                Ok(())
            },
            UnknownParameters::Ignore => Ok(()),
        }
    }
}

impl<T: Describable> ModelSchema for ReflectiveDataModel<T> {
    fn model_type(&self) -> &TypeInfo {
        &self.ty
    }

    fn parameters(&self) -> &[DataModelParameter] {
        &self.parameters
    }

    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(T::display_name().unwrap_or_else(|| self.ty.simple_name()))
    }

    fn help(&self) -> Result<Option<String>, DataError> {
        if let Some(source) = &self.help
            && let Some(html) = source.model_help(&self.ty)?
        {
            return Ok(Some(html));
        }
        Ok(T::help().map(doc_to_html))
    }

    fn parameter_help(&self, name: &str) -> Result<Option<String>, DataError> {
        let Some(parameter) = self.parameter(name) else {
            return Ok(None);
        };
        if let Some(source) = &self.help
            && let Some(html) = source.parameter_help(&self.ty, name)?
        {
            return Ok(Some(html));
        }
        Ok(parameter.help().map(doc_to_html))
    }
}

impl<T: Describable> DataModel<T> for ReflectiveDataModel<T> {
    fn write(&self, value: &T, context: &mut DataContext) -> Result<TreeNode, DataError> {
        trace!(model = self.ty.name(), "write");
        let mut arguments = Arguments::new();
        value.uninstantiate(&mut arguments, context)?;

        let mut mapping = Mapping::with_capacity(arguments.len());
        for parameter in &self.parameters {
            if let Some(node) = arguments.take(parameter.name()) {
                mapping.insert(parameter.name(), node);
            }
        }
        if !arguments.is_empty() {
            return Err(DataError::internal(format!(
                "{} wrote undeclared parameter(s): {}",
                self.ty.name(),
                arguments.names().collect::<Vec<_>>().join(", ")
            )));
        }
        Ok(TreeNode::Mapping(mapping))
    }

    fn read(&self, node: &TreeNode, context: &mut DataContext) -> Result<T, DataError> {
        trace!(model = self.ty.name(), path = %context.path(), "read");
        let mut arguments = self.arguments_from(node, context)?;

        for parameter in self.parameters.iter().filter(|p| p.is_deprecated()) {
            if arguments.contains(parameter.name()) {
                let message = format!(
                    "parameter '{}' of {} is deprecated",
                    parameter.name(),
                    self.ty.simple_name()
                );
                context.warn(message);
            }
        }

        let instance = T::instantiate(&mut arguments, context)?;
        self.check_leftovers(&arguments, context)?;
        Ok(instance)
    }
}

impl<T> fmt::Debug for ReflectiveDataModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflectiveDataModel")
            .field("ty", &self.ty.name())
            .field("parameters", &self.parameters)
            .field("help", &self.help)
            .finish()
    }
}

impl<T: Describable> fmt::Display for ReflectiveDataModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.describe() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}(…)", self.ty.simple_name()),
        }
    }
}

/// Reads a `#[data_model]` value nested inside another model.
///
/// # Errors
/// Same as [`DataModel::read`].
pub fn read_describable<T: Describable>(node: &TreeNode, context: &mut DataContext) -> Result<T, DataError> {
    ReflectiveDataModel::<T>::new()?.read(node, context)
}

/// Writes a `#[data_model]` value nested inside another model.
///
/// # Errors
/// Same as [`DataModel::write`].
pub fn write_describable<T: Describable>(value: &T, context: &mut DataContext) -> Result<TreeNode, DataError> {
    ReflectiveDataModel::<T>::new()?.write(value, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_model;

    #[data_model]
    #[derive(Debug, PartialEq)]
    struct Label {
        text: String,
        colour: Option<String>,
    }

    #[test]
    fn shorthand_binds_the_sole_mandatory_parameter() {
        let model = ReflectiveDataModel::<Label>::new().unwrap();
        let label = model.read(&TreeNode::from("hello"), &mut DataContext::new()).unwrap();
        assert_eq!(label, Label { text: "hello".to_owned(), colour: None });

        let mut strict = DataContext::new().with_single_parameter_shorthand(false);
        let err = model.read(&TreeNode::from("hello"), &mut strict).unwrap_err();
        assert!(err.to_string().contains("expected a mapping for Label"), "{err}");
    }

    #[test]
    fn write_follows_parameter_order() {
        let model = ReflectiveDataModel::<Label>::new().unwrap();
        let label = Label { text: "x".to_owned(), colour: Some("red".to_owned()) };
        let tree = model.write(&label, &mut DataContext::new()).unwrap();
        let keys: Vec<_> = tree.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["text", "colour"]);
        assert_eq!(model.to_string(), "Label(text, colour?)");
    }
}
