//! Everything needed to declare, build and use models.

pub use crate::context::DataContext;
pub use crate::error::{DataError, DataErrorExt};
pub use crate::model::{DataModel, ModelSchema, by_reflection, by_translation};
pub use crate::reflect::Describable;
pub use crate::registry::ModelRegistry;
pub use crate::value::DataValue;
pub use databind_derive::data_model;
pub use databind_domain::{Mapping, TreeNode};
