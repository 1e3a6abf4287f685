//! Facade crate for the data binding stack.
//! Re-exports domain/kernel primitives and the attribute macros.
//! Keep this crate thin: it should compose other crates, not implement binding logic.
//!
//! ## Usage
//! - Depend on `databind` and `use databind::prelude::*;`.
//! - Models declared outside this workspace pass `crate = "databind::kernel"` to `#[data_model]`.

pub use databind_derive::{data_error, data_model};
pub use databind_domain as domain;
pub use databind_kernel as kernel;

pub use databind_kernel::{
    DataContext, DataError, DataModel, DataValue, Describable, HelpDirectory, ModelRegistry,
    ModelSchema, TreeNode, by_reflection, by_translation,
};

pub mod prelude {
    pub use databind_kernel::prelude::*;
}
