//! Kernel of the data binding crates.
//!
//! A *model* describes one concrete type as an ordered list of named, typed parameters and
//! converts instances of it to and from a [`TreeNode`]. [`ModelSchema`] holds the type-erased
//! half of the contract, [`DataModel`] adds `read` and `write`.
//!
//! ## Reflective models
//! ```rust
//! use databind_kernel::prelude::*;
//!
//! #[data_model]
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! let model = by_reflection::<Point>().unwrap();
//! assert_eq!(model.describe().unwrap(), "Point(x, y)");
//!
//! let mut context = DataContext::new();
//! let tree = model.write(&Point { x: 1, y: 2 }, &mut context).unwrap();
//! assert_eq!(model.read(&tree, &mut context).unwrap(), Point { x: 1, y: 2 });
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use databind_kernel::config::load_config;
//! use databind_kernel::domain::config::DataBindConfig;
//!
//! let cfg: DataBindConfig = load_config(Some("databind.toml"))?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as databind_kernel;

pub mod arguments;
pub mod config;
pub mod context;
pub mod error;
pub mod help;
pub mod model;
pub mod parameter;
pub mod prelude;
pub mod reflect;
pub mod registry;
pub mod types;
pub mod value;

pub use arguments::Arguments;
pub use context::{DataContext, PathSegment};
pub use databind_derive::{data_error, data_model};
pub use databind_domain as domain;
pub use databind_domain::{Mapping, NodeKind, Scalar, TreeNode};
pub use error::{DataError, DataErrorExt};
pub use help::{HelpDirectory, HelpSource};
pub use model::{DataModel, ModelSchema, ModelStack, StackFrame, by_reflection, by_translation};
pub use parameter::{AtomicType, DataModelParameter, ModelRef, ParameterType};
pub use reflect::{Describable, ReflectiveDataModel};
pub use registry::ModelRegistry;
pub use types::TypeInfo;
pub use value::DataValue;
