//! # Domain Models
//!
//! This crate contains pure data types with minimal dependencies (`serde`, `bitflags`, `indexmap`).
//! Keep it lean: no I/O or binding logic. Just the tree and its settings.

pub mod config;
pub mod flags;
pub mod tree;

pub use flags::ParameterFlags;
pub use tree::{Mapping, NodeKind, Scalar, TreeNode};
