#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the data binding crates.
//! `data_model` turns a plain struct into a reflectively bound model and `data_error`
//! wires context and conversions into error enums.
//!
//! ## Usage
//! Consumers normally go through the `databind` facade, which re-exports both macros:
//! ```toml
//! [dependencies]
//! databind = { path = "../crates/databind" }
//! ```
//!
//! The examples below are `ignore`d because this crate cannot depend on the runtime it expands into.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro that binds a struct's named fields to model parameters.
///
/// The struct keeps its definition; the macro strips its helper attributes and adds
/// implementations of `Describable` and `DataValue`, so the type can be handed to
/// `by_reflection` or nested inside other models.
///
/// # Arguments
///
/// * `display_name = "..."` - Human-readable name. Defaults to the type's simple name.
/// * `help = "..."` - Model help text. Defaults to the struct's doc comment.
/// * `deprecated` - Marks the model deprecated. `#[deprecated]` on the struct does the same.
/// * `crate = "path"` - Path to the kernel crate. Defaults to `::databind_kernel`.
///
/// # Field Attributes
///
/// Fields are mandatory parameters unless they say otherwise. `Option<T>` fields are
/// optional and omitted on write when `None`.
///
/// * `#[data(rename = "...")]` - Parameter name differs from the field name.
/// * `#[data(optional)]` / `#[data(default)]` - Optional; absent reads fall back to
///   `Default` and values equal to the default are not written.
/// * `#[data(deprecated)]` - Deprecated parameter. `#[deprecated]` on the field works too.
/// * `#[data(help = "...")]` - Parameter help. Defaults to the field's doc comment.
/// * `#[data(skip)]` - Not a parameter; filled from `Default` on read.
///
/// # Errors
/// Emits a compile-time error for enums, tuple structs, borrowed generics,
/// unknown arguments and two fields bound to the same parameter name.
///
/// # Example
///
/// ```rust,ignore
/// use databind::prelude::*;
///
/// /// Runs a shell script.
/// #[data_model(display_name = "Shell Script")]
/// #[derive(Debug, Clone, PartialEq)]
/// pub struct Shell {
///     pub script: String,
///     #[data(default)]
///     pub return_status: bool,
///     pub label: Option<String>,
/// }
///
/// let model = by_reflection::<Shell>()?;
/// assert_eq!(model.render(), "Shell(script, return_status?, label?)");
/// ```
#[proc_macro_attribute]
pub fn data_model(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::model::expand_model(args.into(), input).into()
}

/// A high-level attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `#[source]` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&str>` and `From<String>` implementations
///   if an `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`), next to a context field.
/// 4. Tuple or unit variants are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use databind_derive::data_error;
/// use std::borrow::Cow;
///
/// #[data_error]
/// pub enum LoadError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io {
///         #[source]
///         source: std::io::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(path: &Path) -> Result<String, LoadError> {
///     let text = std::fs::read_to_string(path).context("reading the document")?;
///     if text.is_empty() {
///         return Err("empty document".into());
///     }
///     Ok(text)
/// }
/// ```
#[proc_macro_attribute]
pub fn data_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
