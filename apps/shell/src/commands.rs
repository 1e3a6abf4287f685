//! Subcommand handlers. Results go to stdout; logs go to stderr.

use crate::document::{self, Format};
use anyhow::{Context, Result};
use databind::prelude::*;
use databind::domain::config::BindingConfig;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Prints one line per model: display name, then the rendered parameter tree.
///
/// # Errors
/// Fails when a nested model cannot be built.
pub fn list(registry: &ModelRegistry) -> Result<()> {
    let schemas = registry.schemas();
    if schemas.is_empty() {
        println!("No models registered.");
        return Ok(());
    }

    let width = schemas.iter().map(|schema| schema.display_name().chars().count()).max().unwrap_or(0);
    for schema in schemas {
        let marker = if schema.is_deprecated() { " (deprecated)" } else { "" };
        println!("{:<width$}  {}{marker}", schema.display_name(), schema.describe()?);
    }
    Ok(())
}

/// Prints a model's rendering, help and per-parameter details.
///
/// # Errors
/// Unknown model names and help loading failures.
pub fn describe(registry: &ModelRegistry, name: &str) -> Result<()> {
    let schema = find(registry, name)?;

    println!("{}", schema.describe()?);
    println!("Display name: {}", schema.display_name());
    if schema.is_deprecated() {
        println!("Deprecated: yes");
    }
    if let Some(help) = schema.help()? {
        println!("Help: {help}");
    }

    println!("Parameters:");
    for parameter in schema.parameters() {
        let mut line = format!("  {}: {}", parameter.name(), parameter.parameter_type());
        if !parameter.is_mandatory() {
            line.push_str(" (optional)");
        }
        if parameter.is_deprecated() {
            line.push_str(" (deprecated)");
        }
        if let Some(help) = schema.parameter_help(parameter.name())? {
            line.push_str(" - ");
            line.push_str(&help);
        }
        println!("{line}");
    }
    Ok(())
}

/// Binds `file` to the model and reports the warnings collected on the way.
///
/// # Errors
/// Unknown model names, unreadable documents and binding failures.
pub fn check(registry: &ModelRegistry, binding: &BindingConfig, name: &str, file: &Path) -> Result<()> {
    let schema = find(registry, name)?;
    let (node, _) = document::load(file)?;

    let mut context = DataContext::from_config(binding);
    registry
        .read_erased(name, &node, &mut context)
        .with_context(|| format!("{} does not bind to {}", file.display(), schema.display_name()))?;

    let warnings = context.take_warnings();
    debug!(file = %file.display(), warnings = warnings.len(), "document checked");
    println!("{}: OK ({})", file.display(), schema.display_name());
    for warning in warnings {
        println!("  warning: {warning}");
    }
    Ok(())
}

/// Reads `file` through the model and prints the written form in the same format.
///
/// # Errors
/// Unknown model names, unreadable documents, binding failures and unrepresentable output.
pub fn normalize(registry: &ModelRegistry, binding: &BindingConfig, name: &str, file: &Path) -> Result<()> {
    find(registry, name)?;
    let (node, format) = document::load(file)?;

    let mut context = DataContext::from_config(binding);
    let normalized = registry
        .normalize(name, &node, &mut context)
        .with_context(|| format!("normalizing {}", file.display()))?;

    let text = document::render(&normalized, format)?;
    match format {
        Format::Json => println!("{text}"),
        Format::Toml => print!("{text}"),
    }
    Ok(())
}

fn find(registry: &ModelRegistry, name: &str) -> Result<Arc<dyn ModelSchema>> {
    registry.lookup(name).with_context(|| format!("no model named '{name}'; run `databind list`"))
}
