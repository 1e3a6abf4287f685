//! Loading and printing documents as trees.

use anyhow::{Context, Result, bail};
use databind::TreeNode;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Picks the format from the file extension.
    ///
    /// # Errors
    /// Unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => bail!("unsupported document format: {} (expected .json or .toml)", path.display()),
        }
    }
}

/// Reads `path` into a tree.
///
/// # Errors
/// I/O failures and syntax errors, with the path attached.
pub fn load(path: &Path) -> Result<(TreeNode, Format)> {
    let format = Format::from_path(path)?;
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let node = match format {
        Format::Json => serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?,
        Format::Toml => toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?,
    };
    Ok((node, format))
}

/// Prints `node` in `format`.
///
/// # Errors
/// TOML cannot hold a top-level scalar or null values.
pub fn render(node: &TreeNode, format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(node)?,
        Format::Toml => toml::to_string(node)?,
    })
}
