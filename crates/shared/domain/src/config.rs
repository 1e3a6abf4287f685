use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level data binding configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataBindConfigInner {
    pub help: HelpConfig,
    pub binding: BindingConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into registries and contexts.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct DataBindConfig {
    #[serde(flatten, default)]
    inner: Arc<DataBindConfigInner>,
}

impl Deref for DataBindConfig {
    type Target = DataBindConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for DataBindConfig {
    fn deref_mut(&mut self) -> &mut DataBindConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where help pages are looked up and in which locale.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HelpConfig {
    /// Root directory holding `<TypeName>/help*.html` pages. Doc-comment help only when unset.
    pub dir: Option<PathBuf>,
    pub locale: String,
}

/// Policy applied when an input mapping carries keys that match no parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownParameters {
    /// Fail the read.
    #[default]
    Reject,
    /// Record a warning on the context and continue.
    Warn,
    /// Drop the keys silently.
    Ignore,
}

/// Read/write behavior of reflective models.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    pub unknown_parameters: UnknownParameters,
    /// Accept a bare value for a model with exactly one mandatory parameter.
    pub single_parameter_shorthand: bool,
}

/// Log output of the command-line tools.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for HelpConfig {
    fn default() -> Self {
        Self { dir: None, locale: "en".to_owned() }
    }
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self { unknown_parameters: UnknownParameters::Reject, single_parameter_shorthand: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_owned(), dir: None, json: false }
    }
}
