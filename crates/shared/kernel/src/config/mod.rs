use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Custom error type for config loading.
#[databind_derive::data_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// File stem tried when no explicit path is given (`databind.toml`, `databind.json`, ...).
pub const DEFAULT_CONFIG_STEM: &str = "databind";

/// Layered configuration loader: a file, then environment overrides.
///
/// 1. **Base File**: `path` when given (must exist); otherwise the optional `databind` file
///    in the current working directory, in any format the `config` crate recognizes.
/// 2. **Environment Overrides**: variables prefixed with `DATABIND__`. Nested keys use double
///    underscores, e.g. `DATABIND__BINDING__UNKNOWN_PARAMETERS=warn` maps to `binding.unknown_parameters`.
///
/// # Errors
/// This function will return an error if:
/// * An explicitly given file cannot be found or parsed.
/// * The merged values do not match the structure of `T`.
///
/// # Example
/// ```rust
/// use databind_kernel::config::load_config;
/// use databind_kernel::domain::config::DataBindConfig;
///
/// let cfg: DataBindConfig = load_config(None::<&str>).unwrap_or_default();
/// assert_eq!(cfg.help.locale, "en");
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match &path {
        Some(p) => {
            info!("Loading config from {}", p.as_ref().display());
            File::from(p.as_ref()).required(true)
        },
        None => File::with_name(DEFAULT_CONFIG_STEM).required(false),
    };

    let builder = Config::builder().add_source(file).add_source(
        Environment::with_prefix("DATABIND")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
