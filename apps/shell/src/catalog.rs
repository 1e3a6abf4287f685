//! Sample models of a build pipeline, registered under their simple and display names.

#![allow(deprecated)]

use databind::prelude::*;
use databind::HelpDirectory;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Checks out a Git repository.
///
/// The branch defaults to the remote's default branch.
#[data_model(crate = "databind::kernel", display_name = "Git")]
#[derive(Debug)]
pub struct GitScm {
    /// Remote URL, e.g. `https://example.com/repo.git`.
    url: String,
    branch: Option<String>,
    credentials_id: Option<String>,
    /// Fetch only the tip commit.
    #[data(default)]
    shallow: bool,
}

/// Checks out a Subversion working copy.
#[data_model(crate = "databind::kernel", deprecated)]
#[derive(Debug)]
pub struct Subversion {
    remote: String,
}

/// Runs a shell script.
#[data_model(crate = "databind::kernel")]
#[derive(Debug, PartialEq)]
pub struct Shell {
    script: String,
    /// Record the exit code instead of failing the step.
    #[data(rename = "returnStatus", default)]
    return_status: bool,
}

/// A named group of steps. Stages may nest.
#[data_model(crate = "databind::kernel", display_name = "Pipeline Stage")]
#[derive(Debug, PartialEq)]
pub struct Stage {
    name: String,
    #[data(default)]
    steps: Vec<Shell>,
    #[data(default)]
    stages: Vec<Self>,
    /// Branch pattern the stage is limited to.
    when: Option<String>,
}

/// A declarative pipeline.
#[data_model(crate = "databind::kernel")]
#[derive(Debug)]
pub struct Pipeline {
    /// Label expression selecting the build agent.
    agent: String,
    scm: Option<GitScm>,
    stages: Vec<Stage>,
    #[data(default)]
    environment: BTreeMap<String, String>,
    #[data(default)]
    retries: u8,
    #[deprecated]
    node: Option<String>,
}

/// Registers every catalog model, consulting `help` before doc comments.
///
/// # Errors
/// Fails when a model declares an invalid parameter set.
pub fn registry(help: Option<HelpDirectory>) -> Result<ModelRegistry, DataError> {
    let mut registry = ModelRegistry::new();
    if let Some(help) = help {
        registry = registry.with_help_source(Arc::new(help));
    }
    registry.register::<GitScm>()?;
    registry.register::<Subversion>()?;
    registry.register::<Shell>()?;
    registry.register::<Stage>()?;
    registry.register::<Pipeline>()?;
    Ok(registry)
}
