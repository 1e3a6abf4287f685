//! # CLI Argument Definitions
//!
//! Subcommands inspect the built-in model catalog and bind documents against it.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "databind")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Describe data models and bind JSON/TOML documents to them")]
pub struct Cli {
    /// Configuration file (TOML, JSON, ...). Defaults to an optional `databind.*` in the working directory.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of the configured level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every model in the catalog
    List {},
    /// Show a model's parameters and help
    Describe {
        /// Simple or display name of the model (e.g. `Pipeline` or `Git`)
        model: String,
    },
    /// Check that a document binds to a model
    Check {
        model: String,
        /// `.json` or `.toml` document
        file: PathBuf,
    },
    /// Bind a document to a model and print it back in canonical form
    Normalize {
        model: String,
        file: PathBuf,
    },
}
