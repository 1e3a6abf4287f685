#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod document;

use crate::cli::{Cli, Command};
use anyhow::Result;
use clap::Parser;
use databind::HelpDirectory;
use databind::domain::config::{DataBindConfig, LoggingConfig};
use databind::kernel::config::load_config;
use databind_logger::{FileOutput, LevelFilter, Logger, parse_level};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: DataBindConfig = load_config(cli.config.as_deref())?;
    let _logger = init_logger(&config.logging, cli.verbose)?;

    let registry = catalog::registry(HelpDirectory::from_config(&config.help))?;

    match cli.command {
        Command::List {} => commands::list(&registry)?,
        Command::Describe { model } => commands::describe(&registry, &model)?,
        Command::Check { model, file } => commands::check(&registry, &config.binding, &model, &file)?,
        Command::Normalize { model, file } => commands::normalize(&registry, &config.binding, &model, &file)?,
    }

    Ok(())
}

fn init_logger(config: &LoggingConfig, verbose: bool) -> Result<Logger> {
    let level = if verbose { LevelFilter::DEBUG } else { parse_level(&config.level)? };
    let mut builder = Logger::builder(env!("CARGO_BIN_NAME")).json(config.json).level(level);
    if let Some(dir) = &config.dir {
        builder = builder.file(FileOutput::new(dir));
    }
    Ok(builder.init()?)
}
