//! `emprec` - CLI for the employee record store
//!
//! This binary parses arguments, sets up logging and configuration, and
//! hands the command to [`emprec::cli::run`].

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use emprec::cli::{run, Cli, Console};
use emprec::{init_logging, Config, RecordStore};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    let store = RecordStore::from_config(&config, cli.data_file.clone());
    debug!("Using data file {}", store.path().display());

    run(cli.command, &store, &config, &mut Console::stdio())?;
    Ok(())
}
