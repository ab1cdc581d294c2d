//! Command-line interface for emprec.
//!
//! This module provides the CLI structure for the `emprec` binary and the
//! handlers that run each command.

mod commands;
mod handlers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, ListCommand, OutputFormat, SearchCommand,
    SearchField, SortCommand, SortKeyArg, UpdateCommand, WorkModeArg, WorkTypeArg,
};
pub use handlers::{run, Console};

/// emprec - Keep a simple list of employee records
///
/// Records are stored as a JSON array in a single file. Every command reads
/// the whole file and every change rewrites it.
#[derive(Debug, Parser)]
#[command(name = "emprec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the employee data file (overrides configuration)
    #[arg(short = 'D', long = "data", global = true, value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new employee
    Add(AddCommand),

    /// List employees, optionally filtered
    List(ListCommand),

    /// Search employees by id or name
    Search(SearchCommand),

    /// List employees sorted by a field
    Sort(SortCommand),

    /// Change fields of an existing employee
    Update(UpdateCommand),

    /// Delete employees by id
    Delete(DeleteCommand),

    /// Show a chart of employees per department
    Stats,

    /// Print the id the next added employee would get
    NextId,

    /// List the departments in use
    Departments,

    /// List the work modes in use
    Modes,

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
