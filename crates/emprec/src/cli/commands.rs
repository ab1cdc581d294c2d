//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::employee::{EmployeePatch, RecordFilter, Salary, WorkMode, WorkType};
use crate::storage::SortKey;

/// Parse a salary flag, keeping the message for clap's error output.
fn parse_salary(s: &str) -> Result<Salary, String> {
    s.parse::<Salary>().map_err(|e| e.to_string())
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Employee id (generated from the next free sequence number if omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Full name
    #[arg(short, long)]
    pub name: String,

    /// Department
    #[arg(short, long, default_value = "")]
    pub department: String,

    /// Role
    #[arg(short, long, default_value = "")]
    pub role: String,

    /// Salary (non-negative)
    #[arg(short, long, default_value = "0", value_parser = parse_salary)]
    pub salary: Salary,

    /// Work type
    #[arg(short = 't', long = "type", value_enum, default_value = "intern")]
    pub work_type: WorkTypeArg,

    /// Work mode
    #[arg(short, long, value_enum, default_value = "remote")]
    pub mode: WorkModeArg,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show employees in this department
    #[arg(short, long)]
    pub department: Option<String>,

    /// Only show employees with this work mode
    #[arg(short, long, value_enum)]
    pub mode: Option<WorkModeArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Write the output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ListCommand {
    /// The record filter described by the flags.
    #[must_use]
    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            department: self.department.clone(),
            mode: self.mode.map(WorkMode::from),
        }
    }
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// The search query
    pub query: String,

    /// Field to search
    #[arg(short, long, value_enum, default_value = "id")]
    pub by: SearchField,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Sort command arguments.
#[derive(Debug, Args)]
pub struct SortCommand {
    /// Field to sort by
    #[arg(value_enum, default_value = "id")]
    pub key: SortKeyArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Update command arguments.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Id of the employee to update
    pub id: String,

    /// New full name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New department
    #[arg(short, long)]
    pub department: Option<String>,

    /// New role
    #[arg(short, long)]
    pub role: Option<String>,

    /// New salary
    #[arg(short, long, value_parser = parse_salary)]
    pub salary: Option<Salary>,

    /// New work type
    #[arg(short = 't', long = "type", value_enum)]
    pub work_type: Option<WorkTypeArg>,

    /// New work mode
    #[arg(short, long, value_enum)]
    pub mode: Option<WorkModeArg>,
}

impl UpdateCommand {
    /// The field changes described by the flags.
    #[must_use]
    pub fn patch(&self) -> EmployeePatch {
        EmployeePatch {
            name: self.name.clone(),
            department: self.department.clone(),
            role: self.role.clone(),
            salary: self.salary.clone(),
            work_type: self.work_type.map(WorkType::from),
            mode: self.mode.map(WorkMode::from),
        }
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the employee(s) to delete
    pub id: String,

    /// Confirm the deletion
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Work type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WorkTypeArg {
    /// Intern
    Intern,
    /// Full time
    FullTime,
}

impl From<WorkTypeArg> for WorkType {
    fn from(arg: WorkTypeArg) -> Self {
        match arg {
            WorkTypeArg::Intern => Self::Intern,
            WorkTypeArg::FullTime => Self::FullTime,
        }
    }
}

/// Work mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WorkModeArg {
    /// Remote
    Remote,
    /// Office
    Office,
    /// Hybrid
    Hybrid,
}

impl From<WorkModeArg> for WorkMode {
    fn from(arg: WorkModeArg) -> Self {
        match arg {
            WorkModeArg::Remote => Self::Remote,
            WorkModeArg::Office => Self::Office,
            WorkModeArg::Hybrid => Self::Hybrid,
        }
    }
}

/// Sort key argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKeyArg {
    /// Employee id
    Id,
    /// Full name
    Name,
    /// Department
    Department,
    /// Role
    Role,
    /// Salary (compared as text)
    Salary,
    /// Work type
    Type,
    /// Work mode
    Mode,
}

impl From<SortKeyArg> for SortKey {
    fn from(arg: SortKeyArg) -> Self {
        match arg {
            SortKeyArg::Id => Self::Id,
            SortKeyArg::Name => Self::Name,
            SortKeyArg::Department => Self::Department,
            SortKeyArg::Role => Self::Role,
            SortKeyArg::Salary => Self::Salary,
            SortKeyArg::Type => Self::Type,
            SortKeyArg::Mode => Self::Mode,
        }
    }
}

/// Field a search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SearchField {
    /// Exact id match
    #[default]
    Id,
    /// Case-insensitive substring of the name
    Name,
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table
    #[default]
    Table,
    /// JSON output
    Json,
    /// Comma-separated values
    Csv,
}
