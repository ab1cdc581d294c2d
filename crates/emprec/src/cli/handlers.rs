//! Command handlers.
//!
//! Each subcommand maps onto one record store operation. Results go to the
//! console's `out` stream and user-facing warnings to its `err` stream, so
//! the binary can pass stdout/stderr and tests can pass buffers.

use std::io::{self, Stderr, Stdout, Write};

use tracing::{debug, warn};

use super::commands::{
    AddCommand, ConfigCommand, DeleteCommand, ListCommand, OutputFormat, SearchCommand,
    SearchField, SortCommand, UpdateCommand,
};
use super::Command;
use crate::config::Config;
use crate::employee::Employee;
use crate::error::{Error, Result};
use crate::report;
use crate::storage::{RecordStore, SortKey};

/// Output streams for command results and warnings.
#[derive(Debug)]
pub struct Console<O, E> {
    /// Where results are written.
    pub out: O,
    /// Where warnings are written.
    pub err: E,
}

impl Console<Stdout, Stderr> {
    /// A console writing to the process's stdout and stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

impl<O: Write, E: Write> Console<O, E> {
    fn warning(&mut self, message: &str) -> Result<()> {
        writeln!(self.err, "warning: {message}")?;
        Ok(())
    }
}

/// Run `command` against `store`.
///
/// Warnings such as a missing id or an unconfirmed delete are written to
/// the console and are not errors.
///
/// # Errors
///
/// Returns an error if the data file or an export file cannot be written,
/// or if writing to the console fails.
pub fn run<O: Write, E: Write>(
    command: Command,
    store: &RecordStore,
    config: &Config,
    console: &mut Console<O, E>,
) -> Result<()> {
    match command {
        Command::Add(cmd) => handle_add(store, cmd, console),
        Command::List(cmd) => handle_list(store, &cmd, console),
        Command::Search(cmd) => handle_search(store, &cmd, console),
        Command::Sort(cmd) => handle_sort(store, &cmd, console),
        Command::Update(cmd) => handle_update(store, &cmd, console),
        Command::Delete(cmd) => handle_delete(store, &cmd, console),
        Command::Stats => handle_stats(store, config, console),
        Command::NextId => {
            writeln!(console.out, "{}", store.next_id())?;
            Ok(())
        }
        Command::Departments => {
            for department in store.distinct_departments() {
                writeln!(console.out, "{department}")?;
            }
            Ok(())
        }
        Command::Modes => {
            for mode in store.distinct_modes() {
                writeln!(console.out, "{mode}")?;
            }
            Ok(())
        }
        Command::Config(cmd) => handle_config(config, store, cmd, console),
    }
}

fn render(records: &[Employee], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(report::render_table(records)),
        OutputFormat::Json => report::render_json(records).map(|mut s| {
            s.push('\n');
            s
        }),
        OutputFormat::Csv => Ok(report::render_csv(records)),
    }
}

fn handle_add<O: Write, E: Write>(
    store: &RecordStore,
    cmd: AddCommand,
    console: &mut Console<O, E>,
) -> Result<()> {
    let id = cmd.id.unwrap_or_else(|| store.next_id());
    let employee = Employee::new(id, cmd.name)
        .with_department(cmd.department)
        .with_role(cmd.role)
        .with_salary(cmd.salary)
        .with_work_type(cmd.work_type.into())
        .with_mode(cmd.mode.into());

    if let Err(e) = employee.validate() {
        return console.warning(&format!("{e}; employee ID and name are required"));
    }

    if !store.find_by_id(&employee.id).is_empty() {
        warn!("Employee id {} is already in use; adding a duplicate", employee.id);
    }

    let (id, name) = (employee.id.clone(), employee.name.clone());
    store.add(employee)?;
    writeln!(console.out, "Employee {name} added with id {id}.")?;
    Ok(())
}

fn handle_list<O: Write, E: Write>(
    store: &RecordStore,
    cmd: &ListCommand,
    console: &mut Console<O, E>,
) -> Result<()> {
    let records = store.filter(&cmd.filter());
    if records.is_empty() {
        writeln!(console.out, "No employees found.")?;
        return Ok(());
    }

    let output = render(&records, cmd.format)?;
    match &cmd.output {
        Some(path) => {
            std::fs::write(path, output).map_err(|source| Error::ExportWrite {
                path: path.clone(),
                source,
            })?;
            writeln!(
                console.out,
                "Wrote {} employee(s) to {}",
                records.len(),
                path.display()
            )?;
        }
        None => write!(console.out, "{output}")?,
    }
    Ok(())
}

fn handle_search<O: Write, E: Write>(
    store: &RecordStore,
    cmd: &SearchCommand,
    console: &mut Console<O, E>,
) -> Result<()> {
    let results = match cmd.by {
        SearchField::Id => store.find_by_id(&cmd.query),
        SearchField::Name => store.find_by_name(&cmd.query),
    };

    if results.is_empty() {
        return console.warning("no employee found");
    }

    if cmd.format == OutputFormat::Table {
        writeln!(console.out, "Found {} result(s)", results.len())?;
    }
    write!(console.out, "{}", render(&results, cmd.format)?)?;
    Ok(())
}

fn handle_sort<O: Write, E: Write>(
    store: &RecordStore,
    cmd: &SortCommand,
    console: &mut Console<O, E>,
) -> Result<()> {
    let key = SortKey::from(cmd.key);
    debug!("Sorting by {}", key);
    write!(console.out, "{}", render(&store.sort_by(key), cmd.format)?)?;
    Ok(())
}

fn handle_update<O: Write, E: Write>(
    store: &RecordStore,
    cmd: &UpdateCommand,
    console: &mut Console<O, E>,
) -> Result<()> {
    let patch = cmd.patch();
    if patch.is_empty() {
        return console.warning("no fields to update were given");
    }

    if store.update(&cmd.id, &patch)? {
        writeln!(console.out, "Employee {} updated.", cmd.id)?;
        Ok(())
    } else {
        console.warning(&format!("employee {} not found", cmd.id))
    }
}

fn handle_delete<O: Write, E: Write>(
    store: &RecordStore,
    cmd: &DeleteCommand,
    console: &mut Console<O, E>,
) -> Result<()> {
    if !cmd.yes {
        writeln!(
            console.out,
            "This will delete every employee with id {}.",
            cmd.id
        )?;
        writeln!(console.out, "Use --yes to confirm.")?;
        return Ok(());
    }

    if store.delete(&cmd.id)? {
        writeln!(console.out, "Employee {} deleted.", cmd.id)?;
        Ok(())
    } else {
        console.warning(&format!("employee {} not found", cmd.id))
    }
}

fn handle_stats<O: Write, E: Write>(
    store: &RecordStore,
    config: &Config,
    console: &mut Console<O, E>,
) -> Result<()> {
    let stats = store.stats();
    if stats.total_employees == 0 {
        writeln!(console.out, "No data available.")?;
        return Ok(());
    }

    let out = &mut console.out;
    writeln!(out, "Employees per Department")?;
    writeln!(out, "------------------------")?;
    write!(
        out,
        "{}",
        report::render_bar_chart(&stats.by_department, config.display.chart_width)
    )?;
    writeln!(out)?;
    writeln!(out, "Total employees: {}", stats.total_employees)?;
    writeln!(
        out,
        "Data file:       {} ({} bytes)",
        store.path().display(),
        stats.data_file_bytes
    )?;
    Ok(())
}

fn handle_config<O: Write, E: Write>(
    config: &Config,
    store: &RecordStore,
    cmd: ConfigCommand,
    console: &mut Console<O, E>,
) -> Result<()> {
    let out = &mut console.out;
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
            } else {
                writeln!(out, "Current Configuration")?;
                writeln!(out, "=====================")?;
                writeln!(out)?;
                writeln!(out, "[Store]")?;
                writeln!(out, "  Data file:          {}", store.path().display())?;
                writeln!(out, "  Indent:             {}", config.store.indent)?;
                writeln!(out)?;
                writeln!(out, "[Ids]")?;
                writeln!(out, "  Prefix:             {}", config.ids.prefix)?;
                writeln!(out, "  Width:              {}", config.ids.width)?;
                writeln!(out)?;
                writeln!(out, "[Display]")?;
                writeln!(out, "  Chart width:        {}", config.display.chart_width)?;
            }
        }
        ConfigCommand::Path => {
            writeln!(out, "{}", Config::default_config_path().display())?;
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            writeln!(out, "Validating configuration: {}", path.display())?;
            match Config::load_from(Some(path)) {
                Ok(_) => writeln!(out, "Configuration is valid.")?,
                Err(e) => writeln!(out, "Configuration error: {e}")?,
            }
        }
    }
    Ok(())
}
