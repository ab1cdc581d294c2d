//! Storage layer for emprec.
//!
//! Records live in a single JSON file holding one array. Every operation
//! reads the whole file, and every mutation rewrites it. There is no index
//! and no locking: two processes mutating the same file concurrently can
//! lose one side's change.

pub mod ids;
pub mod sort;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, warn};

use crate::config::Config;
use crate::employee::{Employee, EmployeePatch, RecordFilter};
use crate::error::{Error, Result};

pub use ids::IdScheme;
pub use sort::SortKey;

/// Default JSON indentation, in spaces.
const DEFAULT_INDENT: usize = 4;

/// JSON-file-backed employee record store.
///
/// Provides:
/// - Whole-file load and save
/// - Lookup by id and name
/// - Sorting, filtering and distinct-value listings
/// - Sequential id generation
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Path to the data file.
    path: PathBuf,
    /// Spaces per indentation level when writing.
    indent: usize,
    /// Shape of generated ids.
    ids: IdScheme,
}

impl RecordStore {
    /// Create a store backed by the file at `path`.
    ///
    /// Nothing is read or created until the first operation.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            indent: DEFAULT_INDENT,
            ids: IdScheme::default(),
        }
    }

    /// Create a store from configuration, optionally overriding the data file.
    #[must_use]
    pub fn from_config(config: &Config, data_file: Option<PathBuf>) -> Self {
        let path = data_file.unwrap_or_else(|| config.data_file());
        Self::open(path)
            .with_indent(config.store.indent)
            .with_id_scheme(IdScheme::from(&config.ids))
    }

    /// Set the indentation used when writing the file.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Set the id scheme used by [`RecordStore::next_id`].
    #[must_use]
    pub fn with_id_scheme(mut self, ids: IdScheme) -> Self {
        self.ids = ids;
        self
    }

    /// Get the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record from the data file.
    ///
    /// A missing, unreadable or malformed file yields an empty list. The
    /// problem is logged but not reported to the caller.
    #[must_use]
    pub fn load(&self) -> Vec<Employee> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No data file at {}, starting empty", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("Could not read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Employee>>(&text) {
            Ok(records) => {
                debug!("Loaded {} records from {}", records.len(), self.path.display());
                records
            }
            Err(e) => {
                warn!("Ignoring malformed data file {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Overwrite the data file with `records`.
    ///
    /// The parent directory is created if needed. The new content is
    /// written to a temporary sibling and renamed over the target.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file system step fails.
    pub fn save(&self, records: &[Employee]) -> Result<()> {
        let indent = " ".repeat(self.indent);
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut ser)?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(|source| Error::DirectoryCreate {
                path: parent.clone(),
                source,
            })?;
        }

        let file_name = self
            .path
            .file_name()
            .map_or_else(|| "data".into(), |n| n.to_string_lossy());
        let tmp = parent.join(format!(".{file_name}.tmp.{}", std::process::id()));

        let written = fs::File::create(&tmp).and_then(|mut file| {
            file.write_all(&buf)?;
            file.sync_all()
        });
        if let Err(source) = written.and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(Error::StoreWrite {
                path: self.path.clone(),
                source,
            });
        }

        debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Append a record. Duplicate ids are not checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be written.
    pub fn add(&self, employee: Employee) -> Result<()> {
        let mut records = self.load();
        debug!("Adding employee {}", employee.id);
        records.push(employee);
        self.save(&records)
    }

    /// Every record, in stored order.
    #[must_use]
    pub fn get_all(&self) -> Vec<Employee> {
        self.load()
    }

    /// All records whose id equals `id` exactly.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Vec<Employee> {
        self.load().into_iter().filter(|e| e.id == id).collect()
    }

    /// All records whose name contains `query`, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, query: &str) -> Vec<Employee> {
        let needle = query.to_lowercase();
        self.load()
            .into_iter()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// All records ordered by `key`. See [`SortKey`] for comparison rules.
    #[must_use]
    pub fn sort_by(&self, key: SortKey) -> Vec<Employee> {
        let mut records = self.load();
        key.sort(&mut records);
        records
    }

    /// All records matching `filter`, in stored order.
    #[must_use]
    pub fn filter(&self, filter: &RecordFilter) -> Vec<Employee> {
        self.load()
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect()
    }

    /// Merge `patch` into the first record whose id equals `id`.
    ///
    /// Returns `true` if a record was updated, `false` if not found. The
    /// file is only rewritten when a record matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be written.
    pub fn update(&self, id: &str, patch: &EmployeePatch) -> Result<bool> {
        let mut records = self.load();
        let Some(employee) = records.iter_mut().find(|e| e.id == id) else {
            debug!("No employee with id {} to update", id);
            return Ok(false);
        };
        patch.apply(employee);
        self.save(&records)?;
        debug!("Updated employee {}", id);
        Ok(true)
    }

    /// Remove every record whose id equals `id`.
    ///
    /// Returns `true` if at least one record was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be written.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.load();
        let before = records.len();
        records.retain(|e| e.id != id);
        self.save(&records)?;

        let removed = before - records.len();
        if removed > 0 {
            debug!("Deleted {} record(s) with id {}", removed, id);
        }
        Ok(removed > 0)
    }

    /// The id an auto-numbered new record should get.
    #[must_use]
    pub fn next_id(&self) -> String {
        let records = self.load();
        self.ids.next(records.iter().map(|e| e.id.as_str()))
    }

    /// Sorted, de-duplicated non-empty departments.
    #[must_use]
    pub fn distinct_departments(&self) -> Vec<String> {
        self.load()
            .into_iter()
            .filter_map(|e| e.department)
            .filter(|d| !d.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted, de-duplicated work modes in use.
    #[must_use]
    pub fn distinct_modes(&self) -> Vec<String> {
        self.load()
            .iter()
            .map(|e| e.field_text("mode"))
            .filter(|m| !m.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Record counts and file size.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let records = self.load();

        let mut by_department = BTreeMap::new();
        for employee in &records {
            *by_department
                .entry(employee.field_text("department"))
                .or_insert(0) += 1;
        }

        let data_file_bytes = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);

        StoreStats {
            total_employees: records.len(),
            by_department,
            data_file_bytes,
        }
    }
}

/// Statistics about the stored records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Total number of records.
    pub total_employees: usize,
    /// Record count per department; records without one are counted under
    /// the empty string.
    pub by_department: BTreeMap<String, usize>,
    /// Size of the data file in bytes.
    pub data_file_bytes: u64,
}
