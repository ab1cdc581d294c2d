//! `emprec` - A single-user employee record manager
//!
//! This library provides a record store that keeps employee records as one
//! JSON array in a single file, along with id generation, searching,
//! sorting and text reports over those records.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod employee;
pub mod error;
pub mod logging;
pub mod report;
pub mod storage;

pub use config::Config;
pub use employee::{Employee, EmployeePatch, RecordFilter, Salary, WorkMode, WorkType};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use storage::{IdScheme, RecordStore, SortKey, StoreStats};
