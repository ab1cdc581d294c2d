//! Sort keys for record listings.

use std::fmt;

use crate::employee::Employee;

/// A field records can be ordered by.
///
/// Every key compares the lowercased text of the field, so salaries sort
/// lexicographically (`"10"` before `"200"` before `"30"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Employee id.
    Id,
    /// Full name.
    Name,
    /// Department.
    Department,
    /// Role.
    Role,
    /// Salary, compared as text.
    Salary,
    /// Employment type.
    Type,
    /// Work mode.
    Mode,
}

impl SortKey {
    /// The stored key of the field this sorts by.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Department => "department",
            Self::Role => "role",
            Self::Salary => "salary",
            Self::Type => "type",
            Self::Mode => "mode",
        }
    }

    /// The lowercased comparison text for `employee`; missing fields yield
    /// an empty string.
    #[must_use]
    pub fn key_of(self, employee: &Employee) -> String {
        employee.field_text(self.field()).to_lowercase()
    }

    /// Sort `records` in place, ascending and stable.
    pub fn sort(self, records: &mut [Employee]) {
        records.sort_by_cached_key(|e| self.key_of(e));
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}
