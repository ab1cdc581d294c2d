//! Employee record types.
//!
//! An [`Employee`] is the only entity emprec stores. The on-disk shape is a
//! plain JSON object. Decoding never rejects an object: unknown keys, and
//! known keys whose value does not fit the field, are carried along in
//! [`Employee::extra`] so that hand-edited files survive a load/save cycle.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// Employment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkType {
    /// Intern.
    Intern,
    /// Full-time employee.
    #[serde(rename = "Full Time")]
    FullTime,
}

impl WorkType {
    /// The label used on disk and in tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Intern => "Intern",
            Self::FullTime => "Full Time",
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where an employee works from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkMode {
    /// Works remotely.
    Remote,
    /// Works from the office.
    Office,
    /// Splits time between remote and office.
    Hybrid,
}

impl WorkMode {
    /// The label used on disk and in tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Office => "Office",
            Self::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A salary amount.
///
/// Stored as a JSON number so integers stay integers on disk. When reading,
/// numeric strings such as `"200"` are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Salary(Number);

impl Salary {
    /// A zero salary.
    #[must_use]
    pub fn zero() -> Self {
        Self(Number::from(0u64))
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.as_f64().is_some_and(|v| v < 0.0)
    }
}

impl From<u64> for Salary {
    fn from(amount: u64) -> Self {
        Self(Number::from(amount))
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Salary {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let number: Number = serde_json::from_str(trimmed)
            .map_err(|_| Error::invalid_salary(s, "not a number"))?;
        let salary = Self(number);
        if salary.is_negative() {
            return Err(Error::invalid_salary(s, "must not be negative"));
        }
        Ok(salary)
    }
}

impl<'de> Deserialize<'de> for Salary {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(Number),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => serde_json::from_str::<Number>(s.trim())
                .map(Self)
                .map_err(|_| serde::de::Error::custom(format!("invalid salary '{s}'"))),
        }
    }
}

/// A single employee record.
///
/// A known field that is missing from the stored object, or whose stored
/// value does not fit its type, decodes as empty. In the second case the
/// stored value is kept in [`Employee::extra`] under the field's key and
/// written back unchanged until the field is set again.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    /// Employee id, e.g. `EMP001`. Not guaranteed unique.
    pub id: String,

    /// Full name.
    pub name: String,

    /// Department, free text.
    pub department: Option<String>,

    /// Role, free text.
    pub role: Option<String>,

    /// Salary amount.
    pub salary: Option<Salary>,

    /// Employment type, stored under the `type` key.
    pub work_type: Option<WorkType>,

    /// Work mode.
    pub mode: Option<WorkMode>,

    /// Stored values this version does not interpret, kept as-is.
    pub extra: Map<String, Value>,
}

/// Remove `key` from `fields` and decode it, putting the value back if it
/// does not fit `T`.
fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.remove(key)?;
    match T::deserialize(&value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            debug!("Keeping unreadable '{key}' value {value} as-is: {e}");
            fields.insert(key.to_string(), value);
            None
        }
    }
}

/// Display text of a stored value: strings bare, everything else as JSON.
fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for Employee {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            id: take_field(&mut fields, "id").unwrap_or_default(),
            name: take_field(&mut fields, "name").unwrap_or_default(),
            department: take_field(&mut fields, "department"),
            role: take_field(&mut fields, "role"),
            salary: take_field(&mut fields, "salary"),
            work_type: take_field(&mut fields, "type"),
            mode: take_field(&mut fields, "mode"),
            extra: fields,
        })
    }
}

impl Serialize for Employee {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let kept = |key: &str| self.extra.contains_key(key);
        let mut map = serializer.serialize_map(None)?;

        if !(self.id.is_empty() && kept("id")) {
            map.serialize_entry("id", &self.id)?;
        }
        if !(self.name.is_empty() && kept("name")) {
            map.serialize_entry("name", &self.name)?;
        }
        if let Some(department) = &self.department {
            map.serialize_entry("department", department)?;
        }
        if let Some(role) = &self.role {
            map.serialize_entry("role", role)?;
        }
        if let Some(salary) = &self.salary {
            map.serialize_entry("salary", salary)?;
        }
        if let Some(work_type) = &self.work_type {
            map.serialize_entry("type", work_type)?;
        }
        if let Some(mode) = &self.mode {
            map.serialize_entry("mode", mode)?;
        }

        for (key, value) in &self.extra {
            if !self.shadows(key) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl Employee {
    /// Create a record with only an id and a name set.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: None,
            role: None,
            salary: None,
            work_type: None,
            mode: None,
            extra: Map::new(),
        }
    }

    /// Set the department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Set the role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the salary.
    #[must_use]
    pub fn with_salary(mut self, salary: Salary) -> Self {
        self.salary = Some(salary);
        self
    }

    /// Set the employment type.
    #[must_use]
    pub fn with_work_type(mut self, work_type: WorkType) -> Self {
        self.work_type = Some(work_type);
        self
    }

    /// Set the work mode.
    #[must_use]
    pub fn with_mode(mut self, mode: WorkMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// The text shown for a column, by its stored key.
    ///
    /// Falls back to a value kept in [`Employee::extra`], so a record with,
    /// say, an unrecognised `mode` still shows and sorts by that label.
    /// Missing fields yield an empty string.
    #[must_use]
    pub fn field_text(&self, key: &str) -> String {
        let typed = match key {
            "id" => Some(self.id.clone()).filter(|s| !s.is_empty()),
            "name" => Some(self.name.clone()).filter(|s| !s.is_empty()),
            "department" => self.department.clone(),
            "role" => self.role.clone(),
            "salary" => self.salary.as_ref().map(ToString::to_string),
            "type" => self.work_type.map(|t| t.label().to_string()),
            "mode" => self.mode.map(|m| m.label().to_string()),
            _ => None,
        };
        typed
            .or_else(|| self.extra.get(key).map(raw_text))
            .unwrap_or_default()
    }

    /// Whether a set field takes the place of the kept value under `key`.
    fn shadows(&self, key: &str) -> bool {
        match key {
            "id" => !self.id.is_empty(),
            "name" => !self.name.is_empty(),
            "department" => self.department.is_some(),
            "role" => self.role.is_some(),
            "salary" => self.salary.is_some(),
            "type" => self.work_type.is_some(),
            "mode" => self.mode.is_some(),
            _ => false,
        }
    }

    /// Check the presence and range rules applied before a record is added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the id or name is empty or the
    /// salary is negative.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::validation("id", "employee id is required"));
        }
        if self.name.is_empty() {
            return Err(Error::validation("name", "employee name is required"));
        }
        if self.salary.as_ref().is_some_and(Salary::is_negative) {
            return Err(Error::validation("salary", "must not be negative"));
        }
        Ok(())
    }
}

/// A set of field replacements for an existing record.
///
/// Only fields that are `Some` are written; everything else on the target
/// record is left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    /// New name.
    pub name: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New role.
    pub role: Option<String>,
    /// New salary.
    pub salary: Option<Salary>,
    /// New employment type.
    pub work_type: Option<WorkType>,
    /// New work mode.
    pub mode: Option<WorkMode>,
}

impl EmployeePatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the set fields into `employee`.
    ///
    /// Setting a field drops any unreadable value kept under its key.
    pub fn apply(&self, employee: &mut Employee) {
        if let Some(name) = &self.name {
            employee.name.clone_from(name);
            employee.extra.remove("name");
        }
        if let Some(department) = &self.department {
            employee.department = Some(department.clone());
            employee.extra.remove("department");
        }
        if let Some(role) = &self.role {
            employee.role = Some(role.clone());
            employee.extra.remove("role");
        }
        if let Some(salary) = &self.salary {
            employee.salary = Some(salary.clone());
            employee.extra.remove("salary");
        }
        if let Some(work_type) = self.work_type {
            employee.work_type = Some(work_type);
            employee.extra.remove("type");
        }
        if let Some(mode) = self.mode {
            employee.mode = Some(mode);
            employee.extra.remove("mode");
        }
    }
}

/// Exact-match criteria for narrowing a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Keep only records in this department.
    pub department: Option<String>,
    /// Keep only records with this work mode.
    pub mode: Option<WorkMode>,
}

impl RecordFilter {
    /// Whether `employee` satisfies every criterion that is set.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        if let Some(department) = &self.department {
            if employee.department.as_ref() != Some(department) {
                return false;
            }
        }
        if let Some(mode) = self.mode {
            if employee.mode != Some(mode) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_type_labels() {
        assert_eq!(WorkType::Intern.to_string(), "Intern");
        assert_eq!(WorkType::FullTime.to_string(), "Full Time");
        assert_eq!(
            serde_json::to_string(&WorkType::FullTime).unwrap(),
            "\"Full Time\""
        );
    }

    #[test]
    fn test_work_mode_labels() {
        assert_eq!(WorkMode::Hybrid.to_string(), "Hybrid");
        let mode: WorkMode = serde_json::from_str("\"Office\"").unwrap();
        assert_eq!(mode, WorkMode::Office);
    }

    #[test]
    fn test_unknown_work_type_is_rejected() {
        assert!(serde_json::from_str::<WorkType>("\"Contractor\"").is_err());
    }

    #[test]
    fn test_salary_parse() {
        assert_eq!("50000".parse::<Salary>().unwrap().to_string(), "50000");
        assert_eq!(" 1250.5 ".parse::<Salary>().unwrap().to_string(), "1250.5");
        assert!("-1".parse::<Salary>().is_err());
        assert!("lots".parse::<Salary>().is_err());
    }

    #[test]
    fn test_salary_deserialize_from_string() {
        let salary: Salary = serde_json::from_str("\"200\"").unwrap();
        assert_eq!(salary, Salary::from(200_u64));
        assert!(serde_json::from_str::<Salary>("\"two hundred\"").is_err());
    }

    #[test]
    fn test_salary_keeps_integer_form() {
        let salary: Salary = serde_json::from_str("75000").unwrap();
        assert_eq!(serde_json::to_string(&salary).unwrap(), "75000");
    }

    #[test]
    fn test_employee_json_shape() {
        let employee = Employee::new("EMP001", "Anna")
            .with_department("Engineering")
            .with_role("Developer")
            .with_salary(Salary::from(90_000_u64))
            .with_work_type(WorkType::FullTime)
            .with_mode(WorkMode::Hybrid);

        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["id"], "EMP001");
        assert_eq!(value["type"], "Full Time");
        assert_eq!(value["mode"], "Hybrid");
        assert_eq!(value["salary"], 90_000);
    }

    #[test]
    fn test_employee_preserves_unknown_keys() {
        let json = r#"{"id":"EMP002","name":"Susan","badge":17}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.extra.get("badge"), Some(&Value::from(17)));

        let back = serde_json::to_value(&employee).unwrap();
        assert_eq!(back["badge"], 17);
    }

    #[test]
    fn test_employee_missing_name_decodes_empty() {
        let employee: Employee = serde_json::from_str(r#"{"id":"EMP003"}"#).unwrap();
        assert_eq!(employee.id, "EMP003");
        assert_eq!(employee.name, "");
        assert!(employee.extra.is_empty());
    }

    #[test]
    fn test_employee_non_object_is_rejected() {
        assert!(serde_json::from_str::<Employee>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Employee>("\"EMP001\"").is_err());
    }

    #[test]
    fn test_employee_keeps_unreadable_values() {
        let json = r#"{"id":"EMP002","name":"Bo","salary":"n/a","type":"Contractor","mode":"Remote","role":null}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();

        assert_eq!(employee.salary, None);
        assert_eq!(employee.work_type, None);
        assert_eq!(employee.role, None);
        assert_eq!(employee.mode, Some(WorkMode::Remote));
        assert_eq!(employee.field_text("type"), "Contractor");
        assert_eq!(employee.field_text("salary"), "n/a");
        assert_eq!(employee.field_text("role"), "null");

        let back = serde_json::to_value(&employee).unwrap();
        let original: Value = serde_json::from_str(json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_employee_keeps_non_string_id() {
        let employee: Employee = serde_json::from_str(r#"{"id":7,"name":"Cy"}"#).unwrap();
        assert_eq!(employee.id, "");
        assert_eq!(employee.field_text("id"), "7");

        let back = serde_json::to_value(&employee).unwrap();
        assert_eq!(back["id"], 7);
    }

    #[test]
    fn test_patch_replaces_unreadable_value() {
        let mut employee: Employee =
            serde_json::from_str(r#"{"id":"EMP002","name":"Bo","type":"Contractor"}"#).unwrap();

        let patch = EmployeePatch {
            work_type: Some(WorkType::Intern),
            ..EmployeePatch::default()
        };
        patch.apply(&mut employee);

        assert!(employee.extra.is_empty());
        let back = serde_json::to_value(&employee).unwrap();
        assert_eq!(back["type"], "Intern");
    }

    #[test]
    fn test_validate_requires_id_and_name() {
        assert!(Employee::new("EMP001", "Anna").validate().is_ok());

        let err = Employee::new("", "Anna").validate().unwrap_err();
        assert!(matches!(err, Error::Validation { field: "id", .. }));

        let err = Employee::new("EMP001", "").validate().unwrap_err();
        assert!(matches!(err, Error::Validation { field: "name", .. }));
    }

    #[test]
    fn test_validate_rejects_negative_salary() {
        let mut employee = Employee::new("EMP001", "Anna");
        employee.salary = Some(serde_json::from_str("-10").unwrap());

        let err = employee.validate().unwrap_err();
        assert!(matches!(err, Error::Validation { field: "salary", .. }));
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut employee = Employee::new("EMP001", "Anna")
            .with_department("Sales")
            .with_role("Rep")
            .with_mode(WorkMode::Office);

        let patch = EmployeePatch {
            role: Some("Lead".to_string()),
            mode: Some(WorkMode::Remote),
            ..EmployeePatch::default()
        };
        patch.apply(&mut employee);

        assert_eq!(employee.name, "Anna");
        assert_eq!(employee.department.as_deref(), Some("Sales"));
        assert_eq!(employee.role.as_deref(), Some("Lead"));
        assert_eq!(employee.mode, Some(WorkMode::Remote));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(EmployeePatch::default().is_empty());
        let patch = EmployeePatch {
            name: Some("Bo".to_string()),
            ..EmployeePatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_filter_matches() {
        let anna = Employee::new("EMP001", "Anna")
            .with_department("Sales")
            .with_mode(WorkMode::Remote);

        assert!(RecordFilter::default().matches(&anna));

        let sales = RecordFilter {
            department: Some("Sales".to_string()),
            mode: None,
        };
        assert!(sales.matches(&anna));

        let sales_office = RecordFilter {
            department: Some("Sales".to_string()),
            mode: Some(WorkMode::Office),
        };
        assert!(!sales_office.matches(&anna));

        // Department match is exact, not case-folded
        let lower = RecordFilter {
            department: Some("sales".to_string()),
            mode: None,
        };
        assert!(!lower.matches(&anna));
    }
}
