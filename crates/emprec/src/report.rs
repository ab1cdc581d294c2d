//! Text renderings of employee records: aligned tables, CSV and a
//! per-department bar chart.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::employee::Employee;
use crate::error::Result;

/// Column headers, in output order.
pub const COLUMNS: [&str; 7] = ["id", "name", "department", "role", "salary", "type", "mode"];

/// Label shown for records without a department.
const NO_DEPARTMENT: &str = "(none)";

/// Glyph used to draw chart bars.
const BAR: &str = "█";

fn cells(employee: &Employee) -> [String; 7] {
    COLUMNS.map(|column| employee.field_text(column))
}

/// Render records as a left-aligned table with a header row.
#[must_use]
pub fn render_table(records: &[Employee]) -> String {
    let rows: Vec<[String; 7]> = records.iter().map(cells).collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &COLUMNS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render records as CSV with a header row.
#[must_use]
pub fn render_csv(records: &[Employee]) -> String {
    let mut out = COLUMNS.join(",");
    out.push('\n');
    for employee in records {
        let line = cells(employee)
            .iter()
            .map(|c| csv_field(c))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Quote a CSV field when it contains a separator, quote or line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Render records as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(records: &[Employee]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Render a horizontal bar chart of record counts per department.
///
/// The longest bar is `width` characters; any non-zero count gets at least
/// one character.
#[must_use]
pub fn render_bar_chart(counts: &BTreeMap<String, usize>, width: usize) -> String {
    let max = counts.values().copied().max().unwrap_or(0);
    if max == 0 {
        return String::new();
    }

    let label_of = |name: &str| {
        if name.is_empty() {
            NO_DEPARTMENT.to_string()
        } else {
            name.to_string()
        }
    };
    let label_width = counts
        .keys()
        .map(|k| label_of(k).chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (name, &count) in counts {
        let len = count.saturating_mul(width).div_ceil(max);
        let bar = BAR.repeat(len);
        let _ = writeln!(
            out,
            "{:<label_width$}  {bar} {count}",
            label_of(name),
            label_width = label_width
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::{Salary, WorkMode, WorkType};

    fn anna() -> Employee {
        Employee::new("EMP001", "Anna")
            .with_department("Engineering")
            .with_role("Developer")
            .with_salary(Salary::from(90_000_u64))
            .with_work_type(WorkType::FullTime)
            .with_mode(WorkMode::Hybrid)
    }

    #[test]
    fn test_table_alignment() {
        let table = render_table(&[anna(), Employee::new("EMP002", "Bo")]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id      name  department   role"));
        assert!(lines[1].starts_with("------  ----  -----------"));
        assert_eq!(
            lines[2],
            "EMP001  Anna  Engineering  Developer  90000   Full Time  Hybrid"
        );
        assert_eq!(lines[3], "EMP002  Bo");
    }

    #[test]
    fn test_table_empty() {
        let table = render_table(&[]);
        assert_eq!(table.lines().count(), 2);
    }

    #[test]
    fn test_csv_output() {
        let csv = render_csv(&[anna()]);
        assert_eq!(
            csv,
            "id,name,department,role,salary,type,mode\n\
             EMP001,Anna,Engineering,Developer,90000,Full Time,Hybrid\n"
        );
    }

    #[test]
    fn test_csv_quoting() {
        let employee = Employee::new("EMP003", "Smith, \"Jo\"").with_role("R&D\nlead");
        let csv = render_csv(&[employee]);
        assert!(csv.contains("\"Smith, \"\"Jo\"\"\""));
        assert!(csv.contains("\"R&D\nlead\""));
    }

    #[test]
    fn test_json_output() {
        let json = render_json(&[anna()]).unwrap();
        assert!(json.contains("\"type\": \"Full Time\""));
    }

    #[test]
    fn test_bar_chart() {
        let mut counts = BTreeMap::new();
        counts.insert("Engineering".to_string(), 4);
        counts.insert("Sales".to_string(), 1);
        counts.insert(String::new(), 2);

        let chart = render_bar_chart(&counts, 8);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0], "(none)       ████ 2");
        assert_eq!(lines[1], "Engineering  ████████ 4");
        assert_eq!(lines[2], "Sales        ██ 1");
    }

    #[test]
    fn test_table_shows_unreadable_values() {
        let odd: Employee =
            serde_json::from_str(r#"{"id":"EMP009","name":"Cy","salary":"n/a","type":"Contractor"}"#)
                .unwrap();
        let csv = render_csv(&[odd]);
        assert!(csv.ends_with("EMP009,Cy,,,n/a,Contractor,\n"));
    }

    #[test]
    fn test_bar_chart_wide() {
        let mut counts = BTreeMap::new();
        counts.insert("Ops".to_string(), 3);

        let chart = render_bar_chart(&counts, 200);
        assert_eq!(chart.matches('█').count(), 200);
    }

    #[test]
    fn test_bar_chart_empty() {
        assert!(render_bar_chart(&BTreeMap::new(), 40).is_empty());
    }
}
