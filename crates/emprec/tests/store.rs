//! End-to-end checks of the record store through the public API.

use std::fs;
use std::path::PathBuf;

use emprec::{
    report, Config, Employee, EmployeePatch, RecordFilter, RecordStore, Salary, SortKey, WorkMode,
    WorkType,
};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("emprec_it_{}_{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn hire(store: &RecordStore, name: &str, department: &str, salary: u64) -> String {
    let id = store.next_id();
    let employee = Employee::new(id.clone(), name)
        .with_department(department)
        .with_role("Staff")
        .with_salary(Salary::from(salary))
        .with_work_type(WorkType::FullTime)
        .with_mode(WorkMode::Office);
    employee.validate().unwrap();
    store.add(employee).unwrap();
    id
}

#[test]
fn test_record_lifecycle() {
    let dir = temp_dir("lifecycle");
    let store = RecordStore::open(dir.join("data.json"));

    assert_eq!(hire(&store, "Anna", "Engineering", 200), "EMP001");
    assert_eq!(hire(&store, "Susan", "Sales", 10), "EMP002");
    assert_eq!(hire(&store, "Bob", "Engineering", 30), "EMP003");

    let found = store.find_by_id("EMP002");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Susan");

    let names: Vec<_> = store.find_by_name("an").into_iter().map(|e| e.name).collect();
    assert_eq!(names, ["Anna", "Susan"]);

    let by_salary: Vec<_> = store.sort_by(SortKey::Salary).into_iter().map(|e| e.id).collect();
    assert_eq!(by_salary, ["EMP002", "EMP001", "EMP003"]);

    let patch = EmployeePatch {
        mode: Some(WorkMode::Remote),
        ..EmployeePatch::default()
    };
    assert!(store.update("EMP003", &patch).unwrap());
    let remote = store.filter(&RecordFilter {
        department: None,
        mode: Some(WorkMode::Remote),
    });
    assert_eq!(remote.len(), 1);
    assert_eq!(remote[0].role.as_deref(), Some("Staff"));

    assert!(store.delete("EMP001").unwrap());
    assert!(!store.delete("EMP001").unwrap());
    assert_eq!(store.next_id(), "EMP004");

    let stats = store.stats();
    assert_eq!(stats.total_employees, 2);
    assert_eq!(store.distinct_departments(), ["Engineering", "Sales"]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_hand_edited_file_round_trips() {
    let dir = temp_dir("hand_edited");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("data.json");
    fs::write(
        &path,
        r#"[
    {
        "id": "EMP001",
        "name": "Anna",
        "department": "",
        "salary": 1500.5,
        "type": "Intern",
        "mode": "Hybrid",
        "badge": "A-17"
    }
]"#,
    )
    .unwrap();

    let store = RecordStore::open(&path);
    let records = store.load();
    assert_eq!(records.len(), 1);

    store.save(&records).unwrap();
    assert_eq!(store.load(), records);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"badge\": \"A-17\""));
    assert!(text.contains("\"salary\": 1500.5"));
    assert!(text.contains("\"department\": \"\""));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_store_from_config_and_csv_export() {
    let dir = temp_dir("config");
    let mut config = Config::default();
    config.store.data_file = Some(dir.join("people.json"));
    config.ids.prefix = "STF".to_string();
    config.ids.width = 2;

    let store = RecordStore::from_config(&config, None);
    assert_eq!(hire(&store, "Anna", "Ops", 100), "STF01");

    let csv = report::render_csv(&store.get_all());
    assert_eq!(
        csv,
        "id,name,department,role,salary,type,mode\nSTF01,Anna,Ops,Staff,100,Full Time,Office\n"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_unreadable_salary_does_not_hide_other_records() {
    let dir = temp_dir("unreadable_salary");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("data.json");
    fs::write(
        &path,
        r#"[{"id":"EMP001","name":"Anna"},{"id":"EMP002","salary":"n/a","name":"Bo"}]"#,
    )
    .unwrap();

    let store = RecordStore::open(&path);
    assert_eq!(store.find_by_id("EMP001").len(), 1);

    let bo = store.find_by_id("EMP002");
    assert_eq!(bo.len(), 1);
    assert_eq!(bo[0].salary, None);
    assert_eq!(bo[0].field_text("salary"), "n/a");

    assert!(store.delete("EMP001").unwrap());
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"salary\": \"n/a\""));
    assert_eq!(store.get_all().len(), 1);

    let _ = fs::remove_dir_all(&dir);
}
