//! CLI integration tests for sprintcap
//!
//! These tests run the binary against a snapshot written to a temporary
//! project, checking the views end to end.

use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the sprintcap binary, isolated from the
/// user's global config
fn sprintcap_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("sprintcap"));
    cmd.env_remove("SPRINTCAP_INPUT");
    cmd.env(
        "SPRINTCAP_CONFIG_DIR",
        std::env::temp_dir().join("sprintcap-tests-no-global-config"),
    );
    cmd
}

/// Ten two-week sprints starting Monday 2024-01-01, plus the June sprint
/// used for capacity checks, and work items for "June"
fn snapshot() -> Value {
    let mut iterations: Vec<Value> = (0..10)
        .map(|i| {
            let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                + chrono::Duration::days(14 * i);
            let end = start + chrono::Duration::days(14);
            json!({
                "id": format!("it-{}", i),
                "name": format!("Sprint {}", i),
                "attributes": {
                    "startDate": format!("{}T00:00:00Z", start),
                    "finishDate": format!("{}T00:00:00Z", end),
                }
            })
        })
        .collect();

    iterations.push(json!({
        "name": "June",
        "attributes": { "startDate": "2024-06-03T00:00:00Z", "finishDate": "2024-06-14T00:00:00Z" }
    }));
    iterations.push(json!({ "name": "Undated" }));

    json!({
        "iterations": iterations,
        "iterationWorkItems": { "June": [10, 11], "Undated": [10] },
        "workItems": [
            { "id": 10, "fields": {
                "System.WorkItemType": "User Story",
                "System.Title": "Checkout flow",
                "System.State": "Active",
                "Microsoft.VSTS.Scheduling.DueDate": "14/06/2024"
            } },
            { "id": 11, "fields": {
                "System.WorkItemType": "User Story",
                "System.Title": "Receipts",
                "System.State": "New",
                "Microsoft.VSTS.Scheduling.TargetDate": "not a date"
            } },
            { "id": 20, "fields": {
                "System.WorkItemType": "Task", "System.Title": "Cart API", "System.State": "Active",
                "System.Parent": 10, "System.AssignedTo": { "displayName": "Alice" }
            } },
            { "id": 21, "fields": {
                "System.WorkItemType": "Task", "System.Title": "Cart UI", "System.State": "To Do",
                "System.Parent": 10, "System.AssignedTo": "Bob"
            } },
            { "id": 22, "fields": {
                "System.WorkItemType": "Task", "System.Title": "PDF", "System.State": "To Do",
                "System.Parent": 11, "System.AssignedTo": "Alice"
            } },
            { "id": 23, "fields": {
                "System.WorkItemType": "Task", "System.Title": "Triage", "System.State": "To Do",
                "System.Parent": 11
            } }
        ]
    })
}

const CONFIG: &str = r#"
[[developers]]
name = "Alice"
activities = [
    { name = "Development", capacity_per_day = 4.0 },
    { name = "Support", capacity_per_day = 4.0 },
]
days_off = [{ start = "2024-06-10", end = "2024-06-11" }]
"#;

/// Create an initialized project holding the snapshot and capacity config
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    sprintcap_cmd().arg("init").arg(dir.path()).assert().success();

    fs::write(
        dir.path().join(".sprintcap/snapshot.json"),
        snapshot().to_string(),
    )
    .unwrap();
    fs::write(dir.path().join(".sprintcap/config.toml"), CONFIG).unwrap();
    dir
}

fn json_output(dir: &TempDir, args: &[&str]) -> Value {
    let output = sprintcap_cmd()
        .current_dir(dir.path())
        .args(args)
        .args(["--format", "json"])
        .assert()
        .success();

    serde_json::from_slice(&output.get_output().stdout).unwrap()
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    sprintcap_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized sprintcap project"));

    assert!(dir.path().join(".sprintcap").is_dir());
    assert!(dir.path().join(".sprintcap/config.toml").is_file());
    assert!(dir.path().join(".sprintcap/.gitignore").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    sprintcap_cmd().arg("init").arg(dir.path()).assert().success();
    sprintcap_cmd().arg("init").arg(dir.path()).assert().success();
}

#[test]
fn test_command_outside_project_fails() {
    let dir = TempDir::new().unwrap();

    sprintcap_cmd()
        .current_dir(dir.path())
        .arg("sprints")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a sprintcap project"));
}

// =============================================================================
// Sprint Tests
// =============================================================================

#[test]
fn test_sprints_window_around_current() {
    let dir = setup_project();

    // 2024-03-14 falls in Sprint 5 (2024-03-11 .. 2024-03-25)
    let json = json_output(&dir, &["sprints", "--now", "2024-03-14"]);
    let sprints = json.as_array().unwrap();

    let names: Vec<_> = sprints.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["Sprint 2", "Sprint 3", "Sprint 4", "Sprint 5", "Sprint 6", "Sprint 7", "Sprint 8"]
    );

    let current: Vec<_> = sprints
        .iter()
        .filter(|s| s["isCurrent"] == true)
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(current, vec!["Sprint 5"]);
}

#[test]
fn test_sprints_without_current_shows_last_seven() {
    let dir = setup_project();

    let json = json_output(&dir, &["sprints", "--now", "2031-01-01"]);
    let sprints = json.as_array().unwrap();

    assert_eq!(sprints.len(), 7);
    assert_eq!(sprints[6]["name"], "Undated");
    assert_eq!(sprints[5]["name"], "June");
    assert!(sprints.iter().all(|s| s["isCurrent"] == false));
}

#[test]
fn test_sprints_text_marks_current() {
    let dir = setup_project();

    sprintcap_cmd()
        .current_dir(dir.path())
        .args(["sprints", "--now", "2024-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* Sprint 0"));
}

#[test]
fn test_sprints_rejects_bad_now() {
    let dir = setup_project();

    sprintcap_cmd()
        .current_dir(dir.path())
        .args(["sprints", "--now", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --now value"));
}

#[test]
fn test_input_flag_overrides_project() {
    let project = setup_project();
    let elsewhere = TempDir::new().unwrap();

    sprintcap_cmd()
        .current_dir(elsewhere.path())
        .arg("--input")
        .arg(project.path().join(".sprintcap/snapshot.json"))
        .args(["sprints", "--now", "2024-01-02", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Sprint 0\""));
}

#[test]
fn test_input_from_environment() {
    let project = setup_project();
    let elsewhere = TempDir::new().unwrap();

    sprintcap_cmd()
        .current_dir(elsewhere.path())
        .env("SPRINTCAP_INPUT", project.path().join(".sprintcap/snapshot.json"))
        .args(["sprints", "--now", "2024-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sprint 0"));
}

// =============================================================================
// Story and Task Tests
// =============================================================================

#[test]
fn test_stories_with_due_dates() {
    let dir = setup_project();

    let json = json_output(&dir, &["stories", "--sprint", "June"]);
    let stories = json.as_array().unwrap();

    assert_eq!(stories.len(), 2);
    assert_eq!(stories[0]["title"], "Checkout flow");
    assert_eq!(stories[0]["type"], "User Story");
    assert!(stories[0]["dueDate"].as_str().unwrap().starts_with("2024-06-14"));
    assert!(stories[1]["dueDate"].is_null());
}

#[test]
fn test_stories_unknown_sprint() {
    let dir = setup_project();

    sprintcap_cmd()
        .current_dir(dir.path())
        .args(["stories", "--sprint", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sprint 'Nope' not found"));
}

#[test]
fn test_unparsable_due_date_is_logged_in_verbose_mode() {
    let dir = setup_project();

    sprintcap_cmd()
        .current_dir(dir.path())
        .args(["--verbose", "stories", "--sprint", "June"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not a date"));
}

#[test]
fn test_tasks_of_story() {
    let dir = setup_project();

    let json = json_output(&dir, &["tasks", "10"]);
    let tasks = json.as_array().unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["assignedTo"], "Alice");
    assert_eq!(tasks[1]["title"], "Cart UI");

    sprintcap_cmd()
        .current_dir(dir.path())
        .args(["tasks", "999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks"));
}

// =============================================================================
// Capacity Tests
// =============================================================================

#[test]
fn test_developers_capacity() {
    let dir = setup_project();

    let json = json_output(&dir, &["developers", "--sprint", "June"]);

    assert_eq!(json["workingDays"], 10);
    assert_eq!(json["totalDaysOff"], 1);
    assert_eq!(json["sprintStart"], "2024-06-03");
    assert_eq!(json["sprintEnd"], "2024-06-14");

    let developers = json["developers"].as_array().unwrap();
    assert_eq!(developers.len(), 2);

    let alice = &developers[0];
    assert_eq!(alice["name"], "Alice");
    assert_eq!(alice["tasks"], 2);
    assert_eq!(alice["capacityPerDay"], 8.0);
    assert_eq!(alice["daysOff"], 1);
    assert_eq!(alice["totalCapacity"], 64.0);
    assert_eq!(alice["defaulted"], false);

    let bob = &developers[1];
    assert_eq!(bob["name"], "Bob");
    assert_eq!(bob["capacityPerDay"], 8.0);
    assert_eq!(bob["totalCapacity"], 80.0);
    assert_eq!(bob["defaulted"], true);

    assert_eq!(json["totalCapacity"], 144.0);
}

#[test]
fn test_developers_text_report() {
    let dir = setup_project();

    sprintcap_cmd()
        .current_dir(dir.path())
        .args(["developers", "--sprint", "June"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Working days:   10"))
        .stdout(predicate::str::contains("Total capacity: 144.0h"))
        .stdout(predicate::str::contains("Bob*"));
}

#[test]
fn test_developers_undated_sprint_is_zero() {
    let dir = setup_project();

    let output = sprintcap_cmd()
        .current_dir(dir.path())
        .args(["developers", "--sprint", "Undated", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no start or end date"));

    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["workingDays"], 0);
    assert_eq!(json["totalCapacity"], 0.0);
    assert_eq!(json["developers"].as_array().unwrap().len(), 2);
}

#[test]
fn test_invalid_day_off_falls_back_with_warning() {
    let dir = setup_project();
    fs::write(
        dir.path().join(".sprintcap/config.toml"),
        r#"
[[developers]]
name = "Alice"
activities = [{ name = "Development", capacity_per_day = 6.0 }]
days_off = [{}]
"#,
    )
    .unwrap();

    let output = sprintcap_cmd()
        .current_dir(dir.path())
        .args(["developers", "--sprint", "June", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("neither a start nor an end date"));

    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["developers"][0]["name"], "Alice");
    assert_eq!(json["developers"][0]["defaulted"], true);
    assert_eq!(json["developers"][0]["totalCapacity"], 80.0);
}

#[test]
fn test_configured_default_allocation() {
    let dir = setup_project();
    fs::write(
        dir.path().join(".sprintcap/config.toml"),
        "[capacity]\ndefault_hours_per_day = 6.0\n",
    )
    .unwrap();

    let json = json_output(&dir, &["developers", "--sprint", "June"]);
    assert_eq!(json["totalCapacity"], 120.0);
}

#[test]
fn test_global_default_format_applies_without_flag() {
    let dir = setup_project();
    let global = TempDir::new().unwrap();
    fs::write(global.path().join("config.toml"), "default_format = \"json\"\n").unwrap();

    let output = sprintcap_cmd()
        .current_dir(dir.path())
        .env("SPRINTCAP_CONFIG_DIR", global.path())
        .args(["developers", "--sprint", "June"])
        .assert()
        .success();
    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["totalCapacity"], 144.0);

    sprintcap_cmd()
        .current_dir(dir.path())
        .env("SPRINTCAP_CONFIG_DIR", global.path())
        .args(["developers", "--sprint", "June", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total capacity: 144.0h"));
}

// =============================================================================
// Date Tests
// =============================================================================

#[test]
fn test_parse_date_reports_format() {
    let dir = TempDir::new().unwrap();

    let output = sprintcap_cmd()
        .current_dir(dir.path())
        .args(["parse-date", "June 14, 2024", "--format", "json"])
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["format"], "long_date");
    assert!(json["date"].as_str().unwrap().starts_with("2024-06-14"));
}

#[test]
fn test_parse_date_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();

    sprintcap_cmd()
        .current_dir(dir.path())
        .args(["parse-date", "14.06.2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized date format"));
}
