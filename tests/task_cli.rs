mod support;

use predicates::str::{contains, is_match};
use serde_json::Value;

use support::TestHome;

#[test]
fn create_toggle_delete_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;

    home.cmd()
        .args([
            "task",
            "new",
            "Upload clip",
            "--platform",
            "TikTok",
            "--frequency",
            "Daily",
        ])
        .assert()
        .success()
        .stdout(contains("Task created"))
        .stdout(contains("- Platform: TikTok"));

    let tasks = home.read_tasks()?;
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].active);
    assert_eq!(tasks[0].frequency, "Daily");

    home.cmd()
        .args(["task", "toggle", "1"])
        .assert()
        .success()
        .stdout(contains("Task paused"));
    assert!(!home.read_tasks()?[0].active);

    home.cmd()
        .args(["task", "rm", "1"])
        .assert()
        .success()
        .stdout(contains("Task deleted"));
    assert!(home.read_tasks()?.is_empty());
    Ok(())
}

#[test]
fn blank_name_is_user_error() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;

    home.cmd()
        .args(["task", "new", "   "])
        .assert()
        .code(2)
        .stderr(contains("task name cannot be empty"));

    assert!(!home.tasks_file().exists());
    Ok(())
}

#[test]
fn unknown_selector_leaves_store_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.cmd().args(["task", "new", "Keep me"]).assert().success();

    home.cmd()
        .args(["task", "rm", "5"])
        .assert()
        .code(2)
        .stderr(contains("Task not found: 5"))
        .stderr(contains("hint: autodeck task list"));

    assert_eq!(home.read_tasks()?.len(), 1);
    Ok(())
}

#[test]
fn selector_accepts_task_id() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.cmd().args(["task", "new", "First"]).assert().success();
    home.cmd().args(["task", "new", "Second"]).assert().success();

    let second_id = home.read_tasks()?[1].id.clone();
    home.cmd()
        .args(["task", "toggle", &second_id])
        .assert()
        .success();

    let tasks = home.read_tasks()?;
    assert!(tasks[0].active);
    assert!(!tasks[1].active);
    Ok(())
}

#[test]
fn list_json_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.cmd()
        .args(["task", "new", "Upload clip", "--platform", "TikTok"])
        .assert()
        .success();
    home.cmd().args(["task", "new", "Repost"]).assert().success();
    home.cmd().args(["task", "toggle", "2"]).assert().success();

    let output = home.cmd().args(["--json", "task", "list"]).output()?;
    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout)?;

    assert_eq!(payload["schema_version"], "autodeck.v1");
    assert_eq!(payload["command"], "task list");
    assert_eq!(payload["status"], "success");
    assert_eq!(payload["data"]["total"], 2);
    assert_eq!(payload["data"]["active"], 1);
    assert_eq!(payload["data"]["tasks"][0]["platform"], "TikTok");
    assert_eq!(payload["data"]["tasks"][1]["platform"], "Unspecified");
    Ok(())
}

#[test]
fn json_error_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;

    home.cmd()
        .args(["task", "toggle", "1", "--json"])
        .assert()
        .code(2)
        .stdout(contains("\"command\": \"task toggle\""))
        .stdout(contains("\"status\": \"error\""))
        .stdout(is_match("\"kind\":\\s*\"user_error\"").unwrap())
        .stdout(is_match("\"code\":\\s*2").unwrap())
        .stdout(contains("\"message\": \"Task not found: 1\""))
        .stdout(contains("\"selector\": \"1\""));
    Ok(())
}

#[test]
fn corrupt_store_fails_and_is_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    let path = home.write_file("data/tasks.json", "[{\"broken\": ")?;

    home.cmd()
        .args(["task", "list"])
        .assert()
        .code(4)
        .stderr(contains("Storage corrupted"));

    home.cmd()
        .args(["task", "new", "Upload clip"])
        .assert()
        .code(4);

    assert_eq!(std::fs::read_to_string(path)?, "[{\"broken\": ");
    Ok(())
}

#[test]
fn quiet_suppresses_human_output() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.cmd()
        .args(["-q", "task", "new", "Silent"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(home.read_tasks()?.len(), 1);
    Ok(())
}
