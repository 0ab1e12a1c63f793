use std::collections::HashSet;
use std::fs;

use autodeck::error::Error;
use autodeck::lock::FileLock;
use autodeck::storage::Storage;
use autodeck::task::{NewTask, Selector, Task, TaskQuery, TaskStore};
use tempfile::TempDir;

fn store() -> (TempDir, TaskStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TaskStore::new(Storage::for_home(dir.path().to_path_buf()));
    (dir, store)
}

fn named(name: &str) -> NewTask {
    NewTask::new(name, None, None)
}

#[test]
fn save_then_load_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, store) = store();
    let tasks = vec![
        Task {
            id: "T-b".to_string(),
            name: "Repost".to_string(),
            platform: "Facebook".to_string(),
            frequency: "After each stream".to_string(),
            active: false,
            created_at: "2024-05-01 12:00:00".to_string(),
        },
        Task {
            id: "T-a".to_string(),
            name: "Upload clip".to_string(),
            platform: "TikTok".to_string(),
            frequency: "Daily".to_string(),
            active: true,
            created_at: "2024-05-02 08:30:00".to_string(),
        },
    ];

    store.save(&tasks)?;
    assert_eq!(store.load()?, tasks);
    Ok(())
}

#[test]
fn blank_names_never_touch_the_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, store) = store();
    store.create(named("keep"))?;
    let before = fs::read_to_string(store.tasks_path())?;

    for name in ["", "   ", "\t\n"] {
        let err = store.create(named(name)).expect_err("blank name");
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    assert_eq!(fs::read_to_string(store.tasks_path())?, before);
    Ok(())
}

#[test]
fn sequential_creates_get_distinct_ids() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, store) = store();
    for i in 0..50 {
        store.create(named(&format!("task {i}")))?;
    }

    let tasks = store.list()?;
    let ids: HashSet<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids.len(), 50);
    assert_eq!(tasks[0].name, "task 0");
    assert_eq!(tasks[49].name, "task 49");
    Ok(())
}

#[test]
fn toggle_twice_restores_state() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, store) = store();
    store.create(named("a"))?;
    let query = TaskQuery::parse("1")?;

    assert!(!store.toggle(&query)?.active);
    assert!(store.toggle(&query)?.active);
    assert!(store.list()?[0].active);
    Ok(())
}

#[test]
fn delete_removes_exactly_one() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, store) = store();
    for name in ["a", "b", "c"] {
        store.create(named(name))?;
    }

    let removed = store.delete(&TaskQuery::parse("2")?)?;
    assert_eq!(removed.name, "b");
    let names: Vec<String> = store.list()?.into_iter().map(|task| task.name).collect();
    assert_eq!(names, vec!["a", "c"]);

    let err = store
        .delete(&TaskQuery::parse("does-not-exist")?)
        .expect_err("unknown id");
    assert!(matches!(err, Error::TaskNotFound(_)));
    assert_eq!(store.list()?.len(), 2);
    Ok(())
}

#[test]
fn position_wins_over_numeric_id() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, store) = store();
    let mk = |id: &str, name: &str| Task {
        id: id.to_string(),
        name: name.to_string(),
        platform: "Unspecified".to_string(),
        frequency: "Unspecified".to_string(),
        active: true,
        created_at: String::new(),
    };
    store.save(&[mk("2", "first"), mk("x", "second"), mk("9", "third")])?;

    assert_eq!(store.find(&TaskQuery::parse("2")?)?.name, "second");
    // out of range as a position, falls through to the id
    assert_eq!(store.find(&TaskQuery::parse("9")?)?.name, "third");
    assert_eq!(
        store
            .find(&TaskQuery::from(Selector::ById("2".to_string())))?
            .name,
        "first"
    );
    Ok(())
}

#[test]
fn corruption_is_reported_not_masked() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, store) = store();
    let path = store.tasks_path();
    fs::create_dir_all(path.parent().expect("parent"))?;

    for content in ["not json", "{\"id\": \"T1\"}", "[{\"name\": \"no id\"}]"] {
        fs::write(&path, content)?;
        let err = store.load().expect_err("corrupt");
        assert!(matches!(err, Error::StorageCorruption { .. }), "{content}");
        assert_eq!(fs::read_to_string(&path)?, content);
    }
    Ok(())
}

#[test]
fn legacy_documents_get_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, store) = store();
    let path = store.tasks_path();
    fs::create_dir_all(path.parent().expect("parent"))?;
    fs::write(&path, r#"[{"id": "1700000000000", "name": "old"}]"#)?;

    let tasks = store.load()?;
    assert_eq!(tasks[0].platform, "Unspecified");
    assert_eq!(tasks[0].frequency, "Unspecified");
    assert!(tasks[0].active);
    assert_eq!(tasks[0].created_at, "");
    Ok(())
}

#[test]
fn missing_file_is_initialized_empty() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, store) = store();
    assert!(!store.tasks_path().exists());
    assert!(store.load()?.is_empty());
    assert_eq!(fs::read_to_string(store.tasks_path())?.trim(), "[]");
    Ok(())
}

#[test]
fn held_lock_times_out_without_writing() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, store) = store();
    let store = store.with_lock_timeout(50);
    let _held = FileLock::acquire(store.lock_path(), 1000)?;

    let err = store.create(named("blocked")).expect_err("lock held");
    assert!(matches!(err, Error::LockFailed(_)));
    assert!(!store.tasks_path().exists());
    Ok(())
}
