//! Cursor checkpoint store and progress reporting

use csv_enumerator::{AppConfig, CsvEnumeratorError, CursorStore, Progress, RunStatus};

fn temp_store(name: &str) -> CursorStore {
    let mut path = std::env::temp_dir();
    path.push("csv-enumerator-state-tests");
    path.push(name);
    path.push("cursor.json");
    let _ = std::fs::remove_file(&path);
    CursorStore::new(path).expect("store")
}

#[test]
fn test_load_without_checkpoint_returns_none() {
    let store = temp_store("fresh");
    assert!(store.load("input.csv").expect("load").is_none());
}

#[test]
fn test_update_progress_creates_and_advances_checkpoint() {
    let store = temp_store("advance");

    store.update_progress("input.csv", 0, 1).expect("first");
    let checkpoint = store
        .update_progress("input.csv", 7, 1)
        .expect("second");

    assert_eq!(checkpoint.cursor, Some(7));
    assert_eq!(checkpoint.rows_processed, 2);
    assert_eq!(checkpoint.status, RunStatus::Running);

    let reloaded = store.load("input.csv").expect("load").expect("checkpoint");
    assert_eq!(reloaded.cursor, Some(7));
    assert_eq!(reloaded.rows_processed, 2);
}

#[test]
fn test_checkpoint_for_other_input_is_rejected() {
    let store = temp_store("mismatch");
    store.update_progress("a.csv", 3, 4).expect("save");

    let err = store.load("b.csv").err().expect("should fail");
    assert!(matches!(err, CsvEnumeratorError::CheckpointError(_)));
}

#[test]
fn test_mark_completed_and_delete() {
    let store = temp_store("complete");
    store.update_progress("input.csv", 9, 10).expect("save");

    store.mark_completed("input.csv").expect("complete");
    let checkpoint = store.load("input.csv").expect("load").expect("checkpoint");
    assert_eq!(checkpoint.status, RunStatus::Completed);
    assert_eq!(checkpoint.status.to_string(), "completed");

    store.delete().expect("delete");
    assert!(store.load("input.csv").expect("load").is_none());
}

#[test]
fn test_progress_fraction_with_known_total() {
    let mut progress = Progress::new(Some(10));
    progress.record(5);

    assert_eq!(progress.rows_processed(), 5);
    assert_eq!(progress.fraction(), Some(0.5));
}

#[test]
fn test_progress_is_indeterminate_without_total() {
    let mut progress = Progress::new(None);
    progress.record(5);

    assert_eq!(progress.fraction(), None);
    assert_eq!(progress.eta_seconds(), None);
}

#[test]
fn test_progress_eta_needs_at_least_one_row() {
    let progress = Progress::new(Some(10));
    assert_eq!(progress.eta_seconds(), None);

    let mut progress = Progress::new(Some(10));
    progress.record(2);
    assert!(progress.eta_seconds().is_some());
}

#[test]
fn test_config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.worker.batch_size, 100);
    assert_eq!(config.worker.rows_per_run, 1000);
    assert!(config.worker.has_headers);
    assert!(config.estimate.enabled);
}

#[test]
fn test_config_loads_from_toml_file() {
    let mut path = std::env::temp_dir();
    path.push("csv-enumerator-state-tests");
    std::fs::create_dir_all(&path).expect("create temp dir");
    path.push("config.toml");
    std::fs::write(
        &path,
        r#"
[worker]
batch_size = 25
rows_per_run = 50
has_headers = false

[estimate]
enabled = false

[checkpoint]
cursor_path = "./cursor.json"

[logging]
level = "debug"
format = "text"
"#,
    )
    .expect("write config");

    let config = AppConfig::load_from_file(path.to_str().expect("utf8 path")).expect("load");
    assert_eq!(config.worker.batch_size, 25);
    assert!(!config.worker.has_headers);
    assert!(!config.estimate.enabled);

    let fallback = AppConfig::load_or_default(Some("/nonexistent/config.toml"));
    assert_eq!(fallback.worker.batch_size, 100);
}

#[test]
fn test_store_creates_parent_directories() {
    let mut path = std::env::temp_dir();
    path.push("csv-enumerator-state-tests");
    path.push("nested");
    path.push("deeper");
    let _ = std::fs::remove_dir_all(&path);
    path.push("cursor.json");

    let store = CursorStore::new(&path).expect("store");
    store.update_progress("input.csv", 0, 1).expect("save");
    assert!(store.path().exists());
}
