use super::*;

#[test]
fn missing_key_reads_none_without_creating_root() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("data"));
    assert_eq!(store.get("taskflow-tasks").unwrap(), None);
    assert!(!store.root().exists());
}

#[test]
fn set_creates_root_and_writes_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("data"));
    store.set("taskflow-tasks", "[]").unwrap();

    let on_disk = std::fs::read_to_string(dir.path().join("data/taskflow-tasks.json")).unwrap();
    assert_eq!(on_disk, "[]");
    assert_eq!(store.get("taskflow-tasks").unwrap().as_deref(), Some("[]"));
}

#[test]
fn set_overwrites_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.set("k", "first").unwrap();
    store.set("k", "second").unwrap();

    assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    assert!(!dir.path().join("k.json.tmp").exists());
}

#[test]
fn remove_deletes_file_and_tolerates_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.set("taskflow-user", "{}").unwrap();
    store.remove("taskflow-user").unwrap();
    store.remove("taskflow-user").unwrap();
    assert_eq!(store.get("taskflow-user").unwrap(), None);
}

#[test]
fn keys_with_path_separators_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    assert!(matches!(store.set("../escape", "x"), Err(StoreError::Backend(_))));
    assert!(matches!(store.get("a/b"), Err(StoreError::Backend(_))));
    assert!(matches!(store.remove(""), Err(StoreError::Backend(_))));
}

#[test]
fn unreadable_entry_surfaces_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    // A directory where the value file should be cannot be read as text.
    std::fs::create_dir(dir.path().join("k.json")).unwrap();
    assert!(matches!(store.get("k"), Err(StoreError::Io(_))));
}
