use super::*;
use crate::model::Priority;
use crate::test_helpers::{flaky_local_store, recipe, session_user};

fn make_task(id: &str) -> Task {
    Task {
        id: id.to_owned(),
        title: format!("Task {id}"),
        description: String::new(),
        priority: Priority::Medium,
        due_date: "2025-03-01".to_owned(),
        completed: false,
        created_at: "2025-02-01T00:00:00Z".to_owned(),
    }
}

// =============================================================================
// Empty / missing keys
// =============================================================================

#[test]
fn empty_store_loads_defaults() {
    let (store, _) = flaky_local_store();
    assert!(store.load_tasks().is_empty());
    assert!(store.load_favorite_recipes().is_empty());
    assert_eq!(store.load_session_user(), None);
}

// =============================================================================
// Write-through
// =============================================================================

#[test]
fn saved_tasks_load_back_equal() {
    let (store, _) = flaky_local_store();
    let tasks = vec![make_task("a"), make_task("b")];
    store.save_tasks(&tasks);
    assert_eq!(store.load_tasks(), tasks);
}

#[test]
fn saved_favorites_load_back_in_order() {
    let (store, _) = flaky_local_store();
    let favorites = vec![recipe(7), recipe(3)];
    store.save_favorite_recipes(&favorites);
    assert_eq!(store.load_favorite_recipes(), favorites);
}

#[test]
fn session_user_save_load_remove() {
    let (store, backend) = flaky_local_store();
    store.save_session_user(&session_user());
    assert_eq!(store.load_session_user(), Some(session_user()));

    store.remove_session_user();
    assert_eq!(store.load_session_user(), None);
    assert_eq!(backend.raw(SESSION_USER_KEY), None);
}

#[test]
fn save_overwrites_previous_collection() {
    let (store, _) = flaky_local_store();
    store.save_tasks(&[make_task("a"), make_task("b")]);
    store.save_tasks(&[make_task("c")]);
    assert_eq!(store.load_tasks(), vec![make_task("c")]);
}

#[test]
fn stored_json_uses_reserved_key_and_camel_case() {
    let (store, backend) = flaky_local_store();
    store.save_tasks(&[make_task("a")]);
    let raw = backend.raw(TASKS_KEY).unwrap();
    assert!(raw.contains("\"dueDate\":\"2025-03-01\""));
    assert!(raw.starts_with('['));
}

// =============================================================================
// Failure isolation
// =============================================================================

#[test]
fn read_failure_yields_empty_collections() {
    let (store, backend) = flaky_local_store();
    store.save_tasks(&[make_task("a")]);
    store.save_session_user(&session_user());

    backend.fail_reads(true);
    assert!(store.load_tasks().is_empty());
    assert!(store.load_favorite_recipes().is_empty());
    assert_eq!(store.load_session_user(), None);
}

#[test]
fn corrupt_value_yields_default() {
    let (store, backend) = flaky_local_store();
    backend.put_raw(TASKS_KEY, "{not json");
    backend.put_raw(FAVORITE_RECIPES_KEY, "{\"id\":1}");
    backend.put_raw(SESSION_USER_KEY, "null");

    assert!(store.load_tasks().is_empty());
    assert!(store.load_favorite_recipes().is_empty());
    assert_eq!(store.load_session_user(), None);
}

#[test]
fn write_failure_is_dropped_and_later_save_reconciles() {
    let (store, backend) = flaky_local_store();
    store.save_tasks(&[make_task("a")]);

    backend.fail_writes(true);
    store.save_tasks(&[make_task("a"), make_task("b")]);
    assert_eq!(store.load_tasks(), vec![make_task("a")]);

    backend.fail_writes(false);
    store.save_tasks(&[make_task("a"), make_task("b")]);
    assert_eq!(store.load_tasks().len(), 2);
}

#[test]
fn remove_failure_is_swallowed() {
    let (store, backend) = flaky_local_store();
    store.save_session_user(&session_user());
    backend.fail_writes(true);
    store.remove_session_user();
    backend.fail_writes(false);
    assert_eq!(store.load_session_user(), Some(session_user()));
}
