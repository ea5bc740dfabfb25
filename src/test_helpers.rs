//! Shared fixtures for unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::model::{NewTask, Priority, Recipe, SessionUser};
use crate::storage::LocalStore;
use crate::store::{KeyValueStore, MemoryStore, StoreError};

/// Memory-backed store whose reads and writes can be made to fail on demand.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).unwrap()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.inner.set(key, value).unwrap();
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected read failure".to_owned()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::QuotaExceeded { key: key.to_owned() });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected remove failure".to_owned()));
        }
        self.inner.remove(key)
    }
}

/// A `LocalStore` plus a handle on its backend for inspection.
pub fn flaky_local_store() -> (LocalStore, Arc<FlakyStore>) {
    let backend = Arc::new(FlakyStore::default());
    (LocalStore::from_arc(backend.clone()), backend)
}

#[must_use]
pub fn new_task(title: &str) -> NewTask {
    NewTask {
        title: title.to_owned(),
        description: String::new(),
        priority: Priority::Low,
        due_date: "2025-01-01".to_owned(),
        completed: false,
    }
}

#[must_use]
pub fn recipe(id: u64) -> Recipe {
    Recipe {
        id,
        title: format!("Recipe {id}"),
        image: format!("https://img.test/{id}.jpg"),
        ready_in_minutes: 30,
        servings: 4,
        summary: "<p>Tasty</p>".to_owned(),
        source_url: format!("https://recipes.test/{id}"),
    }
}

#[must_use]
pub fn session_user() -> SessionUser {
    SessionUser { id: 1, name: "Kinyera Amos".to_owned(), email: "kinyeramo@gmail.com".to_owned() }
}
