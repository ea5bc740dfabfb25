//! Typed persistence over a `KeyValueStore`.
//!
//! DESIGN
//! ======
//! `LocalStore` is the only component that touches the reserved keys. Every
//! operation is total: a missing key, a corrupt value, or an unreachable
//! backend yields the kind's empty value on load and a dropped write on save.
//!
//! ERROR HANDLING
//! ==============
//! Failures are reported through `tracing` and never returned. The in-memory
//! state is not rolled back after a failed save; the next successful save of
//! the same collection reconciles the store. There is no retry queue.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::model::{Recipe, SessionUser, Task};
use crate::store::KeyValueStore;

/// Key holding the JSON task array.
pub const TASKS_KEY: &str = "taskflow-tasks";
/// Key holding the JSON favorite-recipe array.
pub const FAVORITE_RECIPES_KEY: &str = "taskflow-favorite-recipes";
/// Key holding the JSON session user object.
pub const SESSION_USER_KEY: &str = "taskflow-user";

/// Shared handle to the application's durable store.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").finish_non_exhaustive()
    }
}

impl LocalStore {
    #[must_use]
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self { backend: Arc::new(backend) }
    }

    #[must_use]
    pub fn from_arc(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    // =========================================================================
    // TASKS
    // =========================================================================

    #[must_use]
    pub fn load_tasks(&self) -> Vec<Task> {
        self.load_json(TASKS_KEY).unwrap_or_default()
    }

    pub fn save_tasks(&self, tasks: &[Task]) {
        self.save_json(TASKS_KEY, tasks);
    }

    // =========================================================================
    // FAVORITE RECIPES
    // =========================================================================

    #[must_use]
    pub fn load_favorite_recipes(&self) -> Vec<Recipe> {
        self.load_json(FAVORITE_RECIPES_KEY).unwrap_or_default()
    }

    pub fn save_favorite_recipes(&self, recipes: &[Recipe]) {
        self.save_json(FAVORITE_RECIPES_KEY, recipes);
    }

    // =========================================================================
    // SESSION USER
    // =========================================================================

    #[must_use]
    pub fn load_session_user(&self) -> Option<SessionUser> {
        self.load_json(SESSION_USER_KEY)
    }

    pub fn save_session_user(&self, user: &SessionUser) {
        self.save_json(SESSION_USER_KEY, user);
    }

    pub fn remove_session_user(&self) {
        if let Err(e) = self.backend.remove(SESSION_USER_KEY) {
            error!(key = SESSION_USER_KEY, error = %e, "failed to remove stored value");
        }
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored value");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding corrupt stored value");
                None
            }
        }
    }

    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                error!(key, error = %e, "failed to serialize value for storage");
                return;
            }
        };
        if let Err(e) = self.backend.set(key, &raw) {
            error!(key, error = %e, "failed to write stored value");
        }
    }
}
