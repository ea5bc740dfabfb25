//! In-memory tasks and favorite recipes with write-through persistence.
//!
//! DESIGN
//! ======
//! `AppState` is the single source of truth for the session's collections.
//! Every mutator finishes by re-serializing the whole affected collection
//! through `LocalStore`; there is no diffing, batching, or debounce. The
//! collections are small and writes are human-paced.
//!
//! Read-side helpers (`filter_tasks`, `stats`, `recent_pending_tasks`) are the
//! queries the task list and dashboard views render from.

#[cfg(test)]
#[path = "app_state_test.rs"]
mod app_state_test;

use std::collections::HashSet;

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, warn};

use crate::id::new_id;
use crate::model::{NewTask, Priority, Recipe, Task, TaskPatch};
use crate::storage::LocalStore;

/// Dashboard shows this many open tasks.
pub const DASHBOARD_RECENT_TASKS: usize = 5;
/// Dashboard shows this many favorites.
pub const DASHBOARD_RECENT_FAVORITES: usize = 4;

// =============================================================================
// QUERY TYPES
// =============================================================================

/// Task list filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
    Priority(Priority),
}

impl TaskFilter {
    /// Parse the filter names used by the task list selector.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(Self::All),
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "low" => Some(Self::Priority(Priority::Low)),
            "medium" => Some(Self::Priority(Priority::Medium)),
            "high" => Some(Self::Priority(Priority::High)),
            _ => None,
        }
    }

    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
            Self::Priority(p) => task.priority == p,
        }
    }
}

/// Aggregate counts for the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Open tasks with high priority.
    pub high_priority_pending: usize,
    pub favorite_recipes: usize,
    /// Completed share of all tasks, rounded to the nearest percent.
    pub completion_percent: usize,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Owner of the session's task and favorite-recipe collections.
#[derive(Debug)]
pub struct AppState {
    store: LocalStore,
    tasks: Vec<Task>,
    favorites: Vec<Recipe>,
}

impl AppState {
    /// Load both collections from `store`. Duplicate identifiers in stored
    /// data keep their first occurrence.
    #[must_use]
    pub fn hydrate(store: LocalStore) -> Self {
        let tasks = dedup_by_key(store.load_tasks(), |t| t.id.clone(), "task");
        let favorites = dedup_by_key(store.load_favorite_recipes(), |r| r.id, "favorite recipe");
        debug!(tasks = tasks.len(), favorites = favorites.len(), "hydrated app state");
        Self { store, tasks, favorites }
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn favorite_recipes(&self) -> &[Recipe] {
        &self.favorites
    }

    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn is_favorite(&self, recipe_id: u64) -> bool {
        self.favorites.iter().any(|r| r.id == recipe_id)
    }

    // =========================================================================
    // TASK MUTATORS
    // =========================================================================

    /// Stamp `fields` with a fresh id and creation time, append, persist.
    ///
    /// Title and due-date validation belong to the form that collected
    /// `fields`; nothing is rejected here.
    pub fn add_task(&mut self, fields: NewTask) -> Task {
        let mut id = new_id();
        while self.task(&id).is_some() {
            id = new_id();
        }
        let task = Task {
            id,
            title: fields.title,
            description: fields.description,
            priority: fields.priority,
            due_date: fields.due_date,
            completed: fields.completed,
            created_at: now_rfc3339(),
        };
        debug!(task_id = %task.id, "task added");
        self.tasks.push(task.clone());
        self.store.save_tasks(&self.tasks);
        task
    }

    /// Apply `patch` to the task with `id`. Unknown ids are ignored.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(task_id = id, "update for unknown task ignored");
            return;
        };
        patch.apply_to(task);
        self.store.save_tasks(&self.tasks);
    }

    /// Flip the completion flag of the task with `id`. Unknown ids are ignored.
    pub fn toggle_completed(&mut self, id: &str) {
        if let Some(completed) = self.task(id).map(|t| t.completed) {
            self.update_task(id, TaskPatch::completed(!completed));
        }
    }

    /// Remove the task with `id` if present, then persist.
    pub fn delete_task(&mut self, id: &str) {
        self.tasks.retain(|t| t.id != id);
        self.store.save_tasks(&self.tasks);
    }

    // =========================================================================
    // FAVORITES
    // =========================================================================

    /// Add `recipe` to favorites, or remove it if a recipe with the same id is
    /// already there. Returns whether the recipe is a favorite afterwards.
    pub fn toggle_favorite_recipe(&mut self, recipe: Recipe) -> bool {
        let now_favorite = if let Some(pos) = self.favorites.iter().position(|r| r.id == recipe.id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(recipe);
            true
        };
        self.store.save_favorite_recipes(&self.favorites);
        now_favorite
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Tasks matching `filter` whose title or description contains `search`
    /// (case-insensitive), in insertion order.
    #[must_use]
    pub fn filter_tasks(&self, filter: TaskFilter, search: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| filter.matches(t) && t.matches_search(search))
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> TaskStats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let high_priority_pending = self
            .tasks
            .iter()
            .filter(|t| !t.completed && t.priority == Priority::High)
            .count();
        let completion_percent = if total == 0 { 0 } else { (completed * 100 + total / 2) / total };
        TaskStats {
            total,
            completed,
            pending: total - completed,
            high_priority_pending,
            favorite_recipes: self.favorites.len(),
            completion_percent,
        }
    }

    /// Up to `limit` open tasks, newest `createdAt` first. Timestamps that do
    /// not parse sort as oldest.
    #[must_use]
    pub fn recent_pending_tasks(&self, limit: usize) -> Vec<&Task> {
        let mut open: Vec<(Option<OffsetDateTime>, &Task)> = self
            .tasks
            .iter()
            .filter(|t| !t.completed)
            .map(|t| (OffsetDateTime::parse(&t.created_at, &Rfc3339).ok(), t))
            .collect();
        // Stable sort keeps insertion order among equal timestamps.
        open.sort_by(|a, b| b.0.cmp(&a.0));
        open.into_iter().take(limit).map(|(_, t)| t).collect()
    }

    /// The first `limit` favorites in insertion order.
    #[must_use]
    pub fn recent_favorites(&self, limit: usize) -> &[Recipe] {
        &self.favorites[..limit.min(self.favorites.len())]
    }

    /// Open tasks due on or before `today` (`YYYY-MM-DD`).
    #[must_use]
    pub fn overdue_tasks(&self, today: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_overdue(today)).collect()
    }
}

/// Today's UTC calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn today_utc() -> String {
    OffsetDateTime::now_utc().date().to_string()
}

fn now_rfc3339() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339).unwrap_or_else(|_| now.unix_timestamp().to_string())
}

fn dedup_by_key<T, K, F>(items: Vec<T>, key: F, kind: &str) -> Vec<T>
where
    K: std::hash::Hash + Eq,
    F: Fn(&T) -> K,
{
    let before = items.len();
    let mut seen = HashSet::new();
    let unique: Vec<T> = items.into_iter().filter(|item| seen.insert(key(item))).collect();
    if unique.len() != before {
        warn!(kind, dropped = before - unique.len(), "dropped stored entries with duplicate ids");
    }
    unique
}
