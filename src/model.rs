//! Entity types persisted in the local store.
//!
//! DESIGN
//! ======
//! Field names serialize in camelCase (`dueDate`, `createdAt`, `readyInMinutes`)
//! so stored values stay interchangeable with what the web front end writes
//! under the same keys.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// TASK
// =============================================================================

/// Task urgency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Lowercase label as stored and displayed.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A single to-do entry.
///
/// `id` and `created_at` are stamped by [`crate::app_state::AppState::add_task`]
/// and never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier from [`crate::id::new_id`].
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    /// Calendar date, `YYYY-MM-DD`.
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl Task {
    /// True when the task is open and its due date is `today` or earlier.
    ///
    /// A due date means midnight UTC at the start of that day, so the task is
    /// overdue for the whole of its due day. Both dates are `YYYY-MM-DD`, so
    /// lexicographic order is date order. A due date that does not look like a
    /// calendar date is never overdue.
    #[must_use]
    pub fn is_overdue(&self, today: &str) -> bool {
        !self.completed && is_calendar_date(&self.due_date) && self.due_date.as_str() <= today
    }

    /// Case-insensitive substring match on title or description.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.description.to_lowercase().contains(&needle)
    }
}

fn is_calendar_date(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

/// Caller-supplied fields for a new task. Identity and creation time are not
/// part of it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
}

/// Partial update for an existing task. Unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that only flips the completion flag.
    #[must_use]
    pub fn completed(completed: bool) -> Self {
        Self { completed: Some(completed), ..Self::default() }
    }

    /// Apply the set fields onto `task`.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

// =============================================================================
// RECIPE
// =============================================================================

/// A recipe as normalized from the external recipe API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Provider identifier; the favorites set is keyed by it.
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ready_in_minutes: u32,
    #[serde(default)]
    pub servings: u32,
    /// HTML summary as returned by the provider.
    #[serde(default)]
    pub summary: String,
    pub source_url: String,
}

// =============================================================================
// SESSION USER
// =============================================================================

/// The signed-in identity cached for the length of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: u64,
    pub name: String,
    pub email: String,
}
