//! Core of a personal task and recipe organizer.
//!
//! This crate owns everything behind the views: durable local persistence of
//! tasks, favorite recipes and the signed-in user; the session lifecycle with
//! its five-minute idle logout; the in-memory task and favorites collections
//! with their dashboard queries; and the client for the external recipe API.
//! The presentation layer renders from [`app_state::AppState`] and forwards
//! user actions and interaction signals into [`app::Taskflow`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Facade wiring store, session, state and recipe source together |
//! | [`app_state`] | Task and favorite collections, mutators and queries |
//! | [`session`] | Anonymous/authenticated lifecycle and the idle [`session::Watchdog`] |
//! | [`auth`] | Fixed credential check |
//! | [`storage`] | Total-function adapter over the raw store, one method per reserved key |
//! | [`store`] | Raw string key-value backends (memory, file, browser) |
//! | [`recipes`] | Recipe search trait and the Spoonacular client |
//! | [`model`] | Task, recipe and session user records |
//! | [`id`] | Unique task identifiers |
//! | [`config`] | Environment-driven configuration |
//!
//! The crate emits diagnostics through `tracing` and never installs a
//! subscriber; that is left to the host.

#[cfg(all(target_arch = "wasm32", not(feature = "hydrate")))]
compile_error!("wasm32 builds need the `hydrate` feature for browser storage and timers");

pub mod app;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod id;
pub mod model;
pub mod recipes;
pub mod session;
pub mod storage;
pub mod store;

#[cfg(test)]
mod test_helpers;

pub use app::Taskflow;
pub use app_state::{AppState, TaskFilter, TaskStats};
pub use auth::{AuthError, Credentials};
pub use config::TaskflowConfig;
pub use model::{NewTask, Priority, Recipe, SessionUser, Task, TaskPatch};
pub use recipes::{RecipeSource, SpoonacularClient};
pub use session::{Activity, SessionManager};
pub use storage::LocalStore;
