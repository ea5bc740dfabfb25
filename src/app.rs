//! Application facade.
//!
//! DESIGN
//! ======
//! `Taskflow` is what a host holds for the lifetime of the app. It shares one
//! `LocalStore` between the session manager and the app state, and keeps the
//! recipe collaborator behind `Arc<dyn RecipeSource>` so tests and alternate
//! hosts can substitute their own.
//!
//! Hydration happens at construction: the cached user, tasks and favorites
//! are read before the first view renders. A restored session arms its idle
//! watchdog on the current runtime when there is one.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::app_state::AppState;
use crate::auth::{AuthError, Credentials, authenticate};
use crate::config::TaskflowConfig;
use crate::model::{Recipe, SessionUser};
use crate::recipes::{RecipeError, RecipeSource, SpoonacularClient};
use crate::session::{Activity, SessionManager};
use crate::storage::LocalStore;
#[cfg(feature = "hydrate")]
use crate::store::BrowserStore;
use crate::store::FileStore;

pub struct Taskflow {
    pub session: SessionManager,
    pub state: AppState,
    pub recipes: Arc<dyn RecipeSource>,
}

impl std::fmt::Debug for Taskflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Taskflow")
            .field("session", &self.session)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Taskflow {
    /// File-backed store under `config.data_dir` and the Spoonacular client.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn open(config: &TaskflowConfig) -> Result<Self, RecipeError> {
        info!(data_dir = %config.data_dir.display(), "opening taskflow");
        Self::open_with_store(LocalStore::new(FileStore::new(config.data_dir.clone())), config)
    }

    /// Origin `localStorage` and the Spoonacular client. `config.data_dir` is
    /// not used.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::HttpClientBuild`] if the HTTP client cannot be built.
    #[cfg(feature = "hydrate")]
    pub fn open_in_browser(config: &TaskflowConfig) -> Result<Self, RecipeError> {
        info!("opening taskflow on browser storage");
        Self::open_with_store(LocalStore::new(BrowserStore), config)
    }

    fn open_with_store(store: LocalStore, config: &TaskflowConfig) -> Result<Self, RecipeError> {
        if config.recipes.api_key.is_empty() {
            warn!("recipe API key is not set; recipe searches will return no results");
        }
        let recipes = SpoonacularClient::new(&config.recipes)?;
        Ok(Self::with_parts(store, Arc::new(recipes), config.idle_timeout))
    }

    /// Assemble from explicit parts and hydrate from `store`.
    #[must_use]
    pub fn with_parts(store: LocalStore, recipes: Arc<dyn RecipeSource>, idle_timeout: Duration) -> Self {
        let session = SessionManager::hydrate(store.clone(), idle_timeout);
        let state = AppState::hydrate(store);
        Self { session, state, recipes }
    }

    /// Check `credentials` and, on success, enter the authenticated state.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] and leaves the session untouched
    /// when the check fails.
    pub fn login(&mut self, credentials: &Credentials) -> Result<SessionUser, AuthError> {
        let user = authenticate(credentials).inspect_err(|_| {
            info!(email = %credentials.email.trim(), "login rejected");
        })?;
        self.session.login(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    pub fn record_activity(&self, activity: Activity) {
        self.session.record_activity(activity);
    }

    /// Recipes for `query`; blank text asks for a random selection.
    pub async fn search_recipes(&self, query: &str) -> Vec<Recipe> {
        self.recipes.search(query).await
    }
}
