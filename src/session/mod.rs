//! Session lifecycle: anonymous ↔ authenticated, with an idle logout.
//!
//! DESIGN
//! ======
//! `SessionManager` owns the current user and mirrors it to the store under
//! the session key. Entering the authenticated state (login, or hydrating a
//! cached user at startup) arms a fresh `Watchdog`; leaving it drops the
//! guard. While anonymous there is no timer and activity is ignored.
//!
//! The user lives in a `watch` channel so hosts can react to a logout the
//! watchdog forces from its timer task. Each transition bumps an epoch; an
//! expiring watchdog only clears the session whose epoch it captured, which
//! keeps a timer that lost the race with a re-login from logging out the new
//! session.

pub mod watchdog;

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use crate::model::SessionUser;
use crate::storage::LocalStore;
pub use watchdog::{Activity, Watchdog};

/// Default idle period before a forced logout.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Snapshot of the session published to subscribers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    user: Option<SessionUser>,
    epoch: u64,
}

impl SessionState {
    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Owner of the signed-in user and its idle watchdog.
#[derive(Debug)]
pub struct SessionManager {
    store: LocalStore,
    idle_timeout: Duration,
    state: Arc<watch::Sender<SessionState>>,
    watchdog: Option<Watchdog>,
}

impl SessionManager {
    /// Build the manager, restoring a cached user from the store if one is
    /// present. The cached user is trusted without a credential check.
    ///
    /// A restored session arms its watchdog on the current Tokio runtime. Called
    /// outside one, the session is still restored but has no idle timer.
    #[must_use]
    pub fn hydrate(store: LocalStore, idle_timeout: Duration) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        let mut manager = Self { store, idle_timeout, state: Arc::new(state), watchdog: None };
        if let Some(user) = manager.store.load_session_user() {
            info!(user_id = user.id, "restored cached session");
            manager.enter(user, false);
        }
        manager
    }

    /// Enter the authenticated state as `user` and persist it. Logging in
    /// while already authenticated replaces the user and restarts the timer.
    pub fn login(&mut self, user: SessionUser) {
        info!(user_id = user.id, "login");
        self.enter(user, true);
    }

    /// Leave the authenticated state and drop the cached user.
    pub fn logout(&mut self) {
        self.watchdog = None;
        let store = &self.store;
        self.state.send_modify(|state| {
            if let Some(user) = state.user.take() {
                info!(user_id = user.id, "logout");
            }
            state.epoch += 1;
            store.remove_session_user();
        });
    }

    /// Report a user-interaction signal. Ignored while anonymous.
    pub fn record_activity(&self, activity: Activity) {
        if let Some(watchdog) = &self.watchdog {
            watchdog.touch(activity);
        }
    }

    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// True while an idle timer is counting down.
    #[must_use]
    pub fn is_watchdog_armed(&self) -> bool {
        self.watchdog.as_ref().is_some_and(Watchdog::is_armed)
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Receiver that observes every session transition, including idle logouts.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn enter(&mut self, user: SessionUser, persist: bool) {
        // Tear down the previous session's timer before publishing the new one.
        self.watchdog = None;

        let store = &self.store;
        let mut epoch = 0;
        self.state.send_modify(|state| {
            if persist {
                store.save_session_user(&user);
            }
            state.user = Some(user);
            state.epoch += 1;
            epoch = state.epoch;
        });

        let state = Arc::clone(&self.state);
        let store = self.store.clone();
        let timeout = self.idle_timeout;
        self.watchdog = Some(Watchdog::arm(timeout, move || expire(&state, &store, epoch, timeout)));
    }
}

fn expire(state: &watch::Sender<SessionState>, store: &LocalStore, epoch: u64, timeout: Duration) {
    state.send_if_modified(|current| {
        if current.epoch != epoch {
            return false;
        }
        let Some(user) = current.user.take() else {
            return false;
        };
        info!(user_id = user.id, idle_secs = timeout.as_secs(), "idle timeout, logging out");
        current.epoch += 1;
        store.remove_session_user();
        true
    });
}
