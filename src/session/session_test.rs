use super::*;
use crate::storage::SESSION_USER_KEY;
use crate::test_helpers::{flaky_local_store, session_user};
use tokio::time::Instant;

const TIMEOUT: Duration = Duration::from_secs(300);

fn other_user() -> SessionUser {
    SessionUser { id: 2, name: "Guest".to_owned(), email: "guest@example.com".to_owned() }
}

async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

// =============================================================================
// Hydration
// =============================================================================

#[test]
fn empty_store_starts_anonymous_without_runtime() {
    let (store, _) = flaky_local_store();
    let session = SessionManager::hydrate(store, TIMEOUT);
    assert!(!session.is_authenticated());
    assert!(!session.is_watchdog_armed());
    assert_eq!(session.current_user(), None);
}

#[tokio::test]
async fn cached_user_restores_authenticated_session() {
    let (store, _) = flaky_local_store();
    store.save_session_user(&session_user());

    let session = SessionManager::hydrate(store, TIMEOUT);
    assert_eq!(session.current_user(), Some(session_user()));
    assert!(session.is_watchdog_armed());
}

#[test]
fn cached_user_restores_without_runtime() {
    let (store, backend) = flaky_local_store();
    store.save_session_user(&session_user());

    let session = SessionManager::hydrate(store, TIMEOUT);
    assert_eq!(session.current_user(), Some(session_user()));
    assert!(!session.is_watchdog_armed());
    assert!(backend.raw(SESSION_USER_KEY).is_some());
}

#[test]
fn login_without_runtime_is_unguarded() {
    let (store, _) = flaky_local_store();
    let mut session = SessionManager::hydrate(store, TIMEOUT);

    session.login(session_user());
    assert!(session.is_authenticated());
    assert!(!session.is_watchdog_armed());
    session.record_activity(Activity::PointerMove);
    session.logout();
    assert!(!session.is_authenticated());
}

#[test]
fn unreadable_store_starts_anonymous() {
    let (store, backend) = flaky_local_store();
    store.save_session_user(&session_user());
    backend.fail_reads(true);

    let session = SessionManager::hydrate(store, TIMEOUT);
    assert!(!session.is_authenticated());
}

// =============================================================================
// Login / logout
// =============================================================================

#[tokio::test]
async fn login_persists_user_and_arms_watchdog() {
    let (store, backend) = flaky_local_store();
    let mut session = SessionManager::hydrate(store.clone(), TIMEOUT);

    session.login(session_user());
    assert!(session.is_authenticated());
    assert!(session.is_watchdog_armed());
    assert!(backend.raw(SESSION_USER_KEY).is_some());
    assert_eq!(store.load_session_user(), Some(session_user()));
}

#[tokio::test]
async fn logout_clears_memory_store_and_watchdog() {
    let (store, backend) = flaky_local_store();
    let mut session = SessionManager::hydrate(store, TIMEOUT);
    session.login(session_user());

    session.logout();
    assert!(!session.is_authenticated());
    assert!(!session.is_watchdog_armed());
    assert_eq!(backend.raw(SESSION_USER_KEY), None);
}

#[test]
fn logout_while_anonymous_is_harmless() {
    let (store, _) = flaky_local_store();
    let mut session = SessionManager::hydrate(store, TIMEOUT);
    session.logout();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn login_survives_store_write_failure() {
    let (store, backend) = flaky_local_store();
    backend.fail_writes(true);
    let mut session = SessionManager::hydrate(store, TIMEOUT);

    session.login(session_user());
    assert!(session.is_authenticated());
    assert_eq!(backend.raw(SESSION_USER_KEY), None);
}

#[tokio::test]
async fn subscribers_observe_transitions() {
    let (store, _) = flaky_local_store();
    let mut session = SessionManager::hydrate(store, TIMEOUT);
    let mut rx = session.subscribe();

    session.login(session_user());
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().user(), Some(&session_user()));

    session.logout();
    assert!(rx.has_changed().unwrap());
    assert!(!rx.borrow_and_update().is_authenticated());
}

// =============================================================================
// Idle watchdog
// =============================================================================

#[tokio::test(start_paused = true)]
async fn idle_timeout_forces_logout_and_removes_key() {
    let (store, backend) = flaky_local_store();
    let mut session = SessionManager::hydrate(store, TIMEOUT);
    let mut rx = session.subscribe();
    let start = Instant::now();

    session.login(session_user());
    rx.borrow_and_update();

    rx.changed().await.unwrap();
    assert!(start.elapsed() >= TIMEOUT);
    assert!(!rx.borrow().is_authenticated());
    assert!(!session.is_authenticated());
    assert_eq!(backend.raw(SESSION_USER_KEY), None);
}

#[tokio::test(start_paused = true)]
async fn activity_keeps_session_alive() {
    let (store, _) = flaky_local_store();
    let mut session = SessionManager::hydrate(store, TIMEOUT);
    session.login(session_user());

    for _ in 0..5 {
        tokio::time::advance(Duration::from_secs(240)).await;
        session.record_activity(Activity::PointerMove);
        settle().await;
    }
    assert!(session.is_authenticated());

    let mut rx = session.subscribe();
    let last_activity = Instant::now();
    rx.changed().await.unwrap();
    assert!(last_activity.elapsed() >= TIMEOUT);
    assert!(!session.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn activity_while_anonymous_is_ignored() {
    let (store, _) = flaky_local_store();
    let session = SessionManager::hydrate(store, TIMEOUT);
    session.record_activity(Activity::KeyDown);
    assert!(!session.is_watchdog_armed());
}

#[tokio::test(start_paused = true)]
async fn relogin_replaces_watchdog() {
    let (store, backend) = flaky_local_store();
    let mut session = SessionManager::hydrate(store, TIMEOUT);
    session.login(session_user());

    tokio::time::advance(Duration::from_secs(200)).await;
    session.login(other_user());
    settle().await;

    // The first session's deadline passes; the second session is untouched.
    tokio::time::advance(Duration::from_secs(150)).await;
    settle().await;
    assert_eq!(session.current_user(), Some(other_user()));
    assert!(backend.raw(SESSION_USER_KEY).unwrap().contains("guest@example.com"));

    tokio::time::advance(Duration::from_secs(151)).await;
    settle().await;
    assert!(!session.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn logout_then_login_starts_fresh_timer() {
    let (store, _) = flaky_local_store();
    let mut session = SessionManager::hydrate(store, TIMEOUT);

    session.login(session_user());
    tokio::time::advance(Duration::from_secs(290)).await;
    session.logout();
    session.login(session_user());
    settle().await;

    tokio::time::advance(Duration::from_secs(20)).await;
    settle().await;
    assert!(session.is_authenticated());
    assert!(session.is_watchdog_armed());
}

#[tokio::test(start_paused = true)]
async fn dropping_manager_disarms_timer() {
    let (store, backend) = flaky_local_store();
    let mut session = SessionManager::hydrate(store, TIMEOUT);
    session.login(session_user());
    drop(session);

    tokio::time::advance(TIMEOUT * 2).await;
    settle().await;
    assert!(backend.raw(SESSION_USER_KEY).is_some());
}

#[test]
fn default_idle_timeout_is_five_minutes() {
    assert_eq!(DEFAULT_IDLE_TIMEOUT, Duration::from_secs(300));
}
