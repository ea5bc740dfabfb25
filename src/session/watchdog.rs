//! Idle watchdog: fires once after a quiet period with no user activity.
//!
//! DESIGN
//! ======
//! Arming spawns a timer task and hands back a `Watchdog` guard. Activity
//! signals travel to the task over a channel, each stamped with the instant
//! it happened, and push the deadline out to `stamp + timeout`. Dropping the
//! guard stops the task, so a watchdog never outlives the session that armed
//! it, whichever way that session ends.
//!
//! On native targets the task runs on the ambient Tokio runtime; with no
//! runtime present the guard comes back disarmed and an error is logged. In
//! the browser (`wasm32`) it is a `spawn_local` future sleeping on
//! `gloo-timers` and stamping activity with `Date.now()`.

use std::time::Duration;

use tokio::sync::mpsc;

/// User-interaction signals that count as activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Activity {
    PointerMove,
    KeyDown,
    PointerDown,
    TouchStart,
}

impl Activity {
    /// Every tracked signal, in the order hosts should subscribe to them.
    pub const ALL: [Activity; 4] = [Self::PointerMove, Self::KeyDown, Self::PointerDown, Self::TouchStart];

    /// DOM event name a browser host listens for.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::PointerMove => "mousemove",
            Self::KeyDown => "keydown",
            Self::PointerDown => "mousedown",
            Self::TouchStart => "touchstart",
        }
    }

    /// Map a DOM event name back to its signal. Untracked events yield `None`.
    #[must_use]
    pub fn from_event_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.event_name() == name)
    }
}

type Signal = (Activity, timer::Stamp);

/// Guard for an armed idle timer.
#[derive(Debug)]
#[must_use = "dropping the guard disarms the timer"]
pub struct Watchdog {
    activity: mpsc::UnboundedSender<Signal>,
    timer: timer::Timer,
}

impl Watchdog {
    /// Start a timer that calls `on_idle` once `timeout` passes without a
    /// [`Watchdog::touch`].
    pub fn arm<F>(timeout: Duration, on_idle: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<Signal>();
        let timer = timer::Timer::spawn(timeout, rx, on_idle);
        Self { activity: tx, timer }
    }

    /// Restart the countdown from now.
    pub fn touch(&self, activity: Activity) {
        // A closed channel means the timer already fired; nothing to rearm.
        let _ = self.activity.send((activity, timer::now()));
    }

    /// True until the timer fires or the guard is dropped. Always false for a
    /// guard armed without a runtime.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.timer.is_running()
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}

// =============================================================================
// NATIVE TIMER
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod timer {
    use std::time::Duration;

    use tokio::runtime::Handle;
    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;
    use tracing::{error, trace};

    use super::Signal;

    pub(super) type Stamp = tokio::time::Instant;

    pub(super) fn now() -> Stamp {
        Stamp::now()
    }

    #[derive(Debug)]
    pub(super) struct Timer(Option<JoinHandle<()>>);

    impl Timer {
        pub(super) fn spawn<F>(timeout: Duration, mut rx: mpsc::UnboundedReceiver<Signal>, on_idle: F) -> Self
        where
            F: FnOnce() + Send + 'static,
        {
            let Ok(runtime) = Handle::try_current() else {
                error!(idle_secs = timeout.as_secs(), "no async runtime, idle timer not armed");
                return Self(None);
            };
            let deadline = now() + timeout;

            let task = runtime.spawn(async move {
                let idle = tokio::time::sleep_until(deadline);
                tokio::pin!(idle);
                loop {
                    tokio::select! {
                        biased;
                        signal = rx.recv() => {
                            let Some((activity, at)) = signal else {
                                return;
                            };
                            trace!(?activity, "idle timer rearmed");
                            idle.as_mut().reset(at + timeout);
                        }
                        () = &mut idle => break,
                    }
                }
                on_idle();
            });
            Self(Some(task))
        }

        pub(super) fn is_running(&self) -> bool {
            self.0.as_ref().is_some_and(|task| !task.is_finished())
        }

        pub(super) fn cancel(&mut self) {
            if let Some(task) = &self.0 {
                task.abort();
            }
        }
    }
}

// =============================================================================
// BROWSER TIMER
// =============================================================================

#[cfg(target_arch = "wasm32")]
mod timer {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use tokio::sync::mpsc;
    use tracing::trace;

    use super::Signal;

    /// Milliseconds since the Unix epoch.
    pub(super) type Stamp = f64;

    pub(super) fn now() -> Stamp {
        js_sys::Date::now()
    }

    #[derive(Debug)]
    pub(super) struct Timer {
        running: Arc<AtomicBool>,
    }

    impl Timer {
        pub(super) fn spawn<F>(timeout: Duration, mut rx: mpsc::UnboundedReceiver<Signal>, on_idle: F) -> Self
        where
            F: FnOnce() + Send + 'static,
        {
            let running = Arc::new(AtomicBool::new(true));
            let flag = Arc::clone(&running);
            let timeout_ms = timeout.as_secs_f64() * 1000.0;

            wasm_bindgen_futures::spawn_local(async move {
                let mut deadline = now() + timeout_ms;
                loop {
                    let remaining = deadline - now();
                    if remaining <= 0.0 {
                        break;
                    }
                    tokio::select! {
                        biased;
                        signal = rx.recv() => {
                            let Some((activity, at)) = signal else {
                                flag.store(false, Ordering::SeqCst);
                                return;
                            };
                            trace!(?activity, "idle timer rearmed");
                            deadline = at + timeout_ms;
                        }
                        () = gloo_timers::future::sleep(Duration::from_secs_f64(remaining / 1000.0)) => {}
                    }
                }
                if flag.swap(false, Ordering::SeqCst) {
                    on_idle();
                }
            });
            Self { running }
        }

        pub(super) fn is_running(&self) -> bool {
            self.running.load(Ordering::SeqCst)
        }

        /// The task also exits once the guard's sender is dropped.
        pub(super) fn cancel(&mut self) {
            self.running.store(false, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
#[path = "watchdog_test.rs"]
mod tests;
