//! The payment window: a fixed countdown shown next to a UPI intent.
//!
//! The window is advisory. Expiry fires a callback and nothing else; a record
//! can still be completed after its window ran out.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// Seconds a payer gets before the window reports `Expired`.
pub const PAYMENT_WINDOW_SECS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Active { remaining: u64 },
    Expired,
}

/// Result of advancing a [`Countdown`] by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running(u64),
    /// Returned once, on the tick that reaches zero.
    Expired,
    /// Already expired; nothing changed.
    Idle,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    duration: u64,
    state: WindowState,
}

impl Countdown {
    pub fn new(duration_secs: u64) -> Self {
        Self {
            duration: duration_secs,
            state: WindowState::Active { remaining: duration_secs },
        }
    }

    pub fn tick(&mut self) -> Tick {
        match self.state {
            WindowState::Active { remaining } if remaining <= 1 => {
                self.state = WindowState::Expired;
                Tick::Expired
            }
            WindowState::Active { remaining } => {
                self.state = WindowState::Active { remaining: remaining - 1 };
                Tick::Running(remaining - 1)
            }
            WindowState::Expired => Tick::Idle,
        }
    }

    /// Start over from the full duration, as when the modal is reopened.
    pub fn reset(&mut self) {
        self.state = WindowState::Active { remaining: self.duration };
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn remaining(&self) -> u64 {
        match self.state {
            WindowState::Active { remaining } => remaining,
            WindowState::Expired => 0,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.state == WindowState::Expired
    }
}

/// A [`Countdown`] driven by a one-second tokio interval.
///
/// Dropping or closing the window stops the task; the timeout callback then
/// never runs.
pub struct PaymentWindow {
    state_rx: watch::Receiver<WindowState>,
    task: JoinHandle<()>,
    opened_at: Instant,
}

impl PaymentWindow {
    pub fn open<F>(duration_secs: u64, on_timeout: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let mut countdown = Countdown::new(duration_secs);
        let (state_tx, state_rx) = watch::channel(countdown.state());

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // First tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                match countdown.tick() {
                    Tick::Running(_) => {
                        let _ = state_tx.send(countdown.state());
                    }
                    Tick::Expired => {
                        let _ = state_tx.send(WindowState::Expired);
                        on_timeout();
                        break;
                    }
                    Tick::Idle => break,
                }
            }
        });

        Self {
            state_rx,
            task,
            opened_at: Instant::now(),
        }
    }

    pub fn state(&self) -> WindowState {
        *self.state_rx.borrow()
    }

    pub fn remaining(&self) -> u64 {
        match self.state() {
            WindowState::Active { remaining } => remaining,
            WindowState::Expired => 0,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.state() == WindowState::Expired
    }

    /// Acknowledge the payment: stop counting without firing the callback.
    pub fn close(self) {
        self.task.abort();
    }
}

impl Drop for PaymentWindow {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Open payment windows keyed by intent id.
#[derive(Clone)]
pub struct PaymentWindows {
    windows: Arc<RwLock<HashMap<String, PaymentWindow>>>,
    duration_secs: u64,
}

impl PaymentWindows {
    pub fn new(duration_secs: u64) -> Self {
        Self {
            windows: Arc::new(RwLock::new(HashMap::new())),
            duration_secs,
        }
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// Open a window for `intent_id`. Reopening an id restarts its countdown
    /// and cancels the previous one.
    pub async fn open<F>(&self, intent_id: &str, on_timeout: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let window = PaymentWindow::open(self.duration_secs, on_timeout);
        let mut windows = self.windows.write().await;

        // Expired windows stay queryable for one more window length
        let keep_for = Duration::from_secs(self.duration_secs.saturating_mul(2));
        let before = windows.len();
        windows.retain(|_, w| !(w.is_expired() && w.opened_at.elapsed() > keep_for));
        if windows.len() < before {
            debug!("Pruned {} stale payment windows", before - windows.len());
        }

        windows.insert(intent_id.to_string(), window);
    }

    /// Close the window for `intent_id`. Returns false if none was open.
    pub async fn close(&self, intent_id: &str) -> bool {
        match self.windows.write().await.remove(intent_id) {
            Some(window) => {
                window.close();
                true
            }
            None => false,
        }
    }

    pub async fn state(&self, intent_id: &str) -> Option<WindowState> {
        self.windows.read().await.get(intent_id).map(PaymentWindow::state)
    }
}
