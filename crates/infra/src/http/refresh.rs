//! Single-flight token refresh
//!
//! [`RefreshCoordinator`] owns the `Idle | Refreshing` state shared by every
//! request of one client. The first request that needs a refresh becomes the
//! leader and receives a [`RefreshGuard`]; requests that need a refresh while
//! one is in flight become followers and wait on a one-shot channel for the
//! leader's outcome.
//!
//! ```text
//!            begin()                       guard.complete(token)
//!   Idle ──────────────► Refreshing ───────────────────────────► Idle
//!    ▲                       │  begin() → Follower(rx)              │
//!    │                       │  guard.fail(err) / drop(guard)       │
//!    └───────────────────────┴──────────────────────────────────────┘
//!                 every queued rx receives the same outcome
//! ```
//!
//! Decisions are taken under a mutex that is never held across an await;
//! waking followers happens after the lock is released.

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

use super::errors::RefreshError;

/// Outcome delivered to every request queued behind a refresh
pub type RefreshOutcome = Result<String, RefreshError>;

#[derive(Debug, Default)]
enum RefreshState {
    #[default]
    Idle,
    Refreshing {
        waiters: Vec<oneshot::Sender<RefreshOutcome>>,
    },
}

/// Role handed out by [`RefreshCoordinator::begin`]
#[derive(Debug)]
pub enum RefreshTicket<'a> {
    /// No refresh was in flight; the caller must perform it and settle the
    /// guard
    Leader(RefreshGuard<'a>),
    /// A refresh is in flight; await its outcome
    Follower(oneshot::Receiver<RefreshOutcome>),
    /// The credential that was rejected has already been replaced by an
    /// earlier refresh; replay with this token
    Rotated(String),
}

/// Coordinates token refreshes for one client
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide how a request that received a 401 should proceed
    ///
    /// `rotated` runs under the lock while the coordinator is idle. It
    /// returns the stored access token when it differs from the one the
    /// failed request carried, which means a refresh already completed after
    /// that request was sent.
    pub fn begin<F>(&self, rotated: F) -> RefreshTicket<'_>
    where
        F: FnOnce() -> Option<String>,
    {
        let mut state = self.state.lock();
        match &mut *state {
            RefreshState::Refreshing { waiters } => {
                let (tx, rx) = oneshot::channel();
                waiters.push(tx);
                debug!(queued = waiters.len(), "Refresh in flight, queueing request");
                RefreshTicket::Follower(rx)
            }
            RefreshState::Idle => {
                if let Some(token) = rotated() {
                    return RefreshTicket::Rotated(token);
                }
                *state = RefreshState::Refreshing { waiters: Vec::new() };
                RefreshTicket::Leader(RefreshGuard { coordinator: self, settled: false })
            }
        }
    }

    /// Whether a refresh is currently in flight
    pub fn is_refreshing(&self) -> bool {
        matches!(*self.state.lock(), RefreshState::Refreshing { .. })
    }

    /// Number of requests waiting for the in-flight refresh
    pub fn queued(&self) -> usize {
        match &*self.state.lock() {
            RefreshState::Refreshing { waiters } => waiters.len(),
            RefreshState::Idle => 0,
        }
    }

    fn settle(&self, outcome: &RefreshOutcome) {
        let waiters = match std::mem::take(&mut *self.state.lock()) {
            RefreshState::Refreshing { waiters } => waiters,
            RefreshState::Idle => Vec::new(),
        };

        debug!(waiters = waiters.len(), success = outcome.is_ok(), "Refresh settled");
        for waiter in waiters {
            // Receiver gone means that caller was dropped
            let _ = waiter.send(outcome.clone());
        }
    }
}

/// Leadership of an in-flight refresh
///
/// Settling the guard returns the coordinator to `Idle` and wakes every
/// follower. A guard dropped without being settled (the leader's future was
/// cancelled) rejects the followers with [`RefreshError::Abandoned`].
#[derive(Debug)]
#[must_use = "dropping the guard abandons the refresh"]
pub struct RefreshGuard<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl RefreshGuard<'_> {
    /// Resolve every follower with the new access token
    pub fn complete(mut self, token: String) {
        self.settled = true;
        self.coordinator.settle(&Ok(token));
    }

    /// Reject every follower with `error`
    pub fn fail(mut self, error: RefreshError) {
        self.settled = true;
        self.coordinator.settle(&Err(error));
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.coordinator.settle(&Err(RefreshError::Abandoned));
        }
    }
}
