//! Session expiry notification
//!
//! The client never navigates anywhere itself. When a session cannot be
//! recovered it calls [`SessionHandler::on_session_expired`] with the login
//! path and lets the application decide what a redirect means.

use tokio::sync::watch;
use tracing::info;

/// Receives the signal that the session is gone
pub trait SessionHandler: Send + Sync {
    /// Called once per unrecoverable authentication failure, after the
    /// stored credentials were cleared
    fn on_session_expired(&self, login_path: &str);

    /// Called after a login or registration stored new credentials
    fn on_session_started(&self) {}
}

/// Publishes the redirect target on a `tokio::sync::watch` channel
///
/// Subscribers see `Some(login_path)` after the session expired. The value
/// stays set until the next session starts or [`WatchSessionHandler::reset`]
/// is called.
#[derive(Debug)]
pub struct WatchSessionHandler {
    tx: watch::Sender<Option<String>>,
}

impl Default for WatchSessionHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchSessionHandler {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Receiver of redirect targets
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }

    /// Clear the pending redirect
    pub fn reset(&self) {
        self.tx.send_replace(None);
    }
}

impl SessionHandler for WatchSessionHandler {
    fn on_session_expired(&self, login_path: &str) {
        info!(login_path = %login_path, "Session expired, redirecting to login");
        self.tx.send_replace(Some(login_path.to_string()));
    }

    fn on_session_started(&self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_see_redirect() {
        let handler = WatchSessionHandler::new();
        let mut rx = handler.subscribe();
        assert_eq!(*rx.borrow(), None);

        handler.on_session_expired("/login");

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_deref(), Some("/login"));

        handler.reset();
        assert_eq!(*rx.borrow(), None);
    }

    #[test]
    fn test_new_session_clears_redirect() {
        let handler = WatchSessionHandler::new();
        let rx = handler.subscribe();

        handler.on_session_expired("/login");
        assert_eq!(rx.borrow().as_deref(), Some("/login"));

        handler.on_session_started();
        assert_eq!(*rx.borrow(), None);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let handler = WatchSessionHandler::new();
        handler.on_session_expired("/login");
        assert_eq!(handler.subscribe().borrow().as_deref(), Some("/login"));
    }
}
