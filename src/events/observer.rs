use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::session::{ClientInfo, SessionManager};

use super::types::AuthStateEvent;

/// Passive listener reconciling local session state with backend auth events.
///
/// Every reconciliation goes through the [`SessionManager`]; the observer
/// keeps no state of its own. The subscription ends when the channel closes
/// or the observer is dropped by its owning scope.
pub struct AuthStateObserver {
    handle: JoinHandle<()>,
}

impl AuthStateObserver {
    /// Spawn the observer task on the given event stream
    pub fn spawn(
        manager: SessionManager,
        mut events: broadcast::Receiver<AuthStateEvent>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(AuthStateEvent::SignedIn { email }) => {
                        match manager
                            .adopt_backend_signin(&email, &ClientInfo::default())
                            .await
                        {
                            Ok(Some(_)) => {
                                tracing::debug!("Adopted backend sign-in");
                            }
                            Ok(None) => {
                                tracing::debug!("Ignored backend sign-in");
                            }
                            Err(e) => {
                                tracing::warn!("Failed to adopt backend sign-in: {e}");
                            }
                        }
                    }
                    Ok(AuthStateEvent::SignedOut) => {
                        manager.handle_backend_signout().await;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("Auth event stream lagged, skipped {skipped} events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Self { handle }
    }

    /// Explicitly end the subscription
    pub fn stop(self) {
        // Drop runs the abort
    }
}

impl Drop for AuthStateObserver {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
