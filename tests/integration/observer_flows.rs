use std::time::Duration;

use console_session::{AuthStateEvent, AuthStateObserver, ClientInfo, SessionManager};
use serial_test::serial;
use tokio::sync::broadcast;

use crate::common::{seed_member, setup};

// The broadcast loop has no completion signal, so tests poll briefly
async fn wait_for_auth_state(manager: SessionManager, expect: bool) -> bool {
    for _ in 0..100 {
        if manager.is_authenticated().await == expect {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::test(flavor = "multi_thread")]
#[serial]
async fn backend_signin_flows_through_the_manager() {
    setup().await;
    let manager = SessionManager::new();
    manager.logout().await;

    seed_member("observer@example.com", "Password1!", false).await;

    let (tx, rx) = broadcast::channel(8);
    let observer = AuthStateObserver::spawn(manager, rx);

    // A sign-in reported by the backend materializes as a real session
    tx.send(AuthStateEvent::SignedIn {
        email: "observer@example.com".to_string(),
    })
    .expect("send should succeed");

    assert!(wait_for_auth_state(manager, true).await);
    let member = manager
        .current_member()
        .await
        .expect("member should be visible");
    assert_eq!(member.email, "observer@example.com");

    // A backend sign-out tears it down again, through the same manager
    tx.send(AuthStateEvent::SignedOut).expect("send should succeed");
    assert!(wait_for_auth_state(manager, false).await);

    observer.stop();
}

#[tokio::test(flavor = "multi_thread")]
#[serial]
async fn observer_does_not_adopt_unknown_members() {
    setup().await;
    let manager = SessionManager::new();
    manager.logout().await;

    let (tx, rx) = broadcast::channel(8);
    let observer = AuthStateObserver::spawn(manager, rx);

    tx.send(AuthStateEvent::SignedIn {
        email: "never-seen@example.com".to_string(),
    })
    .expect("send should succeed");

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!manager.is_authenticated().await);

    observer.stop();
}
