use console_session::{
    ClientInfo, Member, SessionError, SessionManager, list_active_sessions,
    purge_expired_sessions, revoke_session,
};
use serial_test::serial;

use crate::common::{seed_member, setup};

#[tokio::test]
#[serial]
async fn admin_revocation_is_seen_at_next_remote_check() {
    setup().await;
    let manager = SessionManager::new();
    manager.logout().await;

    let admin = Member::from(seed_member("warden@example.com", "Password1!", true).await);

    // A member signs in
    seed_member("target@example.com", "Password1!", false).await;
    let session = manager
        .login("target@example.com", "Password1!", &ClientInfo::default())
        .await
        .expect("login should succeed");

    // The admin can see the session and revoke it
    let sessions = list_active_sessions(&admin)
        .await
        .expect("listing should succeed");
    assert!(sessions.iter().any(|row| row.token == session.token));

    let revoked = revoke_session(&admin, &session.token)
        .await
        .expect("revocation should succeed");
    assert!(revoked);

    // Lazy expiry alone does not notice: the local record still looks live
    assert!(manager.is_authenticated().await);

    // The remote check notices and tears the session down
    assert!(!manager.validate_remote().await);
    assert!(!manager.is_authenticated().await);
}

#[tokio::test]
#[serial]
async fn admin_operations_require_the_admin_flag() {
    setup().await;

    let plain = Member::from(seed_member("plain@example.com", "Password1!", false).await);

    assert!(matches!(
        list_active_sessions(&plain).await,
        Err(SessionError::Unauthorized)
    ));
    assert!(matches!(
        revoke_session(&plain, "some-token").await,
        Err(SessionError::Unauthorized)
    ));
    assert!(matches!(
        purge_expired_sessions(&plain).await,
        Err(SessionError::Unauthorized)
    ));
}

#[tokio::test]
#[serial]
async fn purge_leaves_live_sessions_alone() {
    setup().await;
    let manager = SessionManager::new();
    manager.logout().await;

    let admin = Member::from(seed_member("janitor@example.com", "Password1!", true).await);

    seed_member("survivor@example.com", "Password1!", false).await;
    let session = manager
        .login("survivor@example.com", "Password1!", &ClientInfo::default())
        .await
        .expect("login should succeed");

    // Purging expired rows must not touch a live session
    purge_expired_sessions(&admin)
        .await
        .expect("purge should succeed");

    let sessions = list_active_sessions(&admin)
        .await
        .expect("listing should succeed");
    assert!(sessions.iter().any(|row| row.token == session.token));
    assert!(manager.validate_remote().await);

    manager.logout().await;
}
