use console_session::{ClientInfo, Permissions, SessionError, SessionManager};
use serial_test::serial;

use crate::common::{seed_member, setup};

#[tokio::test]
#[serial]
async fn full_login_lifecycle() {
    setup().await;
    let manager = SessionManager::new();
    manager.logout().await; // start from a clean state

    seed_member("lifecycle@example.com", "Password1!", false).await;

    // Signed out at first
    assert!(!manager.is_authenticated().await);
    assert!(manager.current_member().await.is_none());

    // Login with valid credentials
    let session = manager
        .login("lifecycle@example.com", "Password1!", &ClientInfo::default())
        .await
        .expect("login should succeed");
    assert_eq!(session.member.email, "lifecycle@example.com");

    // The session is live and projected consistently
    assert!(manager.is_authenticated().await);
    let member = manager
        .current_member()
        .await
        .expect("member should be visible");
    assert_eq!(member, session.member);
    assert!(manager.validate_remote().await);

    // A fresh session does not need a refresh yet
    assert!(manager.refresh().await);

    // Logout signs the client out
    manager.logout().await;
    assert!(!manager.is_authenticated().await);
    assert!(manager.current_member().await.is_none());
}

#[tokio::test]
#[serial]
async fn login_rejects_bad_credentials() {
    setup().await;
    let manager = SessionManager::new();
    manager.logout().await;

    seed_member("reject@example.com", "Password1!", false).await;

    // Wrong password and unknown email both fail with the credentials kind
    let wrong_password = manager
        .login("reject@example.com", "Nope1!", &ClientInfo::default())
        .await;
    assert!(matches!(
        wrong_password,
        Err(SessionError::InvalidCredentials(_))
    ));

    let unknown_email = manager
        .login("missing@example.com", "Password1!", &ClientInfo::default())
        .await;
    assert!(matches!(
        unknown_email,
        Err(SessionError::InvalidCredentials(_))
    ));

    // Neither attempt left any state behind
    assert!(!manager.is_authenticated().await);
}

#[tokio::test]
#[serial]
async fn permissions_reflect_role_and_admin_flag() {
    setup().await;
    let manager = SessionManager::new();
    manager.logout().await;

    // Signed out: the default grants nothing
    assert_eq!(manager.permissions().await, Permissions::default());

    // A plain engineer only sees reports
    seed_member("engineer@example.com", "Password1!", false).await;
    manager
        .login("engineer@example.com", "Password1!", &ClientInfo::default())
        .await
        .expect("login should succeed");
    let engineer = manager.permissions().await;
    assert!(!engineer.can_manage_team);
    assert!(!engineer.can_manage_clients);
    assert!(engineer.can_view_reports);
    manager.logout().await;

    // An admin gets everything
    seed_member("allperms@example.com", "Password1!", true).await;
    manager
        .login("allperms@example.com", "Password1!", &ClientInfo::default())
        .await
        .expect("login should succeed");
    assert!(manager.is_admin().await);
    let admin = manager.permissions().await;
    assert!(admin.can_manage_team);
    assert!(admin.can_manage_clients);
    assert!(admin.can_manage_newsletters);
    assert!(admin.can_view_reports);
    manager.logout().await;
}

#[tokio::test]
#[serial]
async fn change_password_end_to_end() {
    setup().await;
    let manager = SessionManager::new();
    manager.logout().await;

    seed_member("rotate@example.com", "OldPass1!", false).await;
    manager
        .login("rotate@example.com", "OldPass1!", &ClientInfo::default())
        .await
        .expect("login should succeed");

    // A wrong current password is rejected and changes nothing
    let rejected = manager.change_password("wrong", "NewPass1!").await;
    match rejected {
        Err(SessionError::InvalidCredentials(reason)) => {
            assert_eq!(reason, "Current password is incorrect");
        }
        other => panic!("Expected InvalidCredentials, got: {other:?}"),
    }
    assert!(manager.is_authenticated().await);

    // The correct current password rotates the credential
    manager
        .change_password("OldPass1!", "NewPass1!")
        .await
        .expect("change should succeed");
    manager.logout().await;

    assert!(matches!(
        manager
            .login("rotate@example.com", "OldPass1!", &ClientInfo::default())
            .await,
        Err(SessionError::InvalidCredentials(_))
    ));
    assert!(
        manager
            .login("rotate@example.com", "NewPass1!", &ClientInfo::default())
            .await
            .is_ok()
    );
    manager.logout().await;
}

#[tokio::test]
#[serial]
async fn change_password_requires_a_session() {
    setup().await;
    let manager = SessionManager::new();
    manager.logout().await;

    let result = manager.change_password("Password1!", "NewPass1!").await;
    assert!(matches!(result, Err(SessionError::NotAuthenticated)));
}
