//! Server-side session administration.
//!
//! These operations act on the remote `user_sessions` table directly and
//! require an administrator. A revoked session keeps working on the affected
//! client until its next remote validation.

use chrono::Utc;

use crate::session::{Member, SessionError, SessionRow, SessionRowStore};

/// All currently unexpired session rows
pub async fn list_active_sessions(acting: &Member) -> Result<Vec<SessionRow>, SessionError> {
    if !acting.is_admin {
        tracing::debug!("Member {} may not list sessions", acting.id);
        return Err(SessionError::Unauthorized.log());
    }

    SessionRowStore::list_active(Utc::now()).await
}

/// Forcibly end a session by deleting its row.
///
/// Returns whether a row was actually deleted.
pub async fn revoke_session(acting: &Member, token: &str) -> Result<bool, SessionError> {
    if !acting.is_admin {
        tracing::debug!("Member {} may not revoke sessions", acting.id);
        return Err(SessionError::Unauthorized.log());
    }

    let deleted = SessionRowStore::delete(token).await?;
    if deleted == 0 {
        tracing::debug!("Revocation found no session row");
        return Ok(false);
    }

    tracing::info!("Session revoked by {}", acting.id);
    Ok(true)
}

/// Housekeeping: delete rows whose expiry has passed.
///
/// Expired rows otherwise linger, since lazy expiry only clears the local
/// record. Returns the number of rows removed.
pub async fn purge_expired_sessions(acting: &Member) -> Result<u64, SessionError> {
    if !acting.is_admin {
        tracing::debug!("Member {} may not purge sessions", acting.id);
        return Err(SessionError::Unauthorized.log());
    }

    let purged = SessionRowStore::purge_expired(Utc::now()).await?;
    if purged > 0 {
        tracing::info!("Purged {} expired session rows", purged);
    }
    Ok(purged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ClientInfo, SessionManager};
    use crate::test_utils::{init_test_environment, reset_session_state, seed_active_member};
    use crate::members::MemberStore;
    use chrono::Duration;
    use serial_test::serial;

    async fn admin_member(email: &str) -> Member {
        let mut member = seed_active_member(email, "Password1!").await;
        member.is_admin = true;
        let member = MemberStore::upsert_member(member)
            .await
            .expect("upsert should succeed");
        Member::from(member)
    }

    #[tokio::test]
    #[serial]
    async fn test_non_admin_is_rejected() {
        init_test_environment().await;
        reset_session_state().await;

        // Given a plain member
        let member = Member::from(seed_active_member("walter@example.com", "Password1!").await);

        // Then every admin operation refuses
        assert!(matches!(
            list_active_sessions(&member).await,
            Err(SessionError::Unauthorized)
        ));
        assert!(matches!(
            revoke_session(&member, "any-token").await,
            Err(SessionError::Unauthorized)
        ));
        assert!(matches!(
            purge_expired_sessions(&member).await,
            Err(SessionError::Unauthorized)
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_list_and_revoke_active_session() {
        init_test_environment().await;
        reset_session_state().await;
        let manager = SessionManager::new();

        let admin = admin_member("xena-admin@example.com").await;

        // Given a signed-in member
        seed_active_member("yara@example.com", "Password1!").await;
        let session = manager
            .login("yara@example.com", "Password1!", &ClientInfo::default())
            .await
            .expect("login should succeed");

        // When the admin lists sessions
        let sessions = list_active_sessions(&admin)
            .await
            .expect("listing should succeed");

        // Then the session row is visible
        assert!(sessions.iter().any(|row| row.token == session.token));

        // And when the admin revokes it
        let revoked = revoke_session(&admin, &session.token)
            .await
            .expect("revocation should succeed");
        assert!(revoked);

        // Then the client discovers the revocation at its next remote check
        assert!(!manager.validate_remote().await);
        assert!(!manager.is_authenticated().await);
    }

    #[tokio::test]
    #[serial]
    async fn test_revoke_unknown_token() {
        init_test_environment().await;
        reset_session_state().await;

        let admin = admin_member("zoe-admin@example.com").await;

        // When revoking a token that has no row
        let revoked = revoke_session(&admin, "no-such-token")
            .await
            .expect("revocation should not error");

        // Then nothing was deleted
        assert!(!revoked);
    }

    #[tokio::test]
    #[serial]
    async fn test_purge_expired_sessions() {
        init_test_environment().await;
        reset_session_state().await;
        let manager = SessionManager::new();

        let admin = admin_member("arthur-admin@example.com").await;

        // Given one live and one expired session row
        seed_active_member("bella@example.com", "Password1!").await;
        let live = manager
            .login("bella@example.com", "Password1!", &ClientInfo::default())
            .await
            .expect("login should succeed");

        seed_active_member("cora@example.com", "Password1!").await;
        let stale = manager
            .login("cora@example.com", "Password1!", &ClientInfo::default())
            .await
            .expect("login should succeed");
        SessionRowStore::update_expiry(&stale.token, Utc::now() - Duration::hours(1))
            .await
            .expect("expiry update should succeed");

        // When purging
        let purged = purge_expired_sessions(&admin)
            .await
            .expect("purge should succeed");

        // Then only the expired row is gone
        assert!(purged >= 1);
        assert!(
            SessionRowStore::get(&live.token)
                .await
                .expect("lookup should succeed")
                .is_some()
        );
        assert!(
            SessionRowStore::get(&stale.token)
                .await
                .expect("lookup should succeed")
                .is_none()
        );
    }
}
