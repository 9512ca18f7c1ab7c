use chrono::{Duration, Utc};
use subtle::ConstantTimeEq;

use crate::credentials::{CredentialVerdict, hash_password, validate_credentials};
use crate::members::MemberStore;
use crate::storage::{CacheData, LOCAL_CACHE_STORE};
use crate::utils::gen_random_string;

use super::config::{SESSION_CACHE_PREFIX, SESSION_REFRESH_WINDOW, SESSION_STORE_KEY, SESSION_TTL};
use super::errors::SessionError;
use super::row::SessionRowStore;
use super::types::{ClientInfo, Member, Permissions, Session, SessionRow};

const WRONG_CURRENT_PASSWORD: &str = "Current password is incorrect";

/// Handle owning the session lifecycle for one client context.
///
/// Construct one at application start and hand clones to every consumer; the
/// authoritative session state is the single local store record, reached only
/// through these methods. States run `NoSession → Active → (Expired |
/// LoggedOut)`; only an `Active` session can be refreshed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionManager;

impl SessionManager {
    pub fn new() -> Self {
        Self
    }

    /// Sign in with an email/password pair.
    ///
    /// On success the session is persisted remotely (a `user_sessions` row)
    /// and locally, and returned. Each failing step maps to its own error
    /// kind and leaves the current state untouched. A second login while a
    /// session is active simply replaces it.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client: &ClientInfo,
    ) -> Result<Session, SessionError> {
        let verdict = validate_credentials(email, password).await?;

        let (member_id, is_admin) = match verdict {
            CredentialVerdict::Valid {
                member_id,
                is_admin,
            } => (member_id, is_admin),
            CredentialVerdict::Invalid { reason } => {
                return Err(SessionError::InvalidCredentials(reason));
            }
        };

        let member = MemberStore::get_member(&member_id)
            .await?
            .ok_or_else(|| SessionError::ProfileNotFound.log())?;

        self.establish(Member::from(member), is_admin, client).await
    }

    /// Create and persist a session for an already-verified member.
    async fn establish(
        &self,
        member: Member,
        is_admin: bool,
        client: &ClientInfo,
    ) -> Result<Session, SessionError> {
        let token = gen_random_string(32)?;
        let now = Utc::now();
        let expires_at = now + Duration::seconds(*SESSION_TTL as i64);

        let row = SessionRow {
            token: token.clone(),
            member_id: member.id.clone(),
            ip_address: client.ip_address.clone(),
            user_agent: client.user_agent.clone(),
            created_at: now,
            expires_at,
        };
        SessionRowStore::insert(&row).await?;

        let session = Session {
            member,
            is_admin,
            token,
            expires_at,
        };
        self.put_local(&session).await?;

        tracing::debug!(
            "Session established for member {} until {}",
            session.member.id,
            session.expires_at
        );
        Ok(session)
    }

    /// Whether a valid session exists right now.
    ///
    /// Expiry is detected lazily here: an expired record is cleared from the
    /// local store (the remote row is left for `purge_expired_sessions`) and
    /// the call returns false. Every call can therefore mutate state.
    pub async fn is_authenticated(&self) -> bool {
        self.require_active().await.is_ok()
    }

    /// Snapshot of the signed-in member, or None when not authenticated
    pub async fn current_member(&self) -> Option<Member> {
        self.require_active().await.ok().map(|s| s.member)
    }

    /// Admin flag captured at sign-in, false when not authenticated
    pub async fn is_admin(&self) -> bool {
        self.require_active()
            .await
            .map(|s| s.is_admin)
            .unwrap_or(false)
    }

    /// Console capabilities of the signed-in member; all false when signed out
    pub async fn permissions(&self) -> Permissions {
        match self.require_active().await {
            Ok(session) => Permissions::for_member(&session.member, session.is_admin),
            Err(_) => Permissions::default(),
        }
    }

    /// Sliding-window session refresh.
    ///
    /// A no-op returning true while more than the refresh window remains.
    /// Otherwise the expiry is pushed out to a full TTL from now, remote row
    /// first, then the local record. Returns false on remote failure, leaving
    /// the old session intact until it expires naturally.
    pub async fn refresh(&self) -> bool {
        let Ok(session) = self.require_active().await else {
            return false;
        };

        if session.remaining() > Duration::seconds(*SESSION_REFRESH_WINDOW as i64) {
            return true;
        }

        let expires_at = Utc::now() + Duration::seconds(*SESSION_TTL as i64);
        match SessionRowStore::update_expiry(&session.token, expires_at).await {
            Ok(0) => {
                tracing::warn!("Session refresh found no remote row, keeping current expiry");
                return false;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Session refresh failed remotely, keeping current expiry: {e}");
                return false;
            }
        }

        let refreshed = Session {
            expires_at,
            ..session
        };
        match self.put_local(&refreshed).await {
            Ok(()) => {
                tracing::debug!("Session refreshed until {}", expires_at);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to store refreshed session locally: {e}");
                false
            }
        }
    }

    /// Confirm with the backend that this session has not been revoked.
    ///
    /// The only operation that can see server-side teardown (for example an
    /// admin revoking the token). On any mismatch, expiry, or error the local
    /// record is destroyed. Called on demand only; this crate never polls.
    pub async fn validate_remote(&self) -> bool {
        let Ok(session) = self.require_active().await else {
            return false;
        };

        let row = match SessionRowStore::get(&session.token).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                tracing::debug!("Session token no longer present remotely, tearing down");
                self.clear_local().await;
                return false;
            }
            Err(e) => {
                tracing::warn!("Remote session validation failed, tearing down: {e}");
                self.clear_local().await;
                return false;
            }
        };

        let token_matches: bool = row
            .token
            .as_bytes()
            .ct_eq(session.token.as_bytes())
            .into();
        if !token_matches || row.expires_at <= Utc::now() {
            tracing::debug!("Remote session row expired or mismatched, tearing down");
            self.clear_local().await;
            return false;
        }

        true
    }

    /// Sign out.
    ///
    /// The remote row deletion is best-effort; the local record is destroyed
    /// unconditionally, so the caller is signed out even when the backend is
    /// unreachable.
    pub async fn logout(&self) {
        if let Some(session) = self.read_local().await {
            match SessionRowStore::delete(&session.token).await {
                Ok(_) => tracing::debug!("Remote session row deleted"),
                Err(e) => {
                    tracing::warn!("Failed to delete remote session row during logout: {e}");
                }
            }
        }
        self.clear_local().await;
    }

    /// Change the signed-in member's password.
    ///
    /// Re-validates `current` against the session's own email before writing
    /// the new hash. Distinct failure kinds: no active session, wrong current
    /// password, and backend write failure.
    pub async fn change_password(&self, current: &str, new: &str) -> Result<(), SessionError> {
        let session = self.require_active().await?;

        match validate_credentials(&session.member.email, current).await? {
            CredentialVerdict::Valid { .. } => {}
            CredentialVerdict::Invalid { .. } => {
                return Err(SessionError::InvalidCredentials(
                    WRONG_CURRENT_PASSWORD.to_string(),
                ));
            }
        }

        let new_hash = hash_password(new).await?;
        MemberStore::update_password_hash(&session.member.id, &new_hash).await?;

        tracing::debug!("Password updated for member {}", session.member.id);
        Ok(())
    }

    /// Adopt a sign-in reported by the backend's own auth layer.
    ///
    /// Looks the member up by email and, only for `active` members, creates a
    /// session through the same token/expiry bookkeeping as `login`. Returns
    /// `Ok(None)` when the event is ignored (unknown email or non-active
    /// status).
    pub async fn adopt_backend_signin(
        &self,
        email: &str,
        client: &ClientInfo,
    ) -> Result<Option<Session>, SessionError> {
        let Some(member) = MemberStore::get_member_by_email(email).await? else {
            tracing::debug!("Ignoring backend sign-in for unknown email");
            return Ok(None);
        };

        if !member.is_active() {
            tracing::debug!("Ignoring backend sign-in for non-active member {}", member.id);
            return Ok(None);
        }

        let is_admin = member.is_admin;
        let session = self.establish(Member::from(member), is_admin, client).await?;
        Ok(Some(session))
    }

    /// Tear down the local record after a backend-driven sign-out.
    ///
    /// The remote row was already invalidated by whichever party emitted the
    /// event, so only the local copy is cleared.
    pub async fn handle_backend_signout(&self) {
        tracing::debug!("Backend reported sign-out, clearing local session");
        self.clear_local().await;
    }

    /// The current session if present, well-formed, and unexpired.
    ///
    /// Expired or structurally invalid records are cleared as a side effect.
    async fn require_active(&self) -> Result<Session, SessionError> {
        let Some(session) = self.read_local().await else {
            return Err(SessionError::NotAuthenticated);
        };

        if session.is_expired() {
            tracing::debug!(
                "Session expired at {}, clearing local record",
                session.expires_at
            );
            self.clear_local().await;
            return Err(SessionError::Expired);
        }

        Ok(session)
    }

    /// Read the local record; malformed records count as absent and are
    /// cleared. Store failures degrade to "no session".
    async fn read_local(&self) -> Option<Session> {
        let data = match LOCAL_CACHE_STORE
            .lock()
            .await
            .get(SESSION_CACHE_PREFIX, SESSION_STORE_KEY.as_str())
            .await
        {
            Ok(data) => data?,
            Err(e) => {
                tracing::warn!("Failed to read local session record: {e}");
                return None;
            }
        };

        let session: Session = match data.try_into() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Malformed local session record, clearing: {e}");
                self.clear_local().await;
                return None;
            }
        };

        if !session.is_well_formed() {
            tracing::warn!("Structurally invalid local session record, clearing");
            self.clear_local().await;
            return None;
        }

        Some(session)
    }

    async fn put_local(&self, session: &Session) -> Result<(), SessionError> {
        LOCAL_CACHE_STORE
            .lock()
            .await
            .put_with_ttl(
                SESSION_CACHE_PREFIX,
                SESSION_STORE_KEY.as_str(),
                CacheData::from(session),
                *SESSION_TTL as usize,
            )
            .await
            .map_err(SessionError::from)
    }

    /// Best-effort removal of the local record
    async fn clear_local(&self) {
        if let Err(e) = LOCAL_CACHE_STORE
            .lock()
            .await
            .remove(SESSION_CACHE_PREFIX, SESSION_STORE_KEY.as_str())
            .await
        {
            tracing::warn!("Failed to clear local session record: {e}");
        }
    }
}
