//! console-session - Session lifecycle and credential validation for the team
//! admin console.
//!
//! This crate owns everything between "the user typed an email and password"
//! and "the console knows who is signed in": credential validation against the
//! `team_members` table, creation and teardown of `user_sessions` rows,
//! the single local session record with lazy expiry and sliding-window
//! refresh, and reconciliation with the backend's own auth events.

mod admin;
mod credentials;
mod events;
mod members;
mod session;
mod storage;
#[cfg(test)]
mod test_utils;
mod utils;

// Re-export the session lifecycle surface
pub use session::{
    ClientInfo, Member, Permissions, Session, SessionError, SessionManager, SessionRow,
};

pub use credentials::{CredentialError, CredentialVerdict, hash_password, validate_credentials};

pub use members::{MemberError, MemberStatus, MemberStore, TeamMember};

pub use events::{AuthStateEvent, AuthStateObserver};

pub use admin::{list_active_sessions, purge_expired_sessions, revoke_session};

pub use utils::UtilError;

/// Initialize the underlying stores and tables.
///
/// Call once at application start, before constructing a [`SessionManager`].
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    members::init().await?;
    session::init().await?;
    Ok(())
}
