use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::members::{MemberStatus, TeamMember};
use crate::session::errors::SessionError;
use crate::storage::CacheData;

/// Read-only snapshot of a team member, taken at session creation.
///
/// The snapshot does not track later profile changes; a role change lands in
/// the session only after the next sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub is_admin: bool,
    pub status: MemberStatus,
}

impl From<TeamMember> for Member {
    fn from(member: TeamMember) -> Self {
        Self {
            id: member.id,
            display_name: member.display_name,
            email: member.email,
            role: member.role,
            is_admin: member.is_admin,
            status: member.status,
        }
    }
}

/// The record proving a user is currently signed in.
///
/// Serialized to the local store as
/// `{teamMember, isAdmin, sessionToken, expiresAt}`. A session is valid iff it
/// is present, well-formed, and `expires_at` lies in the future.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "teamMember")]
    pub member: Member,
    pub is_admin: bool,
    #[serde(rename = "sessionToken")]
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Time left before expiry; negative once expired
    pub fn remaining(&self) -> Duration {
        self.expires_at - Utc::now()
    }

    /// Structural validity of a record read back from storage
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.token.is_empty() && !self.member.id.is_empty() && !self.member.email.is_empty()
    }
}

impl From<&Session> for CacheData {
    fn from(session: &Session) -> Self {
        Self {
            value: serde_json::to_string(session).expect("Failed to serialize Session"),
        }
    }
}

impl TryFrom<CacheData> for Session {
    type Error = SessionError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value).map_err(|e| SessionError::Storage(e.to_string()))
    }
}

/// One row of the remote `user_sessions` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SessionRow {
    pub token: String,
    pub member_id: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Request metadata recorded on the remote session row at sign-in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Console capabilities derived from the role label and admin flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub can_manage_team: bool,
    pub can_manage_clients: bool,
    pub can_manage_newsletters: bool,
    pub can_view_reports: bool,
}

impl Permissions {
    /// Role checks are plain string comparisons; there is no policy engine.
    pub(crate) fn for_member(member: &Member, is_admin: bool) -> Self {
        let role = member.role.as_str();
        let is_manager = role.eq_ignore_ascii_case("manager");
        let is_marketing = role.eq_ignore_ascii_case("marketing");

        Self {
            can_manage_team: is_admin,
            can_manage_clients: is_admin || is_manager,
            can_manage_newsletters: is_admin || is_manager || is_marketing,
            can_view_reports: true,
        }
    }
}
