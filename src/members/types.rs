use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::members::errors::MemberError;

/// Account status of a team member.
///
/// Only `active` members can sign in; `pending` members have been invited but
/// not yet activated, and `inactive` members have been switched off without
/// deleting their record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
    Pending,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Pending => "pending",
        }
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemberStatus {
    type Err = MemberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            "pending" => Ok(MemberStatus::Pending),
            other => Err(MemberError::InvalidData(format!(
                "Unknown member status: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for MemberStatus {
    type Error = MemberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A team member's profile record, owned by the backend.
///
/// Clients hold read-only snapshots; the password hash never leaves the
/// credentials module and is skipped during serialization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct TeamMember {
    /// Unique member identifier
    pub id: String,
    /// Display name shown across the console
    pub display_name: String,
    /// Sign-in email, unique per member
    pub email: String,
    /// Role label, compared as a plain string
    pub role: String,
    /// Whether the member has administrator privileges
    pub is_admin: bool,
    /// Account status
    #[sqlx(try_from = "String")]
    pub status: MemberStatus,
    /// Argon2 PHC string for the member's password
    #[serde(skip)]
    pub password_hash: String,
    /// When the member record was created
    pub created_at: DateTime<Utc>,
    /// When the member record was last updated
    pub updated_at: DateTime<Utc>,
}

impl TeamMember {
    /// Create a new member record in the `pending` state
    pub fn new(
        id: String,
        display_name: String,
        email: String,
        role: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            display_name,
            email,
            role,
            is_admin: false,
            status: MemberStatus::Pending,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}
