use crate::storage::BACKEND_DATA_STORE;
use crate::members::{errors::MemberError, types::TeamMember};

use super::postgres::*;
use super::sqlite::*;

pub struct MemberStore;

impl MemberStore {
    /// Initialize the team member table
    pub async fn init() -> Result<(), MemberError> {
        let store = BACKEND_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_member_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(MemberError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Get a member by their ID
    pub async fn get_member(id: &str) -> Result<Option<TeamMember>, MemberError> {
        let store = BACKEND_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_member_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            get_member_postgres(pool, id).await
        } else {
            Err(MemberError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Get a member by their sign-in email
    pub async fn get_member_by_email(email: &str) -> Result<Option<TeamMember>, MemberError> {
        let store = BACKEND_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_member_by_email_sqlite(pool, email).await
        } else if let Some(pool) = store.as_postgres() {
            get_member_by_email_postgres(pool, email).await
        } else {
            Err(MemberError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Create or update a member
    pub async fn upsert_member(member: TeamMember) -> Result<TeamMember, MemberError> {
        let store = BACKEND_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            upsert_member_sqlite(pool, member).await
        } else if let Some(pool) = store.as_postgres() {
            upsert_member_postgres(pool, member).await
        } else {
            Err(MemberError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Replace a member's stored password hash
    pub async fn update_password_hash(id: &str, password_hash: &str) -> Result<(), MemberError> {
        let store = BACKEND_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            update_password_hash_sqlite(pool, id, password_hash).await
        } else if let Some(pool) = store.as_postgres() {
            update_password_hash_postgres(pool, id, password_hash).await
        } else {
            Err(MemberError::Storage("Unsupported database type".to_string()))
        }
    }

    pub async fn delete_member(id: &str) -> Result<(), MemberError> {
        let store = BACKEND_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_member_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_member_postgres(pool, id).await
        } else {
            Err(MemberError::Storage("Unsupported database type".to_string()))
        }
    }
}
