use chrono::{DateTime, Utc};

use crate::session::errors::SessionError;
use crate::session::types::SessionRow;
use crate::storage::BACKEND_DATA_STORE;

use super::postgres::*;
use super::sqlite::*;

/// Facade over the remote `user_sessions` table
pub(crate) struct SessionRowStore;

impl SessionRowStore {
    /// Initialize the session table
    pub(crate) async fn init() -> Result<(), SessionError> {
        let store = BACKEND_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_session_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(SessionError::Persistence(
                "Unsupported database type".to_string(),
            )),
        }
    }

    pub(crate) async fn insert(row: &SessionRow) -> Result<(), SessionError> {
        let store = BACKEND_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            insert_session_sqlite(pool, row).await
        } else if let Some(pool) = store.as_postgres() {
            insert_session_postgres(pool, row).await
        } else {
            Err(SessionError::Persistence(
                "Unsupported database type".to_string(),
            ))
        }
    }

    pub(crate) async fn get(token: &str) -> Result<Option<SessionRow>, SessionError> {
        let store = BACKEND_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_session_sqlite(pool, token).await
        } else if let Some(pool) = store.as_postgres() {
            get_session_postgres(pool, token).await
        } else {
            Err(SessionError::Persistence(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Extend a session row's expiry; returns the number of rows updated
    pub(crate) async fn update_expiry(
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<u64, SessionError> {
        let store = BACKEND_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            update_expiry_sqlite(pool, token, expires_at).await
        } else if let Some(pool) = store.as_postgres() {
            update_expiry_postgres(pool, token, expires_at).await
        } else {
            Err(SessionError::Persistence(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Delete a session row; returns the number of rows deleted
    pub(crate) async fn delete(token: &str) -> Result<u64, SessionError> {
        let store = BACKEND_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_session_sqlite(pool, token).await
        } else if let Some(pool) = store.as_postgres() {
            delete_session_postgres(pool, token).await
        } else {
            Err(SessionError::Persistence(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// All rows whose expiry lies after `now`
    pub(crate) async fn list_active(
        now: DateTime<Utc>,
    ) -> Result<Vec<SessionRow>, SessionError> {
        let store = BACKEND_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            list_active_sessions_sqlite(pool, now).await
        } else if let Some(pool) = store.as_postgres() {
            list_active_sessions_postgres(pool, now).await
        } else {
            Err(SessionError::Persistence(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Delete rows whose expiry is at or before `now`; returns the count
    pub(crate) async fn purge_expired(now: DateTime<Utc>) -> Result<u64, SessionError> {
        let store = BACKEND_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            purge_expired_sessions_sqlite(pool, now).await
        } else if let Some(pool) = store.as_postgres() {
            purge_expired_sessions_postgres(pool, now).await
        } else {
            Err(SessionError::Persistence(
                "Unsupported database type".to_string(),
            ))
        }
    }
}
