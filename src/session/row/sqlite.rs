use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use crate::session::errors::SessionError;
use crate::session::types::SessionRow;
use crate::storage::DB_TABLE_USER_SESSIONS;

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            token TEXT PRIMARY KEY NOT NULL,
            member_id TEXT NOT NULL,
            ip_address TEXT,
            user_agent TEXT,
            created_at TIMESTAMP NOT NULL,
            expires_at TIMESTAMP NOT NULL
        )
        "#,
        table_name
    ))
    .execute(pool)
    .await
    .map_err(|e| SessionError::Persistence(e.to_string()))?;

    Ok(())
}

pub(super) async fn insert_session_sqlite(
    pool: &Pool<Sqlite>,
    row: &SessionRow,
) -> Result<(), SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {} (token, member_id, ip_address, user_agent, created_at, expires_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
        table_name
    ))
    .bind(&row.token)
    .bind(&row.member_id)
    .bind(&row.ip_address)
    .bind(&row.user_agent)
    .bind(row.created_at)
    .bind(row.expires_at)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Persistence(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_session_sqlite(
    pool: &Pool<Sqlite>,
    token: &str,
) -> Result<Option<SessionRow>, SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    sqlx::query_as::<_, SessionRow>(&format!(
        r#"
        SELECT * FROM {} WHERE token = ?
        "#,
        table_name
    ))
    .bind(token)
    .fetch_optional(pool)
    .await
    .map_err(|e| SessionError::Persistence(e.to_string()))
}

pub(super) async fn update_expiry_sqlite(
    pool: &Pool<Sqlite>,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<u64, SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {} SET expires_at = ? WHERE token = ?
        "#,
        table_name
    ))
    .bind(expires_at)
    .bind(token)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Persistence(e.to_string()))?;

    Ok(result.rows_affected())
}

pub(super) async fn delete_session_sqlite(
    pool: &Pool<Sqlite>,
    token: &str,
) -> Result<u64, SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    let result = sqlx::query(&format!(
        r#"
        DELETE FROM {} WHERE token = ?
        "#,
        table_name
    ))
    .bind(token)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Persistence(e.to_string()))?;

    Ok(result.rows_affected())
}

pub(super) async fn list_active_sessions_sqlite(
    pool: &Pool<Sqlite>,
    now: DateTime<Utc>,
) -> Result<Vec<SessionRow>, SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    sqlx::query_as::<_, SessionRow>(&format!(
        r#"
        SELECT * FROM {} WHERE expires_at > ? ORDER BY created_at
        "#,
        table_name
    ))
    .bind(now)
    .fetch_all(pool)
    .await
    .map_err(|e| SessionError::Persistence(e.to_string()))
}

pub(super) async fn purge_expired_sessions_sqlite(
    pool: &Pool<Sqlite>,
    now: DateTime<Utc>,
) -> Result<u64, SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    let result = sqlx::query(&format!(
        r#"
        DELETE FROM {} WHERE expires_at <= ?
        "#,
        table_name
    ))
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Persistence(e.to_string()))?;

    Ok(result.rows_affected())
}
