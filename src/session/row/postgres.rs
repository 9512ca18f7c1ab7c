use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::session::errors::SessionError;
use crate::session::types::SessionRow;
use crate::storage::{DB_TABLE_USER_SESSIONS, validate_postgres_table_schema};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            token TEXT PRIMARY KEY NOT NULL,
            member_id TEXT NOT NULL,
            ip_address TEXT,
            user_agent TEXT,
            created_at TIMESTAMPTZ NOT NULL,
            expires_at TIMESTAMPTZ NOT NULL
        )
        "#,
        table_name
    ))
    .execute(pool)
    .await
    .map_err(|e| SessionError::Persistence(e.to_string()))?;

    Ok(())
}

/// Validates that the session table schema matches what we expect
pub(super) async fn validate_session_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), SessionError> {
    let sessions_table = DB_TABLE_USER_SESSIONS.as_str();

    // Expected schema (column name, data type)
    let expected_columns = vec![
        ("token", "text"),
        ("member_id", "text"),
        ("ip_address", "text"),
        ("user_agent", "text"),
        ("created_at", "timestamp with time zone"),
        ("expires_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(
        pool,
        sessions_table,
        &expected_columns,
        SessionError::Persistence,
    )
    .await
}

pub(super) async fn insert_session_postgres(
    pool: &Pool<Postgres>,
    row: &SessionRow,
) -> Result<(), SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {} (token, member_id, ip_address, user_agent, created_at, expires_at)
        VALUES ($1, $2, $3, $4, $5, $6)
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

pub(super) async fn get_session_postgres(
    pool: &Pool<Postgres>,
    token: &str,
) -> Result<Option<SessionRow>, SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    sqlx::query_as::<_, SessionRow>(&format!(
        r#"
        SELECT * FROM {} WHERE token = $1
        "#,
        table_name
    ))
    .bind(token)
    .fetch_optional(pool)
    .await
    .map_err(|e| SessionError::Persistence(e.to_string()))
}

pub(super) async fn update_expiry_postgres(
    pool: &Pool<Postgres>,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<u64, SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {} SET expires_at = $1 WHERE token = $2
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

pub(super) async fn delete_session_postgres(
    pool: &Pool<Postgres>,
    token: &str,
) -> Result<u64, SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    let result = sqlx::query(&format!(
        r#"
        DELETE FROM {} WHERE token = $1
        "#,
        table_name
    ))
    .bind(token)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Persistence(e.to_string()))?;

    Ok(result.rows_affected())
}

pub(super) async fn list_active_sessions_postgres(
    pool: &Pool<Postgres>,
    now: DateTime<Utc>,
) -> Result<Vec<SessionRow>, SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    sqlx::query_as::<_, SessionRow>(&format!(
        r#"
        SELECT * FROM {} WHERE expires_at > $1 ORDER BY created_at
        "#,
        table_name
    ))
    .bind(now)
    .fetch_all(pool)
    .await
    .map_err(|e| SessionError::Persistence(e.to_string()))
}

pub(super) async fn purge_expired_sessions_postgres(
    pool: &Pool<Postgres>,
    now: DateTime<Utc>,
) -> Result<u64, SessionError> {
    let table_name = DB_TABLE_USER_SESSIONS.as_str();

    let result = sqlx::query(&format!(
        r#"
        DELETE FROM {} WHERE expires_at <= $1
        "#,
        table_name
    ))
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Persistence(e.to_string()))?;

    Ok(result.rows_affected())
}
