use crate::members::{errors::MemberError, types::TeamMember};
use crate::storage::{DB_TABLE_TEAM_MEMBERS, validate_postgres_table_schema};
use sqlx::{Pool, Postgres};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), MemberError> {
    let table_name = DB_TABLE_TEAM_MEMBERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id TEXT PRIMARY KEY NOT NULL,
            display_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            role TEXT NOT NULL,
            is_admin BOOLEAN NOT NULL,
            status TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#,
        table_name
    ))
    .execute(pool)
    .await
    .map_err(|e| MemberError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the team member table schema matches what we expect
pub(super) async fn validate_member_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), MemberError> {
    let members_table = DB_TABLE_TEAM_MEMBERS.as_str();

    // Expected schema (column name, data type)
    let expected_columns = vec![
        ("id", "text"),
        ("display_name", "text"),
        ("email", "text"),
        ("role", "text"),
        ("is_admin", "boolean"),
        ("status", "text"),
        ("password_hash", "text"),
        ("created_at", "timestamp with time zone"),
        ("updated_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(pool, members_table, &expected_columns, MemberError::Storage)
        .await
}

pub(super) async fn get_member_postgres(
    pool: &Pool<Postgres>,
    id: &str,
) -> Result<Option<TeamMember>, MemberError> {
    let table_name = DB_TABLE_TEAM_MEMBERS.as_str();

    sqlx::query_as::<_, TeamMember>(&format!(
        r#"
        SELECT * FROM {} WHERE id = $1
        "#,
        table_name
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| MemberError::Storage(e.to_string()))
}

pub(super) async fn get_member_by_email_postgres(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<TeamMember>, MemberError> {
    let table_name = DB_TABLE_TEAM_MEMBERS.as_str();

    sqlx::query_as::<_, TeamMember>(&format!(
        r#"
        SELECT * FROM {} WHERE email = $1
        "#,
        table_name
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| MemberError::Storage(e.to_string()))
}

pub(super) async fn upsert_member_postgres(
    pool: &Pool<Postgres>,
    member: TeamMember,
) -> Result<TeamMember, MemberError> {
    let table_name = DB_TABLE_TEAM_MEMBERS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {} (id, display_name, email, role, is_admin, status, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (id) DO UPDATE SET
            display_name = EXCLUDED.display_name,
            email = EXCLUDED.email,
            role = EXCLUDED.role,
            is_admin = EXCLUDED.is_admin,
            status = EXCLUDED.status,
            password_hash = EXCLUDED.password_hash,
            updated_at = EXCLUDED.updated_at
        "#,
        table_name
    ))
    .bind(&member.id)
    .bind(&member.display_name)
    .bind(&member.email)
    .bind(&member.role)
    .bind(member.is_admin)
    .bind(member.status.as_str())
    .bind(&member.password_hash)
    .bind(member.created_at)
    .bind(member.updated_at)
    .execute(pool)
    .await
    .map_err(|e| MemberError::Storage(e.to_string()))?;

    Ok(member)
}

pub(super) async fn update_password_hash_postgres(
    pool: &Pool<Postgres>,
    id: &str,
    password_hash: &str,
) -> Result<(), MemberError> {
    let table_name = DB_TABLE_TEAM_MEMBERS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {} SET password_hash = $1, updated_at = $2 WHERE id = $3
        "#,
        table_name
    ))
    .bind(password_hash)
    .bind(chrono::Utc::now())
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| MemberError::Storage(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(MemberError::NotFound);
    }

    Ok(())
}

pub(super) async fn delete_member_postgres(
    pool: &Pool<Postgres>,
    id: &str,
) -> Result<(), MemberError> {
    let table_name = DB_TABLE_TEAM_MEMBERS.as_str();

    sqlx::query(&format!(
        r#"
        DELETE FROM {} WHERE id = $1
        "#,
        table_name
    ))
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| MemberError::Storage(e.to_string()))?;

    Ok(())
}
