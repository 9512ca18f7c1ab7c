use crate::members::{errors::MemberError, types::TeamMember};
use crate::storage::DB_TABLE_TEAM_MEMBERS;
use sqlx::{Pool, Sqlite};

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), MemberError> {
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
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )
        "#,
        table_name
    ))
    .execute(pool)
    .await
    .map_err(|e| MemberError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_member_sqlite(
    pool: &Pool<Sqlite>,
    id: &str,
) -> Result<Option<TeamMember>, MemberError> {
    let table_name = DB_TABLE_TEAM_MEMBERS.as_str();

    sqlx::query_as::<_, TeamMember>(&format!(
        r#"
        SELECT * FROM {} WHERE id = ?
        "#,
        table_name
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| MemberError::Storage(e.to_string()))
}

pub(super) async fn get_member_by_email_sqlite(
    pool: &Pool<Sqlite>,
    email: &str,
) -> Result<Option<TeamMember>, MemberError> {
    let table_name = DB_TABLE_TEAM_MEMBERS.as_str();

    sqlx::query_as::<_, TeamMember>(&format!(
        r#"
        SELECT * FROM {} WHERE email = ?
        "#,
        table_name
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| MemberError::Storage(e.to_string()))
}

pub(super) async fn upsert_member_sqlite(
    pool: &Pool<Sqlite>,
    member: TeamMember,
) -> Result<TeamMember, MemberError> {
    let table_name = DB_TABLE_TEAM_MEMBERS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {} (id, display_name, email, role, is_admin, status, password_hash, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (id) DO UPDATE SET
            display_name = excluded.display_name,
            email = excluded.email,
            role = excluded.role,
            is_admin = excluded.is_admin,
            status = excluded.status,
            password_hash = excluded.password_hash,
            updated_at = excluded.updated_at
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

pub(super) async fn update_password_hash_sqlite(
    pool: &Pool<Sqlite>,
    id: &str,
    password_hash: &str,
) -> Result<(), MemberError> {
    let table_name = DB_TABLE_TEAM_MEMBERS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {} SET password_hash = ?, updated_at = ? WHERE id = ?
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

pub(super) async fn delete_member_sqlite(pool: &Pool<Sqlite>, id: &str) -> Result<(), MemberError> {
    let table_name = DB_TABLE_TEAM_MEMBERS.as_str();

    sqlx::query(&format!(
        r#"
        DELETE FROM {} WHERE id = ?
        "#,
        table_name
    ))
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| MemberError::Storage(e.to_string()))?;

    Ok(())
}
