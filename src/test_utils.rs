//! Shared test initialization and fixtures.
//!
//! Tests run against an in-memory sqlite backend and an in-memory local
//! store, configured through `.env_test`. Stores are global, so tests that
//! touch them are serialized with `serial_test`.

use std::sync::Once;

use crate::credentials::hash_password;
use crate::members::{MemberStatus, MemberStore, TeamMember};
use crate::session::{SESSION_CACHE_PREFIX, SESSION_STORE_KEY};
use crate::storage::LOCAL_CACHE_STORE;

/// Centralized test initialization for all tests across the crate.
///
/// Loads `.env_test` (falling back to `.env`) once, fills in in-memory store
/// settings when absent, and warms up the stores so tables exist.
pub(crate) async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        // Fall back to fully in-memory stores when the env file is missing
        let defaults = [
            ("BACKEND_STORE_TYPE", "sqlite"),
            (
                "BACKEND_STORE_URL",
                "sqlite:file:console_session_test?mode=memory&cache=shared",
            ),
            ("LOCAL_STORE_TYPE", "memory"),
            ("LOCAL_STORE_URL", "memory"),
        ];
        for (key, value) in defaults {
            if std::env::var(key).is_err() {
                unsafe {
                    std::env::set_var(key, value);
                }
            }
        }
    });

    ensure_stores_initialized().await;
}

async fn ensure_stores_initialized() {
    if let Err(e) = crate::storage::init().await {
        eprintln!("Warning: Failed to initialize stores: {e}");
    }
    if let Err(e) = MemberStore::init().await {
        eprintln!("Warning: Failed to initialize MemberStore: {e}");
    }
    if let Err(e) = crate::session::init().await {
        eprintln!("Warning: Failed to initialize session table: {e}");
    }
}

/// Remove any session record left behind by a previous test
pub(crate) async fn reset_session_state() {
    let _ = LOCAL_CACHE_STORE
        .lock()
        .await
        .remove(SESSION_CACHE_PREFIX, SESSION_STORE_KEY.as_str())
        .await;
}

/// Upsert an active member with the given email and password
pub(crate) async fn seed_active_member(email: &str, password: &str) -> TeamMember {
    let hash = hash_password(password)
        .await
        .expect("hashing should succeed");
    let mut member = TeamMember::new(
        format!("member-{email}"),
        "Test Member".to_string(),
        email.to_string(),
        "engineer".to_string(),
        hash,
    );
    member.status = MemberStatus::Active;
    MemberStore::upsert_member(member)
        .await
        .expect("seeding member should succeed")
}
