//! Shared setup for integration tests: environment, store warm-up, fixtures.

use std::sync::Once;

use console_session::{MemberStatus, MemberStore, TeamMember, hash_password};

/// Load the test environment and initialize the stores.
///
/// Stores are process-global, so tests calling this must run serialized.
pub async fn setup() {
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
                "sqlite:file:console_session_integration?mode=memory&cache=shared",
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

    console_session::init()
        .await
        .expect("store initialization should succeed");
}

/// Upsert an active member with a known password
pub async fn seed_member(email: &str, password: &str, is_admin: bool) -> TeamMember {
    let hash = hash_password(password)
        .await
        .expect("hashing should succeed");
    let mut member = TeamMember::new(
        format!("member-{email}"),
        "Integration Member".to_string(),
        email.to_string(),
        "engineer".to_string(),
        hash,
    );
    member.status = MemberStatus::Active;
    member.is_admin = is_admin;
    MemberStore::upsert_member(member)
        .await
        .expect("seeding member should succeed")
}
