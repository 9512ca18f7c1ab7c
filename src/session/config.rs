use std::sync::LazyLock;

/// Cache namespace for the local session record
pub(crate) const SESSION_CACHE_PREFIX: &str = "session";

/// Fixed key of the single local session record; one session per client context
pub(crate) static SESSION_STORE_KEY: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SESSION_STORE_KEY")
        .ok()
        .unwrap_or("current_session".to_string())
});

/// Session lifetime in seconds
pub(crate) static SESSION_TTL: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("SESSION_TTL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(86400) // Default to 24 hours if not set or invalid
});

/// Refresh is a no-op while more than this many seconds remain
pub(crate) static SESSION_REFRESH_WINDOW: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("SESSION_REFRESH_WINDOW")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3600) // Default to 1 hour if not set or invalid
});
