mod config;
mod errors;
mod manager;
mod row;
mod types;

pub use errors::SessionError;
pub use manager::SessionManager;
pub use types::{ClientInfo, Member, Permissions, Session, SessionRow};

#[cfg(test)]
pub(crate) use config::{SESSION_CACHE_PREFIX, SESSION_STORE_KEY};
pub(crate) use row::SessionRowStore;

pub(crate) async fn init() -> Result<(), SessionError> {
    SessionRowStore::init().await
}
