mod cache_store;
mod data_store;
mod errors;
mod schema_validation;
mod types;

pub(crate) async fn init() -> Result<(), errors::StorageError> {
    let _ = *cache_store::LOCAL_CACHE_STORE;
    let _ = *data_store::BACKEND_DATA_STORE;

    Ok(())
}

pub(crate) use cache_store::LOCAL_CACHE_STORE;
pub(crate) use types::CacheData;

pub(crate) use data_store::{BACKEND_DATA_STORE, DB_TABLE_TEAM_MEMBERS, DB_TABLE_USER_SESSIONS};

pub(crate) use errors::StorageError;
pub(crate) use schema_validation::validate_postgres_table_schema;
