mod config;
mod types;

pub(crate) use config::{BACKEND_DATA_STORE, DB_TABLE_TEAM_MEMBERS, DB_TABLE_USER_SESSIONS};
