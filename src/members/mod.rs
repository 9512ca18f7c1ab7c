mod errors;
mod member;
mod types;

pub use errors::MemberError;
pub use types::{MemberStatus, TeamMember};

pub use member::MemberStore;

pub(crate) async fn init() -> Result<(), MemberError> {
    MemberStore::init().await
}
