use crate::members::MemberStore;

use super::errors::CredentialError;
use super::hash::verify_password;
use super::types::CredentialVerdict;

// One message for unknown email and wrong password, so the verdict does not
// leak which of the two was the problem.
const INVALID_CREDENTIALS: &str = "Invalid email or password";
const ACCOUNT_NOT_ACTIVE: &str = "Account is not active";

/// Check an email/password pair against the stored team member credentials.
///
/// Returns a discriminated verdict: `Valid` with the member reference, or
/// `Invalid` with a display reason. Backend failures surface as
/// `CredentialError`, not as an invalid verdict.
pub async fn validate_credentials(
    email: &str,
    password: &str,
) -> Result<CredentialVerdict, CredentialError> {
    let Some(member) = MemberStore::get_member_by_email(email).await? else {
        tracing::debug!("Credential check for unknown email");
        return Ok(CredentialVerdict::invalid(INVALID_CREDENTIALS));
    };

    if !member.is_active() {
        tracing::debug!("Credential check for non-active member {}", member.id);
        return Ok(CredentialVerdict::invalid(ACCOUNT_NOT_ACTIVE));
    }

    if !verify_password(password, &member.password_hash).await? {
        tracing::debug!("Password mismatch for member {}", member.id);
        return Ok(CredentialVerdict::invalid(INVALID_CREDENTIALS));
    }

    Ok(CredentialVerdict::Valid {
        member_id: member.id,
        is_admin: member.is_admin,
    })
}
