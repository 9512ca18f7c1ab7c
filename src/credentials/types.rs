/// Outcome of a credential check.
///
/// `Invalid` carries a human-readable reason suitable for display; callers
/// must not branch on its text. Transport and storage failures are reported
/// separately as [`CredentialError`](super::CredentialError), never folded
/// into `Invalid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialVerdict {
    Valid { member_id: String, is_admin: bool },
    Invalid { reason: String },
}

impl CredentialVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, CredentialVerdict::Valid { .. })
    }

    pub(crate) fn invalid(reason: &str) -> Self {
        CredentialVerdict::Invalid {
            reason: reason.to_string(),
        }
    }
}
