/// Auth-state change reported by the backend's own auth layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStateEvent {
    /// A sign-in completed elsewhere; carries the signed-in email
    SignedIn { email: String },
    /// The backend session ended
    SignedOut,
}
