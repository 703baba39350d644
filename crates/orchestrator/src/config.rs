use portalcheck_portal::Credentials;

/// Identity used to probe whether the portal checks credentials at all.
/// The `.invalid` TLD is reserved, so no real account can carry it.
pub const SENTINEL_IDENTITY: &str = "probe@invalid.invalid";
pub const SENTINEL_SECRET: &str = "not-a-real-password";

pub const LOGOUT_QUESTION: &str = "You are already authenticated";
pub const LOGOUT_DETAIL: &str = "To test your credentials, we will need to log you out first.";

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Credentials the portal is expected to reject.
    pub sentinel: Credentials,
    /// Question put to the operator before ending an existing session.
    pub logout_question: String,
    pub logout_detail: String,
    /// Reject a new test while another one is still running.
    pub single_flight: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            sentinel: Credentials::new(SENTINEL_IDENTITY, SENTINEL_SECRET),
            logout_question: LOGOUT_QUESTION.to_string(),
            logout_detail: LOGOUT_DETAIL.to_string(),
            single_flight: true,
        }
    }
}
