use async_trait::async_trait;

use crate::endpoint::{Credentials, PortalAddress};
use crate::status::{AuthResult, ConnectivityState};

/// Network operations offered by an authentication portal.
///
/// Failures are part of the answer rather than an `Err`: a portal that
/// cannot be reached reports `ConnectivityState::Error`, a refused logon
/// reports `AuthResult::Failed`, and so on. Implementations own their
/// transport and session handling.
#[async_trait]
pub trait PortalClient: Send + Sync {
    /// Ask the portal whether this host currently holds a session.
    async fn check_status(&self, address: &PortalAddress) -> ConnectivityState;

    async fn logon(&self, address: &PortalAddress, credentials: &Credentials) -> AuthResult;

    /// End the session this host holds on the portal.
    async fn logout(&self, address: &PortalAddress) -> AuthResult;
}
