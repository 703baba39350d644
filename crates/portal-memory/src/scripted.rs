use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use portalcheck_portal::{AuthResult, ConnectivityState, Credentials, PortalAddress, PortalClient};

use crate::call::{CallLog, PortalCall};

/// Portal whose answers are fixed up front.
///
/// Every reply is a pure function of the request, so repeated runs against
/// the same script see the same answers. Logon replies are chosen by
/// identity, falling back to a default.
#[derive(Debug, Clone)]
pub struct ScriptedPortal {
    status: ConnectivityState,
    logout: AuthResult,
    logon_by_identity: HashMap<String, AuthResult>,
    logon_default: AuthResult,
    latency: Option<Duration>,
    log: CallLog,
}

impl Default for ScriptedPortal {
    fn default() -> Self {
        Self {
            status: ConnectivityState::NotConnected,
            logout: AuthResult::Success,
            logon_by_identity: HashMap::new(),
            logon_default: AuthResult::Failed("invalid credentials".to_string()),
            latency: None,
            log: CallLog::default(),
        }
    }
}

impl ScriptedPortal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_status(mut self, status: ConnectivityState) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_logout(mut self, reply: AuthResult) -> Self {
        self.logout = reply;
        self
    }

    /// Reply used for logons by `identity`.
    #[must_use]
    pub fn with_logon_for(mut self, identity: impl Into<String>, reply: AuthResult) -> Self {
        self.logon_by_identity.insert(identity.into(), reply);
        self
    }

    /// Reply used for logons by any identity without a dedicated entry.
    #[must_use]
    pub fn with_logon_default(mut self, reply: AuthResult) -> Self {
        self.logon_default = reply;
        self
    }

    /// Delay every reply, to keep a call outstanding for a while.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> &CallLog {
        &self.log
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl PortalClient for ScriptedPortal {
    async fn check_status(&self, address: &PortalAddress) -> ConnectivityState {
        self.log.record(PortalCall::check_status(address)).await;
        self.delay().await;
        self.status.clone()
    }

    async fn logon(&self, address: &PortalAddress, credentials: &Credentials) -> AuthResult {
        self.log.record(PortalCall::logon(address, credentials)).await;
        self.delay().await;
        self.logon_by_identity
            .get(&credentials.identity)
            .unwrap_or(&self.logon_default)
            .clone()
    }

    async fn logout(&self, address: &PortalAddress) -> AuthResult {
        self.log.record(PortalCall::logout(address)).await;
        self.delay().await;
        self.logout.clone()
    }
}
