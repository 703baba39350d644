use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use portalcheck_portal::{AuthResult, ConnectivityState, Credentials, PortalAddress, PortalClient};

use crate::call::{CallLog, PortalCall};

#[derive(Debug, Clone)]
pub struct MemoryPortalConfig {
    /// Address the simulated portal answers on. Requests for any other
    /// address are answered with an error.
    pub address: PortalAddress,
    /// Grant a session to whatever credentials are presented.
    pub accept_any: bool,
    pub reachable: bool,
    pub latency: Option<Duration>,
}

impl Default for MemoryPortalConfig {
    fn default() -> Self {
        Self {
            address: PortalAddress::new("https://portal.local"),
            accept_any: false,
            reachable: true,
            latency: None,
        }
    }
}

struct PortalState {
    /// identity -> secret
    accounts: HashMap<String, String>,
    /// Identity of the session this host holds, if any.
    session: Option<String>,
}

/// Stateful simulated portal: keeps accounts and the host's session.
///
/// A successful logon opens a session, a logout closes it, and the status
/// check reports whether one is open.
pub struct MemoryPortal {
    config: MemoryPortalConfig,
    state: Arc<Mutex<PortalState>>,
    log: CallLog,
}

impl MemoryPortal {
    #[must_use]
    pub fn new(config: MemoryPortalConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(PortalState {
                accounts: HashMap::new(),
                session: None,
            })),
            log: CallLog::default(),
        }
    }

    pub async fn add_account(&self, identity: impl Into<String>, secret: impl Into<String>) {
        self.state
            .lock()
            .await
            .accounts
            .insert(identity.into(), secret.into());
    }

    /// Open a session for `identity` without going through logon.
    pub async fn open_session(&self, identity: impl Into<String>) {
        self.state.lock().await.session = Some(identity.into());
    }

    pub async fn session(&self) -> Option<String> {
        self.state.lock().await.session.clone()
    }

    pub fn calls(&self) -> &CallLog {
        &self.log
    }

    pub fn address(&self) -> &PortalAddress {
        &self.config.address
    }

    /// Reason to refuse the request before looking at portal state.
    async fn precheck(&self, address: &PortalAddress) -> Option<String> {
        if let Some(latency) = self.config.latency {
            tokio::time::sleep(latency).await;
        }
        if !self.config.reachable {
            return Some(format!("{address} is unreachable"));
        }
        if *address != self.config.address {
            return Some(format!("no portal answering at {address}"));
        }
        None
    }
}

#[async_trait]
impl PortalClient for MemoryPortal {
    async fn check_status(&self, address: &PortalAddress) -> ConnectivityState {
        self.log.record(PortalCall::check_status(address)).await;
        if let Some(reason) = self.precheck(address).await {
            return ConnectivityState::Error(reason);
        }

        if self.state.lock().await.session.is_some() {
            ConnectivityState::Connected
        } else {
            ConnectivityState::NotConnected
        }
    }

    async fn logon(&self, address: &PortalAddress, credentials: &Credentials) -> AuthResult {
        self.log.record(PortalCall::logon(address, credentials)).await;
        if let Some(reason) = self.precheck(address).await {
            return AuthResult::Error(reason);
        }

        let mut state = self.state.lock().await;
        let known = state
            .accounts
            .get(&credentials.identity)
            .is_some_and(|secret| secret == credentials.secret.expose());

        if self.config.accept_any || known {
            tracing::debug!(identity = %credentials.identity, "session opened");
            state.session = Some(credentials.identity.clone());
            AuthResult::Success
        } else {
            AuthResult::Failed("invalid credentials".to_string())
        }
    }

    async fn logout(&self, address: &PortalAddress) -> AuthResult {
        self.log.record(PortalCall::logout(address)).await;
        if let Some(reason) = self.precheck(address).await {
            return AuthResult::Error(reason);
        }

        match self.state.lock().await.session.take() {
            Some(identity) => {
                tracing::debug!(%identity, "session closed");
                AuthResult::Success
            }
            None => AuthResult::Failed("no active session".to_string()),
        }
    }
}
