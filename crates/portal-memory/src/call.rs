use std::sync::Arc;
use tokio::sync::Mutex;

use portalcheck_portal::{Credentials, PortalAddress};

/// One request received by an in-memory portal, in arrival order.
///
/// Logons record the identity only; secrets never end up in the log.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PortalCall {
    CheckStatus { address: String },
    Logon { address: String, identity: String },
    Logout { address: String },
}

impl PortalCall {
    pub(crate) fn check_status(address: &PortalAddress) -> Self {
        Self::CheckStatus {
            address: address.to_string(),
        }
    }

    pub(crate) fn logon(address: &PortalAddress, credentials: &Credentials) -> Self {
        Self::Logon {
            address: address.to_string(),
            identity: credentials.identity.clone(),
        }
    }

    pub(crate) fn logout(address: &PortalAddress) -> Self {
        Self::Logout {
            address: address.to_string(),
        }
    }

    pub fn is_logon(&self) -> bool {
        matches!(self, Self::Logon { .. })
    }

    pub fn is_logout(&self) -> bool {
        matches!(self, Self::Logout { .. })
    }
}

/// Shared, append-only record of portal calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<PortalCall>>>,
}

impl CallLog {
    pub(crate) async fn record(&self, call: PortalCall) {
        tracing::trace!(?call, "portal call");
        self.calls.lock().await.push(call);
    }

    pub async fn snapshot(&self) -> Vec<PortalCall> {
        self.calls.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.calls.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.calls.lock().await.is_empty()
    }

    pub async fn clear(&self) {
        self.calls.lock().await.clear();
    }
}
