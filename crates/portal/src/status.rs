/// Answer to a portal status check.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    /// The portal is reachable and this host already holds a session.
    Connected,
    /// The portal is reachable but no session exists.
    NotConnected,
    Error(String),
}

impl ConnectivityState {
    /// `true` for both `Connected` and `NotConnected`: the portal answered.
    pub fn is_reachable(&self) -> bool {
        match self {
            Self::Connected | Self::NotConnected => true,
            Self::Error(_) => false,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Connected | Self::NotConnected => None,
            Self::Error(reason) => Some(reason),
        }
    }
}

/// Answer to a logon or logout request.
///
/// `Error` and `Failed` are kept apart because portals report them
/// differently (transport/protocol trouble vs. the portal refusing the
/// request); consumers usually treat both as a failure with a reason.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthResult {
    Success,
    Error(String),
    Failed(String),
}

impl AuthResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Collapse into a `Result`, keeping the reason of either failure tag verbatim.
    pub fn into_result(self) -> Result<(), String> {
        match self {
            Self::Success => Ok(()),
            Self::Error(reason) | Self::Failed(reason) => Err(reason),
        }
    }
}
