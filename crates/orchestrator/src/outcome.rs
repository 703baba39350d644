use std::fmt;

use portalcheck_portal::{AuthResult, ConnectivityState};

/// Why a portal test failed. `Display` is the reason shown to the operator.
///
/// Reasons that come from the portal are carried verbatim.
#[derive(
    Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TestFailure {
    /// The status check failed.
    #[error("{0}")]
    Connectivity(String),

    /// A logon or logout was refused or errored.
    #[error("{0}")]
    Auth(String),

    /// The operator declined to end the existing session.
    #[error("Test aborted")]
    UserAborted,

    /// The portal granted a session to the sentinel credentials.
    #[error("The portal is blindly accepting any credentials.")]
    SecurityPosture,
}

impl TestFailure {
    /// Both auth failure tags collapse into [`TestFailure::Auth`].
    pub(crate) fn from_auth(result: AuthResult) -> Result<(), Self> {
        result.into_result().map_err(Self::Auth)
    }
}

/// Report for one test run, as seen by the result sink.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestOutcome {
    Pending,
    Success,
    Failure(TestFailure),
}

impl TestOutcome {
    /// Connectivity test: any answer from the portal counts as reachable.
    pub(crate) fn from_connectivity(state: ConnectivityState) -> Self {
        match state {
            ConnectivityState::Connected | ConnectivityState::NotConnected => Self::Success,
            ConnectivityState::Error(reason) => Self::Failure(TestFailure::Connectivity(reason)),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn failure(&self) -> Option<&TestFailure> {
        match self {
            Self::Failure(failure) => Some(failure),
            Self::Pending | Self::Success => None,
        }
    }

    pub fn reason(&self) -> Option<String> {
        self.failure().map(ToString::to_string)
    }
}

/// Which workflow a run belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    Connectivity,
    Credentials,
}

impl TestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::Credentials => "credentials",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one test invocation in logs and result events (ULID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
