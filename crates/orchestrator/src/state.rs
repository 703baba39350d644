use portalcheck_portal::{AuthResult, ConnectivityState};

use crate::error::TransitionError;
use crate::outcome::{TestFailure, TestOutcome};

/// Steps of the credential test. Each step performs exactly one action.
///
/// The sentinel probe always precedes the real logon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialTestState {
    CheckingStatus,
    ConfirmLogout,
    LoggingOut,
    ProbeSentinel,
    ProbeReal,
}

/// Result of the action performed in a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialEvent {
    Status(ConnectivityState),
    Confirmation(bool),
    Logout(AuthResult),
    SentinelLogon(AuthResult),
    RealLogon(AuthResult),
}

impl CredentialEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::Confirmation(_) => "confirmation",
            Self::Logout(_) => "logout",
            Self::SentinelLogon(_) => "sentinel_logon",
            Self::RealLogon(_) => "real_logon",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Next(CredentialTestState),
    Done(TestOutcome),
}

impl Transition {
    fn fail(failure: TestFailure) -> Self {
        Self::Done(TestOutcome::Failure(failure))
    }
}

impl CredentialTestState {
    pub const INITIAL: Self = Self::CheckingStatus;

    /// Full transition table: state × event → next state or terminal outcome.
    ///
    /// # Errors
    /// Returns [`TransitionError::UnexpectedEvent`] when `event` is not the
    /// result of this state's action.
    pub fn on(self, event: CredentialEvent) -> Result<Transition, TransitionError> {
        use CredentialEvent as E;
        match (self, event) {
            (Self::CheckingStatus, E::Status(status)) => Ok(Self::after_status(status)),
            (Self::ConfirmLogout, E::Confirmation(accepted)) => {
                Ok(Self::after_confirmation(accepted))
            }
            (Self::LoggingOut, E::Logout(result)) => Ok(Self::after_logout(result)),
            (Self::ProbeSentinel, E::SentinelLogon(result)) => {
                Ok(Self::after_sentinel_logon(result))
            }
            (Self::ProbeReal, E::RealLogon(result)) => Ok(Self::after_real_logon(result)),
            (state, event) => Err(TransitionError::UnexpectedEvent {
                state,
                event: event.name(),
            }),
        }
    }

    pub(crate) fn after_status(status: ConnectivityState) -> Transition {
        match status {
            ConnectivityState::Connected => Transition::Next(Self::ConfirmLogout),
            ConnectivityState::NotConnected => Transition::Next(Self::ProbeSentinel),
            ConnectivityState::Error(reason) => {
                Transition::fail(TestFailure::Connectivity(reason))
            }
        }
    }

    pub(crate) fn after_confirmation(accepted: bool) -> Transition {
        if accepted {
            Transition::Next(Self::LoggingOut)
        } else {
            Transition::fail(TestFailure::UserAborted)
        }
    }

    pub(crate) fn after_logout(result: AuthResult) -> Transition {
        match TestFailure::from_auth(result) {
            Ok(()) => Transition::Next(Self::ProbeSentinel),
            Err(failure) => Transition::fail(failure),
        }
    }

    pub(crate) fn after_sentinel_logon(result: AuthResult) -> Transition {
        match result {
            AuthResult::Success => Transition::fail(TestFailure::SecurityPosture),
            // rejection is the expected answer; its reason is irrelevant
            AuthResult::Error(_) | AuthResult::Failed(_) => Transition::Next(Self::ProbeReal),
        }
    }

    pub(crate) fn after_real_logon(result: AuthResult) -> Transition {
        match TestFailure::from_auth(result) {
            Ok(()) => Transition::Done(TestOutcome::Success),
            Err(failure) => Transition::fail(failure),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CheckingStatus => "checking_status",
            Self::ConfirmLogout => "confirm_logout",
            Self::LoggingOut => "logging_out",
            Self::ProbeSentinel => "probe_sentinel",
            Self::ProbeReal => "probe_real",
        }
    }
}

impl std::fmt::Display for CredentialTestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
