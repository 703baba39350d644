use thiserror::Error;

use crate::state::CredentialTestState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    /// Required settings are missing; the test was not started.
    #[error("configuration invalid: {0}")]
    ConfigInvalid(String),

    /// Another test is still running on this orchestrator.
    #[error("a portal test is already in progress")]
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("unexpected {event} event in state {state}")]
    UnexpectedEvent {
        state: CredentialTestState,
        event: &'static str,
    },
}
