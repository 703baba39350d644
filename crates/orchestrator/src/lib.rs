mod config;
mod delivery;
mod error;
mod orchestrator;
mod outcome;
mod prompt;
mod state;
mod workflow;

pub use config::{
    LOGOUT_DETAIL, LOGOUT_QUESTION, OrchestratorConfig, SENTINEL_IDENTITY, SENTINEL_SECRET,
};
pub use delivery::{
    ResultEvent, ResultReceiver, ResultSender, ResultSink, SINK_THREAD_NAME, TracingSink,
    result_channel, spawn_sink_thread,
};
pub use error::{OrchestratorError, TransitionError};
pub use orchestrator::TestOrchestrator;
pub use outcome::{RunId, TestFailure, TestKind, TestOutcome};
pub use prompt::{ConfirmationPrompt, FixedAnswer, TerminalPrompt};
pub use state::{CredentialEvent, CredentialTestState, Transition};
pub use workflow::{run_connectivity_test, run_credential_test};
