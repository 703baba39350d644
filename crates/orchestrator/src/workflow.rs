use std::sync::Arc;

use portalcheck_portal::{PortalAddress, PortalClient, PortalEndpoint};

use crate::config::OrchestratorConfig;
use crate::outcome::TestOutcome;
use crate::prompt::ConfirmationPrompt;
use crate::state::{CredentialTestState, Transition};

/// Check that the portal answers at `address`. One status check, no credentials.
pub async fn run_connectivity_test(
    client: &dyn PortalClient,
    address: &PortalAddress,
) -> TestOutcome {
    let status = client.check_status(address).await;
    tracing::debug!(?status, "status check answered");
    TestOutcome::from_connectivity(status)
}

/// Check that the portal enforces credentials and accepts the endpoint's.
///
/// Drives [`CredentialTestState`] from its initial state to a terminal
/// outcome. Each state issues its one action and waits for the answer
/// before the next state is entered, so at most one portal call is ever
/// outstanding and the operator is never asked while one is.
///
/// # Panics
/// The logout confirmation runs on tokio's blocking pool, so this must be
/// polled inside a tokio runtime.
pub async fn run_credential_test(
    client: &dyn PortalClient,
    prompt: Arc<dyn ConfirmationPrompt>,
    endpoint: &PortalEndpoint,
    config: &OrchestratorConfig,
) -> TestOutcome {
    let address = &endpoint.address;
    let mut state = CredentialTestState::INITIAL;

    loop {
        let transition = match state {
            CredentialTestState::CheckingStatus => {
                CredentialTestState::after_status(client.check_status(address).await)
            }
            CredentialTestState::ConfirmLogout => {
                CredentialTestState::after_confirmation(confirm_logout(&prompt, config).await)
            }
            CredentialTestState::LoggingOut => {
                CredentialTestState::after_logout(client.logout(address).await)
            }
            CredentialTestState::ProbeSentinel => CredentialTestState::after_sentinel_logon(
                client.logon(address, &config.sentinel).await,
            ),
            CredentialTestState::ProbeReal => {
                tracing::debug!(
                    identity = %endpoint.credentials.identity,
                    "trying real credentials"
                );
                CredentialTestState::after_real_logon(
                    client.logon(address, &endpoint.credentials).await,
                )
            }
        };

        match transition {
            Transition::Next(next) => {
                tracing::debug!(from = %state, to = %next, "credential test transition");
                state = next;
            }
            Transition::Done(outcome) => {
                tracing::debug!(from = %state, ?outcome, "credential test finished");
                return outcome;
            }
        }
    }
}

/// Ask the operator on the blocking pool; a prompt that panics counts as "no".
async fn confirm_logout(
    prompt: &Arc<dyn ConfirmationPrompt>,
    config: &OrchestratorConfig,
) -> bool {
    let prompt = Arc::clone(prompt);
    let question = config.logout_question.clone();
    let detail = config.logout_detail.clone();

    match tokio::task::spawn_blocking(move || prompt.ask(&question, &detail)).await {
        Ok(accepted) => {
            tracing::debug!(accepted, "logout confirmation answered");
            accepted
        }
        Err(e) => {
            tracing::warn!(error = %e, "confirmation prompt failed, treating as declined");
            false
        }
    }
}
