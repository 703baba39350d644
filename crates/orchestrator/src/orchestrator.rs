use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Instrument;

use portalcheck_portal::PortalClient;
use portalcheck_settings::SettingsProvider;

use crate::config::OrchestratorConfig;
use crate::delivery::{ResultEvent, ResultSender};
use crate::error::OrchestratorError;
use crate::outcome::{RunId, TestKind, TestOutcome};
use crate::prompt::ConfirmationPrompt;
use crate::workflow::{run_connectivity_test, run_credential_test};

/// Runs portal tests against the configured endpoint and reports them.
///
/// Every started run sends a pending event followed by exactly one terminal
/// event through the result channel, and returns the terminal outcome to the
/// caller. Nothing is kept between runs.
pub struct TestOrchestrator {
    client: Arc<dyn PortalClient>,
    prompt: Arc<dyn ConfirmationPrompt>,
    settings: Arc<dyn SettingsProvider>,
    results: ResultSender,
    config: OrchestratorConfig,
    in_flight: AtomicBool,
}

impl TestOrchestrator {
    pub fn new(
        client: Arc<dyn PortalClient>,
        prompt: Arc<dyn ConfirmationPrompt>,
        settings: Arc<dyn SettingsProvider>,
        results: ResultSender,
    ) -> Self {
        Self {
            client,
            prompt,
            settings,
            results,
            config: OrchestratorConfig::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// `true` while a single-flight run holds the orchestrator.
    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Check that the configured portal answers.
    ///
    /// # Errors
    /// [`OrchestratorError::ConfigInvalid`] if no portal address is configured,
    /// [`OrchestratorError::Busy`] if another run is in progress. In both
    /// cases nothing is sent to the portal or the result sink.
    pub async fn test_connectivity(&self) -> Result<TestOutcome, OrchestratorError> {
        let address = self.settings.portal_address().ok_or_else(|| {
            OrchestratorError::ConfigInvalid("portal address is not configured".to_string())
        })?;
        let _flight = self.begin()?;

        let workflow = run_connectivity_test(self.client.as_ref(), &address);
        Ok(self.report(TestKind::Connectivity, workflow).await)
    }

    /// Check that the portal enforces credentials and accepts the configured ones.
    ///
    /// # Errors
    /// [`OrchestratorError::ConfigInvalid`] if the portal address or the
    /// credentials are not configured, [`OrchestratorError::Busy`] if another
    /// run is in progress. In both cases nothing is sent to the portal or the
    /// result sink.
    ///
    /// # Panics
    /// Must be awaited inside a tokio runtime, see [`run_credential_test`].
    pub async fn test_credentials(&self) -> Result<TestOutcome, OrchestratorError> {
        if self.settings.portal_address().is_none() {
            return Err(OrchestratorError::ConfigInvalid(
                "portal address is not configured".to_string(),
            ));
        }
        let endpoint = self.settings.portal_endpoint().ok_or_else(|| {
            OrchestratorError::ConfigInvalid("credentials are not configured".to_string())
        })?;
        let _flight = self.begin()?;

        let workflow = run_credential_test(
            self.client.as_ref(),
            Arc::clone(&self.prompt),
            &endpoint,
            &self.config,
        );
        Ok(self.report(TestKind::Credentials, workflow).await)
    }

    fn begin(&self) -> Result<Option<FlightGuard<'_>>, OrchestratorError> {
        if !self.config.single_flight {
            return Ok(None);
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("rejecting portal test, another one is in progress");
            return Err(OrchestratorError::Busy);
        }
        Ok(Some(FlightGuard(&self.in_flight)))
    }

    /// Bracket `workflow` with its pending and terminal events.
    async fn report<F>(&self, test: TestKind, workflow: F) -> TestOutcome
    where
        F: Future<Output = TestOutcome>,
    {
        let run_id = RunId::new();
        let span = tracing::info_span!("portal_test", %run_id, %test);

        async {
            self.results.send(ResultEvent::new(
                run_id.clone(),
                test,
                TestOutcome::Pending,
            ));

            let outcome = workflow.await;
            match &outcome {
                TestOutcome::Failure(failure) => {
                    tracing::info!(reason = %failure, "portal test failed");
                }
                TestOutcome::Success => {
                    tracing::info!("portal test succeeded");
                }
                TestOutcome::Pending => {
                    tracing::warn!("portal test ended without a terminal outcome");
                }
            }

            self.results
                .send(ResultEvent::new(run_id, test, outcome.clone()));
            outcome
        }
        .instrument(span)
        .await
    }
}

/// Clears the in-flight flag when the run ends, however it ends.
#[derive(Debug)]
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
