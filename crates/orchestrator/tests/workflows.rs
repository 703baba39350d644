//! Workflow-level behavior against scripted portals.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use portalcheck_orchestrator::{
    ConfirmationPrompt, OrchestratorConfig, SENTINEL_IDENTITY, TestFailure, TestOutcome,
    run_connectivity_test, run_credential_test,
};
use portalcheck_portal::{AuthResult, ConnectivityState, Credentials, PortalAddress, PortalEndpoint};
use portalcheck_portal_memory::{PortalCall, ScriptedPortal};

const ADDRESS: &str = "https://portal.example.net";
const IDENTITY: &str = "alice@example.com";

fn endpoint() -> PortalEndpoint {
    PortalEndpoint::new(
        PortalAddress::new(ADDRESS),
        Credentials::new(IDENTITY, "correct horse"),
    )
}

fn status_call() -> PortalCall {
    PortalCall::CheckStatus {
        address: ADDRESS.into(),
    }
}

fn logout_call() -> PortalCall {
    PortalCall::Logout {
        address: ADDRESS.into(),
    }
}

fn logon_call(identity: &str) -> PortalCall {
    PortalCall::Logon {
        address: ADDRESS.into(),
        identity: identity.into(),
    }
}

/// Prompt that counts how often it was asked.
struct CountingPrompt {
    answer: bool,
    asked: AtomicUsize,
}

impl CountingPrompt {
    fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            asked: AtomicUsize::new(0),
        })
    }

    fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl ConfirmationPrompt for CountingPrompt {
    fn ask(&self, question: &str, detail: &str) -> bool {
        assert_eq!(question, "You are already authenticated");
        assert_eq!(
            detail,
            "To test your credentials, we will need to log you out first."
        );
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

async fn credential_test(portal: &ScriptedPortal, prompt: Arc<CountingPrompt>) -> TestOutcome {
    run_credential_test(portal, prompt, &endpoint(), &OrchestratorConfig::default()).await
}

// --- Connectivity ---

#[tokio::test]
async fn test_connectivity_maps_every_status() {
    let cases = [
        (ConnectivityState::Connected, TestOutcome::Success),
        (ConnectivityState::NotConnected, TestOutcome::Success),
        (
            ConnectivityState::Error("connection refused".into()),
            TestOutcome::Failure(TestFailure::Connectivity("connection refused".into())),
        ),
    ];

    for (status, expected) in cases {
        let portal = ScriptedPortal::new().with_status(status);
        let outcome = run_connectivity_test(&portal, &PortalAddress::new(ADDRESS)).await;
        assert_eq!(outcome, expected);
        assert_eq!(portal.calls().snapshot().await, vec![status_call()]);
    }
}

#[tokio::test]
async fn test_connectivity_reason_is_verbatim() {
    let reason = "  TLS handshake failed: certificate expired (code 45) ";
    let portal = ScriptedPortal::new().with_status(ConnectivityState::Error(reason.into()));

    let outcome = run_connectivity_test(&portal, &PortalAddress::new(ADDRESS)).await;
    assert_eq!(outcome.reason().as_deref(), Some(reason));
}

// --- Credential test ---

#[tokio::test]
async fn test_status_error_stops_everything() {
    let portal = ScriptedPortal::new().with_status(ConnectivityState::Error("x".into()));
    let prompt = CountingPrompt::new(true);

    let outcome = credential_test(&portal, prompt.clone()).await;

    assert_eq!(outcome, TestOutcome::Failure(TestFailure::Connectivity("x".into())));
    assert_eq!(outcome.reason().as_deref(), Some("x"));
    assert_eq!(portal.calls().snapshot().await, vec![status_call()]);
    assert_eq!(prompt.asked(), 0);
}

#[tokio::test]
async fn test_declined_logout_aborts() {
    let portal = ScriptedPortal::new().with_status(ConnectivityState::Connected);
    let prompt = CountingPrompt::new(false);

    let outcome = credential_test(&portal, prompt.clone()).await;

    assert_eq!(outcome.reason().as_deref(), Some("Test aborted"));
    assert_eq!(portal.calls().snapshot().await, vec![status_call()]);
    assert_eq!(prompt.asked(), 1);
}

#[tokio::test]
async fn test_failed_logout_stops_before_logon() {
    let portal = ScriptedPortal::new()
        .with_status(ConnectivityState::Connected)
        .with_logout(AuthResult::Failed("y".into()));

    let outcome = credential_test(&portal, CountingPrompt::new(true)).await;

    assert_eq!(outcome, TestOutcome::Failure(TestFailure::Auth("y".into())));
    assert_eq!(
        portal.calls().snapshot().await,
        vec![status_call(), logout_call()]
    );
}

#[tokio::test]
async fn test_errored_logout_stops_before_logon() {
    let portal = ScriptedPortal::new()
        .with_status(ConnectivityState::Connected)
        .with_logout(AuthResult::Error("gateway timeout".into()));

    let outcome = credential_test(&portal, CountingPrompt::new(true)).await;

    assert_eq!(outcome.reason().as_deref(), Some("gateway timeout"));
    assert!(!portal.calls().snapshot().await.iter().any(PortalCall::is_logon));
}

#[tokio::test]
async fn test_accepted_sentinel_is_security_failure() {
    let portal = ScriptedPortal::new()
        .with_logon_for(SENTINEL_IDENTITY, AuthResult::Success)
        .with_logon_for(IDENTITY, AuthResult::Success);

    let outcome = credential_test(&portal, CountingPrompt::new(true)).await;

    assert_eq!(
        outcome.reason().as_deref(),
        Some("The portal is blindly accepting any credentials.")
    );
    assert_eq!(
        portal.calls().snapshot().await,
        vec![status_call(), logon_call(SENTINEL_IDENTITY)]
    );
}

#[tokio::test]
async fn test_sentinel_error_then_real_success() {
    let portal = ScriptedPortal::new()
        .with_logon_for(SENTINEL_IDENTITY, AuthResult::Error("whatever".into()))
        .with_logon_for(IDENTITY, AuthResult::Success);

    let outcome = credential_test(&portal, CountingPrompt::new(true)).await;

    assert_eq!(outcome, TestOutcome::Success);
    assert_eq!(
        portal.calls().snapshot().await,
        vec![
            status_call(),
            logon_call(SENTINEL_IDENTITY),
            logon_call(IDENTITY)
        ]
    );
}

#[tokio::test]
async fn test_sentinel_failed_then_real_error() {
    let portal = ScriptedPortal::new()
        .with_logon_for(SENTINEL_IDENTITY, AuthResult::Failed("denied".into()))
        .with_logon_for(IDENTITY, AuthResult::Error("z".into()));

    let outcome = credential_test(&portal, CountingPrompt::new(true)).await;

    assert_eq!(outcome, TestOutcome::Failure(TestFailure::Auth("z".into())));
}

#[tokio::test]
async fn test_connected_full_path() {
    let portal = ScriptedPortal::new()
        .with_status(ConnectivityState::Connected)
        .with_logon_for(IDENTITY, AuthResult::Success);
    let prompt = CountingPrompt::new(true);

    let outcome = credential_test(&portal, prompt.clone()).await;

    assert_eq!(outcome, TestOutcome::Success);
    assert_eq!(prompt.asked(), 1);
    assert_eq!(
        portal.calls().snapshot().await,
        vec![
            status_call(),
            logout_call(),
            logon_call(SENTINEL_IDENTITY),
            logon_call(IDENTITY)
        ]
    );
}

#[tokio::test]
async fn test_prompt_only_when_connected() {
    for status in [
        ConnectivityState::NotConnected,
        ConnectivityState::Error("down".into()),
    ] {
        let portal = ScriptedPortal::new().with_status(status);
        let prompt = CountingPrompt::new(true);
        credential_test(&portal, prompt.clone()).await;
        assert_eq!(prompt.asked(), 0);
    }
}

#[tokio::test]
async fn test_call_budget_holds_for_every_script() {
    let statuses = [
        ConnectivityState::Connected,
        ConnectivityState::NotConnected,
        ConnectivityState::Error("e".into()),
    ];
    let replies = [
        AuthResult::Success,
        AuthResult::Error("e".into()),
        AuthResult::Failed("f".into()),
    ];

    for status in &statuses {
        for logout in &replies {
            for sentinel in &replies {
                for real in &replies {
                    for answer in [true, false] {
                        let portal = ScriptedPortal::new()
                            .with_status(status.clone())
                            .with_logout(logout.clone())
                            .with_logon_for(SENTINEL_IDENTITY, sentinel.clone())
                            .with_logon_for(IDENTITY, real.clone());
                        let prompt = CountingPrompt::new(answer);

                        let outcome = credential_test(&portal, prompt.clone()).await;
                        assert!(outcome.is_terminal());

                        let calls = portal.calls().snapshot().await;
                        let logouts = calls.iter().filter(|c| c.is_logout()).count();
                        let sentinel_logons = calls
                            .iter()
                            .filter(|c| **c == logon_call(SENTINEL_IDENTITY))
                            .count();
                        let real_logons =
                            calls.iter().filter(|c| **c == logon_call(IDENTITY)).count();

                        assert_eq!(calls[0], status_call());
                        assert!(sentinel_logons <= 1);
                        assert!(real_logons <= 1);
                        assert!(logouts <= 1);
                        if logouts == 1 {
                            assert_eq!(*status, ConnectivityState::Connected);
                            assert!(answer);
                        }
                        if real_logons == 1 {
                            let sentinel_at = calls
                                .iter()
                                .position(|c| *c == logon_call(SENTINEL_IDENTITY));
                            let real_at = calls.iter().position(|c| *c == logon_call(IDENTITY));
                            assert!(sentinel_at.is_some());
                            assert!(sentinel_at < real_at, "sentinel must precede real logon");
                        }
                    }
                }
            }
        }
    }
}

// --- Determinism ---

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let portal = ScriptedPortal::new()
        .with_status(ConnectivityState::Connected)
        .with_logon_for(IDENTITY, AuthResult::Failed("expired password".into()));

    let first = credential_test(&portal, CountingPrompt::new(true)).await;
    let first_calls = portal.calls().snapshot().await;
    portal.calls().clear().await;

    let second = credential_test(&portal, CountingPrompt::new(true)).await;
    let second_calls = portal.calls().snapshot().await;

    assert_eq!(first, second);
    assert_eq!(first_calls, second_calls);

    portal.calls().clear().await;
    let a = run_connectivity_test(&portal, &PortalAddress::new(ADDRESS)).await;
    let b = run_connectivity_test(&portal, &PortalAddress::new(ADDRESS)).await;
    assert_eq!(a, b);
    assert_eq!(
        portal.calls().snapshot().await,
        vec![status_call(), status_call()]
    );
}
