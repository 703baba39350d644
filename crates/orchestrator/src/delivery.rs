use std::thread::JoinHandle;
use tokio::sync::mpsc;

use crate::outcome::{RunId, TestKind, TestOutcome};

/// Receives test reports for presentation.
///
/// Per run: `on_pending` once, then exactly one of `on_success` /
/// `on_failure`. Calls always arrive on the context that drains the
/// [`ResultReceiver`], never on the one that ran the test.
pub trait ResultSink: Send {
    fn on_pending(&mut self);
    fn on_success(&mut self);
    fn on_failure(&mut self, reason: &str);
}

/// One report travelling from a test run to the sink.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResultEvent {
    pub run_id: RunId,
    pub test: TestKind,
    pub outcome: TestOutcome,
}

impl ResultEvent {
    pub fn new(run_id: RunId, test: TestKind, outcome: TestOutcome) -> Self {
        Self {
            run_id,
            test,
            outcome,
        }
    }

    /// Hand this event to `sink`.
    pub fn deliver(&self, sink: &mut dyn ResultSink) {
        match &self.outcome {
            TestOutcome::Pending => sink.on_pending(),
            TestOutcome::Success => sink.on_success(),
            TestOutcome::Failure(failure) => sink.on_failure(&failure.to_string()),
        }
    }
}

/// Create the hand-off channel between test runs and the sink's context.
pub fn result_channel() -> (ResultSender, ResultReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ResultSender { tx }, ResultReceiver { rx })
}

#[derive(Debug, Clone)]
pub struct ResultSender {
    tx: mpsc::UnboundedSender<ResultEvent>,
}

impl ResultSender {
    /// Queue an event for the sink. Returns `false` if the receiving side is gone.
    pub fn send(&self, event: ResultEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                tracing::warn!(
                    run_id = %event.run_id,
                    test = %event.test,
                    "result receiver closed, dropping event"
                );
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
pub struct ResultReceiver {
    rx: mpsc::UnboundedReceiver<ResultEvent>,
}

impl ResultReceiver {
    /// Next event, or `None` once every sender is dropped.
    pub async fn recv(&mut self) -> Option<ResultEvent> {
        self.rx.recv().await
    }

    /// Drain events into `sink` on the calling thread until every sender is dropped.
    ///
    /// Blocks; must not be called from within an async runtime.
    pub fn deliver_blocking(mut self, sink: &mut dyn ResultSink) {
        while let Some(event) = self.rx.blocking_recv() {
            event.deliver(sink);
        }
    }
}

/// Name of the thread started by [`spawn_sink_thread`].
pub const SINK_THREAD_NAME: &str = "portalcheck-results";

/// Run `sink` on a dedicated thread fed by a fresh result channel.
///
/// The thread exits once every sender is dropped and hands the sink back
/// through the join handle.
///
/// # Errors
/// Returns the OS error if the thread cannot be spawned.
pub fn spawn_sink_thread<S>(mut sink: S) -> std::io::Result<(ResultSender, JoinHandle<S>)>
where
    S: ResultSink + 'static,
{
    let (sender, receiver) = result_channel();
    let handle = std::thread::Builder::new()
        .name(SINK_THREAD_NAME.to_string())
        .spawn(move || {
            receiver.deliver_blocking(&mut sink);
            sink
        })?;
    Ok((sender, handle))
}

/// Sink that writes every report to the log.
#[derive(Debug, Default)]
pub struct TracingSink {
    delivered: usize,
}

impl TracingSink {
    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl ResultSink for TracingSink {
    fn on_pending(&mut self) {
        self.delivered += 1;
        tracing::info!("portal test started");
    }

    fn on_success(&mut self) {
        self.delivered += 1;
        tracing::info!("portal test succeeded");
    }

    fn on_failure(&mut self, reason: &str) {
        self.delivered += 1;
        tracing::warn!(reason, "portal test failed");
    }
}
