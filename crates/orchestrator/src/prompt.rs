/// Synchronous yes/no decision put to the operator.
///
/// `ask` may block until the operator answers; the orchestrator calls it
/// off the async runtime and only while no portal call is outstanding.
pub trait ConfirmationPrompt: Send + Sync {
    fn ask(&self, question: &str, detail: &str) -> bool;
}

/// Prompt that always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl ConfirmationPrompt for FixedAnswer {
    fn ask(&self, question: &str, _detail: &str) -> bool {
        tracing::debug!(question, answer = self.0, "fixed confirmation answer");
        self.0
    }
}

/// Asks on the controlling terminal.
///
/// In non-interactive mode the default answer is returned without
/// prompting. A terminal error (no TTY, interrupted input) counts as a
/// refusal.
#[derive(Debug, Clone)]
pub struct TerminalPrompt {
    non_interactive: bool,
    default: bool,
}

impl TerminalPrompt {
    #[must_use]
    pub fn new(non_interactive: bool) -> Self {
        Self {
            non_interactive,
            default: false,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }
}

impl ConfirmationPrompt for TerminalPrompt {
    fn ask(&self, question: &str, detail: &str) -> bool {
        if self.non_interactive {
            return self.default;
        }
        match dialoguer::Confirm::new()
            .with_prompt(format!("{question}. {detail} Continue?"))
            .default(self.default)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "confirmation prompt failed, treating as declined");
                false
            }
        }
    }
}
