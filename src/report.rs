//! Outcome of a generation run as handed back to the front end.

use serde::Serialize;

/// Result of [`crate::launcher::Launcher::run`].
///
/// `message` is a newline-delimited diagnostic log and is empty after a
/// fully clean run. A run can succeed and still carry warnings, so the
/// front end has to look at both fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    succeeded: bool,
    message: String,
}

impl RunResult {
    /// A run stopped by a failed pre-check. Never succeeded.
    pub fn aborted<S: Into<String>>(message: S) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
        }
    }

    /// A run that went through all rows.
    ///
    /// Every message is prefixed with a newline, in the order given.
    pub fn completed(succeeded: bool, messages: &[String]) -> Self {
        let message = messages.iter().map(|m| format!("\n{m}")).collect();
        Self { succeeded, message }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
