//! Operator actions: start cleaning and reset.
//!
//! Each action talks to the operator through [`Dialogs`] and records what
//! happened in the log. Declining the reset confirmation leaves no trace.

use sw_core::LogSink;

pub const CLEANING_STARTED_NOTICE: &str = "Cleaning process started. This may take a while...";
pub const CLEANING_LOG: &str = "User triggered cleaning.";
pub const RESET_PROMPT: &str = "Confirm system reset?";
pub const RESET_NOTICE: &str = "System reset in progress...";
pub const RESET_LOG: &str = "System reset initiated by user.";

/// Blocking notices and yes/no prompts shown to the operator.
pub trait Dialogs {
    fn notify(&mut self, message: &str);
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Notify, then log. Always succeeds.
pub fn on_start_cleaning(dialogs: &mut dyn Dialogs, log: &mut dyn LogSink) {
    dialogs.notify(CLEANING_STARTED_NOTICE);
    log.append(CLEANING_LOG);
    tracing::info!("cleaning requested by operator");
}

/// Ask for confirmation; on yes notify and log. Returns whether the reset went ahead.
pub fn on_reset_system(dialogs: &mut dyn Dialogs, log: &mut dyn LogSink) -> bool {
    if !dialogs.confirm(RESET_PROMPT) {
        tracing::debug!("reset declined");
        return false;
    }
    dialogs.notify(RESET_NOTICE);
    log.append(RESET_LOG);
    tracing::info!("reset requested by operator");
    true
}

/// Answers every prompt the same way and keeps what it was shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingDialogs {
    pub confirm_answer: bool,
    pub notifications: Vec<String>,
    pub prompts: Vec<String>,
}

impl RecordingDialogs {
    pub fn answering(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            ..Self::default()
        }
    }
}

impl Dialogs for RecordingDialogs {
    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_answer
    }
}
