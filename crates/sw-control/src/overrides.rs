//! Operator overrides fed into the decision loop.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Manual command from an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideCommand {
    /// Skip straight to water cleaning.
    ForceClean,
    /// Stop both actuators and park in idle.
    StopAll,
    /// Return to sun tracking.
    Resume,
}

impl fmt::Display for OverrideCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OverrideCommand::ForceClean => "force_clean",
            OverrideCommand::StopAll => "stop_all",
            OverrideCommand::Resume => "resume",
        };
        f.write_str(s)
    }
}

/// Where pending overrides come from. Each call hands over (and clears) at
/// most one command.
pub trait OverrideSource {
    fn take_override(&mut self) -> Option<OverrideCommand>;
}

/// No operator attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOverrides;

impl OverrideSource for NoOverrides {
    fn take_override(&mut self) -> Option<OverrideCommand> {
        None
    }
}

/// FIFO of commands queued by the dashboard buttons or the CLI.
#[derive(Debug, Default, Clone)]
pub struct OverrideQueue {
    pending: VecDeque<OverrideCommand>,
}

impl OverrideQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: OverrideCommand) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl OverrideSource for OverrideQueue {
    fn take_override(&mut self) -> Option<OverrideCommand> {
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo() {
        let mut q = OverrideQueue::new();
        q.push(OverrideCommand::StopAll);
        q.push(OverrideCommand::Resume);
        assert_eq!(q.len(), 2);
        assert_eq!(q.take_override(), Some(OverrideCommand::StopAll));
        assert_eq!(q.take_override(), Some(OverrideCommand::Resume));
        assert_eq!(q.take_override(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn commands_display_as_wire_names() {
        assert_eq!(OverrideCommand::ForceClean.to_string(), "force_clean");
        assert_eq!(OverrideCommand::StopAll.to_string(), "stop_all");
    }
}
