//! Event sink shared by the dashboard log table and the controllers.

/// Write-only destination for human-readable event messages.
pub trait LogSink {
    fn append(&mut self, message: &str);
}

impl<L: LogSink + ?Sized> LogSink for &mut L {
    fn append(&mut self, message: &str) {
        (**self).append(message);
    }
}

/// Collects messages in insertion order. Used by headless runs and tests.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryLog {
    pub messages: Vec<String>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl LogSink for MemoryLog {
    fn append(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
