//! Event log shown in the dashboard's log table.
//!
//! Entries are inserted at the head so the table always reads newest first.
//! The log is unbounded unless a capacity is configured, in which case the
//! oldest rows are dropped.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use sw_core::clock::format_time_of_day;
use sw_core::{Clock, LogSink};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Local time of day, e.g. `3:04:05 PM`.
    pub timestamp: String,
    pub message: String,
}

pub struct LogRegistry {
    entries: VecDeque<LogEntry>,
    capacity: Option<usize>,
    evicted: u64,
    clock: Box<dyn Clock>,
}

impl LogRegistry {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self::with_capacity(clock, None)
    }

    /// `capacity = None` keeps every entry. A capacity of zero is treated as one.
    pub fn with_capacity(clock: Box<dyn Clock>, capacity: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.map(|c| c.max(1)),
            evicted: 0,
            clock,
        }
    }

    /// Timestamp `message` with the current time and put it first.
    pub fn append(&mut self, message: impl Into<String>) -> &LogEntry {
        let entry = LogEntry {
            timestamp: format_time_of_day(self.clock.time_of_day()),
            message: message.into(),
        };
        self.entries.push_front(entry);

        if let Some(cap) = self.capacity {
            while self.entries.len() > cap {
                self.entries.pop_back();
                self.evicted += 1;
            }
        }
        &self.entries[0]
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Entries dropped because of the capacity limit.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

impl LogSink for LogRegistry {
    fn append(&mut self, message: &str) {
        LogRegistry::append(self, message);
    }
}

impl std::fmt::Debug for LogRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogRegistry")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("evicted", &self.evicted)
            .finish()
    }
}
