//! Toggleable, bounded diagnostic log of service calls.
//!
//! Recording is purely observational. While disabled, [`DebugLog::record`]
//! costs one atomic load and never evaluates the message closure.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde::Serialize;

/// Subsystem a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LogTag {
    Ast,
    Schema,
}

impl LogTag {
    pub fn as_str(self) -> &'static str {
        match self {
            LogTag::Ast => "[AST]",
            LogTag::Schema => "[Schema]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LogLevel {
    Debug,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub tag: LogTag,
    pub level: LogLevel,
    pub method: &'static str,
    pub message: String,
}

pub const DEFAULT_MAX_ENTRIES: usize = 200;

#[derive(Debug)]
pub struct DebugLog {
    enabled: AtomicBool,
    max_entries: usize,
    entries: Mutex<VecDeque<LogEntry>>,
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new(false, DEFAULT_MAX_ENTRIES)
    }
}

impl DebugLog {
    pub fn new(enabled: bool, max_entries: usize) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            max_entries: max_entries.max(1),
            entries: Mutex::new(VecDeque::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn debug(&self, tag: LogTag, method: &'static str, message: impl FnOnce() -> String) {
        self.record(tag, LogLevel::Debug, method, message);
    }

    pub fn warn(&self, tag: LogTag, method: &'static str, message: impl FnOnce() -> String) {
        self.record(tag, LogLevel::Warn, method, message);
    }

    pub fn record(
        &self,
        tag: LogTag,
        level: LogLevel,
        method: &'static str,
        message: impl FnOnce() -> String,
    ) {
        if !self.is_enabled() {
            return;
        }

        let message = message();
        match level {
            LogLevel::Debug => tracing::debug!("{} {}: {}", tag.as_str(), method, message),
            LogLevel::Warn => tracing::warn!("{} {}: {}", tag.as_str(), method, message),
        }

        let mut entries = self.entries.lock();
        if entries.len() == self.max_entries {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            tag,
            level,
            method,
            message,
        });
    }

    /// Snapshot of the retained records, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
