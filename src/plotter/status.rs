//! The one-line status shown at the bottom of the main window.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Warnings and errors disappear on their own after a while.
    pub fn auto_clears(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Status {
    pub message: String,
    pub severity: Severity,
}

pub struct StatusLine {
    current: Status,
    set_at: Instant,
    clear_after: Duration,
    ready: String,
}

impl StatusLine {
    pub fn new(ready: &str, clear_after: Duration) -> Self {
        Self {
            current: Status {
                message: ready.to_owned(),
                severity: Severity::Info,
            },
            set_at: Instant::now(),
            clear_after,
            ready: ready.to_owned(),
        }
    }

    pub fn current(&self) -> &Status {
        &self.current
    }

    pub fn set(&mut self, message: impl Into<String>, severity: Severity) {
        self.set_at_instant(message, severity, Instant::now());
    }

    pub fn set_at_instant(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Status {
            message: message.into(),
            severity,
        };
        self.set_at = now;
    }

    /// Back to the idle "Ready" text.
    pub fn clear(&mut self) {
        self.set(self.ready.clone(), Severity::Info);
    }

    /// Time left before the current status clears itself, if it will.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current
            .severity
            .auto_clears()
            .then(|| self.clear_after.saturating_sub(now.saturating_duration_since(self.set_at)))
    }

    /// Clears an expired warning or error. Returns whether it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.remaining(now).is_some_and(|left| left.is_zero()) {
            self.set_at_instant(self.ready.clone(), Severity::Info, now);
            true
        } else {
            false
        }
    }
}
