//! # Logging Collaborator
//!
//! Components report every state-changing success or failure through a
//! single `log(message)` sink. They never depend on its output format.
//! Structured diagnostics go to `tracing` separately.

use std::cell::RefCell;

pub trait Logger {
    fn log(&self, message: &str);
}

/// Forwards messages to `tracing` at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!(target: "arbor", "{}", message);
    }
}

/// Keeps every message in memory (tests, wasm log panel)
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: RefCell<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Remove and return all buffered lines
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.borrow_mut())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|line| line.contains(needle))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, message: &str) {
        tracing::debug!(target: "arbor", "{}", message);
        self.lines.borrow_mut().push(message.to_string());
    }
}
