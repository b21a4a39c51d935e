//! Error sinks.
//!
//! A run reports errors through a `Logger` chosen by the caller. Tests
//! capture messages in a `Vec<String>`; the CLI writes to stderr.

/// Receives error report lines.
pub trait Logger {
    fn error(&mut self, message: &str);
}

impl Logger for Vec<String> {
    fn error(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Writes report lines to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrLogger;

impl Logger for StderrLogger {
    fn error(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
