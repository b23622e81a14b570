//! Diagnostic channel for exchanges.
//!
//! The widget never shows the cause of a failure to the user.  It hands the cause to an
//! [`ExchangeLogger`] instead, which decides where diagnostics go.

use std::io::{self, Write};

use crate::error::Error;

/// A trait for logging widget exchanges.
///
/// Implement this trait to capture every question sent, every answer received, and the
/// underlying cause of every failure.
///
/// # Example
///
/// ```rust,ignore
/// use askchat::{Error, ExchangeLogger};
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ExchangeLogger for FileLogger {
///     fn log_failure(&self, question: &str, error: &Error) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "{question:?} failed: {error}").unwrap();
///     }
/// }
/// ```
pub trait ExchangeLogger: Send + Sync {
    /// Log a question as it is sent.
    fn log_request(&self, _question: &str) {}

    /// Log an answer as it is rendered.
    fn log_answer(&self, _question: &str, _answer: &str) {}

    /// Log the cause of a failed exchange.
    ///
    /// This is called once per failed exchange, before the placeholder is rendered.
    fn log_failure(&self, question: &str, error: &Error);
}

/// Logger that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl ExchangeLogger for NullLogger {
    fn log_failure(&self, _question: &str, _error: &Error) {}
}

/// Logger that writes to stderr.
///
/// Failures are always written.  Requests and answers are written only when verbose.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrLogger {
    verbose: bool,
}

impl StderrLogger {
    /// Creates a logger that writes only failures.
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Creates a logger that also writes requests and answers.
    pub fn verbose() -> Self {
        Self { verbose: true }
    }

    fn write_line(&self, line: &str) {
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{line}");
    }
}

impl ExchangeLogger for StderrLogger {
    fn log_request(&self, question: &str) {
        if self.verbose {
            self.write_line(&format!("askchat: asking {question:?}"));
        }
    }

    fn log_answer(&self, question: &str, answer: &str) {
        if self.verbose {
            self.write_line(&format!(
                "askchat: answered {question:?} with {} bytes",
                answer.len()
            ));
        }
    }

    fn log_failure(&self, question: &str, error: &Error) {
        self.write_line(&format!("askchat: Error: {question:?} failed: {error}"));
    }
}
