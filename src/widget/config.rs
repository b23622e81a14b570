//! Configuration types for the chat widget.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved configuration the
//! terminal host builds its widget from.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::widget::OverlapPolicy;

/// Default per-request timeout, in seconds.
const DEFAULT_TIMEOUT_SECS: u32 = 60;

/// Command-line arguments for the askchat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct WidgetArgs {
    /// Base URL of the question-answering backend.
    #[arrrg(
        optional,
        "Backend base URL (default: $ASKCHAT_BACKEND_URL or http://127.0.0.1:5000)",
        "URL"
    )]
    pub backend_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout_secs: Option<u32>,

    /// Refuse new questions while one is outstanding.
    #[arrrg(flag, "Allow only one outstanding question at a time")]
    pub exclusive: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Log every exchange to stderr, not just failures.
    #[arrrg(flag, "Log requests and answers to stderr")]
    pub verbose: bool,
}

/// Configuration for a chat widget and its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Backend base URL.  `None` defers to the environment.
    pub backend_url: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,

    /// What to do with a submission while another exchange is outstanding.
    pub overlap: OverlapPolicy,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether to log requests and answers as well as failures.
    pub verbose: bool,
}

impl WidgetConfig {
    /// Creates a new WidgetConfig with default values.
    ///
    /// Defaults:
    /// - Backend URL: from the environment
    /// - Timeout: 60 seconds
    /// - Overlap: concurrent
    /// - Color: enabled
    /// - Verbose: disabled
    pub fn new() -> Self {
        Self {
            backend_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS.into()),
            overlap: OverlapPolicy::Concurrent,
            use_color: true,
            verbose: false,
        }
    }

    /// Sets the backend base URL.
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the overlap policy.
    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Enables verbose exchange logging.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<WidgetArgs> for WidgetConfig {
    fn from(args: WidgetArgs) -> Self {
        let overlap = if args.exclusive {
            OverlapPolicy::Exclusive
        } else {
            OverlapPolicy::Concurrent
        };
        WidgetConfig {
            backend_url: args.backend_url,
            timeout: Duration::from_secs(args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).into()),
            overlap,
            use_color: !args.no_color,
            verbose: args.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = WidgetConfig::new();
        assert!(config.backend_url.is_none());
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.overlap, OverlapPolicy::Concurrent);
        assert!(config.use_color);
        assert!(!config.verbose);
    }

    #[test]
    fn config_from_args_defaults() {
        let config = WidgetConfig::from(WidgetArgs::default());
        assert_eq!(config, WidgetConfig::new());
    }

    #[test]
    fn config_from_args_custom() {
        let args = WidgetArgs {
            backend_url: Some("http://backend:8080".to_string()),
            timeout_secs: Some(5),
            exclusive: true,
            no_color: true,
            verbose: true,
        };
        let config = WidgetConfig::from(args);
        assert_eq!(config.backend_url.as_deref(), Some("http://backend:8080"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.overlap, OverlapPolicy::Exclusive);
        assert!(!config.use_color);
        assert!(config.verbose);
    }

    #[test]
    fn config_builder_pattern() {
        let config = WidgetConfig::new()
            .with_backend_url("http://localhost:5000")
            .with_timeout(Duration::from_secs(10))
            .with_overlap(OverlapPolicy::Exclusive)
            .without_color()
            .verbose();

        assert_eq!(config.backend_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.overlap, OverlapPolicy::Exclusive);
        assert!(!config.use_color);
        assert!(config.verbose);
    }
}
