// Public modules
pub mod client;
pub mod error;
pub mod exchange_logger;
pub mod observability;
pub mod render;
pub mod types;
pub mod widget;

// Re-exports
pub use client::{AskClient, Transport};
pub use error::{Error, Result};
pub use exchange_logger::{ExchangeLogger, NullLogger, StderrLogger};
pub use observability::register_biometrics;
pub use types::*;
