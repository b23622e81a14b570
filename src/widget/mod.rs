//! The chat widget and the surfaces it drives.
//!
//! This module provides the widget logic, independent of any particular host:
//!
//! - Optimistic rendering of the user's message on submit
//! - One request per submission, answered by a single completion
//! - A fixed placeholder in place of any failed answer
//! - Scrolling to the newest message after every render
//!
//! # Architecture
//!
//! - [`surface`]: the input, display, and trigger seams a host implements
//! - [`chat_widget`]: the widget itself and its event loop
//! - [`config`]: CLI argument parsing and configuration
//! - [`commands`]: slash commands for the terminal host

mod chat_widget;
mod commands;
mod config;
mod surface;

pub use crate::render::{TerminalDisplay, escape_control, format_message};
pub use chat_widget::{ChatWidget, ExchangeOutcome, OverlapPolicy, PendingExchange};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{WidgetArgs, WidgetConfig};
pub use surface::{
    DisplaySurface, InputSurface, MessageList, SUBMIT_KEY, TextField, TriggerEvent, WidgetEvent,
};
