//! Terminal rendering for the chat widget.
//!
//! [`TerminalDisplay`] is a [`DisplaySurface`] that prints messages above an active rustyline
//! prompt through an [`ExternalPrinter`].  Text is escaped so that nothing a backend returns can
//! emit terminal control sequences.

use rustyline::ExternalPrinter;

use crate::types::{Message, Origin};
use crate::widget::DisplaySurface;

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for bold text (used for labels).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for notices).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for cyan text (used for user messages).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for bot messages).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code to clear the screen and home the cursor.
const ANSI_CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Label printed before a message from `origin`.
pub fn label(origin: Origin) -> &'static str {
    match origin {
        Origin::User => "You:",
        Origin::Bot => "Bot:",
    }
}

fn label_color(origin: Origin) -> &'static str {
    match origin {
        Origin::User => ANSI_CYAN,
        Origin::Bot => ANSI_GREEN,
    }
}

/// Escape control characters so `text` prints literally.
///
/// Newlines and tabs are kept.  Every other control character, ESC included, is replaced by its
/// `\u{..}` escape.
pub fn escape_control(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() && c != '\n' && c != '\t' {
            escaped.extend(c.escape_unicode());
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Formats one message as it appears in the terminal.
///
/// Continuation lines are indented under the first line's text.
pub fn format_message(message: &Message, use_color: bool) -> String {
    let origin = message.origin();
    let label = label(origin);
    let indent = " ".repeat(label.len() + 1);
    let text = escape_control(message.text());

    let mut out = String::new();
    if use_color {
        out.push_str(ANSI_BOLD);
        out.push_str(label_color(origin));
        out.push_str(label);
        out.push_str(ANSI_RESET);
    } else {
        out.push_str(label);
    }
    let mut lines = text.split('\n');
    if let Some(first) = lines.next() {
        out.push(' ');
        out.push_str(first);
    }
    for line in lines {
        out.push('\n');
        out.push_str(&indent);
        out.push_str(line);
    }
    out
}

/// Notice printed when the view is cleared.
pub const CLEARED_NOTICE: &str = "Conversation cleared.";

/// A message list printed to the terminal.
///
/// The terminal scrolls on its own as lines are printed, so the scroll offset only tracks the
/// number of rows written since the last clear.
pub struct TerminalDisplay<P> {
    printer: P,
    use_color: bool,
    rows: usize,
    scroll_top: usize,
    failed_prints: usize,
}

impl<P: ExternalPrinter> TerminalDisplay<P> {
    /// Creates a display that prints through `printer`.
    pub fn new(printer: P, use_color: bool) -> Self {
        Self {
            printer,
            use_color,
            rows: 0,
            scroll_top: 0,
            failed_prints: 0,
        }
    }

    /// Prints an informational line that is not part of the conversation.
    pub fn print_info(&mut self, info: &str) {
        let line = if self.use_color {
            format!("{ANSI_DIM}{}{ANSI_RESET}", escape_control(info))
        } else {
            escape_control(info)
        };
        self.print(line);
    }

    /// Number of prints the terminal rejected.
    pub fn failed_prints(&self) -> usize {
        self.failed_prints
    }

    fn print(&mut self, text: String) {
        if let Err(err) = self.printer.print(text) {
            self.failed_prints += 1;
            eprintln!("askchat: could not print to the terminal: {err}");
        }
    }
}

impl<P: ExternalPrinter> DisplaySurface for TerminalDisplay<P> {
    fn append_message(&mut self, message: &Message) {
        let formatted = format_message(message, self.use_color);
        self.rows += formatted.split('\n').count();
        self.print(formatted);
    }

    fn scroll_height(&self) -> usize {
        self.rows
    }

    fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, offset: usize) {
        self.scroll_top = offset.min(self.rows);
    }

    fn clear(&mut self) {
        // ANSI only; the notice is printed either way.
        if self.use_color {
            self.print(ANSI_CLEAR_SCREEN.to_string());
        }
        self.rows = 0;
        self.scroll_top = 0;
        self.print_info(CLEARED_NOTICE);
    }

    fn show_notice(&mut self, notice: &str) {
        self.print_info(notice);
    }
}
