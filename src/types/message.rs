use std::fmt;

/// The text shown in place of an answer when an exchange fails.
pub const PLACEHOLDER_TEXT: &str = "⚠️ Error connecting to server.";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Typed by the user.
    User,
    /// Returned by the answering service, or the failure placeholder.
    Bot,
}

impl Origin {
    /// Returns the lowercase name of the origin.
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::User => "user",
            Origin::Bot => "bot",
        }
    }

    /// Returns the style class a host uses to tell message bubbles apart.
    pub fn class_name(&self) -> &'static str {
        match self {
            Origin::User => "user-message",
            Origin::Bot => "bot-message",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rendered chat message.
///
/// Messages are never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    origin: Origin,
}

impl Message {
    /// Create a user message from raw input.
    ///
    /// The input is trimmed; `None` is returned when nothing is left.
    pub fn user(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            origin: Origin::User,
        })
    }

    /// Create a bot message with the text exactly as given.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: Origin::Bot,
        }
    }

    /// Create the fixed failure placeholder.
    pub fn placeholder() -> Self {
        Self::bot(PLACEHOLDER_TEXT)
    }

    /// The message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Who authored the message.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Returns true if the user authored this message.
    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }
}
