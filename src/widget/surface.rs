//! The surfaces a chat widget reads from and writes to.
//!
//! A host supplies one [`InputSurface`] (the text field), one [`DisplaySurface`] (the message
//! list), and a stream of [`WidgetEvent`]s (the send trigger and the field's edits).  The
//! in-memory [`TextField`] and [`MessageList`] let the widget run without a real terminal.

use crate::types::Message;

/// The key that submits when pressed in the input field.
pub const SUBMIT_KEY: &str = "Enter";

/// The text field the user types into.
pub trait InputSurface {
    /// The current contents of the field.
    fn value(&self) -> String;

    /// Replace the contents of the field.
    fn set_value(&mut self, value: &str);
}

/// The scrolling list messages are appended to.
pub trait DisplaySurface {
    /// Append a message to the end of the list.
    ///
    /// The message text must be shown literally and never interpreted as markup.
    fn append_message(&mut self, message: &Message);

    /// The full height of the list's content.
    fn scroll_height(&self) -> usize;

    /// The current scroll offset.
    fn scroll_top(&self) -> usize;

    /// Set the scroll offset.
    fn set_scroll_top(&mut self, offset: usize);

    /// Remove every message from the list.
    fn clear(&mut self);

    /// Tell the user something that is not part of the conversation.
    ///
    /// Notices are never messages: they do not count toward the list's height.
    fn show_notice(&mut self, notice: &str) {
        let _ = notice;
    }
}

/// Something the user did to the send affordance or the input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The send button was clicked.
    Click,
    /// A key was pressed in the input field.
    KeyPress(String),
}

impl TriggerEvent {
    /// Returns true if this event submits the field.
    ///
    /// Clicks always submit.  Key presses submit only for exactly [`SUBMIT_KEY`].
    pub fn is_submit(&self) -> bool {
        match self {
            TriggerEvent::Click => true,
            TriggerEvent::KeyPress(key) => key == SUBMIT_KEY,
        }
    }
}

/// An event delivered to a running widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The contents of the input field changed.
    InputChanged(String),
    /// The send affordance fired.
    Triggered(TriggerEvent),
    /// The host asked for the message list to be emptied.
    ClearView,
}

/// An in-memory text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
}

impl TextField {
    /// Creates an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a field holding `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl InputSurface for TextField {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }
}

/// An in-memory message list.
///
/// Each message is as tall as the number of lines in its text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageList {
    messages: Vec<Message>,
    notices: Vec<String>,
    height: usize,
    scroll_top: usize,
}

impl MessageList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The messages in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if there are no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Every notice shown so far, oldest first.  Clearing the list keeps them.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Returns true if the newest message is in view.
    pub fn is_scrolled_to_bottom(&self) -> bool {
        self.scroll_top == self.height
    }
}

pub(crate) fn rendered_rows(message: &Message) -> usize {
    message.text().lines().count().max(1)
}

impl DisplaySurface for MessageList {
    fn append_message(&mut self, message: &Message) {
        self.height += rendered_rows(message);
        self.messages.push(message.clone());
    }

    fn scroll_height(&self) -> usize {
        self.height
    }

    fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, offset: usize) {
        self.scroll_top = offset.min(self.height);
    }

    fn clear(&mut self) {
        self.messages.clear();
        self.height = 0;
        self.scroll_top = 0;
    }

    fn show_notice(&mut self, notice: &str) {
        self.notices.push(notice.to_string());
    }
}
