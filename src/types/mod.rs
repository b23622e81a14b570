// Public modules
pub mod ask_reply;
pub mod ask_request;
pub mod message;

// Re-exports
pub use ask_reply::AskReply;
pub use ask_request::AskRequest;
pub use message::{Message, Origin, PLACEHOLDER_TEXT};
