use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The JSON body returned by the backend's `/ask` endpoint.
///
/// A successful reply carries `answer`.  The backend reports its own failures as
/// `{"error": "..."}`, sometimes with a 2xx status, so both fields are optional here and
/// [`AskReply::into_answer`] decides which one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskReply {
    /// The answer text, rendered verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// The error the backend reported, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AskReply {
    /// Create a reply carrying an answer.
    pub fn answer(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            error: None,
        }
    }

    /// Create a reply carrying a backend error.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            answer: None,
            error: Some(error.into()),
        }
    }

    /// Extract the answer, turning a reported error or an empty reply into an [`Error`].
    pub fn into_answer(self) -> Result<String> {
        match (self.answer, self.error) {
            (Some(answer), _) => Ok(answer),
            (None, Some(error)) => Err(Error::backend(error)),
            (None, None) => Err(Error::missing_answer()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_reply_answer_deserialization() {
        let reply: AskReply = serde_json::from_str(r#"{"answer": "42"}"#).unwrap();
        assert_eq!(reply, AskReply::answer("42"));
        assert_eq!(reply.into_answer().unwrap(), "42");
    }

    #[test]
    fn test_ask_reply_error_deserialization() {
        let reply: AskReply = serde_json::from_str(r#"{"error": "No question provided"}"#).unwrap();
        let err = reply.into_answer().unwrap_err();
        assert!(err.is_backend());
        assert!(err.to_string().contains("No question provided"));
    }

    #[test]
    fn test_ask_reply_empty_object() {
        let reply: AskReply = serde_json::from_str("{}").unwrap();
        assert!(reply.into_answer().unwrap_err().is_missing_answer());
    }

    #[test]
    fn test_ask_reply_non_string_answer_is_rejected() {
        assert!(serde_json::from_str::<AskReply>(r#"{"answer": 42}"#).is_err());
    }

    #[test]
    fn test_ask_reply_ignores_unknown_fields() {
        let reply: AskReply =
            serde_json::from_str(r#"{"answer": "Hi!", "sources": ["Toronto"]}"#).unwrap();
        assert_eq!(reply.into_answer().unwrap(), "Hi!");
    }
}
