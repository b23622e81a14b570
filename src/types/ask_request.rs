use serde::{Deserialize, Serialize};

/// The body of a POST to the backend's `/ask` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    /// The trimmed user text.
    pub question: String,
}

impl AskRequest {
    /// Create a new `AskRequest` for the given question.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn test_ask_request_serialization() {
        let request = AskRequest::new("What is the population of Toronto?");
        let json = to_value(&request).unwrap();

        assert_eq!(
            json,
            json!({
                "question": "What is the population of Toronto?"
            })
        );
    }

    #[test]
    fn test_ask_request_has_exactly_one_field() {
        let json = serde_json::to_string(&AskRequest::new("Hello")).unwrap();
        assert_eq!(json, r#"{"question":"Hello"}"#);
    }
}
