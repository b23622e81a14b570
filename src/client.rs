use std::env;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{AskReply, AskRequest};

/// Backend used when neither an argument nor the environment names one.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Environment variable consulted for the backend base URL.
pub const BACKEND_URL_ENV: &str = "ASKCHAT_BACKEND_URL";

const ASK_PATH: &str = "/ask";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Something that can turn a question into an answer.
///
/// [`AskClient`] is the HTTP implementation; the widget only sees this trait.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Ask one question and return the answer text.
    async fn ask(&self, question: &str) -> Result<String>;
}

/// Client for a question-answering backend exposing `POST /ask`.
#[derive(Debug, Clone)]
pub struct AskClient {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
}

impl AskClient {
    /// Create a new client for the given base URL.
    ///
    /// When no URL is given the `ASKCHAT_BACKEND_URL` environment variable is read, falling back
    /// to a backend on localhost.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => env::var(BACKEND_URL_ENV).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
        };

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The base URL as configured.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The full URL questions are posted to.
    ///
    /// The base URL is not validated; an unusable one fails when a question is sent.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), ASK_PATH)
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Process a non-success reply and convert it to our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        #[derive(Deserialize)]
        struct ErrorBody {
            error: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let message = serde_json::from_str::<ErrorBody>(&error_body)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or(error_body);
        Error::api(status_code, message)
    }

    /// Post a question and decode the reply.
    pub async fn send(&self, request: &AskRequest) -> Result<AskReply> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.send_inner(request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if result.is_err() {
            CLIENT_REQUEST_ERRORS.click();
        }
        result
    }

    async fn send_inner(&self, request: &AskRequest) -> Result<AskReply> {
        let response = self
            .client
            .post(self.endpoint())
            .headers(self.default_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<AskReply>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl Transport for AskClient {
    async fn ask(&self, question: &str) -> Result<String> {
        self.send(&AskRequest::new(question)).await?.into_answer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AskClient::new(Some("http://backend.example.com".to_string())).unwrap();
        assert_eq!(client.base_url(), "http://backend.example.com");
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);

        let client = AskClient::with_options(
            Some("http://backend.example.com".to_string()),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_endpoint_appends_ask() {
        let client = AskClient::new(Some("http://localhost:5000".to_string())).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/ask");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = AskClient::new(Some("http://localhost:5000/api/".to_string())).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/api/ask");
    }

    #[tokio::test]
    async fn test_unusable_url_fails_at_send_time() {
        let client = AskClient::new(Some("not a url".to_string())).unwrap();
        let err = client.ask("Hello").await.unwrap_err();
        assert!(!err.is_backend());
    }
}
