//! Client for the Gemini `generateContent` API.
//!
//! Sends a single text prompt and returns the concatenated text parts of the
//! first candidate. There is no retry and no streaming: one request, one
//! response.
//!
//! The endpoint is configurable. When it points somewhere other than the
//! public API (for example a proxy that injects the key server-side) a
//! missing local key is not an error.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_ENDPOINT;
use crate::generate::{GenerateError, TextGenerator};

/// User agent for API requests
const USER_AGENT: &str = concat!("RecipeRoulette/", env!("CARGO_PKG_VERSION"));

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content { parts: vec![Part { text: prompt }] }],
        }
    }
}

/// A `generateContent` response
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    /// Where the key was expected to come from, for error messages
    key_source: String,
}

impl GeminiClient {
    /// Create a client for `model` at `endpoint`
    pub fn new(endpoint: &str, model: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
            key_source: String::new(),
        })
    }

    /// Attach the API key and the name of the variable it came from
    pub fn with_api_key(mut self, api_key: Option<String>, source: &str) -> Self {
        self.api_key = api_key;
        self.key_source = source.to_string();
        self
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn requires_key(&self) -> bool {
        self.endpoint == DEFAULT_ENDPOINT.trim_end_matches('/')
    }

    /// Send one prompt and return the completion text
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GenerateError> {
        if self.api_key.is_none() && self.requires_key() {
            return Err(GenerateError::MissingApiKey(self.key_source.clone()));
        }

        tracing::debug!("Requesting completion from {}", self.model);

        let mut request = self.client.post(self.url()).json(&GenerateContentRequest::new(prompt));
        if let Some(ref key) = self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerateError::Api { status: status.as_u16(), message });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.text().ok_or(GenerateError::EmptyResponse)
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.generate_content(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve a single canned HTTP response and hand back the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            // Read headers, then as much body as Content-Length announces
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if buf.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&buf).to_string());
        });

        (format!("http://{}", addr), rx)
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::new("こんにちは")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "contents": [{ "parts": [{ "text": "こんにちは" }] }] })
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"ラーメン"},{"text":"カレー"}],"role":"model"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("ラーメンカレー"));
    }

    #[test]
    fn test_response_without_text() {
        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.text().is_none());

        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert!(blocked.text().is_none());
    }

    #[test]
    fn test_url() {
        let client = GeminiClient::new("https://example.test/v1beta/", "gemini-1.5-flash").unwrap();
        assert_eq!(
            client.url(),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_for_public_endpoint() {
        let client = GeminiClient::new(DEFAULT_ENDPOINT, "gemini-1.5-flash")
            .unwrap()
            .with_api_key(None, "GOOGLE_API_KEY");
        let err = client.generate_content("prompt").await.unwrap_err();
        assert!(matches!(err, GenerateError::MissingApiKey(ref var) if var == "GOOGLE_API_KEY"));
    }

    #[tokio::test]
    async fn test_generate_success() {
        let (endpoint, request) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"テスト投稿"}]}}]}"#,
        )
        .await;

        let client = GeminiClient::new(&endpoint, "gemini-1.5-flash")
            .unwrap()
            .with_api_key(Some("secret-key".to_string()), "GOOGLE_API_KEY");
        let text = client.generate("ラーメンとカレー").await.unwrap();
        assert_eq!(text, "テスト投稿");

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /models/gemini-1.5-flash:generateContent"));
        assert!(request.to_lowercase().contains("x-goog-api-key: secret-key"));
        assert!(request.contains("ラーメンとカレー"));
    }

    #[tokio::test]
    async fn test_proxy_endpoint_without_key() {
        let (endpoint, request) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#,
        )
        .await;

        let client = GeminiClient::new(&endpoint, "gemini-1.5-flash").unwrap();
        assert_eq!(client.generate("prompt").await.unwrap(), "ok");
        assert!(!request.await.unwrap().to_lowercase().contains("x-goog-api-key"));
    }

    #[tokio::test]
    async fn test_api_error_message() {
        let (endpoint, _request) = serve_once(
            "400 Bad Request",
            r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#,
        )
        .await;

        let client = GeminiClient::new(&endpoint, "gemini-1.5-flash")
            .unwrap()
            .with_api_key(Some("bad".to_string()), "GOOGLE_API_KEY");
        match client.generate("prompt").await.unwrap_err() {
            GenerateError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let (endpoint, _request) = serve_once("200 OK", "not json").await;

        let client = GeminiClient::new(&endpoint, "gemini-1.5-flash").unwrap();
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerateError::Http(_)));
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let (endpoint, _request) = serve_once("200 OK", r#"{"candidates":[]}"#).await;

        let client = GeminiClient::new(&endpoint, "gemini-1.5-flash").unwrap();
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerateError::EmptyResponse));
    }
}
