//! Gemini text-generation adapter
//!
//! Implements [`LlmGateway`] over the `generateContent` REST endpoint. One
//! call is one attempt: retries and model fallback belong to the
//! application's invoker, so this adapter only classifies failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use tribunal_application::ports::llm_gateway::{GatewayError, LlmGateway};
use tribunal_domain::Model;

/// Connection settings for [`GeminiGateway`]
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

// ==================== Wire Types ====================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

// ==================== Gateway ====================

pub struct GeminiGateway {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ai-tribunal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, model: &Model) -> String {
        format!(
            "{}/v1beta/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model.resource_name()
        )
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate(&self, model: &Model, prompt: &str) -> Result<String, GatewayError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
        };

        debug!(model = %model, prompt_bytes = prompt.len(), "Sending generateContent");
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let payload = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(GatewayError::from_status(
                status.as_u16(),
                error_message(&payload),
            ));
        }

        extract_text(&payload).ok_or_else(|| GatewayError::EmptyResponse(model.to_string()))
    }
}

/// Classify a failure below the HTTP status level.
fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() || e.is_request() || e.is_body() {
        GatewayError::ConnectionReset(e.to_string())
    } else {
        GatewayError::Other(e.to_string())
    }
}

/// Message from a Google error envelope, or the raw body.
fn error_message(payload: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(payload)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| payload.trim().to_string())
}

/// Concatenated text parts of the first candidate, if any is non-empty.
fn extract_text(payload: &str) -> Option<String> {
    let response: GenerateResponse = serde_json::from_str(payload).ok()?;
    let text: String = response
        .candidates
        .into_iter()
        .next()?
        .content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    (!text.trim().is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FLASH_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";
    const PRO_PATH: &str = "/v1beta/models/gemini-2.5-pro:generateContent";

    fn gateway(base_url: String) -> GeminiGateway {
        GeminiGateway::new(GeminiConfig {
            base_url,
            api_key: "test-key".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let payload = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#;
        assert_eq!(extract_text(payload).as_deref(), Some("{\"a\":1}"));
        assert_eq!(extract_text(r#"{"candidates":[]}"#), None);
        assert_eq!(
            extract_text(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#),
            None
        );
        assert_eq!(extract_text("not json"), None);
    }

    #[test]
    fn test_error_message_prefers_envelope() {
        assert_eq!(
            error_message(r#"{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}"#),
            "The model is overloaded."
        );
        assert_eq!(error_message(" upstream down \n"), "upstream down");
    }

    #[test]
    fn test_endpoint_uses_resource_name() {
        let gw = gateway("https://example.test/".to_string());
        assert_eq!(
            gw.endpoint(&Model::Gemini25ProAlias),
            "https://example.test/v1beta/models/gemini-2.5-pro:generateContent"
        );
        assert_eq!(
            gw.endpoint(&Model::Gemini25Flash),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_success_returns_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "Weigh the evidence."}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"role": "model", "parts": [{"text": "The court notes it."}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = gateway(server.uri())
            .generate(&Model::Gemini25Flash, "Weigh the evidence.")
            .await
            .unwrap();
        assert_eq!(text, "The court notes it.");
    }

    #[tokio::test]
    async fn test_overloaded_status_is_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PRO_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = gateway(server.uri())
            .generate(&Model::Gemini25Pro, "prompt")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Overloaded("The model is overloaded.".to_string())
        );
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_bad_request_is_not_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PRO_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "Invalid argument", "status": "INVALID_ARGUMENT"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = gateway(server.uri())
            .generate(&Model::Gemini25Pro, "prompt")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_empty_candidates_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let err = gateway(server.uri())
            .generate(&Model::Gemini25Flash, "prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::EmptyResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_retryable() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = gateway(format!("http://{}", addr))
            .generate(&Model::Gemini25Pro, "prompt")
            .await
            .unwrap_err();
        assert!(err.is_retryable(), "unexpected error: {:?}", err);
    }
}
