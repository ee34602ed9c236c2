//! Gemini client for the `generateContent` REST endpoint.
//!
//! Translates a `GenerationRequest` into Gemini's wire format and pulls the
//! reply text back out of the candidate envelope.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use super::strategy::{GenerationRequest, TextGenerator};
use crate::error::GenerationError;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfigBody<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigBody<'a> {
    temperature: f32,
    response_mime_type: &'a str,
    response_schema: &'a Value,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Error envelope returned by Gemini on non-2xx responses.
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

fn request_body(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: [Content {
            role: "user",
            parts: [Part {
                text: &request.prompt,
            }],
        }],
        generation_config: GenerationConfigBody {
            temperature: request.config.temperature,
            response_mime_type: request.config.response_mime_type,
            response_schema: &request.config.response_schema,
            thinking_config: ThinkingConfig {
                thinking_budget: request.config.thinking_budget,
            },
        },
    }
}

/// Concatenates the text parts of the first candidate, skipping thoughts.
fn reply_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        warn!(block_reason = %reason, "Prompt blocked by Gemini");
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(GenerationError::EmptyReply);
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        warn!(finish_reason = ?candidate.finish_reason, "Gemini candidate carried no text");
        return Err(GenerationError::EmptyReply);
    }

    Ok(text)
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(base_url = base_url, model = model, "Gemini client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}", self.base_url, model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn generate_text(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let url = format!("{}:generateContent", self.model_url(&request.model));

        debug!(url = %url, prompt_chars = request.prompt.len(), "Gemini request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body(request))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Gemini request failed");
                GenerationError::Transport(e.to_string())
            })?;

        let status = response.status();

        if status.is_success() {
            let envelope = response
                .json::<GenerateContentResponse>()
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to decode Gemini response envelope");
                    GenerationError::Transport(format!("invalid response envelope: {e}"))
                })?;
            reply_text(envelope)
        } else {
            let error_body = response.json::<GeminiErrorResponse>().await.ok();

            let message = error_body
                .as_ref()
                .map(|e| match &e.error.status {
                    Some(code) => format!("{code}: {}", e.error.message),
                    None => e.error.message.clone(),
                })
                .unwrap_or_else(|| format!("Gemini error: {}", status));

            error!(status = %status, message = %message, "Gemini returned an error");
            Err(GenerationError::Upstream {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Fetches the model descriptor; succeeds when the key and model are usable.
    async fn health_check(&self) -> Result<()> {
        let url = self.model_url(&self.model);

        self.client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .context("Gemini health check failed")?
            .error_for_status()
            .context("Gemini model unavailable")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::strategy::{response_schema, StrategyGenerator};
    use crate::test_support::{acme_draft, ScriptedGenerator};
    use serde_json::json;
    use std::sync::Arc;

    fn sample_request() -> GenerationRequest {
        let generator = StrategyGenerator::new(
            Arc::new(ScriptedGenerator::failing()),
            &Settings::for_tests(),
        );
        generator.request_for(&acme_draft().validate().unwrap())
    }

    #[test]
    fn request_body_matches_gemini_wire_format() {
        let request = sample_request();
        let body = serde_json::to_value(request_body(&request)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], json!(request.prompt));

        let config = &body["generationConfig"];
        assert_eq!(config["temperature"].as_f64().map(|t| (t * 10.0).round()), Some(4.0));
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["thinkingConfig"]["thinkingBudget"], 0);
        assert_eq!(config["responseSchema"], response_schema());
    }

    #[test]
    fn reply_text_joins_parts_and_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "{\"executive" },
                    { "text": "Summary\":\"x\"}" }
                ]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(reply_text(response).unwrap(), r#"{"executiveSummary":"x"}"#);
    }

    #[test]
    fn missing_candidates_is_an_empty_reply() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert!(matches!(reply_text(response), Err(GenerationError::EmptyReply)));
    }

    #[test]
    fn candidate_without_text_is_an_empty_reply() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "MAX_TOKENS" }]
        }))
        .unwrap();
        assert!(matches!(reply_text(response), Err(GenerationError::EmptyReply)));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = GeminiClient::new("https://example.test/", "key", "gemini-x", 5).unwrap();
        assert_eq!(
            client.model_url("gemini-x"),
            "https://example.test/v1beta/models/gemini-x"
        );
    }

    /// Serves `router` on an ephemeral local port and returns its base URL.
    async fn serve(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn gemini_route<H, T>(handler: H) -> axum::Router
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        axum::Router::new().route("/v1beta/models/*rest", axum::routing::post(handler))
    }

    #[tokio::test]
    async fn successful_call_returns_the_candidate_text() {
        let base = serve(gemini_route(
            |uri: axum::http::Uri,
             headers: axum::http::HeaderMap,
             axum::Json(body): axum::Json<Value>| async move {
                assert_eq!(uri.path(), "/v1beta/models/gemini-test:generateContent");
                if headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) != Some("key") {
                    return (axum::http::StatusCode::UNAUTHORIZED, axum::Json(json!({})));
                }
                assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
                (
                    axum::http::StatusCode::OK,
                    axum::Json(json!({
                        "candidates": [{
                            "content": { "parts": [{ "text": "```json\n{}\n```" }] },
                            "finishReason": "STOP"
                        }]
                    })),
                )
            },
        ))
        .await;

        let client = GeminiClient::new(&base, "key", "gemini-test", 5).unwrap();
        let text = client.generate_text(&sample_request()).await.unwrap();
        assert_eq!(text, "```json\n{}\n```");
    }

    #[tokio::test]
    async fn error_envelope_becomes_upstream_error() {
        let base = serve(gemini_route(|| async {
            (
                axum::http::StatusCode::TOO_MANY_REQUESTS,
                axum::Json(json!({
                    "error": { "code": 429, "message": "quota", "status": "RESOURCE_EXHAUSTED" }
                })),
            )
        }))
        .await;

        let client = GeminiClient::new(&base, "key", "gemini-test", 5).unwrap();
        match client.generate_text(&sample_request()).await {
            Err(GenerationError::Upstream { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "RESOURCE_EXHAUSTED: quota");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_the_status() {
        let base = serve(gemini_route(|| async {
            (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
        }))
        .await;

        let client = GeminiClient::new(&base, "key", "gemini-test", 5).unwrap();
        match client.generate_text(&sample_request()).await {
            Err(GenerationError::Upstream { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Gemini error: 500 Internal Server Error");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        // Port 9 (discard) on localhost is not listening in test environments
        let client = GeminiClient::new("http://127.0.0.1:9", "key", "gemini-x", 2).unwrap();
        let err = client.generate_text(&sample_request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }
}
