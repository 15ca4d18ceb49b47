//! Client for the external writing assistant (`POST /ai-assist`).
//!
//! Every call is bounded by a deadline. When it passes, the in-flight request
//! future is dropped and the caller gets [`AssistantError::Timeout`], whose
//! message differs from every other failure.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::resume::ResumeDocument;

pub mod prompts;

pub use prompts::AssistKind;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const ASSIST_PATH: &str = "/ai-assist";
const MAX_ATTEMPTS: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("AI response took too long. Please try again or simplify your input.")]
    Timeout,

    #[error("Missing prompt.")]
    EmptyPrompt,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Assistant error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("No result from AI.")]
    EmptyResult,
}

#[derive(Debug, Serialize)]
struct AssistRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct AssistResponse {
    result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssistErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct AssistantClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl AssistantClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}{ASSIST_PATH}", base_url.trim_end_matches('/')),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends `prompt`, giving up once the deadline passes.
    pub async fn assist(&self, prompt: &str) -> Result<String, AssistantError> {
        if prompt.trim().is_empty() {
            return Err(AssistantError::EmptyPrompt);
        }
        match tokio::time::timeout(self.timeout, self.send(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "assistant call timed out");
                Err(AssistantError::Timeout)
            }
        }
    }

    pub async fn resume_feedback(&self, doc: &ResumeDocument) -> Result<String, AssistantError> {
        self.assist(&prompts::feedback_prompt(doc)).await
    }

    pub async fn generate(&self, kind: AssistKind, text: &str) -> Result<String, AssistantError> {
        if text.trim().is_empty() {
            return Err(AssistantError::EmptyPrompt);
        }
        self.assist(&kind.prompt(text)).await
    }

    /// One logical call. Retries once on 429 or 5xx.
    async fn send(&self, prompt: &str) -> Result<String, AssistantError> {
        let body = AssistRequest { prompt };
        let mut last_error: Option<AssistantError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                warn!(attempt, delay_ms = RETRY_DELAY.as_millis() as u64, "retrying assistant call");
                tokio::time::sleep(RETRY_DELAY).await;
            }

            let response = match self.client.post(&self.endpoint).json(&body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AssistantError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                let text = response.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), "assistant returned {status}");
                last_error = Some(AssistantError::Api {
                    status: status.as_u16(),
                    message: error_message(text),
                });
                continue;
            }
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(AssistantError::Api {
                    status: status.as_u16(),
                    message: error_message(text),
                });
            }

            let parsed: AssistResponse = response.json().await?;
            let result = parsed
                .result
                .filter(|r| !r.trim().is_empty())
                .ok_or(AssistantError::EmptyResult)?;
            debug!(chars = result.len(), "assistant call succeeded");
            return Ok(result);
        }

        Err(last_error.unwrap_or(AssistantError::EmptyResult))
    }
}

/// The `{error}` field of an error body, or the raw body.
fn error_message(body: String) -> String {
    serde_json::from_str::<AssistErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_assist_returns_result() {
        let app = Router::new().route(
            "/ai-assist",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "result": format!("echo: {}", body["prompt"].as_str().unwrap_or("")) }))
            }),
        );
        let client = AssistantClient::new(&spawn(app).await, DEFAULT_TIMEOUT);
        assert_eq!(client.assist("hello").await.unwrap(), "echo: hello");
    }

    #[tokio::test]
    async fn test_slow_assistant_times_out_with_distinct_message() {
        let app = Router::new().route(
            "/ai-assist",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "result": "late" }))
            }),
        );
        let client = AssistantClient::new(&spawn(app).await, Duration::from_millis(100));
        let err = client.assist("hello").await.unwrap_err();
        assert!(matches!(err, AssistantError::Timeout));
        assert_eq!(
            err.to_string(),
            "AI response took too long. Please try again or simplify your input."
        );
    }

    #[tokio::test]
    async fn test_error_body_is_surfaced() {
        let app = Router::new().route(
            "/ai-assist",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "error": "Missing prompt." }))) }),
        );
        let client = AssistantClient::new(&spawn(app).await, DEFAULT_TIMEOUT);
        match client.assist("hi").await.unwrap_err() {
            AssistantError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Missing prompt.");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_retried_once() {
        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/ai-assist",
            post(move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": "busy" })))
                    } else {
                        (StatusCode::OK, Json(json!({ "result": "ok" })))
                    }
                }
            }),
        );
        let client = AssistantClient::new(&spawn(app).await, DEFAULT_TIMEOUT);
        assert_eq!(client.assist("hi").await.unwrap(), "ok");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_result_and_prompt() {
        let app = Router::new().route("/ai-assist", post(|| async { Json(json!({ "result": "  " })) }));
        let client = AssistantClient::new(&spawn(app).await, DEFAULT_TIMEOUT);
        assert!(matches!(client.assist("hi").await, Err(AssistantError::EmptyResult)));
        assert!(matches!(client.assist("   ").await, Err(AssistantError::EmptyPrompt)));
    }
}
