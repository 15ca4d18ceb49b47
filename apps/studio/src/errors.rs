use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::assistant::AssistantError;
use crate::editor::EditError;
use crate::export::ExportError;
use crate::persistence::TransportError;
use crate::validation::ValidationErrors;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Resume API error: {0}")]
    Transport(#[from] TransportError),

    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::Invalid(errors) => AppError::Validation(errors),
            EditError::Transport(e) => AppError::Transport(e),
            missing @ EditError::EntryNotFound { .. } => AppError::NotFound(missing.to_string()),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields: Option<Value> = None;
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Validation(errors) => {
                fields = Some(json!(errors.fields));
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    errors.to_string(),
                )
            }
            AppError::Transport(TransportError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Resume '{id}' not found"),
            ),
            AppError::Transport(e) => {
                tracing::error!("Resume API error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "TRANSPORT_ERROR",
                    "Could not reach the resume service. Your changes are kept; please retry."
                        .to_string(),
                )
            }
            AppError::Assistant(AssistantError::Timeout) => (
                StatusCode::GATEWAY_TIMEOUT,
                "ASSISTANT_TIMEOUT",
                AssistantError::Timeout.to_string(),
            ),
            AppError::Assistant(AssistantError::EmptyPrompt) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                AssistantError::EmptyPrompt.to_string(),
            ),
            AppError::Assistant(e) => {
                tracing::error!("Assistant error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "ASSISTANT_ERROR",
                    "Failed to get AI feedback.".to_string(),
                )
            }
            AppError::Export(ExportError::TargetNotFound(looked)) => (
                StatusCode::NOT_FOUND,
                "EXPORT_TARGET_NOT_FOUND",
                format!("No rendered preview to export (looked for: {looked})"),
            ),
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "Failed to download PDF. Please try again.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(fields) = fields {
            error["fields"] = fields;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_carries_fields() {
        let errors = crate::validation::validate(&json!({ "personalInfo": { "name": "", "email": "x" } }))
            .unwrap_err();
        let (status, body) = body_of(AppError::Validation(errors)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["fields"]["personalInfo.email"], "Invalid email address");
    }

    #[tokio::test]
    async fn test_timeout_is_distinct() {
        let (status, body) = body_of(AppError::Assistant(AssistantError::Timeout)).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"]["code"], "ASSISTANT_TIMEOUT");
        assert_eq!(
            body["error"]["message"],
            "AI response took too long. Please try again or simplify your input."
        );
    }

    #[tokio::test]
    async fn test_transport_mapping() {
        let (status, _) = body_of(AppError::Transport(TransportError::NotFound("r1".into()))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, body) = body_of(AppError::Transport(TransportError::Status {
            status: 500,
            message: "boom".into(),
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "TRANSPORT_ERROR");
    }

    #[tokio::test]
    async fn test_edit_errors_map_to_statuses() {
        let missing = EditError::EntryNotFound {
            section: "projects",
            id: "p9".into(),
        };
        let (status, _) = body_of(missing.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = body_of(EditError::UnknownField("nope".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
