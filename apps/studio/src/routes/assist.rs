use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::assistant::AssistKind;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AssistRequest {
    pub kind: AssistKind,
    pub text: String,
}

#[derive(Serialize)]
pub struct AssistResponse {
    pub result: String,
}

/// POST /api/v1/assist
pub async fn handle_assist(
    State(state): State<AppState>,
    Json(req): Json<AssistRequest>,
) -> Result<Json<AssistResponse>, AppError> {
    let result = state.assistant.generate(req.kind, &req.text).await?;
    Ok(Json(AssistResponse { result }))
}
