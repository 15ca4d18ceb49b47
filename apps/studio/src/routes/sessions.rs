use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::editor::session::SessionSnapshot;
use crate::editor::{EditorSession, SharedSession};
use crate::errors::AppError;
use crate::export::default_targets;
use crate::models::resume::{EntryId, Section};
use crate::models::stored::StoredResume;
use crate::routes::preview::{pdf_response, PreviewResponse};
use crate::state::AppState;
use crate::templates::TemplateId;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub template_id: Option<String>,
    /// Present when editing an existing resume.
    #[serde(default)]
    pub resume_id: Option<String>,
}

#[derive(Deserialize)]
pub struct SetFieldRequest {
    pub path: String,
    pub value: Value,
}

#[derive(Deserialize)]
pub struct MoveEntryRequest {
    pub to: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTemplateRequest {
    pub template_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportRequest {
    pub width: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEntryResponse {
    pub entry_id: EntryId,
    pub session: SessionSnapshot,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub resume: StoredResume,
    pub session: SessionSnapshot,
}

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session '{id}' not found")))
}

fn parse_section(section: &str) -> Result<Section, AppError> {
    section.parse::<Section>().map_err(AppError::BadRequest)
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let session = match &req.resume_id {
        Some(resume_id) => {
            let stored = state.resumes.fetch(resume_id).await?;
            EditorSession::edit(stored)
        }
        None => EditorSession::create(TemplateId::resolve(req.template_id.as_deref())),
    };
    let snapshot = session.snapshot();
    let (id, _) = state.sessions.insert(session).await;
    info!(session = %id, mode = ?snapshot.mode, template = %snapshot.template_id, "session opened");
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    Ok(Json(session.snapshot()))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .remove(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session '{id}' not found")))?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/sessions/:id/fields
pub async fn handle_set_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetFieldRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.set_field(&req.path, &req.value)?;
    Ok(Json(session.snapshot()))
}

/// PUT /api/v1/sessions/:id/template
pub async fn handle_set_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetTemplateRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.set_template(TemplateId::resolve(Some(&req.template_id)));
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/sessions/:id/entries/:section
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, String)>,
) -> Result<(StatusCode, Json<AddEntryResponse>), AppError> {
    let section = parse_section(&section)?;
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let entry_id = session.add_entry(section);
    Ok((
        StatusCode::CREATED,
        Json(AddEntryResponse {
            entry_id,
            session: session.snapshot(),
        }),
    ))
}

/// DELETE /api/v1/sessions/:id/entries/:section/:entry_id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((id, section, entry_id)): Path<(Uuid, String, String)>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let section = parse_section(&section)?;
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.remove_entry(section, &EntryId::new(entry_id))?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/sessions/:id/entries/:section/:entry_id/move
pub async fn handle_move_entry(
    State(state): State<AppState>,
    Path((id, section, entry_id)): Path<(Uuid, String, String)>,
    Json(req): Json<MoveEntryRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let section = parse_section(&section)?;
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.move_entry(section, &EntryId::new(entry_id), req.to)?;
    Ok(Json(session.snapshot()))
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_session_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PreviewResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    let preview = session
        .preview()
        .ok_or_else(|| AppError::NotFound("Preview is not mounted".to_string()))?;
    Ok(Json(PreviewResponse::from(preview)))
}

/// PUT /api/v1/sessions/:id/viewport
pub async fn handle_set_viewport(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ViewportRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.set_viewport_width(req.width);
    let preview = session
        .preview()
        .ok_or_else(|| AppError::NotFound("Preview is not mounted".to_string()))?;
    Ok(Json(PreviewResponse::from(preview)))
}

/// POST /api/v1/sessions/:id/export
/// Exports the mounted preview. The session stays editable meanwhile.
pub async fn handle_session_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let screen = {
        let session = find_session(&state, id).await?;
        let session = session.lock().await;
        session.screen().clone()
    };
    let pdf = state.exporter.export(&screen, default_targets()).await?;
    Ok(pdf_response(pdf))
}

/// POST /api/v1/sessions/:id/save
pub async fn handle_save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaveResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let resume = session.save(state.resumes.as_ref()).await?;
    Ok(Json(SaveResponse {
        resume,
        session: session.snapshot(),
    }))
}

/// POST /api/v1/sessions/:id/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let document = {
        let session = find_session(&state, id).await?;
        let session = session.lock().await;
        session.document().clone()
    };
    let feedback = state.assistant.resume_feedback(&document).await?;
    Ok(Json(FeedbackResponse { feedback }))
}
