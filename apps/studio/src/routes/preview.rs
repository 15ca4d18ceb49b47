//! Stateless validate / render / export, for callers that keep their own
//! document.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::export::{default_targets, ExportedPdf};
use crate::models::resume::ResumeDocument;
use crate::render::display::LinkElement;
use crate::render::screen::{MountedPreview, Screen, DESKTOP_PREVIEW_ID};
use crate::render::svg::to_svg_scaled;
use crate::render::viewport::ViewportTransform;
use crate::render::{render, render_with};
use crate::state::AppState;
use crate::templates::TemplateId;
use crate::validation::validate;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub data: Value,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub viewport_width: Option<f32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub element_id: String,
    pub template_id: TemplateId,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub svg: String,
    pub links: Vec<LinkElement>,
}

impl From<&MountedPreview> for PreviewResponse {
    fn from(preview: &MountedPreview) -> Self {
        let doc = &preview.document;
        Self {
            element_id: doc.element_id.clone(),
            template_id: doc.template,
            width: doc.width,
            height: doc.height,
            scale: preview.viewport.scale,
            svg: to_svg_scaled(doc, &preview.viewport),
            links: doc.links.clone(),
        }
    }
}

/// Serves an exported PDF as a `resume.pdf` download.
pub fn pdf_response(pdf: ExportedPdf) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", pdf.file_name),
            ),
        ],
        pdf.bytes,
    )
        .into_response()
}

/// POST /api/v1/validate
pub async fn handle_validate(Json(raw): Json<Value>) -> Result<Json<ResumeDocument>, AppError> {
    Ok(Json(validate(&raw)?))
}

/// POST /api/v1/render
pub async fn handle_render(Json(req): Json<RenderRequest>) -> Result<Json<PreviewResponse>, AppError> {
    let doc = validate(&req.data)?;
    let rendered = render(&doc, req.template_id.as_deref().unwrap_or_default());
    let viewport = req
        .viewport_width
        .map(|width| ViewportTransform::fit(width, rendered.width))
        .unwrap_or_default();
    let preview = MountedPreview {
        document: rendered,
        viewport,
    };
    Ok(Json(PreviewResponse::from(&preview)))
}

/// POST /api/v1/export
pub async fn handle_export(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let doc = validate(&req.data)?;
    let template = TemplateId::resolve(req.template_id.as_deref());

    let mut screen = Screen::new();
    screen.mount(
        DESKTOP_PREVIEW_ID,
        render_with(&doc, template, DESKTOP_PREVIEW_ID),
        ViewportTransform::IDENTITY,
    );
    let pdf = state.exporter.export(&screen, default_targets()).await?;
    Ok(pdf_response(pdf))
}
