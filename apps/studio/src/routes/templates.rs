use axum::{extract::Path, Json};
use serde::Serialize;

use crate::models::resume::ResumeDocument;
use crate::templates::{list_templates, template_default, TemplateId, TemplateSummary};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefaultResponse {
    pub template_id: TemplateId,
    pub data: ResumeDocument,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(list_templates())
}

/// GET /api/v1/templates/:id/default
/// Unknown ids fall back to classic rather than 404.
pub async fn handle_template_default(Path(id): Path<String>) -> Json<TemplateDefaultResponse> {
    let template_id = TemplateId::resolve(Some(&id));
    Json(TemplateDefaultResponse {
        template_id,
        data: template_default(template_id),
    })
}
