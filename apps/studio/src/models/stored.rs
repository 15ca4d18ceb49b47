use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeDocument;
use crate::templates::TemplateId;

/// Title used when the document has no name yet.
pub const UNTITLED_RESUME: &str = "Untitled Resume";

/// A resume as returned by the persistence API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub data: ResumeDocument,
    /// Raw style id as stored; resolved through the registry with its fallback.
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /resumes` and `PUT /resumes/:id`. Always the full document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResumeRequest {
    pub title: String,
    pub data: ResumeDocument,
    pub template_id: TemplateId,
}

impl SaveResumeRequest {
    pub fn new(data: ResumeDocument, template_id: TemplateId) -> Self {
        let name = data.personal_info.name.trim();
        let title = if name.is_empty() {
            UNTITLED_RESUME.to_string()
        } else {
            name.to_string()
        };
        Self {
            title,
            data,
            template_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_title_from_name() {
        let doc = ResumeDocument::minimal("Jane Doe", "jane@example.com");
        let req = SaveResumeRequest::new(doc, TemplateId::Modern);
        assert_eq!(req.title, "Jane Doe");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["templateId"], "modern");
    }

    #[test]
    fn test_save_request_untitled_when_name_blank() {
        let doc = ResumeDocument::minimal("  ", "jane@example.com");
        let req = SaveResumeRequest::new(doc, TemplateId::Classic);
        assert_eq!(req.title, UNTITLED_RESUME);
    }

    #[test]
    fn test_stored_resume_reads_mongo_style_id() {
        let json = serde_json::json!({
            "_id": "665f1c",
            "title": "Jane",
            "data": { "personalInfo": { "name": "Jane", "email": "jane@example.com" } },
            "templateId": "photo",
            "createdAt": "2024-06-01T10:00:00Z"
        });
        let stored: StoredResume = serde_json::from_value(json).unwrap();
        assert_eq!(stored.id, "665f1c");
        assert_eq!(stored.template_id.as_deref(), Some("photo"));
        assert!(stored.created_at.is_some());
        assert!(stored.data.experience.is_empty());
    }
}
