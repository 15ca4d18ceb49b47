use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::editor::entries;
use crate::editor::fields::{self, FieldPath};
use crate::editor::EditError;
use crate::models::resume::{EntryId, ResumeDocument, Section};
use crate::models::stored::{SaveResumeRequest, StoredResume};
use crate::persistence::ResumeRepository;
use crate::render::render_with;
use crate::render::screen::{MountedPreview, Screen, DESKTOP_PREVIEW_ID, MOBILE_PREVIEW_ID};
use crate::render::viewport::ViewportTransform;
use crate::templates::{template_default, TemplateId};
use crate::validation::validate_document;

/// Container widths the two previews are scaled for, in px.
pub const DESKTOP_CONTAINER_WIDTH: f32 = 1280.0;
pub const MOBILE_CONTAINER_WIDTH: f32 = 390.0;

/// Whether a save creates a new stored resume or overwrites an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EditorMode {
    Create,
    #[serde(rename_all = "camelCase")]
    Edit { resume_id: String },
}

#[derive(Debug)]
pub struct EditorSession {
    id: Uuid,
    mode: EditorMode,
    template: TemplateId,
    document: ResumeDocument,
    field_errors: BTreeMap<String, String>,
    dirty: bool,
    revision: u64,
    desktop_width: f32,
    screen: Screen,
    last_saved_at: Option<DateTime<Utc>>,
}

/// Serializable view of a session for the HTTP surface.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub mode: EditorMode,
    pub template_id: TemplateId,
    pub data: ResumeDocument,
    pub field_errors: BTreeMap<String, String>,
    pub dirty: bool,
    pub revision: u64,
    pub last_saved_at: Option<DateTime<Utc>>,
}

impl EditorSession {
    fn new(mode: EditorMode, template: TemplateId, document: ResumeDocument) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            mode,
            template,
            document,
            field_errors: BTreeMap::new(),
            dirty: false,
            revision: 0,
            desktop_width: DESKTOP_CONTAINER_WIDTH,
            screen: Screen::new(),
            last_saved_at: None,
        };
        session.revalidate();
        session.refresh();
        session
    }

    /// A new resume seeded from the style's default document.
    pub fn create(template: TemplateId) -> Self {
        Self::new(EditorMode::Create, template, template_default(template))
    }

    /// An existing resume loaded from persistence.
    pub fn edit(stored: StoredResume) -> Self {
        let template = TemplateId::resolve(stored.template_id.as_deref());
        let mut session = Self::new(
            EditorMode::Edit {
                resume_id: stored.id,
            },
            template,
            stored.data,
        );
        session.last_saved_at = stored.updated_at.or(stored.created_at);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn preview(&self) -> Option<&MountedPreview> {
        self.screen.find(DESKTOP_PREVIEW_ID)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            mode: self.mode.clone(),
            template_id: self.template,
            data: self.document.clone(),
            field_errors: self.field_errors.clone(),
            dirty: self.dirty,
            revision: self.revision,
            last_saved_at: self.last_saved_at,
        }
    }

    // ── Edits ───────────────────────────────────────────────────────────────

    pub fn set_field(&mut self, path: &str, value: &Value) -> Result<(), EditError> {
        let path: FieldPath = path.parse()?;
        fields::apply(&mut self.document, &path, value)?;
        debug!(session = %self.id, field = %path, "field updated");
        self.touch();
        Ok(())
    }

    pub fn add_entry(&mut self, section: Section) -> EntryId {
        let id = entries::add_entry(&mut self.document, section);
        debug!(session = %self.id, section = section.as_str(), entry = %id, "entry added");
        self.touch();
        id
    }

    pub fn remove_entry(&mut self, section: Section, id: &EntryId) -> Result<(), EditError> {
        entries::remove_entry(&mut self.document, section, id)?;
        self.touch();
        Ok(())
    }

    pub fn move_entry(&mut self, section: Section, id: &EntryId, to: usize) -> Result<(), EditError> {
        entries::move_entry(&mut self.document, section, id, to)?;
        self.touch();
        Ok(())
    }

    /// Switches style. The data is left exactly as it is.
    pub fn set_template(&mut self, template: TemplateId) {
        if self.template != template {
            self.template = template;
            self.touch();
        }
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.desktop_width = width;
        self.refresh();
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.revision += 1;
        self.revalidate();
        self.refresh();
    }

    fn revalidate(&mut self) {
        self.field_errors = match validate_document(&self.document) {
            Ok(_) => BTreeMap::new(),
            Err(errors) => fields::rekey_errors(&self.document, &errors),
        };
    }

    /// Re-renders from scratch and remounts both previews.
    fn refresh(&mut self) {
        let rendered = render_with(&self.document, self.template, DESKTOP_PREVIEW_ID);
        let page_width = rendered.width;
        self.screen.mount(
            MOBILE_PREVIEW_ID,
            rendered.clone(),
            ViewportTransform::fit(MOBILE_CONTAINER_WIDTH, page_width),
        );
        self.screen.mount(
            DESKTOP_PREVIEW_ID,
            rendered,
            ViewportTransform::fit(self.desktop_width, page_width),
        );
    }

    // ── Save ────────────────────────────────────────────────────────────────

    /// The normalized save payload, or the validation errors blocking it.
    pub fn save_request(&self) -> Result<SaveResumeRequest, EditError> {
        let normalized = validate_document(&self.document)?;
        Ok(SaveResumeRequest::new(normalized, self.template))
    }

    /// Creates or overwrites the stored resume. A successful create switches
    /// the session to edit mode. On failure the document is left untouched.
    pub async fn save(&mut self, repo: &dyn ResumeRepository) -> Result<StoredResume, EditError> {
        let request = self.save_request()?;
        let stored = match &self.mode {
            EditorMode::Create => repo.create(&request).await?,
            EditorMode::Edit { resume_id } => repo.update(resume_id, &request).await?,
        };

        info!(
            session = %self.id,
            resume_id = %stored.id,
            created = matches!(self.mode, EditorMode::Create),
            "resume saved"
        );
        self.mode = EditorMode::Edit {
            resume_id: stored.id.clone(),
        };
        self.document = request.data;
        self.dirty = false;
        self.last_saved_at = Some(stored.updated_at.unwrap_or_else(Utc::now));
        self.revalidate();
        self.refresh();
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::memory::MemoryResumeRepository;
    use crate::persistence::TransportError;
    use serde_json::json;

    #[test]
    fn test_create_session_mounts_both_previews() {
        let session = EditorSession::create(TemplateId::Modern);
        assert_eq!(session.snapshot().mode, EditorMode::Create);
        assert!(!session.snapshot().dirty);
        assert!(session.snapshot().field_errors.is_empty());
        assert!(session.screen().find(DESKTOP_PREVIEW_ID).is_some());
        let mobile = session.screen().find(MOBILE_PREVIEW_ID).unwrap();
        assert!(mobile.viewport.scale < 1.0);
        assert_eq!(mobile.document.width, session.preview().unwrap().document.width);
    }

    #[test]
    fn test_set_field_rerenders_and_tracks_errors() {
        let mut session = EditorSession::create(TemplateId::Classic);
        session.set_field("personalInfo.name", &json!("Ada Lovelace")).unwrap();
        assert!(session.snapshot().dirty);
        assert_eq!(session.snapshot().revision, 1);
        let preview = session.preview().unwrap();
        assert!(preview.document.texts().any(|t| t.text.contains("Ada Lovelace")));

        session.set_field("personalInfo.email", &json!("not-an-email")).unwrap();
        assert_eq!(
            session.snapshot().field_errors.get("personalInfo.email").map(String::as_str),
            Some("Invalid email address")
        );
        session.set_field("personalInfo.email", &json!("ada@example.com")).unwrap();
        assert!(session.snapshot().field_errors.is_empty());
    }

    #[test]
    fn test_entry_errors_use_id_paths() {
        let mut session = EditorSession::create(TemplateId::Classic);
        let id = session.add_entry(Section::Projects);
        let key = format!("projects.{id}.name");
        assert_eq!(session.snapshot().field_errors.get(&key).map(String::as_str), Some("Project name is required"));
    }

    #[test]
    fn test_template_switch_keeps_data() {
        let mut session = EditorSession::create(TemplateId::Classic);
        let before = session.document().clone();
        session.set_template(TemplateId::RedlineChrono);
        assert_eq!(session.document(), &before);
        assert_eq!(session.preview().unwrap().document.template, TemplateId::RedlineChrono);
    }

    #[tokio::test]
    async fn test_save_creates_then_updates() {
        let repo = MemoryResumeRepository::new();
        let mut session = EditorSession::create(TemplateId::Elegant);
        session.set_field("personalInfo.name", &json!("Grace Hopper")).unwrap();

        let created = session.save(&repo).await.unwrap();
        assert_eq!(created.title, "Grace Hopper");
        assert_eq!(
            session.snapshot().mode,
            EditorMode::Edit {
                resume_id: created.id.clone()
            }
        );
        assert!(!session.snapshot().dirty);

        session.set_field("professionalSummary", &json!("Compiler pioneer.")).unwrap();
        let updated = session.save(&repo).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(repo.len().await, 1);
        let stored = repo.get(&created.id).await.unwrap();
        assert_eq!(stored.data.professional_summary.as_deref(), Some("Compiler pioneer."));
        assert_eq!(stored.template_id.as_deref(), Some("elegant"));
    }

    #[tokio::test]
    async fn test_invalid_document_is_not_saved() {
        let repo = MemoryResumeRepository::new();
        let mut session = EditorSession::create(TemplateId::Classic);
        session.set_field("personalInfo.name", &json!("")).unwrap();
        let err = session.save(&repo).await.unwrap_err();
        assert!(matches!(err, EditError::Invalid(ref e) if e.get("personalInfo.name").is_some()));
        assert_eq!(repo.len().await, 0);
        assert_eq!(session.snapshot().mode, EditorMode::Create);
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_document() {
        let repo = MemoryResumeRepository::new();
        repo.fail_requests(true);
        let mut session = EditorSession::create(TemplateId::Classic);
        session.set_field("personalInfo.name", &json!("Jane Doe")).unwrap();
        let before = session.document().clone();
        let err = session.save(&repo).await.unwrap_err();
        assert!(matches!(err, EditError::Transport(TransportError::Status { status: 503, .. })));
        assert_eq!(session.document(), &before);
        assert!(session.snapshot().dirty);
    }

    #[test]
    fn test_edit_session_resolves_unknown_template() {
        let stored = StoredResume {
            id: "r-9".to_string(),
            title: "Jane".to_string(),
            data: ResumeDocument::minimal("Jane", "jane@example.com"),
            template_id: Some("retro".to_string()),
            created_at: None,
            updated_at: None,
        };
        let session = EditorSession::edit(stored);
        assert_eq!(session.snapshot().template_id, TemplateId::Classic);
        assert_eq!(
            session.snapshot().mode,
            EditorMode::Edit {
                resume_id: "r-9".to_string()
            }
        );
    }
}
