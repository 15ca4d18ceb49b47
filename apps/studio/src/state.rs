use std::sync::Arc;

use crate::assistant::AssistantClient;
use crate::editor::SessionStore;
use crate::export::PdfExporter;
use crate::persistence::ResumeRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Resume API. `HttpResumeRepository` in production.
    pub resumes: Arc<dyn ResumeRepository>,
    pub assistant: AssistantClient,
    pub exporter: PdfExporter,
}
