//! Mounted previews, looked up by element id.
//!
//! The export pipeline reads only what is mounted here, never raw editor state.

use serde::Serialize;

use crate::render::display::RenderedDocument;
use crate::render::viewport::ViewportTransform;

pub const DESKTOP_PREVIEW_ID: &str = "resume-preview-desktop";
pub const MOBILE_PREVIEW_ID: &str = "resume-preview-mobile";

/// Preview ids tried by export, in order.
pub const EXPORT_TARGETS: [&str; 2] = [DESKTOP_PREVIEW_ID, MOBILE_PREVIEW_ID];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MountedPreview {
    pub document: RenderedDocument,
    pub viewport: ViewportTransform,
}

impl MountedPreview {
    pub fn element_id(&self) -> &str {
        &self.document.element_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct Screen {
    mounted: Vec<MountedPreview>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts `document` under `element_id`, replacing whatever was there.
    pub fn mount(&mut self, element_id: &str, document: RenderedDocument, viewport: ViewportTransform) {
        let document = document.with_element_id(element_id);
        let preview = MountedPreview { document, viewport };
        match self.mounted.iter_mut().find(|m| m.element_id() == element_id) {
            Some(slot) => *slot = preview,
            None => self.mounted.push(preview),
        }
    }

    pub fn find(&self, element_id: &str) -> Option<&MountedPreview> {
        self.mounted.iter().find(|m| m.element_id() == element_id)
    }

    /// First mounted preview among `ids`, in the order given.
    pub fn find_first<S: AsRef<str>>(&self, ids: &[S]) -> Option<&MountedPreview> {
        ids.iter().find_map(|id| self.find(id.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeDocument;
    use crate::render::render;

    fn doc() -> RenderedDocument {
        render(&ResumeDocument::minimal("Jane", "jane@example.com"), "classic")
    }

    #[test]
    fn test_mount_renames_root() {
        let mut screen = Screen::new();
        screen.mount(MOBILE_PREVIEW_ID, doc(), ViewportTransform::new(0.5));
        assert_eq!(screen.find(MOBILE_PREVIEW_ID).unwrap().document.element_id, MOBILE_PREVIEW_ID);
    }

    #[test]
    fn test_find_first_respects_order() {
        let mut screen = Screen::new();
        screen.mount(MOBILE_PREVIEW_ID, doc(), ViewportTransform::new(0.5));
        screen.mount(DESKTOP_PREVIEW_ID, doc(), ViewportTransform::IDENTITY);
        let found = screen.find_first(&EXPORT_TARGETS).unwrap();
        assert_eq!(found.element_id(), DESKTOP_PREVIEW_ID);
    }

    #[test]
    fn test_remount_replaces() {
        let mut screen = Screen::new();
        screen.mount(DESKTOP_PREVIEW_ID, doc(), ViewportTransform::IDENTITY);
        screen.mount(DESKTOP_PREVIEW_ID, doc(), ViewportTransform::new(0.8));
        assert_eq!(screen.find(DESKTOP_PREVIEW_ID).unwrap().viewport.scale, 0.8);
        assert_eq!(screen.mounted.len(), 1);
    }

    #[test]
    fn test_find_first_none_mounted() {
        assert!(Screen::new().find_first(&EXPORT_TARGETS).is_none());
    }
}
