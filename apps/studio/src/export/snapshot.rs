//! Off-screen snapshot surfaces.
//!
//! A surface holds a true-size copy of a mounted preview, parked outside the
//! visible area. It is unregistered when dropped, including during unwinding.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::render::display::{LinkElement, RenderedDocument};
use crate::render::svg::to_svg;

pub const OFFSCREEN_ORIGIN: (f32, f32) = (-9999.0, 0.0);

#[derive(Debug, Clone, Default)]
pub struct OffscreenHost {
    surfaces: Arc<Mutex<HashMap<u64, String>>>,
    next_key: Arc<AtomicU64>,
}

impl OffscreenHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<u64, String>> {
        self.surfaces.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Clones `document` onto a new surface at [`OFFSCREEN_ORIGIN`].
    pub fn attach(&self, document: &RenderedDocument) -> OffscreenSurface {
        let key = self.next_key.fetch_add(1, Ordering::Relaxed);
        let element_id = format!("{}-snapshot", document.element_id);
        self.registry().insert(key, element_id.clone());
        debug!(surface = key, element_id = %element_id, "attached offscreen surface");
        OffscreenSurface {
            host: self.clone(),
            key,
            document: document.clone().with_element_id(element_id),
            origin: OFFSCREEN_ORIGIN,
        }
    }

    /// Number of surfaces currently attached.
    #[cfg(test)]
    pub fn live(&self) -> usize {
        self.registry().len()
    }
}

#[derive(Debug)]
pub struct OffscreenSurface {
    host: OffscreenHost,
    key: u64,
    document: RenderedDocument,
    origin: (f32, f32),
}

impl OffscreenSurface {
    pub fn document(&self) -> &RenderedDocument {
        &self.document
    }

    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    /// Unscaled markup of the snapshot.
    pub fn svg(&self) -> String {
        to_svg(&self.document)
    }

    /// Links as placed on the host, i.e. shifted by the surface origin.
    pub fn scan_links(&self) -> Vec<LinkElement> {
        self.document
            .links
            .iter()
            .map(|l| LinkElement {
                id: l.id.clone(),
                href: l.href.clone(),
                rect: l.rect.translate(self.origin.0, self.origin.1),
            })
            .collect()
    }
}

impl Drop for OffscreenSurface {
    fn drop(&mut self) {
        self.host.registry().remove(&self.key);
        debug!(surface = self.key, "detached offscreen surface");
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
    fn test_surface_detaches_on_drop() {
        let host = OffscreenHost::new();
        {
            let surface = host.attach(&doc());
            assert_eq!(host.live(), 1);
            assert_eq!(surface.origin(), OFFSCREEN_ORIGIN);
        }
        assert_eq!(host.live(), 0);
    }

    #[test]
    fn test_surface_detaches_on_panic() {
        let host = OffscreenHost::new();
        let inner = host.clone();
        let result = std::panic::catch_unwind(move || {
            let _surface = inner.attach(&doc());
            panic!("rasterizer blew up");
        });
        assert!(result.is_err());
        assert_eq!(host.live(), 0);
    }

    #[test]
    fn test_scanned_links_are_offset_by_origin() {
        let host = OffscreenHost::new();
        let source = doc();
        let surface = host.attach(&source);
        let scanned = surface.scan_links();
        assert_eq!(scanned[0].rect.x, source.links[0].rect.x + OFFSCREEN_ORIGIN.0);
        assert_eq!(scanned[0].href, source.links[0].href);
    }

    #[test]
    fn test_snapshot_keeps_true_size() {
        let host = OffscreenHost::new();
        let source = doc();
        let surface = host.attach(&source);
        assert_eq!(surface.document().width, source.width);
        assert!(surface.svg().contains("resume-preview-snapshot"));
    }
}
