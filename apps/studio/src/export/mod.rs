//! PDF export of a mounted preview.
//!
//! Locate the preview, snapshot it off-screen at true size, rasterize the
//! snapshot, fit it onto one A4 page and overlay its links. The snapshot is
//! torn down on every exit path.

pub mod links;
pub mod pdf;
pub mod placement;
pub mod raster;
pub mod snapshot;

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::render::display::RenderedDocument;
use crate::render::screen::{Screen, EXPORT_TARGETS};
use links::{map_links, LinkRegion};
use placement::{fit_to_page, PageFormat, Placement};
use raster::{Rasterize, SvgRasterizer};
use snapshot::OffscreenHost;

pub const EXPORT_FILE_NAME: &str = "resume.pdf";
pub const MIN_SUPERSAMPLE: f32 = 3.0;

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No rendered preview to export (looked for: {0})")]
    TargetNotFound(String),

    #[error("Failed to rasterize resume: {0}")]
    Rasterize(String),

    #[error("Failed to build PDF: {0}")]
    Compose(String),

    #[error("Export task failed: {0}")]
    Join(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Options and output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Device pixels per document pixel. Never below [`MIN_SUPERSAMPLE`].
    pub supersample: f32,
    pub page: PageFormat,
    pub title: String,
}

impl ExportOptions {
    pub fn new(supersample: f32) -> Self {
        let supersample = if supersample.is_finite() {
            supersample.max(MIN_SUPERSAMPLE)
        } else {
            MIN_SUPERSAMPLE
        };
        Self {
            supersample,
            page: PageFormat::A4,
            title: "Resume".to_string(),
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new(MIN_SUPERSAMPLE)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedPdf {
    pub file_name: &'static str,
    #[serde(skip)]
    pub bytes: Bytes,
    pub links: Vec<LinkRegion>,
    pub placement: Placement,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Exporter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PdfExporter {
    rasterizer: Arc<dyn Rasterize>,
    host: OffscreenHost,
    options: ExportOptions,
}

impl PdfExporter {
    pub fn new(rasterizer: Arc<dyn Rasterize>, options: ExportOptions) -> Self {
        Self {
            rasterizer,
            host: OffscreenHost::new(),
            options,
        }
    }

    /// Exporter backed by resvg with system fonts plus `font_dir`.
    pub fn with_system_fonts(font_dir: Option<&Path>, options: ExportOptions) -> Self {
        Self::new(Arc::new(SvgRasterizer::new(font_dir)), options)
    }

    #[cfg(test)]
    pub fn host(&self) -> &OffscreenHost {
        &self.host
    }

    /// The first mounted preview among `target_ids`, copied out of the screen.
    pub fn locate<S: AsRef<str>>(screen: &Screen, target_ids: &[S]) -> Result<RenderedDocument, ExportError> {
        screen
            .find_first(target_ids)
            .map(|preview| preview.document.clone())
            .ok_or_else(|| {
                let looked: Vec<&str> = target_ids.iter().map(AsRef::as_ref).collect();
                ExportError::TargetNotFound(looked.join(", "))
            })
    }

    /// Synchronous pipeline. CPU-bound; call from a blocking context.
    #[cfg(test)]
    pub fn export_blocking<S: AsRef<str>>(
        &self,
        screen: &Screen,
        target_ids: &[S],
    ) -> Result<ExportedPdf, ExportError> {
        let document = Self::locate(screen, target_ids)?;
        self.export_document(&document)
    }

    /// Async pipeline. Rasterization and composition run on the blocking pool.
    pub async fn export<S: AsRef<str>>(
        &self,
        screen: &Screen,
        target_ids: &[S],
    ) -> Result<ExportedPdf, ExportError> {
        let document = Self::locate(screen, target_ids)?;
        let exporter = self.clone();
        tokio::task::spawn_blocking(move || exporter.export_document(&document))
            .await
            .map_err(|e| ExportError::Join(e.to_string()))?
    }

    fn export_document(&self, document: &RenderedDocument) -> Result<ExportedPdf, ExportError> {
        let surface = self.host.attach(document);
        let snapshot = surface.document();
        let page = self.options.page;

        debug!(
            element_id = %snapshot.element_id,
            width = snapshot.width,
            height = snapshot.height,
            scale = self.options.supersample,
            "rasterizing snapshot"
        );
        let bitmap = self.rasterizer.rasterize(
            &surface.svg(),
            snapshot.width,
            snapshot.height,
            self.options.supersample,
        )?;

        let placement = fit_to_page(snapshot.width, snapshot.height, page);
        let links = map_links(&surface.scan_links(), surface.origin(), &placement, &page);
        let bytes = pdf::compose(&self.options.title, &bitmap, &placement, &links, &page)?;
        drop(surface);

        info!(
            template = %document.template,
            links = links.len(),
            width_px = bitmap.width,
            height_px = bitmap.height,
            mode = ?placement.mode,
            size = bytes.len(),
            "exported resume pdf"
        );

        Ok(ExportedPdf {
            file_name: EXPORT_FILE_NAME,
            bytes: Bytes::from(bytes),
            links,
            placement,
            pixel_width: bitmap.width,
            pixel_height: bitmap.height,
        })
    }
}

/// Default target order: desktop preview, then mobile.
pub fn default_targets() -> &'static [&'static str] {
    &EXPORT_TARGETS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EntryId, Project, ResumeDocument};
    use crate::render::display::{Primitive, Rect};
    use crate::render::metrics::get_metrics;
    use crate::render::screen::{DESKTOP_PREVIEW_ID, MOBILE_PREVIEW_ID};
    use crate::render::svg::to_svg;
    use crate::render::viewport::ViewportTransform;
    use crate::render::{render_with, PREVIEW_ELEMENT_ID};
    use crate::templates::defaults::seed;
    use crate::templates::TemplateId;
    use super::raster::{Bitmap, BlankRasterizer};

    struct FailingRasterizer;

    impl Rasterize for FailingRasterizer {
        fn rasterize(&self, _: &str, _: f32, _: f32, _: f32) -> Result<Bitmap, ExportError> {
            Err(ExportError::Rasterize("canvas tainted".to_string()))
        }
    }

    struct PanickingRasterizer;

    impl Rasterize for PanickingRasterizer {
        fn rasterize(&self, _: &str, _: f32, _: f32, _: f32) -> Result<Bitmap, ExportError> {
            panic!("rasterizer crashed")
        }
    }

    fn project_doc() -> ResumeDocument {
        let mut doc = ResumeDocument::minimal("Jane Doe", "jane@example.com");
        doc.projects.push(Project {
            id: EntryId::new("p1"),
            name: "Resume Studio".to_string(),
            description: "Editor".to_string(),
            url: Some("https://example.com/studio".to_string()),
        });
        doc
    }

    fn screen_with(doc: &ResumeDocument, id: &str) -> Screen {
        let mut screen = Screen::new();
        let rendered = render_with(doc, TemplateId::Classic, PREVIEW_ELEMENT_ID);
        screen.mount(id, rendered, ViewportTransform::new(0.5));
        screen
    }

    fn exporter(r: impl Rasterize + 'static) -> PdfExporter {
        PdfExporter::new(Arc::new(r), ExportOptions::default())
    }

    #[test]
    fn test_supersample_never_below_three() {
        assert_eq!(ExportOptions::new(1.0).supersample, 3.0);
        assert_eq!(ExportOptions::new(4.0).supersample, 4.0);
        assert_eq!(ExportOptions::new(f32::NAN).supersample, 3.0);
    }

    #[test]
    fn test_missing_target_is_an_error() {
        let exp = exporter(BlankRasterizer);
        let err = exp.export_blocking(&Screen::new(), default_targets()).unwrap_err();
        assert!(matches!(err, ExportError::TargetNotFound(ref ids) if ids.contains(DESKTOP_PREVIEW_ID)));
        assert_eq!(exp.host().live(), 0);
    }

    #[test]
    fn test_falls_back_to_mobile_preview() {
        let exp = exporter(BlankRasterizer);
        let screen = screen_with(&project_doc(), MOBILE_PREVIEW_ID);
        let pdf = exp.export_blocking(&screen, default_targets()).unwrap();
        assert_eq!(pdf.file_name, "resume.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_ignores_viewport_and_supersamples() {
        let exp = exporter(BlankRasterizer);
        let screen = screen_with(&project_doc(), DESKTOP_PREVIEW_ID);
        let page_width = screen.find(DESKTOP_PREVIEW_ID).unwrap().document.width;
        let pdf = exp.export_blocking(&screen, default_targets()).unwrap();
        assert_eq!(pdf.pixel_width, (page_width * 3.0).ceil() as u32);
    }

    #[test]
    fn test_project_link_lands_over_its_text() {
        let exp = exporter(BlankRasterizer);
        let screen = screen_with(&project_doc(), DESKTOP_PREVIEW_ID);
        let source = &screen.find(DESKTOP_PREVIEW_ID).unwrap().document;
        let pdf = exp.export_blocking(&screen, default_targets()).unwrap();

        let region = pdf
            .links
            .iter()
            .find(|l| l.href == "https://example.com/studio")
            .unwrap();
        let run = source.texts().find(|t| t.text == "https://example.com/studio").unwrap();
        let width = get_metrics(run.font).measure(&run.text, run.size, run.bold);
        let text_box = Rect::new(run.x, run.y - run.size * 0.7, width, run.size * 0.6);
        let centre_x = pdf.placement.x_mm + (text_box.x + text_box.width / 2.0) * pdf.placement.scale;
        let centre_y_top = pdf.placement.y_mm + (text_box.y + text_box.height / 2.0) * pdf.placement.scale;
        let centre_y = 297.0 - centre_y_top;
        assert!(region.contains(centre_x, centre_y), "{region:?} vs ({centre_x}, {centre_y})");
    }

    #[test]
    fn test_rasterize_failure_returns_no_file_and_cleans_up() {
        let exp = exporter(FailingRasterizer);
        let screen = screen_with(&project_doc(), DESKTOP_PREVIEW_ID);
        let err = exp.export_blocking(&screen, default_targets()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to rasterize resume: canvas tainted");
        assert_eq!(exp.host().live(), 0);
    }

    #[tokio::test]
    async fn test_panic_in_blocking_task_cleans_up() {
        let exp = exporter(PanickingRasterizer);
        let screen = screen_with(&project_doc(), DESKTOP_PREVIEW_ID);
        let err = exp.export(&screen, default_targets()).await.unwrap_err();
        assert!(matches!(err, ExportError::Join(_)));
        assert_eq!(exp.host().live(), 0);
    }

    #[tokio::test]
    async fn test_async_export() {
        let exp = exporter(BlankRasterizer);
        let screen = screen_with(&project_doc(), DESKTOP_PREVIEW_ID);
        let pdf = exp.export(&screen, default_targets()).await.unwrap();
        assert_eq!(pdf.file_name, "resume.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF"));
        assert_eq!(exp.host().live(), 0);
    }

    const RED_PHOTO: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAgAAAAICAIAAABLbSncAAAAEUlEQVR4nGO4IyKCFTEMLQkAmD9BAZzFjLYAAAAASUVORK5CYII=";

    fn photo_seed() -> ResumeDocument {
        let mut doc = seed(TemplateId::Photo);
        doc.personal_info.photo = Some(RED_PHOTO.to_string());
        doc
    }

    #[test]
    fn test_svg_rasterizer_draws_clipped_photo_and_links() {
        let rendered = render_with(&photo_seed(), TemplateId::Photo, PREVIEW_ELEMENT_ID);
        let svg = to_svg(&rendered);
        assert!(svg.contains("<clipPath"));
        assert!(svg.contains("<image"));
        assert!(svg.contains(r#"<a id="resume-link-0""#));

        let photo = rendered
            .primitives
            .iter()
            .find_map(|p| match p {
                Primitive::Image { rect, .. } => Some(*rect),
                _ => None,
            })
            .unwrap();
        let bitmap = SvgRasterizer::new(None)
            .rasterize(&svg, rendered.width, rendered.height, MIN_SUPERSAMPLE)
            .unwrap();
        let at = |x: f32, y: f32| {
            bitmap
                .pixel((x * MIN_SUPERSAMPLE) as u32, (y * MIN_SUPERSAMPLE) as u32)
                .unwrap()
        };
        let is_red = |[r, g, b]: [u8; 3]| r > 180 && g < 80 && b < 80;

        assert!(is_red(at(photo.x + photo.width / 2.0, photo.y + photo.height / 2.0)));
        // Corner of the photo box falls outside the circular clip.
        assert!(!is_red(at(photo.x + 3.0, photo.y + 3.0)));
    }

    #[tokio::test]
    async fn test_svg_rasterizer_export_of_seed_stays_small() {
        let exp = PdfExporter::with_system_fonts(None, ExportOptions::default());
        let mut screen = Screen::new();
        let rendered = render_with(&photo_seed(), TemplateId::Photo, PREVIEW_ELEMENT_ID);
        screen.mount(DESKTOP_PREVIEW_ID, rendered, ViewportTransform::new(0.5));

        let pdf = exp.export(&screen, default_targets()).await.unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF"));
        assert!(pdf.links.iter().any(|l| l.href == "https://github.com/emilycarter"));
        assert!(pdf.bytes.len() < 4 * 1024 * 1024, "pdf is {} bytes", pdf.bytes.len());
        assert_eq!(exp.host().live(), 0);
    }
}
