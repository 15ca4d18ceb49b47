//! Live renderer: resume data plus a template style in, positioned page out.
//!
//! Layout is computed once at true page width. Previews scale it with a
//! [`viewport::ViewportTransform`]; export rasterizes it unscaled.

pub mod canvas;
pub mod contact;
pub mod display;
pub mod metrics;
pub mod screen;
pub mod styles;
pub mod svg;
pub mod text;
pub mod viewport;

use tracing::debug;

use crate::models::resume::ResumeDocument;
use crate::render::display::RenderedDocument;
use crate::render::styles::Ctx;
use crate::templates::{get_template, TemplateId};

/// Root id of a standalone render.
pub const PREVIEW_ELEMENT_ID: &str = "resume-preview";

/// Renders `doc` with the style named `style_id`. Unknown ids render classic.
pub fn render(doc: &ResumeDocument, style_id: &str) -> RenderedDocument {
    render_with(doc, get_template(style_id).id, PREVIEW_ELEMENT_ID)
}

pub fn render_with(doc: &ResumeDocument, template: TemplateId, element_id: &str) -> RenderedDocument {
    let ctx = Ctx::new(doc, template.style());
    let rendered = match template {
        TemplateId::Classic | TemplateId::Modern | TemplateId::Creative => {
            styles::single_column::render(&ctx, element_id)
        }
        TemplateId::Photo => styles::photo::render(&ctx, element_id),
        TemplateId::Elegant => styles::elegant::render(&ctx, element_id),
        TemplateId::ModernIconic => styles::modern_iconic::render(&ctx, element_id),
        TemplateId::RedlineChrono => styles::redline_chrono::render(&ctx, element_id),
        TemplateId::BlueBannerConstruction => styles::blue_banner::render(&ctx, element_id),
    };
    debug!(
        template = %template,
        sections = rendered.sections.len(),
        links = rendered.links.len(),
        height = rendered.height,
        "rendered resume"
    );
    rendered
}
