//! Classic, modern and creative: one column, differing only by tokens.

use crate::render::canvas::{Canvas, Column};
use crate::render::contact::{contact_inline, CONTACT_SEPARATOR};
use crate::render::display::{Anchor, Rect, RenderedDocument};
use crate::render::styles::{render_section, standard_body, Ctx, EntryLook};
use crate::templates::style::Color;
use crate::templates::TemplateId;

/// Width of the creative style's accent stripe.
const STRIPE: f32 = 8.0;

pub(crate) fn render(ctx: &Ctx<'_>, element_id: &str) -> RenderedDocument {
    let t = ctx.tokens();
    let width = ctx.page_width();
    let mut canvas = Canvas::new(width, ctx.page_height());
    let left = if ctx.style.id == TemplateId::Creative {
        t.margin + STRIPE
    } else {
        t.margin
    };
    let mut col = Column::new(left, t.margin, width - left - t.margin);

    // Header
    let anchor = if t.centered_header {
        Anchor::Middle
    } else {
        Anchor::Start
    };
    let name_color = if ctx.style.id == TemplateId::Classic {
        t.text
    } else {
        t.accent
    };
    col.aligned(
        &mut canvas,
        &ctx.doc.personal_info.name,
        &ctx.name().with_color(name_color),
        anchor,
    );
    col.gap(6.0);
    col.inline(
        &mut canvas,
        &contact_inline(&ctx.doc.personal_info),
        CONTACT_SEPARATOR,
        &ctx.muted(),
        Color::GRAY_300,
        anchor,
    );
    if t.heading_rule {
        col.gap(10.0);
        col.rule(&mut canvas, Color::GRAY_300, 1.0);
    }
    col.gap(t.section_gap);

    // Sections
    let look = EntryLook::from_tokens(t);
    for kind in ctx.style.sections {
        let title = ctx.heading_label(kind.title());
        let drawn = render_section(
            ctx,
            &mut canvas,
            &mut col,
            *kind,
            &title,
            |canvas, col, title| {
                col.paragraph(canvas, title, &ctx.heading());
                if t.heading_rule {
                    col.gap(2.0);
                    col.rule(canvas, t.accent, 1.0);
                }
                col.gap(6.0);
            },
            |canvas, col| standard_body(ctx, canvas, col, *kind, &look),
        );
        if drawn {
            col.gap(t.section_gap);
        }
    }

    if ctx.style.id == TemplateId::Creative {
        let height = canvas.content_height(t.margin);
        canvas.fill_behind(Rect::new(0.0, 0.0, STRIPE, height), t.accent);
    }

    canvas.finish(element_id, ctx.style.id, t.margin)
}
