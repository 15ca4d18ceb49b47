//! Elegant: two-tone name, photo on the right, ruled contact bar, pill headings.

use crate::render::canvas::{BarStyle, Canvas, Column, TextStyle};
use crate::render::contact::{contact_inline, CONTACT_SEPARATOR};
use crate::render::display::{Anchor, Rect, RenderedDocument};
use crate::render::styles::{languages, render_section, standard_body, Ctx, EntryLook};
use crate::render::text::split_name;
use crate::templates::style::Color;
use crate::templates::SectionKind;

const PHOTO_SIZE: f32 = 96.0;

/// `w-24` wide, five segments.
const LANGUAGE_BAR: BarStyle = BarStyle {
    segment_width: 16.0,
    segment_height: 6.0,
    gap: 4.0,
    on: Color::GRAY_700,
    off: Color::GRAY_200,
};

/// First word light, the rest bold, on one line.
fn two_tone_name(ctx: &Ctx<'_>, canvas: &mut Canvas, col: &mut Column, width: f32) {
    let (first, rest) = split_name(&ctx.doc.personal_info.name);
    let light = TextStyle {
        bold: false,
        ..ctx.name().with_color(ctx.tokens().muted)
    };
    let heavy = ctx.name();
    let top = col.y;

    let mut first_col = Column::new(col.x, top, width);
    first_col.paragraph(canvas, first, &light);
    let mut bottom = first_col.y;
    if !rest.is_empty() {
        let offset = light.measure(first) + light.measure(" ");
        let mut rest_col = Column::new(col.x + offset, top, (width - offset).max(1.0));
        rest_col.paragraph(canvas, rest, &heavy);
        bottom = bottom.max(rest_col.y);
    }
    col.y = bottom;
}

pub(crate) fn render(ctx: &Ctx<'_>, element_id: &str) -> RenderedDocument {
    let t = ctx.tokens();
    let width = ctx.page_width();
    let mut canvas = Canvas::new(width, ctx.page_height());
    let mut col = Column::new(t.margin, t.margin, width - 2.0 * t.margin);

    // Header: name left, photo right
    let photo = ctx.doc.personal_info.photo.as_deref();
    let name_width = match photo {
        Some(_) => col.width - PHOTO_SIZE - 16.0,
        None => col.width,
    };
    let header_top = col.y;
    two_tone_name(ctx, &mut canvas, &mut col, name_width);
    if let Some(photo) = photo {
        canvas.image(
            Rect::new(col.right() - PHOTO_SIZE, header_top, PHOTO_SIZE, PHOTO_SIZE),
            photo,
            true,
        );
        col.y = col.y.max(header_top + PHOTO_SIZE);
    }
    col.gap(14.0);

    // Contact bar between two rules
    let contacts = contact_inline(&ctx.doc.personal_info);
    if !contacts.is_empty() {
        col.rule(&mut canvas, Color::GRAY_300, 1.0);
        col.gap(6.0);
        col.inline(
            &mut canvas,
            &contacts,
            CONTACT_SEPARATOR,
            &ctx.muted().with_color(t.text),
            Color::GRAY_300,
            Anchor::Middle,
        );
        col.gap(6.0);
        col.rule(&mut canvas, Color::GRAY_300, 1.0);
    }
    col.gap(t.section_gap);

    let look = EntryLook::from_tokens(t);
    let pill_text = ctx.heading().with_color(t.text).with_size(t.heading_size - 1.0);
    for kind in ctx.style.sections {
        let title = ctx.heading_label(kind.title());
        let drawn = render_section(
            ctx,
            &mut canvas,
            &mut col,
            *kind,
            &title,
            |canvas, col, title| {
                let h = pill_text.line_height() + 8.0;
                canvas.fill_rounded(Rect::new(col.x, col.y, col.width, h), Color::GRAY_100, h / 2.0);
                let mut inner = Column::new(col.x + 14.0, col.y + 4.0, col.width - 28.0);
                inner.paragraph(canvas, title, &pill_text);
                col.y += h + 8.0;
            },
            |canvas, col| match kind {
                SectionKind::Languages => languages(ctx, canvas, col, Some(&LANGUAGE_BAR)),
                other => standard_body(ctx, canvas, col, *other, &look),
            },
        );
        if drawn {
            col.gap(t.section_gap);
        }
    }

    canvas.finish(element_id, ctx.style.id, t.margin)
}
