//! Photo: a one-third sidebar (photo, contact, grouped skills) beside the main column.

use crate::render::canvas::{Canvas, Column, TextStyle};
use crate::render::contact::contact_items;
use crate::render::display::{Anchor, Rect, RenderedDocument};
use crate::render::styles::{render_section, standard_body, Ctx, EntryLook};
use crate::templates::style::Color;
use crate::templates::SectionKind;

const PHOTO_SIZE: f32 = 128.0;

pub(crate) fn render(ctx: &Ctx<'_>, element_id: &str) -> RenderedDocument {
    let t = ctx.tokens();
    let width = ctx.page_width();
    let sidebar_width = width / 3.0;
    let mut canvas = Canvas::new(width, ctx.page_height());

    let sidebar_heading = |canvas: &mut Canvas, col: &mut Column, title: &str| {
        col.paragraph(canvas, title, &ctx.heading().with_size(t.heading_size - 2.0));
        col.gap(2.0);
        col.rule(canvas, Color::GRAY_300, 1.0);
        col.gap(6.0);
    };

    // Sidebar
    let mut side = Column::new(t.margin, t.margin, sidebar_width - 2.0 * t.margin);
    if let Some(photo) = ctx.doc.personal_info.photo.as_deref() {
        let x = side.x + (side.width - PHOTO_SIZE) / 2.0;
        canvas.image(Rect::new(x, side.y, PHOTO_SIZE, PHOTO_SIZE), photo, true);
        side.gap(PHOTO_SIZE + 20.0);
    }

    let contacts = contact_items(&ctx.doc.personal_info);
    if !contacts.is_empty() {
        sidebar_heading(&mut canvas, &mut side, &ctx.heading_label("Contact"));
        let small = ctx.muted().with_color(t.text);
        for item in &contacts {
            match item.href.as_deref() {
                Some(href) => side.linked(&mut canvas, &item.label, href, &small),
                None => side.paragraph(&mut canvas, &item.label, &small),
            };
        }
        side.gap(t.section_gap);
    }

    let skills_title = ctx.heading_label(SectionKind::Skills.title());
    render_section(
        ctx,
        &mut canvas,
        &mut side,
        SectionKind::Skills,
        &skills_title,
        sidebar_heading,
        |canvas, col| {
            let groups = ctx.doc.grouped_skills();
            for (category, names) in &groups {
                col.paragraph(canvas, category, &ctx.strong().with_size(t.small_size));
                let items: Vec<String> = names.iter().map(|n| n.to_string()).collect();
                col.bullets(canvas, &items, &ctx.muted().with_color(t.text), t.accent);
                col.gap(6.0);
            }
            groups.len()
        },
    );

    // Main column
    let main_x = sidebar_width + t.margin;
    let mut main = Column::new(main_x, t.margin, width - main_x - t.margin);
    main.paragraph(&mut canvas, &ctx.doc.personal_info.name, &ctx.name().with_color(t.accent));
    main.gap(t.section_gap);

    let look = EntryLook::from_tokens(t);
    let heading_style: TextStyle = ctx.heading();
    for kind in ctx.style.sections {
        let title = ctx.heading_label(kind.title());
        let drawn = render_section(
            ctx,
            &mut canvas,
            &mut main,
            *kind,
            &title,
            |canvas, col, title| {
                col.aligned(canvas, title, &heading_style, Anchor::Start);
                col.gap(2.0);
                col.rule(canvas, t.accent, 2.0);
                col.gap(6.0);
            },
            |canvas, col| standard_body(ctx, canvas, col, *kind, &look),
        );
        if drawn {
            main.gap(t.section_gap);
        }
    }

    let height = canvas.content_height(t.margin);
    canvas.fill_behind(Rect::new(0.0, 0.0, sidebar_width, height), Color::SLATE_100);
    canvas.finish(element_id, ctx.style.id, t.margin)
}
