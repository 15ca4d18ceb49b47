//! Blue banner construction: full-width banner header and a two-column skill grid with bars.

use crate::models::resume::Skill;
use crate::render::canvas::{proficiency_bar, BarStyle, Canvas, Column};
use crate::render::contact::{contact_inline, CONTACT_SEPARATOR};
use crate::render::display::{Anchor, Rect, RenderedDocument};
use crate::render::styles::{grid, render_section, standard_body, Ctx, EntryLook};
use crate::templates::style::Color;
use crate::templates::SectionKind;

const BANNER_PADDING: f32 = 28.0;

pub(crate) fn render(ctx: &Ctx<'_>, element_id: &str) -> RenderedDocument {
    let t = ctx.tokens();
    let width = ctx.page_width();
    let mut canvas = Canvas::new(width, ctx.page_height());

    // Banner: lay out into a scratch column first to learn its height, then
    // paint the fill behind it.
    let name_style = ctx.name().with_color(Color::WHITE);
    let contact_style = ctx.muted().with_color(Color::WHITE);
    let mut banner = Column::new(t.margin, BANNER_PADDING, width - 2.0 * t.margin);
    banner.aligned(
        &mut canvas,
        &ctx.doc.personal_info.name.to_uppercase(),
        &name_style,
        Anchor::Middle,
    );
    banner.gap(6.0);
    banner.inline(
        &mut canvas,
        &contact_inline(&ctx.doc.personal_info),
        CONTACT_SEPARATOR,
        &contact_style,
        Color::GRAY_200,
        Anchor::Middle,
    );
    let banner_bottom = banner.y + BANNER_PADDING;
    canvas.fill_behind(Rect::new(0.0, 0.0, width, banner_bottom), t.accent);

    let mut col = Column::new(t.margin, banner_bottom + t.section_gap, width - 2.0 * t.margin);
    let look = EntryLook {
        marker: t.accent,
        ..EntryLook::from_tokens(t)
    };
    let bar = BarStyle {
        segment_width: 18.0,
        segment_height: 6.0,
        gap: 3.0,
        on: t.accent,
        off: Color::GRAY_200,
    };
    let body = ctx.body();

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
                col.gap(2.0);
                col.rule(canvas, Color::GRAY_300, 1.0);
                col.gap(8.0);
            },
            |canvas, col| match kind {
                SectionKind::Skills => {
                    let skills: Vec<&Skill> = ctx
                        .doc
                        .skills
                        .iter()
                        .filter(|s| !s.name.trim().is_empty())
                        .collect();
                    grid(canvas, col, &skills, 2, 32.0, |canvas, cell, skill| {
                        let top = cell.y;
                        let bar_space = if skill.level.is_some() { bar.width() + 12.0 } else { 0.0 };
                        let mut name = Column::new(cell.x, top, (cell.width - bar_space).max(1.0));
                        name.paragraph(canvas, &skill.name, &body);
                        if let Some(level) = skill.level {
                            let bar_top = top + (body.line_height() - bar.segment_height) / 2.0;
                            proficiency_bar(canvas, cell.right() - bar.width(), bar_top, level, &bar);
                        }
                        cell.y = name.y.max(top + body.line_height()) + 4.0;
                    })
                }
                other => standard_body(ctx, canvas, col, *other, &look),
            },
        );
        if drawn {
            col.gap(t.section_gap);
        }
    }

    canvas.finish(element_id, ctx.style.id, t.margin)
}
