//! Redline chrono: right-aligned two-tone name over a black contact banner,
//! red heading rules and a bulleted two-column skill grid.

use crate::models::resume::Skill;
use crate::render::canvas::{proficiency_bar, BarStyle, Canvas, Column, TextStyle};
use crate::render::contact::{contact_inline, CONTACT_SEPARATOR};
use crate::render::display::{Anchor, Rect, RenderedDocument};
use crate::render::styles::{grid, render_section, standard_body, Ctx, EntryLook};
use crate::render::text::split_name;
use crate::templates::style::{Color, DateLayout};
use crate::templates::SectionKind;

const BANNER_HEIGHT: f32 = 32.0;

fn heading_title(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Experience => "Work History",
        other => other.title(),
    }
}

/// Uppercased name, right-aligned: first word in text colour, the rest in the accent.
fn name_line(ctx: &Ctx<'_>, canvas: &mut Canvas, col: &mut Column) {
    let upper = ctx.doc.personal_info.name.to_uppercase();
    let (first, rest) = split_name(&upper);
    let first_style = ctx.name();
    let rest_style = ctx.name().with_color(ctx.tokens().accent);

    let rest_width = if rest.is_empty() {
        0.0
    } else {
        rest_style.measure(" ") + rest_style.measure(rest)
    };
    let total = first_style.measure(first) + rest_width;
    let top = col.y;

    if total <= col.width {
        let mut first_col = Column::new(col.right() - total, top, total);
        first_col.paragraph(canvas, first, &first_style);
        if !rest.is_empty() {
            let mut rest_col = Column::new(col.right() - rest_width, top, rest_width);
            rest_col.aligned(canvas, rest, &rest_style, Anchor::End);
        }
        col.y = top + first_style.line_height();
    } else {
        // Too long for one line: stack the parts, both right-aligned.
        col.aligned(canvas, first, &first_style, Anchor::End);
        if !rest.is_empty() {
            col.aligned(canvas, rest, &rest_style, Anchor::End);
        }
    }
}

fn skill_cell(canvas: &mut Canvas, col: &mut Column, skill: &&Skill, body: &TextStyle, accent: Color) {
    let bar = BarStyle {
        segment_width: 14.0,
        segment_height: 5.0,
        gap: 3.0,
        on: accent,
        off: Color::GRAY_200,
    };
    let top = col.y;
    canvas.circle(col.x + 3.0, top + body.line_height() / 2.0, 3.0, accent);
    let mut text = col.inset(12.0);
    text.paragraph(canvas, &skill.name, body);
    col.y = text.y;
    if let Some(level) = skill.level {
        proficiency_bar(canvas, col.x + 12.0, col.y + 2.0, level, &bar);
        col.gap(bar.segment_height + 6.0);
    }
}

pub(crate) fn render(ctx: &Ctx<'_>, element_id: &str) -> RenderedDocument {
    let t = ctx.tokens();
    let width = ctx.page_width();
    let mut canvas = Canvas::new(width, ctx.page_height());
    let mut col = Column::new(t.margin, t.margin, width - 2.0 * t.margin);

    name_line(ctx, &mut canvas, &mut col);
    col.gap(10.0);

    // Black banner carrying the contact line
    let contacts = contact_inline(&ctx.doc.personal_info);
    let banner_text = ctx.muted().with_color(Color::WHITE).with_leading(1.0);
    let banner_top = col.y;
    let mut inner = Column::new(
        col.x + 12.0,
        banner_top + (BANNER_HEIGHT - banner_text.line_height()) / 2.0,
        col.width - 24.0,
    );
    let lines = inner.inline_line_count(&contacts, CONTACT_SEPARATOR, &banner_text);
    let height = if lines > 1 {
        lines as f32 * banner_text.line_height() + 16.0
    } else {
        BANNER_HEIGHT
    };
    let banner = Rect::new(0.0, banner_top, width, height);
    canvas.fill(banner, Color::BLACK);
    inner.inline(&mut canvas, &contacts, CONTACT_SEPARATOR, &banner_text, Color::GRAY_500, Anchor::Middle);
    col.y = banner.bottom();
    col.gap(t.section_gap);

    let look = EntryLook {
        dates: DateLayout::Inline,
        date_separator: " to ",
        marker: t.text,
        link: t.accent,
    };
    let skill_body = ctx.body();
    for kind in ctx.style.sections {
        let title = ctx.heading_label(heading_title(*kind));
        let drawn = render_section(
            ctx,
            &mut canvas,
            &mut col,
            *kind,
            &title,
            |canvas, col, title| {
                col.paragraph(canvas, title, &ctx.heading().with_color(t.text));
                col.gap(2.0);
                col.rule(canvas, t.accent, 2.0);
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
                    grid(canvas, col, &skills, 2, 24.0, |canvas, cell, skill| {
                        skill_cell(canvas, cell, skill, &skill_body, t.accent)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_heading_reads_work_history() {
        assert_eq!(heading_title(SectionKind::Experience), "Work History");
        assert_eq!(heading_title(SectionKind::Skills), "Skills");
    }
}
