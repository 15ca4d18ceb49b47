//! Modern iconic: badge-icon headings and 5-segment proficiency bars.

use crate::models::resume::proficiency_for_label;
use crate::render::canvas::{proficiency_bar, BarStyle, Canvas, Column, TextStyle};
use crate::render::contact::{contact_inline, CONTACT_SEPARATOR};
use crate::render::display::{Anchor, RenderedDocument};
use crate::render::styles::{render_section, standard_body, Ctx, EntryLook};
use crate::templates::style::Color;
use crate::templates::SectionKind;

const BADGE_RADIUS: f32 = 11.0;

/// `w-4 h-2` segments.
fn bar(accent: Color) -> BarStyle {
    BarStyle {
        segment_width: 16.0,
        segment_height: 8.0,
        gap: 4.0,
        on: accent,
        off: Color::GRAY_200,
    }
}

/// Human label for a 1..=5 skill level.
pub fn skill_level_label(level: u8) -> &'static str {
    match level {
        5.. => "Expert",
        4 => "Advanced",
        3 => "Intermediate",
        2 => "Beginner",
        _ => "Novice",
    }
}

/// Name on the left; bar and level label on the right.
fn rated_row(
    canvas: &mut Canvas,
    col: &mut Column,
    name: &str,
    rating: Option<(u8, &str)>,
    body: &TextStyle,
    label: &TextStyle,
    bar: &BarStyle,
) {
    const LABEL_WIDTH: f32 = 84.0;
    let top = col.y;
    let right_block = bar.width() + LABEL_WIDTH + 12.0;
    let name_width = match rating {
        Some(_) => (col.width - right_block).max(1.0),
        None => col.width,
    };
    let mut name_col = Column::new(col.x, top, name_width);
    name_col.paragraph(canvas, name, body);
    if let Some((filled, text)) = rating {
        let bar_x = col.right() - right_block + 12.0;
        let bar_top = top + (body.line_height() - bar.segment_height) / 2.0;
        proficiency_bar(canvas, bar_x, bar_top, filled, bar);
        let mut label_col = Column::new(bar_x + bar.width() + 8.0, top, LABEL_WIDTH);
        label_col.aligned(canvas, text, label, Anchor::Start);
    }
    col.y = name_col.y.max(top + body.line_height());
}

pub(crate) fn render(ctx: &Ctx<'_>, element_id: &str) -> RenderedDocument {
    let t = ctx.tokens();
    let width = ctx.page_width();
    let mut canvas = Canvas::new(width, ctx.page_height());
    let mut col = Column::new(t.margin, t.margin, width - 2.0 * t.margin);

    col.paragraph(&mut canvas, &ctx.doc.personal_info.name, &ctx.name());
    col.gap(4.0);
    col.inline(
        &mut canvas,
        &contact_inline(&ctx.doc.personal_info),
        CONTACT_SEPARATOR,
        &ctx.muted(),
        Color::GRAY_300,
        Anchor::Start,
    );
    col.gap(t.section_gap);

    let look = EntryLook {
        marker: t.accent,
        ..EntryLook::from_tokens(t)
    };
    let bars = bar(t.accent);
    let badge_glyph = TextStyle::new(t.heading_font, 12.0, Color::WHITE)
        .bold()
        .with_leading(1.0);
    for kind in ctx.style.sections {
        let title = ctx.heading_label(kind.title());
        let drawn = render_section(
            ctx,
            &mut canvas,
            &mut col,
            *kind,
            &title,
            |canvas, col, title| {
                let line = ctx.heading().line_height();
                let cy = col.y + line / 2.0;
                canvas.circle(col.x + BADGE_RADIUS, cy, BADGE_RADIUS, t.accent);
                let initial: String = title.chars().take(1).collect();
                let mut glyph = Column::new(col.x, cy - badge_glyph.line_height() / 2.0, 2.0 * BADGE_RADIUS);
                glyph.aligned(canvas, &initial, &badge_glyph, Anchor::Middle);
                let mut text = col.inset(2.0 * BADGE_RADIUS + 10.0);
                text.paragraph(canvas, title, &ctx.heading().with_color(t.text));
                col.y = text.y + 2.0;
                col.rule(canvas, Color::GRAY_200, 1.0);
                col.gap(6.0);
            },
            |canvas, col| match kind {
                SectionKind::Skills => {
                    for skill in &ctx.doc.skills {
                        let rating = skill.level.map(|l| (l, skill_level_label(l)));
                        rated_row(canvas, col, &skill.name, rating, &ctx.body(), &ctx.muted(), &bars);
                    }
                    ctx.doc.skills.len()
                }
                SectionKind::Languages => {
                    for language in &ctx.doc.languages {
                        let label = language.level.as_str();
                        let rating = Some((proficiency_for_label(label), label));
                        rated_row(canvas, col, &language.name, rating, &ctx.body(), &ctx.muted(), &bars);
                    }
                    ctx.doc.languages.len()
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
    fn test_skill_level_labels() {
        assert_eq!(skill_level_label(5), "Expert");
        assert_eq!(skill_level_label(9), "Expert");
        assert_eq!(skill_level_label(3), "Intermediate");
        assert_eq!(skill_level_label(0), "Novice");
    }
}
