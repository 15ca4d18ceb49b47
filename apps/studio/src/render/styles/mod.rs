//! Per-style layout functions and the section/entry building blocks they share.

use crate::models::resume::{proficiency_for_label, ResumeDocument};
use crate::render::canvas::{proficiency_bar, BarStyle, Canvas, Column, TextStyle};
use crate::render::text::{date_range, description_lines, join_present};
use crate::templates::style::{Color, DateLayout, StyleTokens};
use crate::templates::{SectionKind, TemplateStyle};

pub mod blue_banner;
pub mod elegant;
pub mod modern_iconic;
pub mod photo;
pub mod redline_chrono;
pub mod single_column;

// ────────────────────────────────────────────────────────────────────────────
// Render context
// ────────────────────────────────────────────────────────────────────────────

pub(crate) struct Ctx<'a> {
    pub doc: &'a ResumeDocument,
    pub style: &'static TemplateStyle,
}

impl<'a> Ctx<'a> {
    pub fn new(doc: &'a ResumeDocument, style: &'static TemplateStyle) -> Self {
        Self { doc, style }
    }

    pub fn tokens(&self) -> &'static StyleTokens {
        &self.style.tokens
    }

    pub fn body(&self) -> TextStyle {
        let t = self.tokens();
        TextStyle::new(t.body_font, t.body_size, t.text).with_leading(t.leading)
    }

    pub fn strong(&self) -> TextStyle {
        self.body().bold()
    }

    pub fn muted(&self) -> TextStyle {
        let t = self.tokens();
        TextStyle::new(t.body_font, t.small_size, t.muted).with_leading(t.leading)
    }

    pub fn heading(&self) -> TextStyle {
        let t = self.tokens();
        TextStyle::new(t.heading_font, t.heading_size, t.accent)
            .bold()
            .with_leading(1.3)
    }

    pub fn name(&self) -> TextStyle {
        let t = self.tokens();
        TextStyle::new(t.heading_font, t.name_size, t.text)
            .bold()
            .with_leading(1.2)
    }

    pub fn heading_label(&self, title: &str) -> String {
        if self.tokens().heading_uppercase {
            title.to_uppercase()
        } else {
            title.to_string()
        }
    }

    pub fn page_width(&self) -> f32 {
        self.style.page.width_px()
    }

    pub fn page_height(&self) -> f32 {
        self.style.page.height_px()
    }
}

/// Draws one section if it has content: heading first, then the body.
///
/// Returns whether anything was drawn. Empty sections leave no trace,
/// not even a heading.
pub(crate) fn render_section(
    ctx: &Ctx<'_>,
    canvas: &mut Canvas,
    col: &mut Column,
    kind: SectionKind,
    title: &str,
    heading: impl FnOnce(&mut Canvas, &mut Column, &str),
    body: impl FnOnce(&mut Canvas, &mut Column) -> usize,
) -> bool {
    if !kind.has_content(ctx.doc) {
        return false;
    }
    let top = col.y;
    heading(canvas, col, title);
    let rows = body(canvas, col);
    canvas.record_section(kind, title, top, col.y, rows);
    true
}

// ────────────────────────────────────────────────────────────────────────────
// Entry blocks
// ────────────────────────────────────────────────────────────────────────────

/// How entry headers place their dates.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EntryLook {
    pub dates: DateLayout,
    pub date_separator: &'static str,
    pub marker: Color,
    pub link: Color,
}

impl EntryLook {
    pub fn from_tokens(tokens: &StyleTokens) -> Self {
        Self {
            dates: tokens.dates,
            date_separator: " - ",
            marker: tokens.text,
            link: tokens.accent,
        }
    }
}

/// Title line plus a muted subtitle line, with dates placed per `look`.
fn entry_header(
    ctx: &Ctx<'_>,
    canvas: &mut Canvas,
    col: &mut Column,
    look: &EntryLook,
    title: &str,
    subtitle: &[Option<&str>],
    dates: Option<String>,
) {
    match look.dates {
        DateLayout::Column { .. } => {
            col.spread(canvas, title, &ctx.strong(), dates.as_deref(), &ctx.muted());
            if let Some(sub) = join_present(subtitle, ", ") {
                col.paragraph(canvas, &sub, &ctx.muted().italic());
            }
        }
        DateLayout::Inline => {
            col.paragraph(canvas, title, &ctx.strong());
            let mut parts = subtitle.to_vec();
            parts.push(dates.as_deref());
            if let Some(sub) = join_present(&parts, " | ") {
                col.paragraph(canvas, &sub, &ctx.muted().italic());
            }
        }
    }
}

pub(crate) fn summary(ctx: &Ctx<'_>, canvas: &mut Canvas, col: &mut Column) -> usize {
    let text = ctx.doc.professional_summary.as_deref().unwrap_or_default();
    description_lines(text)
        .iter()
        .map(|line| col.paragraph(canvas, line, &ctx.body()))
        .sum()
}

pub(crate) fn experience(ctx: &Ctx<'_>, canvas: &mut Canvas, col: &mut Column, look: &EntryLook) -> usize {
    for (i, e) in ctx.doc.experience.iter().enumerate() {
        if i > 0 {
            col.gap(ctx.tokens().entry_gap);
        }
        let dates = date_range(e.start_date.as_deref(), e.end_date.as_deref(), look.date_separator);
        entry_header(
            ctx,
            canvas,
            col,
            look,
            &e.role,
            &[Some(e.company.as_str()), e.location.as_deref()],
            dates,
        );
        col.bullets(canvas, &description_lines(&e.description), &ctx.body(), look.marker);
    }
    ctx.doc.experience.len()
}

pub(crate) fn education(ctx: &Ctx<'_>, canvas: &mut Canvas, col: &mut Column, look: &EntryLook) -> usize {
    for (i, e) in ctx.doc.education.iter().enumerate() {
        if i > 0 {
            col.gap(ctx.tokens().entry_gap);
        }
        let title = match e.field_of_study.as_deref() {
            Some(field) if !field.trim().is_empty() => format!("{} in {}", e.degree, field),
            _ => e.degree.clone(),
        };
        let gpa = e.gpa.as_ref().map(|g| format!("GPA: {g}"));
        let dates = date_range(e.start_date.as_deref(), e.end_date.as_deref(), look.date_separator);
        entry_header(
            ctx,
            canvas,
            col,
            look,
            &title,
            &[Some(e.institution.as_str()), gpa.as_deref()],
            dates,
        );
    }
    ctx.doc.education.len()
}

pub(crate) fn projects(ctx: &Ctx<'_>, canvas: &mut Canvas, col: &mut Column, look: &EntryLook) -> usize {
    for (i, p) in ctx.doc.projects.iter().enumerate() {
        if i > 0 {
            col.gap(ctx.tokens().entry_gap);
        }
        col.paragraph(canvas, &p.name, &ctx.strong());
        if let Some(url) = p.url.as_deref().filter(|u| !u.trim().is_empty()) {
            col.linked(canvas, url, url, &ctx.muted().with_color(look.link));
        }
        for line in description_lines(&p.description) {
            col.paragraph(canvas, &line, &ctx.body());
        }
    }
    ctx.doc.projects.len()
}

/// `Category: a, b, c` rows in first-seen category order.
pub(crate) fn skill_groups(ctx: &Ctx<'_>, canvas: &mut Canvas, col: &mut Column) -> usize {
    let groups = ctx.doc.grouped_skills();
    for (category, names) in &groups {
        let label = format!("{category}:");
        let label_style = ctx.strong();
        let top = col.y;
        let mut label_col = *col;
        label_col.paragraph(canvas, &label, &label_style);
        let indent = label_style.measure(&label) + 6.0;
        let mut names_col = Column::new(col.x + indent, top, (col.width - indent).max(1.0));
        names_col.paragraph(canvas, &names.join(", "), &ctx.body());
        col.y = label_col.y.max(names_col.y);
    }
    groups.len()
}

pub(crate) fn certifications(ctx: &Ctx<'_>, canvas: &mut Canvas, col: &mut Column, look: &EntryLook) -> usize {
    for (i, c) in ctx.doc.certifications.iter().enumerate() {
        if i > 0 {
            col.gap(ctx.tokens().entry_gap / 2.0);
        }
        col.paragraph(canvas, &c.name, &ctx.strong());
        if let Some(description) = c.description.as_deref() {
            col.paragraph(canvas, description, &ctx.body());
        }
        if let Some(url) = c.url.as_deref().filter(|u| !u.trim().is_empty()) {
            col.linked(canvas, url, url, &ctx.muted().with_color(look.link));
        }
    }
    ctx.doc.certifications.len()
}

pub(crate) fn extracurriculars(ctx: &Ctx<'_>, canvas: &mut Canvas, col: &mut Column, look: &EntryLook) -> usize {
    for (i, x) in ctx.doc.extracurriculars.iter().enumerate() {
        if i > 0 {
            col.gap(ctx.tokens().entry_gap);
        }
        let role = (x.role.trim() != x.title.trim()).then_some(x.role.as_str());
        let dates = date_range(x.start_date.as_deref(), x.end_date.as_deref(), look.date_separator);
        entry_header(
            ctx,
            canvas,
            col,
            look,
            &x.title,
            &[Some(x.organization.as_str()), role],
            dates,
        );
        if let Some(description) = x.description.as_deref() {
            col.bullets(canvas, &description_lines(description), &ctx.body(), look.marker);
        }
    }
    ctx.doc.extracurriculars.len()
}

/// Language name with its level, optionally drawn as a 5-segment bar.
pub(crate) fn languages(
    ctx: &Ctx<'_>,
    canvas: &mut Canvas,
    col: &mut Column,
    bar: Option<&BarStyle>,
) -> usize {
    for language in &ctx.doc.languages {
        let level = language.level.as_str();
        match bar {
            Some(bar) => {
                let top = col.y;
                let body = ctx.body();
                let mut name_col = Column::new(col.x, top, (col.width - bar.width() - 12.0).max(1.0));
                name_col.paragraph(canvas, &language.name, &body);
                let bar_top = top + (body.line_height() - bar.segment_height) / 2.0;
                proficiency_bar(canvas, col.right() - bar.width(), bar_top, proficiency_for_label(level), bar);
                col.y = name_col.y;
            }
            None => {
                col.spread(canvas, &language.name, &ctx.body(), Some(level), &ctx.muted());
            }
        }
    }
    ctx.doc.languages.len()
}

/// Body for any section kind using the shared entry blocks.
pub(crate) fn standard_body(
    ctx: &Ctx<'_>,
    canvas: &mut Canvas,
    col: &mut Column,
    kind: SectionKind,
    look: &EntryLook,
) -> usize {
    match kind {
        SectionKind::Summary => summary(ctx, canvas, col),
        SectionKind::Experience => experience(ctx, canvas, col, look),
        SectionKind::Education => education(ctx, canvas, col, look),
        SectionKind::Projects => projects(ctx, canvas, col, look),
        SectionKind::Skills => skill_groups(ctx, canvas, col),
        SectionKind::Certifications => certifications(ctx, canvas, col, look),
        SectionKind::Extracurriculars => extracurriculars(ctx, canvas, col, look),
        SectionKind::Languages => languages(ctx, canvas, col, None),
    }
}

/// Lays `items` out in a grid, row by row. Each row is as tall as its tallest cell.
pub(crate) fn grid<T>(
    canvas: &mut Canvas,
    col: &mut Column,
    items: &[T],
    columns: usize,
    gutter: f32,
    mut cell: impl FnMut(&mut Canvas, &mut Column, &T),
) -> usize {
    let columns = columns.max(1);
    let cell_width = (col.width - gutter * (columns - 1) as f32) / columns as f32;
    for row in items.chunks(columns) {
        let top = col.y;
        let mut bottom = top;
        for (i, item) in row.iter().enumerate() {
            let mut c = Column::new(col.x + i as f32 * (cell_width + gutter), top, cell_width);
            cell(canvas, &mut c, item);
            bottom = bottom.max(c.y);
        }
        col.y = bottom;
    }
    items.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateId;

    #[test]
    fn test_render_section_skips_empty() {
        let doc = ResumeDocument::minimal("Jane", "jane@example.com");
        let ctx = Ctx::new(&doc, TemplateId::Classic.style());
        let mut canvas = Canvas::new(800.0, 1000.0);
        let mut col = Column::new(0.0, 0.0, 700.0);
        let drawn = render_section(
            &ctx,
            &mut canvas,
            &mut col,
            SectionKind::Experience,
            "Experience",
            |_, _, _| panic!("heading must not be drawn"),
            |_, _| 0,
        );
        assert!(!drawn);
        assert_eq!(col.y, 0.0);
    }

    #[test]
    fn test_grid_rows_take_tallest_cell() {
        let mut canvas = Canvas::new(800.0, 1000.0);
        let mut col = Column::new(0.0, 0.0, 400.0);
        let heights = [10.0_f32, 30.0, 20.0];
        let n = grid(&mut canvas, &mut col, &heights, 2, 8.0, |_, c, h| c.gap(*h));
        assert_eq!(n, 3);
        assert_eq!(col.y, 50.0);
    }
}
