//! Layout primitives shared by every style: a paint canvas and a column cursor.
//!
//! Styles position content by flowing it down one or more [`Column`]s. Every
//! call measures with the static font tables, wraps, emits already-positioned
//! text runs and advances the cursor.

use crate::render::display::{
    Anchor, LinkElement, Primitive, Rect, RenderedDocument, RenderedSection, TextRun,
};
use crate::render::metrics::{get_metrics, FontFamily};
use crate::templates::style::Color;
use crate::templates::{SectionKind, TemplateId};

pub const LINK_ID_PREFIX: &str = "resume-link-";

/// Space on either side of an inline separator.
const INLINE_PAD: f32 = 8.0;

// ────────────────────────────────────────────────────────────────────────────
// Text style
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontFamily,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
    pub leading: f32,
}

impl TextStyle {
    pub fn new(font: FontFamily, size: f32, color: Color) -> Self {
        Self {
            font,
            size,
            bold: false,
            italic: false,
            color,
            leading: 1.45,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    pub fn line_height(&self) -> f32 {
        self.size * self.leading
    }

    pub fn measure(&self, text: &str) -> f32 {
        get_metrics(self.font).measure(text, self.size, self.bold)
    }

    pub fn wrap(&self, text: &str, width: f32) -> Vec<String> {
        get_metrics(self.font).wrap(text, width, self.size, self.bold)
    }

    /// A run whose line box starts at `top`.
    fn run(&self, x: f32, top: f32, text: &str, anchor: Anchor) -> TextRun {
        let half_leading = (self.line_height() - self.size) / 2.0;
        TextRun {
            x,
            y: top + half_leading + self.size * 0.8,
            text: text.to_string(),
            font: self.font,
            size: self.size,
            bold: self.bold,
            italic: self.italic,
            color: self.color,
            anchor,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Canvas
// ────────────────────────────────────────────────────────────────────────────

/// Accumulates primitives, links and section boxes for one document.
#[derive(Debug)]
pub struct Canvas {
    width: f32,
    page_height: f32,
    primitives: Vec<Primitive>,
    links: Vec<LinkElement>,
    sections: Vec<RenderedSection>,
    extent: f32,
}

impl Canvas {
    pub fn new(width: f32, page_height: f32) -> Self {
        Self {
            width,
            page_height,
            primitives: Vec::new(),
            links: Vec::new(),
            sections: Vec::new(),
            extent: 0.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    fn grow(&mut self, bottom: f32) {
        self.extent = self.extent.max(bottom);
    }

    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.fill_rounded(rect, color, 0.0);
    }

    pub fn fill_rounded(&mut self, rect: Rect, color: Color, radius: f32) {
        self.grow(rect.bottom());
        self.primitives.push(Primitive::Fill {
            rect,
            color,
            radius,
        });
    }

    /// Paints under everything already on the canvas.
    pub fn fill_behind(&mut self, rect: Rect, color: Color) {
        self.primitives.insert(
            0,
            Primitive::Fill {
                rect,
                color,
                radius: 0.0,
            },
        );
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        self.grow(from.1.max(to.1));
        self.primitives.push(Primitive::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color,
            width,
        });
    }

    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) {
        self.grow(cy + r);
        self.primitives.push(Primitive::Circle { cx, cy, r, color });
    }

    pub fn image(&mut self, rect: Rect, href: &str, circular: bool) {
        self.grow(rect.bottom());
        self.primitives.push(Primitive::Image {
            rect,
            href: href.to_string(),
            circular,
        });
    }

    pub fn text(&mut self, run: TextRun, line_bottom: f32) {
        self.grow(line_bottom);
        self.primitives.push(Primitive::Text(run));
    }

    /// Records an outbound link and returns its element id.
    pub fn link(&mut self, href: &str, rect: Rect) -> String {
        let id = format!("{LINK_ID_PREFIX}{}", self.links.len());
        self.links.push(LinkElement {
            id: id.clone(),
            href: href.to_string(),
            rect,
        });
        id
    }

    pub fn record_section(&mut self, kind: SectionKind, heading: &str, top: f32, bottom: f32, rows: usize) {
        self.sections.push(RenderedSection {
            kind,
            heading: heading.to_string(),
            top,
            bottom,
            rows,
        });
    }

    /// Document height: at least one page, more when content overflows.
    pub fn content_height(&self, bottom_padding: f32) -> f32 {
        self.page_height.max((self.extent + bottom_padding).ceil())
    }

    pub fn finish(self, element_id: &str, template: TemplateId, bottom_padding: f32) -> RenderedDocument {
        let height = self.content_height(bottom_padding);
        RenderedDocument {
            element_id: element_id.to_string(),
            template,
            width: self.width,
            height,
            primitives: self.primitives,
            links: self.links,
            sections: self.sections,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inline flow
// ────────────────────────────────────────────────────────────────────────────

/// A piece of an inline, separator-joined list such as the contact line.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineItem {
    pub text: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Token<'a> {
    Item(&'a InlineItem),
    Separator,
}

// ────────────────────────────────────────────────────────────────────────────
// Column cursor
// ────────────────────────────────────────────────────────────────────────────

/// A vertical flow region. `y` is the next free line top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl Column {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self { x, y, width }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap(&mut self, dy: f32) {
        self.y += dy;
    }

    /// A narrower column starting `dx` further right, at the same cursor.
    pub fn inset(&self, dx: f32) -> Column {
        Column::new(self.x + dx, self.y, (self.width - dx).max(0.0))
    }

    fn anchor_x(&self, anchor: Anchor) -> f32 {
        match anchor {
            Anchor::Start => self.x,
            Anchor::Middle => self.x + self.width / 2.0,
            Anchor::End => self.right(),
        }
    }

    /// Wrapped, left-aligned text. Returns the number of lines drawn.
    pub fn paragraph(&mut self, canvas: &mut Canvas, text: &str, style: &TextStyle) -> usize {
        self.aligned(canvas, text, style, Anchor::Start)
    }

    pub fn aligned(&mut self, canvas: &mut Canvas, text: &str, style: &TextStyle, anchor: Anchor) -> usize {
        let lines = style.wrap(text, self.width);
        let x = self.anchor_x(anchor);
        for line in &lines {
            canvas.text(style.run(x, self.y, line, anchor), self.y + style.line_height());
            self.y += style.line_height();
        }
        lines.len()
    }

    /// Wrapped text that is also a link. The link box covers every drawn line.
    pub fn linked(&mut self, canvas: &mut Canvas, text: &str, href: &str, style: &TextStyle) -> usize {
        let top = self.y;
        let lines = style.wrap(text, self.width);
        let mut widest = 0.0_f32;
        for line in &lines {
            widest = widest.max(style.measure(line));
            canvas.text(style.run(self.x, self.y, line, Anchor::Start), self.y + style.line_height());
            self.y += style.line_height();
        }
        if !lines.is_empty() {
            canvas.link(href, Rect::new(self.x, top, widest, self.y - top));
        }
        lines.len()
    }

    /// Left text with an optional right-aligned companion on the first line,
    /// e.g. a role and its date range.
    pub fn spread(
        &mut self,
        canvas: &mut Canvas,
        left: &str,
        left_style: &TextStyle,
        right: Option<&str>,
        right_style: &TextStyle,
    ) -> usize {
        let top = self.y;
        let right_width = match right {
            Some(text) => {
                canvas.text(
                    right_style.run(self.right(), top, text, Anchor::End),
                    top + right_style.line_height(),
                );
                right_style.measure(text) + 12.0
            }
            None => 0.0,
        };
        let mut left_col = Column::new(self.x, top, (self.width - right_width).max(1.0));
        let lines = left_col.paragraph(canvas, left, left_style).max(1);
        self.y = left_col.y.max(top + right_style.line_height());
        lines
    }

    /// Bulleted list, one bullet per item, hanging indent for wrapped lines.
    pub fn bullets(&mut self, canvas: &mut Canvas, items: &[String], style: &TextStyle, marker: Color) -> usize {
        const INDENT: f32 = 14.0;
        let mut lines = 0;
        for item in items {
            let top = self.y;
            let marker_style = style.with_color(marker);
            canvas.text(marker_style.run(self.x + 2.0, top, "•", Anchor::Start), top + style.line_height());
            let mut body = self.inset(INDENT);
            lines += body.paragraph(canvas, item, style);
            self.y = body.y;
        }
        lines
    }

    /// Horizontal rule across the column, advancing past its thickness.
    pub fn rule(&mut self, canvas: &mut Canvas, color: Color, thickness: f32) {
        let y = self.y + thickness / 2.0;
        canvas.line((self.x, y), (self.right(), y), color, thickness);
        self.y += thickness;
    }

    /// Breaks an inline list into lines. Separators stay on the line of the
    /// item before them.
    fn break_inline<'a>(
        &self,
        items: &'a [InlineItem],
        separator: &str,
        style: &TextStyle,
    ) -> Vec<Vec<(Token<'a>, f32)>> {
        if items.is_empty() {
            return Vec::new();
        }
        let sep_width = style.measure(separator) + 2.0 * INLINE_PAD;
        let mut lines: Vec<Vec<(Token<'a>, f32)>> = vec![Vec::new()];
        let mut line_width = 0.0_f32;

        for (i, item) in items.iter().enumerate() {
            let w = style.measure(&item.text);
            let line_empty = lines.last().map_or(true, |l| l.is_empty());
            if !line_empty && line_width + w > self.width {
                lines.push(Vec::new());
                line_width = 0.0;
            }
            if let Some(line) = lines.last_mut() {
                line.push((Token::Item(item), w));
                line_width += w;
                if i + 1 < items.len() {
                    line.push((Token::Separator, sep_width));
                    line_width += sep_width;
                }
            }
        }
        lines
    }

    /// How many lines `inline` would use, without drawing.
    pub fn inline_line_count(&self, items: &[InlineItem], separator: &str, style: &TextStyle) -> usize {
        self.break_inline(items, separator, style).len()
    }

    /// Items joined by `separator`, wrapping between items.
    ///
    /// Separators only ever sit between two items, never first or last.
    /// Items with an `href` are recorded as links.
    pub fn inline(
        &mut self,
        canvas: &mut Canvas,
        items: &[InlineItem],
        separator: &str,
        style: &TextStyle,
        separator_color: Color,
        anchor: Anchor,
    ) -> usize {
        let lines = self.break_inline(items, separator, style);

        let sep_style = style.with_color(separator_color);
        for line in &lines {
            let total: f32 = line.iter().map(|(_, w)| w).sum();
            let mut x = match anchor {
                Anchor::Start => self.x,
                Anchor::Middle => self.x + (self.width - total) / 2.0,
                Anchor::End => self.right() - total,
            };
            let bottom = self.y + style.line_height();
            for (token, w) in line {
                match token {
                    Token::Item(item) => {
                        canvas.text(style.run(x, self.y, &item.text, Anchor::Start), bottom);
                        if let Some(href) = &item.href {
                            canvas.link(href, Rect::new(x, self.y, *w, style.line_height()));
                        }
                    }
                    Token::Separator => {
                        canvas.text(sep_style.run(x + INLINE_PAD, self.y, separator, Anchor::Start), bottom);
                    }
                }
                x += w;
            }
            self.y = bottom;
        }
        lines.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Proficiency bars
// ────────────────────────────────────────────────────────────────────────────

pub const BAR_SEGMENTS: u8 = 5;

/// Geometry of a segmented proficiency bar.
#[derive(Debug, Clone, Copy)]
pub struct BarStyle {
    pub segment_width: f32,
    pub segment_height: f32,
    pub gap: f32,
    pub on: Color,
    pub off: Color,
}

impl BarStyle {
    pub fn width(&self) -> f32 {
        let n = BAR_SEGMENTS as f32;
        n * self.segment_width + (n - 1.0) * self.gap
    }
}

/// Draws a fixed 5-segment bar with `filled` segments lit (clamped to 0..=5).
pub fn proficiency_bar(canvas: &mut Canvas, x: f32, top: f32, filled: u8, style: &BarStyle) {
    let filled = filled.min(BAR_SEGMENTS);
    for i in 0..BAR_SEGMENTS {
        let sx = x + i as f32 * (style.segment_width + style.gap);
        let color = if i < filled { style.on } else { style.off };
        canvas.fill_rounded(
            Rect::new(sx, top, style.segment_width, style.segment_height),
            color,
            style.segment_height / 2.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> TextStyle {
        TextStyle::new(FontFamily::Sans, 13.0, Color::GRAY_800)
    }

    fn item(text: &str, href: Option<&str>) -> InlineItem {
        InlineItem {
            text: text.to_string(),
            href: href.map(str::to_string),
        }
    }

    fn count_text(canvas: Canvas, needle: &str) -> usize {
        canvas
            .finish("root", TemplateId::Classic, 0.0)
            .texts()
            .filter(|t| t.text == needle)
            .count()
    }

    #[test]
    fn test_paragraph_advances_cursor_per_line() {
        let mut canvas = Canvas::new(400.0, 600.0);
        let mut col = Column::new(10.0, 20.0, 100.0);
        let lines = col.paragraph(&mut canvas, "one two three four five six seven eight", &body());
        assert!(lines > 1);
        assert!((col.y - (20.0 + lines as f32 * body().line_height())).abs() < 1e-3);
    }

    #[test]
    fn test_inline_separators_only_between_items() {
        let mut canvas = Canvas::new(800.0, 600.0);
        let mut col = Column::new(0.0, 0.0, 700.0);
        let items = vec![item("a@b.io", Some("mailto:a@b.io")), item("555", None), item("Town", None)];
        col.inline(&mut canvas, &items, "|", &body(), Color::GRAY_300, Anchor::Middle);
        assert_eq!(count_text(canvas, "|"), 2);
    }

    #[test]
    fn test_inline_wrapped_still_has_n_minus_one_separators() {
        let mut canvas = Canvas::new(800.0, 600.0);
        let mut col = Column::new(0.0, 0.0, 90.0);
        let items: Vec<_> = (0..5).map(|i| item(&format!("item-{i}"), None)).collect();
        let lines = col.inline(&mut canvas, &items, "|", &body(), Color::GRAY_300, Anchor::Start);
        assert!(lines > 1);
        assert_eq!(count_text(canvas, "|"), 4);
    }

    #[test]
    fn test_inline_records_links_in_order() {
        let mut canvas = Canvas::new(800.0, 600.0);
        let mut col = Column::new(0.0, 0.0, 700.0);
        let items = vec![
            item("a@b.io", Some("mailto:a@b.io")),
            item("LinkedIn", Some("https://linkedin.com/in/a")),
        ];
        col.inline(&mut canvas, &items, "|", &body(), Color::GRAY_300, Anchor::Start);
        let doc = canvas.finish("root", TemplateId::Classic, 0.0);
        assert_eq!(doc.links.len(), 2);
        assert_eq!(doc.links[0].id, "resume-link-0");
        assert_eq!(doc.links[1].href, "https://linkedin.com/in/a");
        assert!(doc.links[0].rect.right() <= doc.links[1].rect.x);
    }

    #[test]
    fn test_height_is_at_least_one_page() {
        let canvas = Canvas::new(793.7, 1122.5);
        assert_eq!(canvas.finish("root", TemplateId::Classic, 32.0).height, 1122.5);
    }

    #[test]
    fn test_overflow_grows_height() {
        let mut canvas = Canvas::new(793.7, 1122.5);
        canvas.fill(Rect::new(0.0, 1500.0, 10.0, 10.0), Color::BLACK);
        assert_eq!(canvas.finish("root", TemplateId::Classic, 32.0).height, 1542.0);
    }

    #[test]
    fn test_bar_clamps_filled_segments() {
        let bar = BarStyle {
            segment_width: 16.0,
            segment_height: 8.0,
            gap: 4.0,
            on: Color::BLACK,
            off: Color::GRAY_200,
        };
        let mut canvas = Canvas::new(200.0, 100.0);
        proficiency_bar(&mut canvas, 0.0, 0.0, 9, &bar);
        let doc = canvas.finish("root", TemplateId::Classic, 0.0);
        let lit = doc
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Fill { color, .. } if *color == Color::BLACK))
            .count();
        assert_eq!(lit, 5);
        assert_eq!(doc.primitives.len(), 5);
        assert!((bar.width() - 96.0).abs() < 1e-3);
    }
}
