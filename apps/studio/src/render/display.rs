//! The rendered document: a flat, absolutely positioned display list in CSS
//! pixels, plus the link elements and section boxes recorded while laying out.

use serde::Serialize;

use crate::render::metrics::FontFamily;
use crate::templates::style::Color;
use crate::templates::{SectionKind, TemplateId};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    #[cfg(test)]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn svg(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// One already-wrapped line of text. `y` is the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: FontFamily,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
    pub anchor: Anchor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Primitive {
    Fill {
        rect: Rect,
        color: Color,
        radius: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        width: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        color: Color,
    },
    Text(TextRun),
    Image {
        rect: Rect,
        href: String,
        circular: bool,
    },
}

/// An outbound link with a stable DOM-style id and its box in document space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkElement {
    pub id: String,
    pub href: String,
    pub rect: Rect,
}

/// Where a section landed and how many content rows it drew.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSection {
    pub kind: SectionKind,
    pub heading: String,
    pub top: f32,
    pub bottom: f32,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub element_id: String,
    pub template: TemplateId,
    pub width: f32,
    pub height: f32,
    pub primitives: Vec<Primitive>,
    pub links: Vec<LinkElement>,
    pub sections: Vec<RenderedSection>,
}

impl RenderedDocument {
    /// All text runs in paint order.
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn section(&self, kind: SectionKind) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// The same document under a different element id.
    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = element_id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_and_translate() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0).translate(-10.0, 5.0);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.right(), 30.0);
        assert_eq!(r.bottom(), 65.0);
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
    }
}
