//! SVG serialization of a rendered document.
//!
//! The same markup feeds the on-screen preview and the rasterizer. Every
//! wrapped line is its own `<text>` element, so the rasterizer draws exactly
//! the line breaks the layout computed.

use std::fmt::Write as _;

use crate::render::display::{Primitive, RenderedDocument, TextRun};
use crate::render::viewport::ViewportTransform;
use crate::templates::style::Color;

/// Trims trailing zeros so coordinates stay compact.
fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn text_element(out: &mut String, run: &TextRun) {
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" text-anchor="{}""#,
        num(run.x),
        num(run.y),
        escape_xml(run.font.css()),
        num(run.size),
        run.color.hex(),
        run.anchor.svg(),
    );
    if run.bold {
        out.push_str(r#" font-weight="700""#);
    }
    if run.italic {
        out.push_str(r#" font-style="italic""#);
    }
    let _ = write!(out, ">{}</text>", escape_xml(&run.text));
}

/// Document-space SVG at true size.
pub fn to_svg(doc: &RenderedDocument) -> String {
    to_svg_scaled(doc, &ViewportTransform::IDENTITY)
}

/// SVG whose outer size is scaled by `viewport`. The viewBox, and so every
/// layout coordinate inside, stays in document space.
pub fn to_svg_scaled(doc: &RenderedDocument, viewport: &ViewportTransform) -> String {
    let (outer_w, outer_h) = viewport.scaled_size(doc.width, doc.height);
    let mut out = String::with_capacity(doc.primitives.len() * 160);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" id="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        escape_xml(&doc.element_id),
        num(outer_w),
        num(outer_h),
        num(doc.width),
        num(doc.height),
    );
    let _ = write!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        num(doc.width),
        num(doc.height),
        Color::WHITE.hex()
    );

    let mut clip_id = 0usize;
    for primitive in &doc.primitives {
        match primitive {
            Primitive::Fill { rect, color, radius } => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                    num(rect.x),
                    num(rect.y),
                    num(rect.width),
                    num(rect.height),
                    color.hex()
                );
                if *radius > 0.0 {
                    let _ = write!(out, r#" rx="{}""#, num(*radius));
                }
                out.push_str("/>");
            }
            Primitive::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => {
                let _ = write!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                    num(*x1),
                    num(*y1),
                    num(*x2),
                    num(*y2),
                    color.hex(),
                    num(*width)
                );
            }
            Primitive::Circle { cx, cy, r, color } => {
                let _ = write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    num(*cx),
                    num(*cy),
                    num(*r),
                    color.hex()
                );
            }
            Primitive::Text(run) => text_element(&mut out, run),
            Primitive::Image {
                rect,
                href,
                circular,
            } => {
                let clip = if *circular {
                    let id = format!("clip-{clip_id}");
                    clip_id += 1;
                    let _ = write!(
                        out,
                        r#"<clipPath id="{}"><circle cx="{}" cy="{}" r="{}"/></clipPath>"#,
                        id,
                        num(rect.x + rect.width / 2.0),
                        num(rect.y + rect.height / 2.0),
                        num(rect.width.min(rect.height) / 2.0)
                    );
                    format!(r#" clip-path="url(#{id})""#)
                } else {
                    String::new()
                };
                let _ = write!(
                    out,
                    r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" xlink:href="{}"{}/>"#,
                    num(rect.x),
                    num(rect.y),
                    num(rect.width),
                    num(rect.height),
                    escape_xml(href),
                    clip
                );
            }
        }
    }

    for link in &doc.links {
        let _ = write!(
            out,
            r#"<a id="{}" href="{}" xlink:href="{}"><rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="0"/></a>"#,
            escape_xml(&link.id),
            escape_xml(&link.href),
            escape_xml(&link.href),
            num(link.rect.x),
            num(link.rect.y),
            num(link.rect.width),
            num(link.rect.height),
            Color::WHITE.hex()
        );
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeDocument;
    use crate::render::render;

    fn sample() -> RenderedDocument {
        let mut doc = ResumeDocument::minimal("Tom & Jerry <Co>", "tom@example.com");
        doc.professional_summary = Some("Line one\nLine two".to_string());
        render(&doc, "classic")
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(793.7007), "793.7");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_svg_escapes_text() {
        let svg = to_svg(&sample());
        assert!(svg.contains("Tom &amp; Jerry &lt;Co&gt;"));
        assert!(!svg.contains("<Co>"));
    }

    #[test]
    fn test_svg_has_root_id_and_link_anchors() {
        let svg = to_svg(&sample());
        assert!(svg.contains(r#"id="resume-preview""#));
        assert!(svg.contains(r#"<a id="resume-link-0" href="mailto:tom@example.com""#));
    }

    #[test]
    fn test_one_text_element_per_line() {
        let doc = sample();
        let svg = to_svg(&doc);
        assert_eq!(svg.matches("<text ").count(), doc.texts().count());
    }

    #[test]
    fn test_viewport_scales_outer_size_only() {
        let doc = sample();
        let svg = to_svg_scaled(&doc, &ViewportTransform::new(0.5));
        assert!(svg.contains(&format!(r#"width="{}""#, num(doc.width * 0.5))));
        assert!(svg.contains(&format!(r#"viewBox="0 0 {} {}""#, num(doc.width), num(doc.height))));
    }
}
