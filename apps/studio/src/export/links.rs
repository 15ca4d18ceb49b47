//! Mapping on-page link boxes into PDF annotation rectangles.

use serde::Serialize;

use crate::export::placement::{PageFormat, Placement};
use crate::render::display::{LinkElement, Rect};

/// A clickable region in PDF user space: millimetres, origin bottom-left.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRegion {
    pub id: String,
    pub href: String,
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

#[cfg(test)]
impl LinkRegion {
    pub fn contains(&self, x_mm: f32, y_mm: f32) -> bool {
        x_mm >= self.llx && x_mm <= self.urx && y_mm >= self.lly && y_mm <= self.ury
    }
}

/// Maps one box, given relative to the snapshot origin, through `placement`.
pub fn map_rect(rect: &Rect, placement: &Placement, page: &PageFormat) -> (f32, f32, f32, f32) {
    let left = placement.x_mm + rect.x * placement.scale;
    let top = placement.y_mm + rect.y * placement.scale;
    let width = rect.width * placement.scale;
    let height = rect.height * placement.scale;
    let lly = page.height_mm - (top + height);
    (left, lly, left + width, lly + height)
}

/// Maps links found on a surface positioned at `origin`.
///
/// Links without an href or with an empty box are dropped.
pub fn map_links(
    links: &[LinkElement],
    origin: (f32, f32),
    placement: &Placement,
    page: &PageFormat,
) -> Vec<LinkRegion> {
    links
        .iter()
        .filter(|l| !l.href.trim().is_empty() && l.rect.width > 0.0 && l.rect.height > 0.0)
        .map(|l| {
            let relative = l.rect.translate(-origin.0, -origin.1);
            let (llx, lly, urx, ury) = map_rect(&relative, placement, page);
            LinkRegion {
                id: l.id.clone(),
                href: l.href.clone(),
                llx,
                lly,
                urx,
                ury,
            }
        })
        .collect()
}
