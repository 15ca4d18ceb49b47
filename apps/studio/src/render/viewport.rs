//! Cosmetic preview scaling, kept outside the layout.

use serde::{Deserialize, Serialize};

use crate::render::display::Rect;

/// Horizontal breathing room around a scaled-down preview, in px.
pub const VIEWPORT_GUTTER: f32 = 32.0;
const MIN_SCALE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub scale: f32,
}

impl ViewportTransform {
    pub const IDENTITY: ViewportTransform = ViewportTransform { scale: 1.0 };

    pub fn new(scale: f32) -> Self {
        Self {
            scale: scale.clamp(MIN_SCALE, 1.0),
        }
    }

    /// `min((container - 32) / page_width, 1)`: shrink to fit, never enlarge.
    pub fn fit(container_width: f32, page_width: f32) -> Self {
        if page_width <= 0.0 {
            return Self::IDENTITY;
        }
        Self::new(((container_width - VIEWPORT_GUTTER) / page_width).min(1.0))
    }

    pub fn scaled_size(&self, width: f32, height: f32) -> (f32, f32) {
        (width * self.scale, height * self.scale)
    }

    /// Document-space rect to screen space.
    pub fn apply(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.x * self.scale,
            rect.y * self.scale,
            rect.width * self.scale,
            rect.height * self.scale,
        )
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_shrinks_on_narrow_container() {
        let t = ViewportTransform::fit(400.0, 793.7);
        assert!((t.scale - (368.0 / 793.7)).abs() < 1e-4);
    }

    #[test]
    fn test_fit_never_enlarges() {
        assert_eq!(ViewportTransform::fit(2000.0, 793.7).scale, 1.0);
    }

    #[test]
    fn test_fit_clamps_tiny_container() {
        assert_eq!(ViewportTransform::fit(10.0, 793.7).scale, MIN_SCALE);
    }

    #[test]
    fn test_apply_scales_rect() {
        let r = ViewportTransform::new(0.5).apply(&Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(r, Rect::new(5.0, 10.0, 15.0, 20.0));
    }
}
