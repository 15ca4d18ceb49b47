//! SVG to bitmap, on an opaque white background.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::export::ExportError;

/// Packed 8-bit RGB pixels, row-major, no padding.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

#[cfg(test)]
impl Bitmap {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 3) as usize;
        Some([self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]])
    }
}

pub trait Rasterize: Send + Sync {
    /// Draws `svg` (a `width` x `height` document) at `scale` device pixels per unit.
    fn rasterize(&self, svg: &str, width: f32, height: f32, scale: f32) -> Result<Bitmap, ExportError>;
}

pub struct SvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgRasterizer {
    /// Loads system fonts plus any fonts under `font_dir`.
    pub fn new(font_dir: Option<&Path>) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        if let Some(dir) = font_dir {
            fontdb.load_fonts_dir(dir);
        }
        if fontdb.is_empty() {
            warn!("No fonts found, exported text may be missing");
        } else {
            debug!(faces = fontdb.len(), "loaded fonts for rasterization");
        }
        Self {
            fontdb: Arc::new(fontdb),
        }
    }
}

impl Rasterize for SvgRasterizer {
    fn rasterize(&self, svg: &str, width: f32, height: f32, scale: f32) -> Result<Bitmap, ExportError> {
        let mut opts = usvg::Options::default();
        opts.fontdb = Arc::clone(&self.fontdb);
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| ExportError::Rasterize(format!("SVG parsing failed: {e}")))?;

        let px_width = (width * scale).ceil() as u32;
        let px_height = (height * scale).ceil() as u32;
        let mut pixmap = tiny_skia::Pixmap::new(px_width, px_height).ok_or_else(|| {
            ExportError::Rasterize(format!("Failed to create pixmap ({px_width}x{px_height})"))
        })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        // Opaque background, so premultiplied RGBA is plain RGBA here.
        let rgb = pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        Ok(Bitmap {
            width: px_width,
            height: px_height,
            rgb,
        })
    }
}

/// White page of the requested size, for exercising the pipeline without fonts.
#[cfg(test)]
pub struct BlankRasterizer;

#[cfg(test)]
impl Rasterize for BlankRasterizer {
    fn rasterize(&self, _svg: &str, width: f32, height: f32, scale: f32) -> Result<Bitmap, ExportError> {
        let w = (width * scale).ceil() as u32;
        let h = (height * scale).ceil() as u32;
        Ok(Bitmap {
            width: w,
            height: h,
            rgb: vec![255; (w * h * 3) as usize],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50"><rect x="50" y="0" width="50" height="50" fill="#000000"/></svg>"##;

    #[test]
    fn test_rasterizes_at_scale_on_white() {
        let bitmap = SvgRasterizer::new(None).rasterize(SQUARE, 100.0, 50.0, 3.0).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (300, 150));
        assert_eq!(bitmap.rgb.len(), 300 * 150 * 3);
        assert_eq!(bitmap.pixel(10, 10), Some([255, 255, 255]));
        assert_eq!(bitmap.pixel(250, 75), Some([0, 0, 0]));
    }

    #[test]
    fn test_invalid_svg_is_a_rasterize_error() {
        let err = SvgRasterizer::new(None).rasterize("<svg", 10.0, 10.0, 3.0).unwrap_err();
        assert!(matches!(err, ExportError::Rasterize(msg) if msg.contains("SVG parsing failed")));
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let bitmap = Bitmap {
            width: 1,
            height: 1,
            rgb: vec![1, 2, 3],
        };
        assert_eq!(bitmap.pixel(0, 0), Some([1, 2, 3]));
        assert_eq!(bitmap.pixel(1, 0), None);
    }
}
