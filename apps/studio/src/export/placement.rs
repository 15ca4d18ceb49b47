//! Fitting a rendered page onto a fixed PDF page.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFormat {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageFormat {
    pub const A4: PageFormat = PageFormat {
        width_mm: 210.0,
        height_mm: 297.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FitMode {
    /// Full page width, centred vertically.
    FitWidth,
    /// Full page height, centred horizontally.
    FitHeight,
}

/// Where the image lands on the page. Origin is the page's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
    /// Millimetres per source unit, identical on both axes.
    pub scale: f32,
    pub mode: FitMode,
}

/// Heights within this of the page height still fit by width.
const FIT_TOLERANCE_MM: f32 = 1e-3;

/// Fits a `width` x `height` source onto `page` without cropping or stretching.
///
/// Source dimensions must be positive; degenerate sizes are treated as one unit.
pub fn fit_to_page(width: f32, height: f32, page: PageFormat) -> Placement {
    let width = width.max(1.0);
    let height = height.max(1.0);

    let height_at_page_width = height * page.width_mm / width;
    if height_at_page_width > page.height_mm + FIT_TOLERANCE_MM {
        let scale = page.height_mm / height;
        let width_mm = width * scale;
        Placement {
            x_mm: (page.width_mm - width_mm) / 2.0,
            y_mm: 0.0,
            width_mm,
            height_mm: page.height_mm,
            scale,
            mode: FitMode::FitHeight,
        }
    } else {
        let scale = page.width_mm / width;
        Placement {
            x_mm: 0.0,
            y_mm: ((page.height_mm - height_at_page_width) / 2.0).max(0.0),
            width_mm: page.width_mm,
            height_mm: height_at_page_width,
            scale,
            mode: FitMode::FitWidth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::style::PageSpec;
    use proptest::prelude::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_exact_a4_fills_page() {
        let a4 = PageSpec::A4;
        let p = fit_to_page(a4.width_px(), a4.height_px(), PageFormat::A4);
        assert_eq!(p.mode, FitMode::FitWidth);
        assert_eq!(p.x_mm, 0.0);
        assert!(p.y_mm.abs() < EPS);
        assert!((p.width_mm - 210.0).abs() < EPS);
        assert!((p.height_mm - 297.0).abs() < EPS);
    }

    #[test]
    fn test_rounded_a4_pixels_fit_width() {
        for (w, h) in [(793.7, 1122.5), (793.7007, 1122.5197), (793.70081, 1122.52)] {
            assert_eq!(fit_to_page(w, h, PageFormat::A4).mode, FitMode::FitWidth, "{w}x{h}");
        }
    }

    #[test]
    fn test_tall_page_fits_height() {
        let p = fit_to_page(793.7, 2245.0, PageFormat::A4);
        assert_eq!(p.mode, FitMode::FitHeight);
        assert_eq!(p.y_mm, 0.0);
        assert!((p.height_mm - 297.0).abs() < EPS);
        assert!((p.x_mm * 2.0 + p.width_mm - 210.0).abs() < EPS);
    }

    #[test]
    fn test_wide_page_fits_width() {
        let p = fit_to_page(1000.0, 500.0, PageFormat::A4);
        assert_eq!(p.mode, FitMode::FitWidth);
        assert!((p.height_mm - 105.0).abs() < EPS);
        assert!((p.y_mm - 96.0).abs() < EPS);
    }

    proptest! {
        #[test]
        fn test_placement_is_uniform_and_uncropped(w in 50.0f32..4000.0, h in 50.0f32..8000.0) {
            let page = PageFormat::A4;
            let p = fit_to_page(w, h, page);
            prop_assert!((p.width_mm / w - p.height_mm / h).abs() < 1e-4);
            prop_assert!(p.x_mm >= -EPS && p.y_mm >= -EPS);
            prop_assert!(p.x_mm + p.width_mm <= page.width_mm + EPS);
            prop_assert!(p.y_mm + p.height_mm <= page.height_mm + EPS);
            match p.mode {
                FitMode::FitWidth => {
                    prop_assert!((p.width_mm - page.width_mm).abs() < EPS);
                    prop_assert!((2.0 * p.y_mm + p.height_mm - page.height_mm).abs() < 1e-2);
                }
                FitMode::FitHeight => {
                    prop_assert!((p.height_mm - page.height_mm).abs() < EPS);
                    prop_assert!((2.0 * p.x_mm + p.width_mm - page.width_mm).abs() < 1e-2);
                }
            }
        }
    }
}
