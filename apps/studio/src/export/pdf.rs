//! Single-page PDF composition: one flattened image plus link annotations.

use std::io::{BufWriter, Cursor, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use printpdf::lopdf;
use printpdf::*;

use crate::export::links::LinkRegion;
use crate::export::placement::{PageFormat, Placement};
use crate::export::raster::Bitmap;
use crate::export::ExportError;

const MM_PER_PT: f32 = 25.4 / 72.0;

pub fn compose(
    title: &str,
    bitmap: &Bitmap,
    placement: &Placement,
    links: &[LinkRegion],
    page: &PageFormat,
) -> Result<Vec<u8>, ExportError> {
    let (doc, page_index, layer_index) =
        PdfDocument::new(title, Mm(page.width_mm), Mm(page.height_mm), "Layer 1");
    let layer = doc.get_page(page_index).get_layer(layer_index);

    let image = Image::from(ImageXObject {
        width: Px(bitmap.width as usize),
        height: Px(bitmap.height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: bitmap.rgb.clone(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // At 72 DPI one pixel is one point; scale from there to the placed size.
    let width_pt = placement.width_mm / MM_PER_PT;
    let height_pt = placement.height_mm / MM_PER_PT;
    let bottom_mm = page.height_mm - (placement.y_mm + placement.height_mm);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(placement.x_mm)),
            translate_y: Some(Mm(bottom_mm)),
            scale_x: Some(width_pt / bitmap.width as f32),
            scale_y: Some(height_pt / bitmap.height as f32),
            dpi: Some(72.0),
            ..Default::default()
        },
    );

    for link in links {
        layer.add_link_annotation(LinkAnnotation::new(
            printpdf::Rect::new(Mm(link.llx), Mm(link.lly), Mm(link.urx), Mm(link.ury)),
            Some(BorderArray::Solid([0.0, 0.0, 0.0])),
            Some(ColorArray::Transparent),
            Actions::uri(link.href.clone()),
            Some(HighlightingMode::None),
        ));
    }

    let mut buf = Vec::new();
    {
        let mut writer = BufWriter::new(Cursor::new(&mut buf));
        doc.save(&mut writer)
            .map_err(|e| ExportError::Compose(e.to_string()))?;
    }
    deflate_images(&buf)
}

/// Flate-encodes every image stream that is still stored raw.
fn deflate_images(pdf: &[u8]) -> Result<Vec<u8>, ExportError> {
    let compose_err = |e: lopdf::Error| ExportError::Compose(e.to_string());
    let mut doc = lopdf::Document::load_mem(pdf).map_err(compose_err)?;

    for object in doc.objects.values_mut() {
        let lopdf::Object::Stream(stream) = object else {
            continue;
        };
        let is_image = matches!(
            stream.dict.get(b"Subtype"),
            Ok(lopdf::Object::Name(name)) if name.as_slice() == b"Image"
        );
        if !is_image || stream.dict.has(b"Filter") {
            continue;
        }
        let deflated = deflate(&stream.content)
            .map_err(|e| ExportError::Compose(format!("image compression failed: {e}")))?;
        stream.dict.set("Filter", lopdf::Object::Name(b"FlateDecode".to_vec()));
        stream.set_content(deflated);
    }

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| ExportError::Compose(e.to_string()))?;
    Ok(out)
}

fn deflate(raw: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::placement::fit_to_page;

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle.as_bytes())
    }

    #[test]
    fn test_compose_writes_pdf_with_link() {
        let page = PageFormat::A4;
        let bitmap = Bitmap {
            width: 4,
            height: 6,
            rgb: vec![255; 4 * 6 * 3],
        };
        let placement = fit_to_page(4.0, 6.0, page);
        let links = vec![LinkRegion {
            id: "resume-link-0".to_string(),
            href: "https://example.com/studio".to_string(),
            llx: 10.0,
            lly: 200.0,
            urx: 60.0,
            ury: 206.0,
        }];
        let bytes = compose("Resume", &bitmap, &placement, &links, &page).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(contains(&bytes, "https://example.com/studio"));
    }

    /// A4 at 3x with text-like rows, the size a seeded resume rasterizes to.
    fn page_like_bitmap() -> Bitmap {
        let (width, height) = (2382u32, 3369u32);
        let mut rgb = vec![255u8; (width * height * 3) as usize];
        for y in (120..height - 120).filter(|y| y % 48 < 18) {
            for x in (150..width - 150).filter(|x| (x / 11 + y / 48) % 7 != 0) {
                let i = ((y * width + x) * 3) as usize;
                let shade = (20 + y % 48) as u8;
                rgb[i..i + 3].copy_from_slice(&[shade, shade, shade + 10]);
            }
        }
        Bitmap { width, height, rgb }
    }

    #[test]
    fn test_full_page_export_is_compressed() {
        let page = PageFormat::A4;
        let bitmap = page_like_bitmap();
        let raw_len = bitmap.rgb.len();
        let placement = fit_to_page(794.0, 1123.0, page);
        let bytes = compose("Resume", &bitmap, &placement, &[], &page).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(contains(&bytes, "FlateDecode"));
        assert!(bytes.len() < 2 * 1024 * 1024, "pdf is {} bytes", bytes.len());
        assert!(bytes.len() * 10 < raw_len);
    }
}
