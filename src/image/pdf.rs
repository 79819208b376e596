//! Single-page PDF output: the page is one DCT-encoded image sized so that
//! the pixel grid maps to the requested dpi.
use super::io::ensure_parent_dir;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;

const POINTS_PER_INCH: f64 = 72.0;

/// Page size in PDF points for a `width × height` pixel image at `dpi`.
pub fn page_size_pt(width: usize, height: usize, dpi: u32) -> (f64, f64) {
    let dpi = f64::from(dpi.max(1));
    (
        width as f64 / dpi * POINTS_PER_INCH,
        height as f64 / dpi * POINTS_PER_INCH,
    )
}

/// Build the document in memory.
pub fn build_document(jpeg: &[u8], width: usize, height: usize, dpi: u32) -> Result<Document, String> {
    let (page_w, page_h) = page_size_pt(width, height, dpi);
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg.to_vec(),
    );
    let image_id = doc.add_object(image);

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(page_w as f32),
                    0.into(),
                    0.into(),
                    Object::Real(page_h as f32),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| format!("Failed to encode PDF content: {e}"))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), Object::Real(page_w as f32), Object::Real(page_h as f32)],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    Ok(doc)
}

/// Write a one-page PDF embedding `jpeg` to `path`.
pub fn write_single_page(
    path: &Path,
    jpeg: &[u8],
    width: usize,
    height: usize,
    dpi: u32,
) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut doc = build_document(jpeg, width, height, dpi)?;
    doc.save(path)
        .map(|_| ())
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_page_at_300_dpi() {
        let (w, h) = page_size_pt(2550, 3300, 300);
        assert!((w - 612.0).abs() < 1e-9);
        assert!((h - 792.0).abs() < 1e-9);
    }

    #[test]
    fn document_has_one_page() {
        let doc = build_document(&[0xFF, 0xD8, 0xFF, 0xD9], 10, 20, 300).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
