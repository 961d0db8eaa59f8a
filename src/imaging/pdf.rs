//! Single-page PDF encoding via `printpdf`.
//!
//! The page is sized so that the embedded image fills it edge to edge at the
//! fixed output resolution. Grayscale images are embedded as single-channel
//! DeviceGray, RGB images as DeviceRGB; alpha-bearing images are rejected and
//! must be flattened by the caller first.

use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};

use crate::error::ProcessError;
use crate::imaging::color::ScanImage;

/// Fixed resolution metadata for the output document, in dots per inch.
pub const OUTPUT_DPI: f32 = 100.0;

const MM_PER_INCH: f32 = 25.4;

/// Encode the image as a one-page PDF.
///
/// The single page is sized to the image's pixel dimensions at
/// [`OUTPUT_DPI`], with the image placed full-bleed at the page origin.
pub fn encode_single_page(image: &ScanImage, title: &str) -> Result<Vec<u8>, ProcessError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ProcessError::Encode(
            "cannot encode an empty image".to_string(),
        ));
    }

    let (data_format, pixels) = match image {
        ScanImage::Luma(buf) => (RawImageFormat::R8, buf.as_raw().clone()),
        ScanImage::Rgb(buf) => (RawImageFormat::RGB8, buf.as_raw().clone()),
        ScanImage::Rgba(_) => {
            return Err(ProcessError::Encode(
                "alpha-bearing image cannot be embedded in a PDF; flatten to RGB first"
                    .to_string(),
            ));
        }
    };

    let raw = RawImage {
        pixels: RawImageData::U8(pixels),
        width: width as usize,
        height: height as usize,
        data_format,
        tag: Vec::new(),
    };

    let mut doc = PdfDocument::new(title);
    let image_id = doc.add_image(&raw);

    let page_w = Mm(width as f32 / OUTPUT_DPI * MM_PER_INCH);
    let page_h = Mm(height as f32 / OUTPUT_DPI * MM_PER_INCH);

    let ops = vec![Op::UseXobject {
        id: image_id,
        transform: XObjectTransform {
            translate_x: Some(Pt(0.0)),
            translate_y: Some(Pt(0.0)),
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            dpi: Some(OUTPUT_DPI),
            rotate: None,
            no_auto_scale: false,
        },
    }];

    doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);

    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

    tracing::debug!(
        width,
        height,
        bytes = output.len(),
        warnings = warnings.len(),
        "PDF page encoded"
    );

    Ok(output)
}
