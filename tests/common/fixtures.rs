//! Test fixtures: multipart form builder, in-memory image builders, and
//! PDF inspection helpers.

use image::{ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use lopdf::{Document, Object};
use std::io::Cursor;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Builder for multipart/form-data request bodies
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    /// Add a plain text field
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Add a file field
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Finish the form, returning (content type header value, body)
    pub fn build(mut self) -> (String, Vec<u8>) {
        self.body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={BOUNDARY}"), self.body)
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a solid-color RGB image as PNG bytes
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode(RgbImage::from_pixel(width, height, Rgb(rgb)), ImageFormat::Png)
}

/// Encode a solid-color RGB image as JPEG bytes
pub fn solid_jpeg(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode(RgbImage::from_pixel(width, height, Rgb(rgb)), ImageFormat::Jpeg)
}

/// Encode a solid-color RGB image as BMP bytes
pub fn solid_bmp(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode(RgbImage::from_pixel(width, height, Rgb(rgb)), ImageFormat::Bmp)
}

/// Encode a solid RGBA image (with alpha) as PNG bytes
pub fn solid_rgba_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    encode(
        RgbaImage::from_pixel(width, height, Rgba(rgba)),
        ImageFormat::Png,
    )
}

/// Encode a grayscale image as PNG bytes
pub fn solid_gray_png(width: u32, height: u32, value: u8) -> Vec<u8> {
    encode(
        image::GrayImage::from_pixel(width, height, Luma([value])),
        ImageFormat::Png,
    )
}

/// Encode a horizontal RGB gradient as PNG bytes
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / width.max(1)) as u8;
        Rgb([v, 255 - v, 128])
    });
    encode(img, ImageFormat::Png)
}

fn encode<I>(img: I, format: ImageFormat) -> Vec<u8>
where
    I: image::GenericImageView,
    image::DynamicImage: From<I>,
{
    let dynamic = image::DynamicImage::from(img);
    let mut buffer = Vec::new();
    dynamic
        .write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode fixture image");
    buffer
}

/// Structural facts about the (single) image embedded in a PDF
pub struct PdfImageInfo {
    pub width: i64,
    pub height: i64,
    pub color_space: String,
}

/// Number of pages in a PDF document
pub fn pdf_page_count(bytes: &[u8]) -> usize {
    Document::load_mem(bytes)
        .expect("Failed to parse PDF")
        .get_pages()
        .len()
}

/// Find the first image XObject in the PDF and report its dimensions and
/// color space
pub fn pdf_image_info(bytes: &[u8]) -> PdfImageInfo {
    let doc = Document::load_mem(bytes).expect("Failed to parse PDF");

    for (_, object) in doc.objects.iter() {
        let Object::Stream(stream) = object else {
            continue;
        };
        let is_image = matches!(stream.dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Image");
        if !is_image {
            continue;
        }

        let width = number(&doc, stream.dict.get(b"Width").expect("image Width"));
        let height = number(&doc, stream.dict.get(b"Height").expect("image Height"));
        let color_space = match resolve(&doc, stream.dict.get(b"ColorSpace").expect("ColorSpace"))
        {
            Object::Name(name) => String::from_utf8_lossy(name).into_owned(),
            other => format!("{other:?}"),
        };

        return PdfImageInfo {
            width: width as i64,
            height: height as i64,
            color_space,
        };
    }

    panic!("No image XObject found in PDF");
}

/// Decoded sample bytes of the first image XObject in the PDF, row-major
/// with interleaved channels
pub fn pdf_image_pixels(bytes: &[u8]) -> Vec<u8> {
    let doc = Document::load_mem(bytes).expect("Failed to parse PDF");

    for (_, object) in doc.objects.iter() {
        let Object::Stream(stream) = object else {
            continue;
        };
        let is_image = matches!(stream.dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Image");
        if !is_image {
            continue;
        }

        // Image streams are usually flate-compressed; fall back to the raw
        // content for uncompressed streams.
        return stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());
    }

    panic!("No image XObject found in PDF");
}

/// MediaBox of the first page, in points
pub fn pdf_media_box(bytes: &[u8]) -> [f64; 4] {
    let doc = Document::load_mem(bytes).expect("Failed to parse PDF");
    let (_, page_id) = doc
        .get_pages()
        .into_iter()
        .next()
        .expect("PDF has no pages");

    // MediaBox may be inherited from the page tree
    let mut dict = doc.get_dictionary(page_id).expect("page dictionary");
    loop {
        if let Ok(obj) = dict.get(b"MediaBox") {
            let Object::Array(values) = resolve(&doc, obj) else {
                panic!("MediaBox is not an array");
            };
            assert_eq!(values.len(), 4, "MediaBox should have 4 entries");
            let mut result = [0.0; 4];
            for (i, value) in values.iter().enumerate() {
                result[i] = number(&doc, value);
            }
            return result;
        }

        let parent = dict.get(b"Parent").expect("page without MediaBox or Parent");
        let Object::Reference(parent_id) = parent else {
            panic!("Parent is not a reference");
        };
        dict = doc.get_dictionary(*parent_id).expect("parent dictionary");
    }
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).expect("dangling reference"),
        other => other,
    }
}

fn number(doc: &Document, object: &Object) -> f64 {
    match resolve(doc, object) {
        Object::Integer(i) => *i as f64,
        Object::Real(r) => *r as f64,
        other => panic!("expected a number, got {other:?}"),
    }
}
