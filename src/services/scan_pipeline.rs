//! The image enhancement pipeline.
//!
//! One invocation is stateless and self-contained: decode the upload,
//! normalize the color mode, run the fixed brightness -> contrast ->
//! sharpness filter chain, and encode the result as a single-page PDF.
//! No I/O happens here beyond the input and output buffers.

use crate::error::ProcessError;
use crate::imaging::{enhance, pdf, ColorMode, ScanImage};
use crate::models::EnhanceParams;

/// Title embedded in the generated document's metadata.
const PDF_TITLE: &str = "documento_escaneado";

/// Converts uploaded images into enhanced single-page PDFs.
#[derive(Debug, Default)]
pub struct ScanPipeline;

impl ScanPipeline {
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline on raw image bytes.
    ///
    /// Decoding failure is the only early exit; the filter order afterwards
    /// is fixed and behavior-defining (reordering changes the numeric
    /// output). Returns the bytes of a one-page PDF sized to the processed
    /// image at the fixed output resolution.
    pub fn process(&self, raw: &[u8], params: &EnhanceParams) -> Result<Vec<u8>, ProcessError> {
        let decoded = image::load_from_memory(raw)
            .map_err(|e| ProcessError::Decode(format!("cannot decode uploaded image: {e}")))?;

        let mut img = ScanImage::from_dynamic(decoded);
        let (width, height) = img.dimensions();
        tracing::debug!(width, height, mode = ?img.mode(), "Image decoded");

        // Color-mode normalization. The grayscale flag is terminal for the
        // color pipeline; everything else is folded into RGB before the
        // filters run (dropping alpha or palette information here).
        img = if params.grayscale {
            img.into_luma()
        } else {
            img.into_rgb()
        };

        img = enhance::brightness(img, params.brightness);
        img = enhance::contrast(img, params.contrast);
        img = enhance::sharpness(img, params.sharpness);

        // PDF embedding cannot carry an alpha channel. The filters preserve
        // the normalized mode, so this only fires for direct library callers
        // that skipped normalization.
        if img.mode() == ColorMode::Rgba {
            img = img.into_rgb();
        }

        let pdf_bytes = pdf::encode_single_page(&img, PDF_TITLE)?;
        tracing::info!(
            width,
            height,
            brightness = params.brightness,
            contrast = params.contrast,
            sharpness = params.sharpness,
            grayscale = params.grayscale,
            pdf_bytes = pdf_bytes.len(),
            "Scan processed"
        );

        Ok(pdf_bytes)
    }
}
