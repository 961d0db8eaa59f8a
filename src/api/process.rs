use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, EnhanceParams};
use crate::services::ScanPipeline;

/// Multipart form accepted by the processing endpoint (OpenAPI schema only;
/// extraction happens field-by-field from the multipart stream).
#[derive(ToSchema)]
pub struct ProcessImageForm {
    /// Image file to convert (JPEG, PNG, BMP, ...)
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// Brightness factor (1.0 = unchanged, 0.0 = full black)
    #[schema(default = 1.0)]
    pub brightness: f32,
    /// Sharpness factor (1.0 = unchanged, 0.0 = fully smoothed)
    #[schema(default = 1.0)]
    pub sharpness: f32,
    /// Contrast factor (1.0 = unchanged, 0.0 = flat mean gray)
    #[schema(default = 1.0)]
    pub contrast: f32,
    /// Convert to grayscale before filtering
    #[schema(default = false)]
    pub grayscale: bool,
}

/// Process an uploaded image into a single-page PDF
///
/// Applies brightness, contrast and sharpness enhancement (in that fixed
/// order) plus optional grayscale conversion, then returns the result as a
/// PDF download.
#[utoipa::path(
    post,
    path = "/process-image",
    request_body(content = ProcessImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Enhanced single-page PDF", content_type = "application/pdf"),
        (status = 400, description = "Malformed form data or parameter"),
        (status = 422, description = "Uploaded bytes are not a decodable image"),
        (status = 500, description = "Processing or encoding failure"),
    ),
    tag = "Processing"
)]
pub async fn handle_process_image(
    State(pipeline): State<Arc<ScanPipeline>>,
    State(config): State<Arc<AppConfig>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let (image_bytes, params) = read_form(&mut multipart).await?;

    tracing::info!(
        upload_bytes = image_bytes.len(),
        brightness = params.brightness,
        contrast = params.contrast,
        sharpness = params.sharpness,
        grayscale = params.grayscale,
        "Processing upload"
    );

    // The pipeline is pure CPU work; keep it off the async runtime.
    let pdf_bytes = tokio::task::spawn_blocking(move || pipeline.process(&image_bytes, &params))
        .await
        .map_err(|e| ApiError::Internal(format!("processing task failed: {e}")))??;

    let disposition = format!("attachment; filename={}", config.download_filename);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf_bytes,
    )
        .into_response())
}

/// Pull the image bytes and enhancement parameters out of the multipart
/// stream. Unknown fields are ignored; missing parameter fields keep their
/// neutral defaults.
async fn read_form(multipart: &mut Multipart) -> Result<(Bytes, EnhanceParams), ApiError> {
    let mut image: Option<Bytes> = None;
    let mut params = EnhanceParams::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                image = Some(data);
            }
            "brightness" => params.brightness = parse_factor("brightness", &text(field).await?)?,
            "sharpness" => params.sharpness = parse_factor("sharpness", &text(field).await?)?,
            "contrast" => params.contrast = parse_factor("contrast", &text(field).await?)?,
            "grayscale" => params.grayscale = parse_flag("grayscale", &text(field).await?)?,
            _ => {}
        }
    }

    let image = image.ok_or(ApiError::MissingField("image"))?;
    Ok((image, params))
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))
}

fn parse_factor(field: &'static str, value: &str) -> Result<f32, ApiError> {
    value.trim().parse::<f32>().map_err(|_| ApiError::InvalidField {
        field,
        reason: format!("expected a number, got {value:?}"),
    })
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" | "" => Ok(false),
        other => Err(ApiError::InvalidField {
            field,
            reason: format!("expected a boolean, got {other:?}"),
        }),
    }
}
