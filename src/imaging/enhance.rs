//! Point-wise enhancement filters.
//!
//! Each filter is a linear interpolation between a "degenerate" image and the
//! input: `out = degenerate + factor * (input - degenerate)`, clamped to the
//! 8-bit range. A factor of 1.0 reproduces the input exactly, 0.0 yields the
//! degenerate image, and values outside [0, 1] extrapolate. No range checks
//! are applied to the factor.
//!
//! The degenerate images are:
//! - brightness: all black,
//! - contrast: uniform gray at the rounded mean luminance of the input,
//! - sharpness: the input run through a 3x3 smoothing kernel.
//!
//! When an alpha channel is present it is left untouched; only color channels
//! are interpolated.

use crate::imaging::color::{luma601, ScanImage};

/// Scale pixel luminance by `factor` (1.0 = unchanged, 0.0 = full black).
pub fn brightness(mut image: ScanImage, factor: f32) -> ScanImage {
    let channels = image.channels();
    let color_channels = image.color_channels();

    let data = image.raw_mut();
    for pixel in data.chunks_exact_mut(channels) {
        for sample in &mut pixel[..color_channels] {
            *sample = interpolate(0, *sample, factor);
        }
    }
    image
}

/// Scale the deviation from the image's mean gray level by `factor`
/// (1.0 = unchanged, 0.0 = flat mean-gray image).
pub fn contrast(mut image: ScanImage, factor: f32) -> ScanImage {
    let mean = mean_luma(&image);
    let channels = image.channels();
    let color_channels = image.color_channels();

    let data = image.raw_mut();
    for pixel in data.chunks_exact_mut(channels) {
        for sample in &mut pixel[..color_channels] {
            *sample = interpolate(mean, *sample, factor);
        }
    }
    image
}

/// Blend between a smoothed and the original image by `factor`
/// (1.0 = unchanged, 0.0 = fully smoothed, values > 1 oversharpen).
pub fn sharpness(mut image: ScanImage, factor: f32) -> ScanImage {
    let (width, height) = image.dimensions();
    // The 3x3 kernel has no interior to work on; the smoothed image would
    // equal the input, so the blend is the identity.
    if width < 3 || height < 3 {
        return image;
    }

    let channels = image.channels();
    let color_channels = image.color_channels();
    let smoothed = smooth(image.raw(), width, height, channels, color_channels);

    let data = image.raw_mut();
    for (pixel, smooth_pixel) in data
        .chunks_exact_mut(channels)
        .zip(smoothed.chunks_exact(channels))
    {
        for (sample, &degenerate) in pixel[..color_channels]
            .iter_mut()
            .zip(&smooth_pixel[..color_channels])
        {
            *sample = interpolate(degenerate, *sample, factor);
        }
    }
    image
}

/// Interpolate one sample between a degenerate value and the input value.
#[inline]
fn interpolate(degenerate: u8, value: u8, factor: f32) -> u8 {
    let out = degenerate as f32 + factor * (value as f32 - degenerate as f32);
    out.clamp(0.0, 255.0).round() as u8
}

/// Mean of the 8-bit luminance conversion of the image, rounded to nearest.
fn mean_luma(image: &ScanImage) -> u8 {
    let (width, height) = image.dimensions();
    let count = width as u64 * height as u64;
    if count == 0 {
        return 0;
    }

    let sum: u64 = match image {
        ScanImage::Luma(buf) => buf.as_raw().iter().map(|&l| l as u64).sum(),
        ScanImage::Rgb(buf) => buf
            .pixels()
            .map(|p| luma601(p.0[0], p.0[1], p.0[2]) as u64)
            .sum(),
        ScanImage::Rgba(buf) => buf
            .pixels()
            .map(|p| luma601(p.0[0], p.0[1], p.0[2]) as u64)
            .sum(),
    };

    ((sum as f64 / count as f64) + 0.5) as u8
}

/// Smoothing kernel weights: 3x3 box with a weighted center, sum 13.
const SMOOTH_KERNEL: [[u32; 3]; 3] = [[1, 1, 1], [1, 5, 1], [1, 1, 1]];
const SMOOTH_KERNEL_SUM: u32 = 13;

/// Apply the smoothing kernel to the interior of the buffer.
///
/// The one-pixel border is copied unchanged from the input; alpha samples,
/// when present, are copied as well.
fn smooth(src: &[u8], width: u32, height: u32, channels: usize, color_channels: usize) -> Vec<u8> {
    let mut out = src.to_vec();
    let stride = width as usize * channels;

    for y in 1..(height as usize - 1) {
        for x in 1..(width as usize - 1) {
            for c in 0..color_channels {
                let mut acc: u32 = 0;
                for (ky, row) in SMOOTH_KERNEL.iter().enumerate() {
                    for (kx, &weight) in row.iter().enumerate() {
                        let sy = y + ky - 1;
                        let sx = x + kx - 1;
                        acc += weight * src[sy * stride + sx * channels + c] as u32;
                    }
                }
                out[y * stride + x * channels + c] =
                    ((acc + SMOOTH_KERNEL_SUM / 2) / SMOOTH_KERNEL_SUM).min(255) as u8;
            }
        }
    }

    out
}
