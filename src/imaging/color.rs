//! Explicit color-mode handling.
//!
//! Decoders can produce many pixel representations, but the pipeline only
//! ever works with three: single-channel luminance, RGB, and RGB+alpha.
//! Conversions between them are explicit functions so that behavior at mode
//! boundaries is visible and testable instead of happening implicitly inside
//! each filter.

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

/// Channel layout of a working image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Single-channel luminance.
    Luma,
    /// Three-channel RGB.
    Rgb,
    /// RGB plus alpha.
    Rgba,
}

/// An in-memory raster tagged with its color mode.
pub enum ScanImage {
    Luma(GrayImage),
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

/// ITU-R 601 luminance conversion with rounding, as used by common imaging
/// libraries for 8-bit grayscale.
#[inline]
pub(crate) fn luma601(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

impl ScanImage {
    /// Fold a freshly decoded image into one of the three supported modes.
    ///
    /// 8-bit luma, RGB and RGBA buffers are taken as-is. Anything else keeps
    /// its alpha bearing (16-bit RGBA becomes RGBA, palette-less luma becomes
    /// RGB, and so on) but is reduced to 8 bits per channel.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(buf) => Self::Luma(buf),
            DynamicImage::ImageRgb8(buf) => Self::Rgb(buf),
            DynamicImage::ImageRgba8(buf) => Self::Rgba(buf),
            other if other.color().has_alpha() => Self::Rgba(other.to_rgba8()),
            other => Self::Rgb(other.to_rgb8()),
        }
    }

    /// The current color mode.
    pub fn mode(&self) -> ColorMode {
        match self {
            Self::Luma(_) => ColorMode::Luma,
            Self::Rgb(_) => ColorMode::Rgb,
            Self::Rgba(_) => ColorMode::Rgba,
        }
    }

    /// Pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Luma(buf) => buf.dimensions(),
            Self::Rgb(buf) => buf.dimensions(),
            Self::Rgba(buf) => buf.dimensions(),
        }
    }

    /// Convert to single-channel luminance.
    ///
    /// RGB pixels go through the ITU-R 601 weighting; an alpha channel, if
    /// present, is ignored (not composited).
    pub fn into_luma(self) -> Self {
        match self {
            Self::Luma(buf) => Self::Luma(buf),
            Self::Rgb(buf) => {
                let gray = GrayImage::from_fn(buf.width(), buf.height(), |x, y| {
                    let image::Rgb([r, g, b]) = *buf.get_pixel(x, y);
                    image::Luma([luma601(r, g, b)])
                });
                Self::Luma(gray)
            }
            Self::Rgba(buf) => {
                let gray = GrayImage::from_fn(buf.width(), buf.height(), |x, y| {
                    let image::Rgba([r, g, b, _a]) = *buf.get_pixel(x, y);
                    image::Luma([luma601(r, g, b)])
                });
                Self::Luma(gray)
            }
        }
    }

    /// Convert to three-channel RGB.
    ///
    /// Luminance is replicated across the channels; an alpha channel is
    /// dropped without compositing, matching the behavior of the scanner this
    /// service replaces.
    pub fn into_rgb(self) -> Self {
        match self {
            Self::Luma(buf) => {
                let rgb = RgbImage::from_fn(buf.width(), buf.height(), |x, y| {
                    let image::Luma([l]) = *buf.get_pixel(x, y);
                    image::Rgb([l, l, l])
                });
                Self::Rgb(rgb)
            }
            Self::Rgb(buf) => Self::Rgb(buf),
            Self::Rgba(buf) => {
                let rgb = RgbImage::from_fn(buf.width(), buf.height(), |x, y| {
                    let image::Rgba([r, g, b, _a]) = *buf.get_pixel(x, y);
                    image::Rgb([r, g, b])
                });
                Self::Rgb(rgb)
            }
        }
    }

    /// Total channels per pixel, including alpha.
    pub(crate) fn channels(&self) -> usize {
        match self {
            Self::Luma(_) => 1,
            Self::Rgb(_) => 3,
            Self::Rgba(_) => 4,
        }
    }

    /// Channels carrying color information (alpha excluded).
    pub(crate) fn color_channels(&self) -> usize {
        match self {
            Self::Luma(_) => 1,
            Self::Rgb(_) | Self::Rgba(_) => 3,
        }
    }

    /// Raw sample buffer, row-major, interleaved channels.
    pub(crate) fn raw(&self) -> &[u8] {
        match self {
            Self::Luma(buf) => buf.as_raw(),
            Self::Rgb(buf) => buf.as_raw(),
            Self::Rgba(buf) => buf.as_raw(),
        }
    }

    /// Mutable access to the raw sample buffer.
    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Luma(buf) => &mut **buf,
            Self::Rgb(buf) => &mut **buf,
            Self::Rgba(buf) => &mut **buf,
        }
    }
}
