/// Enhancement parameters supplied with each processing request.
///
/// All factors are neutral at 1.0. No validation range is enforced: negative,
/// zero and greater-than-one values are passed through to the filters, which
/// treat them as interpolation/extrapolation coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhanceParams {
    /// Brightness factor (0.0 = full black).
    pub brightness: f32,
    /// Sharpness factor (0.0 = fully smoothed).
    pub sharpness: f32,
    /// Contrast factor (0.0 = flat mean-gray).
    pub contrast: f32,
    /// Convert to single-channel luminance before filtering.
    pub grayscale: bool,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            sharpness: 1.0,
            contrast: 1.0,
            grayscale: false,
        }
    }
}
