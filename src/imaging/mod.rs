//! In-memory image operations for the scan pipeline: explicit color modes,
//! point-wise enhancement filters, and single-page PDF encoding.

pub mod color;
pub mod enhance;
pub mod pdf;

pub use color::{ColorMode, ScanImage};
pub use pdf::OUTPUT_DPI;
