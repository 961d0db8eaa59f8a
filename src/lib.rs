//! IMG2PDF - image-to-PDF scanning service.
//!
//! Accepts an uploaded image, applies point-wise enhancement filters
//! (brightness, contrast, sharpness, optional grayscale), and returns a
//! single-page PDF. This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod imaging;
pub mod models;
pub mod server;
pub mod services;
