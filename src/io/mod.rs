// Copyright @yucwang 2026

pub mod exr_utils;
pub mod obj_utils;
pub mod png_utils;

use crate::math::bitmap::Bitmap;
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum ImageWriteError {
    Exr(exr::error::Error),
    Image(image::ImageError),
    UnsupportedFormat(String),
}

impl From<exr::error::Error> for ImageWriteError {
    fn from(err: exr::error::Error) -> Self {
        ImageWriteError::Exr(err)
    }
}

impl From<image::ImageError> for ImageWriteError {
    fn from(err: image::ImageError) -> Self {
        ImageWriteError::Image(err)
    }
}

impl fmt::Display for ImageWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageWriteError::Exr(err) => write!(f, "exr error: {}", err),
            ImageWriteError::Image(err) => write!(f, "image error: {}", err),
            ImageWriteError::UnsupportedFormat(path) => write!(f, "unsupported output format: {}", path),
        }
    }
}

impl std::error::Error for ImageWriteError {}

/// Writes linear EXR or tone-mapped PNG depending on the file extension.
pub fn write_image(image: &Bitmap, file_path: &str) -> Result<(), ImageWriteError> {
    let extension = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("exr") => exr_utils::write_exr_to_file(image, file_path),
        Some("png") => png_utils::write_png_to_file(image, file_path),
        _ => Err(ImageWriteError::UnsupportedFormat(file_path.to_string())),
    }
}
