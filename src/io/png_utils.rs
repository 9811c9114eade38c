// Copyright @yucwang 2026

use crate::io::ImageWriteError;
use crate::math::bitmap::Bitmap;
use crate::math::constants::Float;

use image::{Rgb, RgbImage};

const DISPLAY_GAMMA: Float = 2.2;

/// Clamps a linear value to `[0, 1]` and gamma-encodes it to 8 bits.
pub fn tonemap_channel(v: Float) -> u8 {
    let v = if v.is_finite() { v.max(0.0).min(1.0) } else { 0.0 };
    (v.powf(1.0 / DISPLAY_GAMMA) * 255.0 + 0.5).min(255.0) as u8
}

pub fn tonemap(image: &Bitmap) -> RgbImage {
    RgbImage::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        let p = image[(x as usize, y as usize)];
        Rgb([tonemap_channel(p.x), tonemap_channel(p.y), tonemap_channel(p.z)])
    })
}

pub fn write_png_to_file(image: &Bitmap, file_path: &str) -> Result<(), ImageWriteError> {
    log::info!("Starting writing png image: {}.", file_path);
    tonemap(image).save_with_format(file_path, image::ImageFormat::Png)?;
    log::info!("PNG written to: {}.", file_path);
    Ok(())
}
