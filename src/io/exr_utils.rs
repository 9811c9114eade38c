/* Copyright 2020 @TwoCookingMice */

use crate::io::ImageWriteError;
use crate::math::bitmap::Bitmap;

use exr::prelude::{ read_first_rgba_layer_from_file, write_rgb_file };

// Write a linear RGB image to an OpenEXR file
pub fn write_exr_to_file(image: &Bitmap, file_path: &str) -> Result<(), ImageWriteError> {
    log::info!("Starting writing openexr images: {}.", file_path);

    let width = image.width();
    write_rgb_file(file_path, width, image.height(), |x, y| {
        let p = image.row(y)[x];
        (p.x, p.y, p.z)
    })?;

    log::info!("EXR written to: {}.", file_path);
    Ok(())
}

// Read a linear RGB image from an OpenEXR file
pub fn read_exr_from_file(file_path: &str) -> Result<Bitmap, ImageWriteError> {
    log::info!("Starting reading OpenEXR image from: {}.", file_path);

    let image = read_first_rgba_layer_from_file(
        file_path,
        |resolution, _| Bitmap::new(resolution.width(), resolution.height()),
        |bitmap: &mut Bitmap, position, (r, g, b, _a): (f32, f32, f32, f32)| {
            let pixel = &mut bitmap[(position.x(), position.y())];
            pixel.x = r;
            pixel.y = g;
            pixel.z = b;
        },
    )?;

    let bitmap = image.layer_data.channel_data.pixels;
    log::info!("OpenEXR loaded, width = {}, height = {}.", bitmap.width(), bitmap.height());
    Ok(bitmap)
}
