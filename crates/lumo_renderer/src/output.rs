//! Image output.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::hdr::HdrEncoder;
use image::{Rgb, RgbaImage};

use crate::error::{OutputError, OutputResult};
use crate::ImageBuffer;

/// Write the image as an 8-bit PNG, clamped, without gamma.
pub fn write_png<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> OutputResult<()> {
    let path = path.as_ref();
    let buffer = RgbaImage::from_raw(image.width, image.height, image.to_rgba8()).ok_or(
        OutputError::BufferSize {
            found: image.pixels.len(),
            expected: image.width as usize * image.height as usize,
        },
    )?;
    buffer.save_with_format(path, image::ImageFormat::Png)?;

    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Write the unclamped linear radiance as a Radiance HDR file.
pub fn write_hdr<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> OutputResult<()> {
    let path = path.as_ref();
    let pixels: Vec<Rgb<f32>> = image
        .pixels
        .iter()
        .map(|c| Rgb([c.x, c.y, c.z]))
        .collect();

    let writer = BufWriter::new(File::create(path)?);
    HdrEncoder::new(writer).encode(&pixels, image.width as usize, image.height as usize)?;

    log::info!("Wrote {}", path.display());
    Ok(())
}
