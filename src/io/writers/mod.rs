//! Encoders for the supported output formats. Each writer encodes an opaque
//! RGB buffer into any seekable writer; choosing the destination and making
//! the write atomic is the job of `core::processing::save`.
pub mod jpeg;
pub mod raster;
pub mod tiff;

use std::io::{Seek, Write};

use image::RgbImage;

use crate::error::Result;
use crate::types::OutputFormat;

pub fn write_rgb_image<W: Write + Seek>(
    writer: &mut W,
    image: &RgbImage,
    format: OutputFormat,
) -> Result<()> {
    let (cols, rows) = image.dimensions();
    match format {
        OutputFormat::Jpeg => jpeg::write_rgb_jpeg(writer, cols, rows, image.as_raw(), jpeg::JPEG_QUALITY),
        OutputFormat::Tiff => tiff::write_rgb_tiff(writer, cols, rows, image.as_raw()),
        OutputFormat::Png | OutputFormat::Bmp | OutputFormat::Gif | OutputFormat::Webp => {
            raster::write_rgb_raster(writer, image, format)
        }
    }
}
