use std::io::{Seek, Write};

use image::{ImageFormat, RgbImage};

use crate::error::{Error, Result};
use crate::types::OutputFormat;

/// Encode with the `image` crate's native encoder for PNG, BMP, GIF and WebP.
/// PNG and WebP are lossless; BMP stores raw pixels.
pub fn write_rgb_raster<W: Write + Seek>(
    writer: &mut W,
    image: &RgbImage,
    format: OutputFormat,
) -> Result<()> {
    let image_format = match format {
        OutputFormat::Png => ImageFormat::Png,
        OutputFormat::Bmp => ImageFormat::Bmp,
        OutputFormat::Gif => ImageFormat::Gif,
        OutputFormat::Webp => ImageFormat::WebP,
        other => {
            return Err(Error::Encode(format!(
                "{} is not handled by the raster writer",
                other
            )));
        }
    };
    image.write_to(writer, image_format).map_err(Error::encode)
}
