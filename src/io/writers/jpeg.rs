use jpeg_encoder::{ColorType, Encoder};
use std::io::Write;

use crate::error::{Error, Result};

/// Quality used for every JPEG framefit writes.
pub const JPEG_QUALITY: u8 = 95;

pub fn write_rgb_jpeg<W: Write>(
    writer: &mut W,
    cols: u32,
    rows: u32,
    rgb_data: &[u8],
    quality: u8,
) -> Result<()> {
    // JPEG frame headers store 16-bit dimensions
    let width = u16::try_from(cols)
        .map_err(|_| Error::Encode(format!("JPEG width {} exceeds 65535", cols)))?;
    let height = u16::try_from(rows)
        .map_err(|_| Error::Encode(format!("JPEG height {} exceeds 65535", rows)))?;

    let encoder = Encoder::new(writer, quality);
    encoder
        .encode(rgb_data, width, height, ColorType::Rgb)
        .map_err(Error::encode)?;
    Ok(())
}
