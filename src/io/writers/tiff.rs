use std::io::{Seek, Write};

use tiff::encoder::{TiffEncoder, colortype};

use crate::error::{Error, Result};

pub fn write_rgb_tiff<W: Write + Seek>(
    writer: &mut W,
    cols: u32,
    rows: u32,
    rgb_data: &[u8],
) -> Result<()> {
    let mut encoder = TiffEncoder::new(writer).map_err(Error::encode)?;
    encoder
        .write_image::<colortype::RGB8>(cols, rows, rgb_data)
        .map_err(Error::encode)?;
    Ok(())
}
