use std::path::Path;

use image::{DynamicImage, ImageReader};
use tracing::debug;

use crate::error::{Error, Result};

/// Extensions accepted as batch and inventory inputs (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "gif"];

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode an image file. The format is sniffed from the content, so a file
/// with a misleading extension still opens.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    if !path.is_file() {
        return Err(Error::SourceMissing {
            path: path.to_path_buf(),
        });
    }

    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }

    debug!(
        "Decoded {:?}: {}x{} {:?}",
        path,
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image)
}
