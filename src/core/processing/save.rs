use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::RgbImage;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::io::writers::write_rgb_image;
use crate::types::OutputFormat;

/// Resolve the encoder for `output` from its extension.
pub fn output_format_for(output: &Path) -> Result<OutputFormat> {
    OutputFormat::from_path(output).ok_or_else(|| Error::UnsupportedFormat {
        path: output.to_path_buf(),
    })
}

/// Encode `image` and move it into place at `output`.
///
/// The encoded bytes go to a temporary file next to `output` that is renamed
/// over it only once encoding finished, so a failure never leaves a partial
/// or truncated file at `output`. Missing parent directories are created.
pub fn save_fitted_image(image: &RgbImage, output: &Path) -> Result<OutputFormat> {
    let format = output_format_for(output)?;

    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let tmp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        write_rgb_image(&mut writer, image, format)?;
        writer.flush()?;
    }
    debug!("Encoded {} into {:?}", format, tmp.path());

    tmp.persist(output)?;
    info!(
        "save_fitted_image: {}x{} {} saved to {:?}",
        image.width(),
        image.height(),
        format,
        output
    );
    Ok(format)
}
