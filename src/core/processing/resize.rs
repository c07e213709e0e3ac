use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbImage;
use tracing::info;

use crate::error::{Error, Result};

/// Dimensions of an image scaled by `scale`, rounded, never below 1.
pub fn scaled_dimensions(cols: u32, rows: u32, scale: f64) -> (u32, u32) {
    let c = (cols as f64 * scale).round().max(1.0) as u32;
    let r = (rows as f64 * scale).round().max(1.0) as u32;
    (c, r)
}

/// Lanczos3 resize of an interleaved RGB image.
pub fn resize_rgb_image(image: &RgbImage, target_cols: u32, target_rows: u32) -> Result<RgbImage> {
    let (original_cols, original_rows) = image.dimensions();
    if (original_cols, original_rows) == (target_cols, target_rows) {
        return Ok(image.clone());
    }

    let resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        original_cols,
        original_rows,
        image.as_raw().clone(),
        PixelType::U8x3,
    )
    .map_err(Error::transform)?;
    let mut dst_image = Image::new(target_cols, target_rows, PixelType::U8x3);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::transform)?;

    info!(
        "Resized: {}x{} -> {}x{}",
        original_cols, original_rows, target_cols, target_rows
    );

    RgbImage::from_raw(target_cols, target_rows, dst_image.into_vec())
        .ok_or_else(|| Error::Transform("resized buffer has unexpected length".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn scaled_dimensions_round_and_clamp() {
        assert_eq!(scaled_dimensions(100, 100, 3.0), (300, 300));
        assert_eq!(scaled_dimensions(10, 3, 1.25), (13, 4));
        assert_eq!(scaled_dimensions(1, 1, 0.01), (1, 1));
    }

    #[test]
    fn upscale_keeps_flat_color() {
        let img = RgbImage::from_pixel(8, 6, Rgb([40, 80, 120]));
        let out = resize_rgb_image(&img, 24, 18).unwrap();
        assert_eq!(out.dimensions(), (24, 18));
        for p in out.pixels() {
            for (c, expected) in p.0.iter().zip([40u8, 80, 120]) {
                assert!((*c as i32 - expected as i32).abs() <= 1);
            }
        }
    }

    #[test]
    fn same_size_is_a_copy() {
        let img = RgbImage::from_pixel(5, 5, Rgb([1, 2, 3]));
        assert_eq!(resize_rgb_image(&img, 5, 5).unwrap(), img);
    }
}
