use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::types::{AspectRatio, BackgroundColor};

/// Ratios closer than this to the target are left untouched.
pub const RATIO_TOLERANCE: f64 = 0.01;

/// Largest canvas (in pixels) the fitter will allocate.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Reject `cols x rows` when it does not fit in `u32` sides or the pixel budget.
pub fn check_canvas(cols: f64, rows: f64) -> Result<(u32, u32)> {
    let too_large = || Error::CanvasTooLarge {
        cols: cols.min(u64::MAX as f64) as u64,
        rows: rows.min(u64::MAX as f64) as u64,
        limit: MAX_CANVAS_PIXELS,
    };
    if !cols.is_finite() || !rows.is_finite() || cols > u32::MAX as f64 || rows > u32::MAX as f64
    {
        return Err(too_large());
    }
    if cols * rows > MAX_CANVAS_PIXELS as f64 {
        return Err(too_large());
    }
    Ok((cols as u32, rows as u32))
}

/// Placement of the source image on a padded canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub canvas_cols: u32,
    pub canvas_rows: u32,
    pub pad_left: u32,
    pub pad_top: u32,
}

/// Canvas needed to bring `cols x rows` to `ratio` by padding only.
/// Returns `None` when the image already matches within [`RATIO_TOLERANCE`].
/// Odd remainders go to the right/bottom edge. Fails with
/// [`Error::CanvasTooLarge`] when the canvas would exceed [`MAX_CANVAS_PIXELS`].
pub fn calculate_padding(cols: u32, rows: u32, ratio: AspectRatio) -> Result<Option<Padding>> {
    let target = ratio.value();
    let current = cols as f64 / rows as f64;

    if (current - target).abs() < RATIO_TOLERANCE {
        return Ok(None);
    }

    if current > target {
        // Too wide: bands above and below
        let wanted = (cols as f64 / target).round().max(rows as f64);
        let (_, new_rows) = check_canvas(cols as f64, wanted)?;
        Ok(Some(Padding {
            canvas_cols: cols,
            canvas_rows: new_rows,
            pad_left: 0,
            pad_top: (new_rows - rows) / 2,
        }))
    } else {
        // Too tall: bands left and right
        let wanted = (rows as f64 * target).round().max(cols as f64);
        let (new_cols, _) = check_canvas(wanted, rows as f64)?;
        Ok(Some(Padding {
            canvas_cols: new_cols,
            canvas_rows: rows,
            pad_left: (new_cols - cols) / 2,
            pad_top: 0,
        }))
    }
}

/// Paste `image` onto a canvas filled with `background` at the given offsets.
pub fn add_padding(image: &RgbImage, padding: &Padding, background: BackgroundColor) -> RgbImage {
    let (cols, rows) = image.dimensions();
    let mut padded = RgbImage::from_pixel(
        padding.canvas_cols,
        padding.canvas_rows,
        background.to_rgb(),
    );

    let src = image.as_raw();
    let row_bytes = cols as usize * 3;
    let dst_stride = padding.canvas_cols as usize * 3;
    let dst = &mut *padded;
    // Copy per row using slice copies to minimize per-pixel indexing
    for row in 0..rows as usize {
        let src_offset = row * row_bytes;
        let dst_offset = (row + padding.pad_top as usize) * dst_stride + padding.pad_left as usize * 3;
        dst[dst_offset..dst_offset + row_bytes]
            .copy_from_slice(&src[src_offset..src_offset + row_bytes]);
    }
    padded
}

/// Pad `image` to `ratio`. The image is returned unchanged when it already fits.
pub fn letterbox(
    image: RgbImage,
    ratio: AspectRatio,
    background: BackgroundColor,
) -> Result<(RgbImage, Option<Padding>)> {
    let (cols, rows) = image.dimensions();
    match calculate_padding(cols, rows, ratio)? {
        None => {
            info!("Ratio already matches {}: {}x{}", ratio, cols, rows);
            Ok((image, None))
        }
        Some(padding) => {
            info!(
                "Adding padding: cols={}, rows={}, pad_left={}, pad_top={}",
                cols, rows, padding.pad_left, padding.pad_top
            );
            info!(
                "Final dimensions: {}x{}",
                padding.canvas_cols, padding.canvas_rows
            );
            let padded = add_padding(&image, &padding, background);
            Ok((padded, Some(padding)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn ratio(w: f64, h: f64) -> AspectRatio {
        AspectRatio::from_sides(w, h).unwrap()
    }

    #[test]
    fn matching_ratio_is_untouched() {
        assert_eq!(calculate_padding(4000, 3000, ratio(4.0, 3.0)).unwrap(), None);
        // 1.3384 vs 1.3333
        assert_eq!(calculate_padding(803, 600, ratio(4.0, 3.0)).unwrap(), None);
    }

    #[test]
    fn wide_image_gets_vertical_bands() {
        let p = calculate_padding(1600, 900, ratio(4.0, 3.0)).unwrap().unwrap();
        assert_eq!(
            p,
            Padding {
                canvas_cols: 1600,
                canvas_rows: 1200,
                pad_left: 0,
                pad_top: 150
            }
        );
    }

    #[test]
    fn tall_image_gets_horizontal_bands() {
        let p = calculate_padding(300, 300, ratio(4.0, 3.0)).unwrap().unwrap();
        assert_eq!(
            p,
            Padding {
                canvas_cols: 400,
                canvas_rows: 300,
                pad_left: 50,
                pad_top: 0
            }
        );
    }

    #[test]
    fn remainder_goes_to_trailing_edge() {
        // 91 rows of padding: 45 above, 46 below
        let p = calculate_padding(101, 10, AspectRatio::SQUARE).unwrap().unwrap();
        assert_eq!(p.canvas_rows, 101);
        assert_eq!(p.pad_top, 45);
        assert_eq!(p.canvas_rows - 10 - p.pad_top, 46);
    }

    #[test]
    fn output_ratio_matches_target() {
        for (cols, rows) in [(640, 480), (480, 640), (1000, 10), (10, 1000), (333, 777)] {
            for target in [ratio(1.0, 1.0), ratio(16.0, 9.0), ratio(2.0, 3.0), ratio(9.0, 16.0)] {
                if let Some(p) = calculate_padding(cols, rows, target).unwrap() {
                    assert!(p.canvas_cols >= cols && p.canvas_rows >= rows);
                    let got = p.canvas_cols as f64 / p.canvas_rows as f64;
                    assert!(
                        (got - target.value()).abs() < RATIO_TOLERANCE,
                        "{}x{} -> {}x{} for {}",
                        cols,
                        rows,
                        p.canvas_cols,
                        p.canvas_rows,
                        target
                    );
                }
            }
        }
    }

    #[test]
    fn source_pixels_are_centered_and_unmodified() {
        let mut img = RgbImage::from_pixel(4, 2, Rgb([9, 9, 9]));
        img.put_pixel(0, 0, Rgb([1, 2, 3]));
        img.put_pixel(3, 1, Rgb([4, 5, 6]));
        let (out, padding) =
            letterbox(img, AspectRatio::SQUARE, BackgroundColor::rgb(200, 0, 0)).unwrap();
        assert_eq!(
            padding,
            Some(Padding {
                canvas_cols: 4,
                canvas_rows: 4,
                pad_left: 0,
                pad_top: 1
            })
        );
        assert_eq!(out.dimensions(), (4, 4));
        assert_eq!(out.get_pixel(0, 0), &Rgb([200, 0, 0]));
        assert_eq!(out.get_pixel(0, 1), &Rgb([1, 2, 3]));
        assert_eq!(out.get_pixel(3, 2), &Rgb([4, 5, 6]));
        assert_eq!(out.get_pixel(2, 3), &Rgb([200, 0, 0]));
    }

    #[test]
    fn letterbox_is_idempotent() {
        let img = RgbImage::from_pixel(30, 50, Rgb([0, 0, 0]));
        let (once, _) = letterbox(img, ratio(3.0, 2.0), BackgroundColor::WHITE).unwrap();
        let (twice, padding) =
            letterbox(once.clone(), ratio(3.0, 2.0), BackgroundColor::WHITE).unwrap();
        assert_eq!(padding, None);
        assert_eq!(once, twice);
    }

    #[test]
    fn extreme_ratio_is_rejected_instead_of_saturating() {
        let tiny = AspectRatio::new(1e-12).unwrap();
        let err = calculate_padding(1, 1, tiny).unwrap_err();
        assert!(matches!(err, Error::CanvasTooLarge { cols: 1, .. }));

        let huge = AspectRatio::new(1e12).unwrap();
        assert!(matches!(
            calculate_padding(1, 1, huge),
            Err(Error::CanvasTooLarge { rows: 1, .. })
        ));
    }

    #[test]
    fn canvas_over_pixel_budget_is_rejected() {
        // 20000 x 15000 fits in u32 but not in the budget
        let err = calculate_padding(20_000, 10_000, ratio(4.0, 3.0)).unwrap_err();
        assert!(matches!(err, Error::CanvasTooLarge { .. }));

        let img = RgbImage::new(1, 1);
        let tiny = AspectRatio::new(1e-9).unwrap();
        assert!(letterbox(img, tiny, BackgroundColor::WHITE).is_err());
    }
}
