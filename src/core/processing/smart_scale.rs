use image::RgbImage;
use tracing::{debug, info, warn};

use crate::core::params::SmartScaleConfig;
use crate::core::processing::locate::try_locate_luma;
use crate::core::processing::padding::check_canvas;
use crate::core::processing::resize::{resize_rgb_image, scaled_dimensions};
use crate::types::{BoundingBox, ScaleDecision};

#[inline]
fn margin(side: u32, fraction: f64) -> i64 {
    ((side as f64 * fraction).round() as i64).max(1)
}

/// Decide how much to enlarge an image so the object in `bbox` fills the
/// frame minus a margin on every side. A missing or empty box means the
/// whole image is the object.
pub fn decide_scale(
    cols: u32,
    rows: u32,
    bbox: Option<BoundingBox>,
    config: &SmartScaleConfig,
) -> ScaleDecision {
    let bbox = bbox
        .filter(|b| !b.is_degenerate())
        .unwrap_or_else(|| BoundingBox::full(cols, rows));

    let margin_w = margin(cols, config.margin_fraction);
    let margin_h = margin(rows, config.margin_fraction);
    let avail_w = (cols as i64 - 2 * margin_w).max(1) as f64;
    let avail_h = (rows as i64 - 2 * margin_h).max(1) as f64;

    let scale_w = if bbox.width > 0 {
        avail_w / bbox.width as f64
    } else {
        1.0
    };
    let scale_h = if bbox.height > 0 {
        avail_h / bbox.height as f64
    } else {
        1.0
    };
    let scale = scale_w.min(scale_h).min(config.max_scale);

    debug!(
        "Smart scale: object {} in {}x{}, available {}x{}, scale={:.3}",
        bbox, cols, rows, avail_w, avail_h, scale
    );

    // Never shrink, whatever the config says
    if scale > config.trigger.max(1.0) {
        ScaleDecision::Upscale(scale)
    } else {
        ScaleDecision::Keep
    }
}

/// Locate the main object and enlarge the whole image when it is small.
/// A failed resize is logged and the image is returned unchanged.
pub fn smart_scale(image: RgbImage, config: &SmartScaleConfig) -> (RgbImage, ScaleDecision) {
    let (cols, rows) = image.dimensions();
    let bbox = try_locate_luma(&image::imageops::grayscale(&image));

    match decide_scale(cols, rows, bbox, config) {
        ScaleDecision::Keep => (image, ScaleDecision::Keep),
        ScaleDecision::Upscale(scale) => {
            let (new_cols, new_rows) = scaled_dimensions(cols, rows, scale);
            if let Err(e) = check_canvas(new_cols as f64, new_rows as f64) {
                warn!("Smart scale skipped: {}", e);
                return (image, ScaleDecision::Keep);
            }
            match resize_rgb_image(&image, new_cols, new_rows) {
                Ok(scaled) => {
                    info!("Smart scale x{:.2}: {}x{} -> {}x{}", scale, cols, rows, new_cols, new_rows);
                    (scaled, ScaleDecision::Upscale(scale))
                }
                Err(e) => {
                    warn!("Smart scale skipped: {}", e);
                    (image, ScaleDecision::Keep)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn bbox(x: u32, y: u32, width: u32, height: u32) -> Option<BoundingBox> {
        Some(BoundingBox {
            x,
            y,
            width,
            height,
        })
    }

    #[test]
    fn small_object_is_capped_at_max_scale() {
        let d = decide_scale(100, 100, bbox(40, 40, 20, 20), &SmartScaleConfig::default());
        assert_eq!(d, ScaleDecision::Upscale(3.0));
    }

    #[test]
    fn tiny_artifact_never_exceeds_cap() {
        let d = decide_scale(1000, 800, bbox(500, 400, 1, 1), &SmartScaleConfig::default());
        assert_eq!(d.factor(), 3.0);
    }

    #[test]
    fn moderate_object_below_trigger_is_kept() {
        // avail 80, object 70 -> 1.14
        let d = decide_scale(100, 100, bbox(15, 15, 70, 70), &SmartScaleConfig::default());
        assert_eq!(d, ScaleDecision::Keep);
    }

    #[test]
    fn exactly_at_trigger_is_kept() {
        // avail 96, object 80 -> 1.2
        let d = decide_scale(120, 120, bbox(20, 20, 80, 80), &SmartScaleConfig::default());
        assert_eq!(d, ScaleDecision::Keep);
    }

    #[test]
    fn uses_the_tighter_axis() {
        // avail 160x80: 160/40 = 4, 80/40 = 2
        let d = decide_scale(200, 100, bbox(80, 30, 40, 40), &SmartScaleConfig::default());
        assert_eq!(d, ScaleDecision::Upscale(2.0));
    }

    #[test]
    fn missing_box_means_whole_image() {
        let d = decide_scale(100, 100, None, &SmartScaleConfig::default());
        assert_eq!(d, ScaleDecision::Keep);
        let d = decide_scale(100, 100, bbox(0, 0, 0, 10), &SmartScaleConfig::default());
        assert_eq!(d, ScaleDecision::Keep);
    }

    #[test]
    fn configurable_thresholds() {
        let config = SmartScaleConfig::new(0.0, 1.0, 10.0).unwrap();
        // margin floors at 1 px: avail 98 / 20
        let d = decide_scale(100, 100, bbox(40, 40, 20, 20), &config);
        assert_eq!(d, ScaleDecision::Upscale(98.0 / 20.0));
    }

    #[test]
    fn tiny_images_keep_positive_available_space() {
        let d = decide_scale(2, 2, bbox(0, 0, 1, 1), &SmartScaleConfig::default());
        assert_eq!(d, ScaleDecision::Keep);
    }

    #[test]
    fn smart_scale_enlarges_small_subject() {
        let mut img = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        for y in 40..60 {
            for x in 40..60 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
        let (out, decision) = smart_scale(img, &SmartScaleConfig::default());
        assert_eq!(decision, ScaleDecision::Upscale(3.0));
        assert_eq!(out.dimensions(), (300, 300));
    }

    #[test]
    fn smart_scale_leaves_white_image_alone() {
        let img = RgbImage::from_pixel(50, 40, Rgb([255, 255, 255]));
        let (out, decision) = smart_scale(img.clone(), &SmartScaleConfig::default());
        assert_eq!(decision, ScaleDecision::Keep);
        assert_eq!(out, img);
    }

    #[test]
    fn hand_built_shrinking_config_still_keeps_the_image() {
        let config = SmartScaleConfig {
            margin_fraction: 0.1,
            trigger: 0.1,
            max_scale: 0.5,
        };
        let d = decide_scale(100, 100, bbox(40, 40, 20, 20), &config);
        assert_eq!(d, ScaleDecision::Keep);
        assert!(d.factor() >= 1.0);
    }

    #[test]
    fn enlargement_past_canvas_budget_is_skipped() {
        let config = SmartScaleConfig::new(0.1, 1.2, 1e6).unwrap();
        let mut img = RgbImage::from_pixel(1000, 1000, Rgb([255, 255, 255]));
        for y in 500..503 {
            for x in 500..503 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
        let (out, decision) = smart_scale(img, &config);
        assert_eq!(decision, ScaleDecision::Keep);
        assert_eq!(out.dimensions(), (1000, 1000));
    }
}
