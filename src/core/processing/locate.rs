use image::{DynamicImage, GrayImage, Luma};
use imageproc::contours::{BorderType, find_contours};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{close, open};
use tracing::debug;

use crate::types::BoundingBox;

/// Luma values above this count as white background.
pub const WHITE_THRESHOLD: u8 = 240;

/// Binary mask of non-white pixels: 255 for object, 0 for background.
pub fn foreground_mask(gray: &GrayImage) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] > WHITE_THRESHOLD {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    })
}

/// Close then open with a 3x3 square element to drop speckles and bridge gaps.
pub fn denoise_mask(mask: &GrayImage) -> GrayImage {
    let closed = close(mask, Norm::LInf, 1);
    open(&closed, Norm::LInf, 1)
}

/// Bounding box of the main object on a near-white background, or `None`
/// when no foreground survives the mask cleanup.
pub fn try_locate(image: &DynamicImage) -> Option<BoundingBox> {
    if image.width() == 0 || image.height() == 0 {
        return None;
    }
    try_locate_luma(&image.to_luma8())
}

/// [`try_locate`] over an already converted intensity image.
pub fn try_locate_luma(gray: &GrayImage) -> Option<BoundingBox> {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let mask = denoise_mask(&foreground_mask(gray));
    let contours = find_contours::<u32>(&mask);

    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut outer = 0usize;

    for contour in contours
        .iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
    {
        outer += 1;
        for p in &contour.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
    }

    if outer == 0 || min_x > max_x || min_y > max_y {
        debug!("No object isolated in {}x{} image", width, height);
        return None;
    }

    let bbox = BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    };
    if bbox.is_degenerate() || bbox.right() > width || bbox.bottom() > height {
        return None;
    }

    debug!("Located object from {} external contours: {}", outer, bbox);
    Some(bbox)
}

/// Like [`try_locate`] but never fails: falls back to the full image box.
pub fn locate(image: &DynamicImage) -> BoundingBox {
    try_locate(image).unwrap_or_else(|| BoundingBox::full(image.width(), image.height()))
}
