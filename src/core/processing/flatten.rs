use image::{DynamicImage, Rgb, RgbImage};
use tracing::debug;

use crate::types::BackgroundColor;

#[inline]
fn blend_channel(src: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((src as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
}

/// Produce an opaque RGB image. Transparent and partially transparent pixels
/// are blended over `background`; opaque inputs are converted directly.
/// Palette images arrive here already expanded by the decoder.
pub fn flatten_onto(image: DynamicImage, background: BackgroundColor) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    debug!(
        "Compositing {:?} image onto background {}",
        image.color(),
        background
    );
    let rgba = image.into_rgba8();
    let [br, bg, bb] = background.0;
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([
            blend_channel(r, br, a),
            blend_channel(g, bg, a),
            blend_channel(b, bb, a),
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, GrayImage, LumaA, Rgba, RgbaImage};

    #[test]
    fn opaque_rgb_passes_through() {
        let img = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let out = flatten_onto(DynamicImage::ImageRgb8(img.clone()), BackgroundColor::WHITE);
        assert_eq!(out, img);
    }

    #[test]
    fn grayscale_is_expanded_to_rgb() {
        let img = GrayImage::from_pixel(2, 2, image::Luma([77]));
        let out = flatten_onto(DynamicImage::ImageLuma8(img), BackgroundColor::WHITE);
        assert_eq!(out.get_pixel(1, 1), &Rgb([77, 77, 77]));
    }

    #[test]
    fn transparency_takes_background_color() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        let out = flatten_onto(
            DynamicImage::ImageRgba8(img),
            BackgroundColor::rgb(200, 100, 50),
        );
        assert_eq!(out.get_pixel(0, 0), &Rgb([200, 100, 50]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn half_alpha_blends_toward_background() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let out = flatten_onto(DynamicImage::ImageRgba8(img), BackgroundColor::WHITE);
        let v = out.get_pixel(0, 0).0[0];
        assert!((126..=128).contains(&v), "got {}", v);
    }

    #[test]
    fn gray_alpha_is_composited() {
        let img = GrayAlphaImage::from_pixel(1, 1, LumaA([0, 0]));
        let out = flatten_onto(DynamicImage::ImageLumaA8(img), BackgroundColor::rgb(1, 2, 3));
        assert_eq!(out.get_pixel(0, 0), &Rgb([1, 2, 3]));
    }
}
