//! Shared types used across framefit.
//! Includes `BoundingBox`, `AspectRatio`, `BackgroundColor`, `OutputFormat`
//! and the smart-scale `ScaleDecision`.
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Axis-aligned box in pixel coordinates of the image it was computed from.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x={} y={} w={} h={}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Target width:height ratio. Always positive and finite.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AspectRatio(f64);

impl AspectRatio {
    pub const SQUARE: AspectRatio = AspectRatio(1.0);
    pub const LANDSCAPE_4_3: AspectRatio = AspectRatio(4.0 / 3.0);

    pub fn new(ratio: f64) -> crate::Result<Self> {
        if ratio.is_finite() && ratio > 0.0 {
            Ok(Self(ratio))
        } else {
            Err(Error::InvalidArgument {
                arg: "ratio",
                value: ratio.to_string(),
            })
        }
    }

    pub fn from_sides(width: f64, height: f64) -> crate::Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidArgument {
                arg: "ratio",
                value: format!("{}:{}", width, height),
            });
        }
        Self::new(width / height)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::LANDSCAPE_4_3
    }
}

impl TryFrom<f64> for AspectRatio {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        AspectRatio::new(value)
    }
}

impl From<AspectRatio> for f64 {
    fn from(value: AspectRatio) -> Self {
        value.0
    }
}

/// Accepts presets (`4:3`, `16:9`, ...), any `W:H` pair, or a bare decimal.
impl FromStr for AspectRatio {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument {
            arg: "ratio",
            value: s.to_string(),
        };
        let trimmed = s.trim();
        match trimmed.split_once(':') {
            Some((w, h)) => {
                let w: f64 = w.trim().parse().map_err(|_| invalid())?;
                let h: f64 = h.trim().parse().map_err(|_| invalid())?;
                AspectRatio::from_sides(w, h).map_err(|_| invalid())
            }
            None => {
                let v: f64 = trimmed.parse().map_err(|_| invalid())?;
                AspectRatio::new(v).map_err(|_| invalid())
            }
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Opaque fill color used for padding and for flattening transparency.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BackgroundColor(pub [u8; 3]);

impl BackgroundColor {
    pub const WHITE: BackgroundColor = BackgroundColor([255, 255, 255]);

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Clamps each component into `0..=255`.
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        let c = |v: i64| v.clamp(0, 255) as u8;
        Self([c(r), c(g), c(b)])
    }

    pub fn to_rgb(self) -> image::Rgb<u8> {
        image::Rgb(self.0)
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Accepts `r,g,b` (clamped, extra components ignored) or `#rrggbb`.
impl FromStr for BackgroundColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument {
            arg: "background",
            value: s.to_string(),
        };
        let trimmed = s.trim();

        if trimmed.contains(',') {
            let parts: Vec<i64> = trimmed
                .split(',')
                .take(3)
                .map(|p| p.trim().parse::<i64>())
                .collect::<Result<_, _>>()
                .map_err(|_| invalid())?;
            if parts.len() < 3 {
                return Err(invalid());
            }
            return Ok(BackgroundColor::clamped(parts[0], parts[1], parts[2]));
        }

        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(BackgroundColor([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }
}

impl std::fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{},{},{}", r, g, b)
    }
}

/// Encoders selectable from the destination file extension.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Bmp,
    Gif,
    Tiff,
    Webp,
}

impl OutputFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "bmp" => Some(OutputFormat::Bmp),
            "gif" => Some(OutputFormat::Gif),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            "webp" => Some(OutputFormat::Webp),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(OutputFormat::from_extension)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::Bmp => "BMP",
            OutputFormat::Gif => "GIF",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::Webp => "WebP",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of the smart-scale heuristic for one image.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum ScaleDecision {
    Keep,
    Upscale(f64),
}

impl ScaleDecision {
    pub fn factor(self) -> f64 {
        match self {
            ScaleDecision::Keep => 1.0,
            ScaleDecision::Upscale(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_presets_and_pairs_parse() {
        let r: AspectRatio = "4:3".parse().unwrap();
        assert!((r.value() - 4.0 / 3.0).abs() < 1e-12);
        let r: AspectRatio = " 9 : 16 ".parse().unwrap();
        assert!((r.value() - 0.5625).abs() < 1e-12);
        let r: AspectRatio = "1.5".parse().unwrap();
        assert_eq!(r.value(), 1.5);
    }

    #[test]
    fn ratio_rejects_non_positive() {
        assert!("0:3".parse::<AspectRatio>().is_err());
        assert!("-1".parse::<AspectRatio>().is_err());
        assert!("abc".parse::<AspectRatio>().is_err());
        assert!(AspectRatio::new(f64::NAN).is_err());
        assert!(AspectRatio::new(f64::INFINITY).is_err());
    }

    #[test]
    fn background_parses_triplets_with_clamping() {
        let c: BackgroundColor = "300, -4, 17".parse().unwrap();
        assert_eq!(c, BackgroundColor::rgb(255, 0, 17));
        let c: BackgroundColor = "1,2,3,4".parse().unwrap();
        assert_eq!(c, BackgroundColor::rgb(1, 2, 3));
        assert!("1,2".parse::<BackgroundColor>().is_err());
    }

    #[test]
    fn background_parses_hex() {
        let c: BackgroundColor = "#ff8000".parse().unwrap();
        assert_eq!(c, BackgroundColor::rgb(255, 128, 0));
        let c: BackgroundColor = "0a0B0c".parse().unwrap();
        assert_eq!(c, BackgroundColor::rgb(10, 11, 12));
        assert!("#fff".parse::<BackgroundColor>().is_err());
        assert!("zzzzzz".parse::<BackgroundColor>().is_err());
    }

    #[test]
    fn background_hex_needs_exactly_six_digits() {
        assert!("#ff8000zz".parse::<BackgroundColor>().is_err());
        assert!("ff80001".parse::<BackgroundColor>().is_err());
        assert!("+f0000".parse::<BackgroundColor>().is_err());
        assert!("#+f+f+f".parse::<BackgroundColor>().is_err());
        assert!("#ffé00".parse::<BackgroundColor>().is_err());
    }

    #[test]
    fn output_format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("a/b.JPG")),
            Some(OutputFormat::Jpeg)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("x.tif")),
            Some(OutputFormat::Tiff)
        );
        assert_eq!(OutputFormat::from_path(Path::new("x.xyz")), None);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), None);
    }
}
