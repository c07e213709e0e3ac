use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::params::FitParams;
use crate::core::processing::flatten::flatten_onto;
use crate::core::processing::padding::{Padding, letterbox};
use crate::core::processing::smart_scale::smart_scale;
use crate::error::{Error, Result};
use crate::types::ScaleDecision;

/// What the fitting pipeline did to one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitSummary {
    pub source_cols: u32,
    pub source_rows: u32,
    pub output_cols: u32,
    pub output_rows: u32,
    pub scale: ScaleDecision,
    pub padding: Option<Padding>,
}

/// Flatten, optionally smart-scale, then pad `image` to `params.ratio`.
///
/// Transparency is flattened first so the object locator sees transparent
/// areas as background instead of black.
pub fn fit_image_with_summary(
    image: DynamicImage,
    params: &FitParams,
) -> Result<(RgbImage, FitSummary)> {
    let (source_cols, source_rows) = (image.width(), image.height());
    if source_cols == 0 || source_rows == 0 {
        return Err(Error::EmptyImage {
            width: source_cols,
            height: source_rows,
        });
    }

    let rgb = flatten_onto(image, params.background);

    let (rgb, scale) = if params.smart_scale {
        smart_scale(rgb, &params.smart)
    } else {
        (rgb, ScaleDecision::Keep)
    };

    let (fitted, padding) = letterbox(rgb, params.ratio, params.background)?;
    let summary = FitSummary {
        source_cols,
        source_rows,
        output_cols: fitted.width(),
        output_rows: fitted.height(),
        scale,
        padding,
    };
    debug!("Fit summary: {:?}", summary);
    Ok((fitted, summary))
}

/// In-memory variant of the fitter: returns only the padded image.
pub fn fit_image(image: DynamicImage, params: &FitParams) -> Result<RgbImage> {
    fit_image_with_summary(image, params).map(|(img, _)| img)
}
