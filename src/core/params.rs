use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{AspectRatio, BackgroundColor};

/// Tuning for the smart-scale heuristic.
///
/// Presets are checked on load: `trigger` and `max_scale` must be at least
/// 1.0 and `margin_fraction` must lie in `[0.0, 0.5)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSmartScaleConfig")]
pub struct SmartScaleConfig {
    /// Fraction of each side kept free around the object
    pub margin_fraction: f64,
    /// Scale factors at or below this are ignored
    pub trigger: f64,
    /// Upper bound on the enlargement
    pub max_scale: f64,
}

impl Default for SmartScaleConfig {
    fn default() -> Self {
        Self {
            margin_fraction: 0.1,
            trigger: 1.2,
            max_scale: 3.0,
        }
    }
}

impl SmartScaleConfig {
    pub fn new(margin_fraction: f64, trigger: f64, max_scale: f64) -> Result<Self> {
        let invalid = |arg: &'static str, value: f64| Error::InvalidArgument {
            arg,
            value: value.to_string(),
        };
        if !(0.0..0.5).contains(&margin_fraction) {
            return Err(invalid("margin_fraction", margin_fraction));
        }
        if !(trigger.is_finite() && trigger >= 1.0) {
            return Err(invalid("trigger", trigger));
        }
        if !(max_scale.is_finite() && max_scale >= 1.0) {
            return Err(invalid("max_scale", max_scale));
        }
        Ok(Self {
            margin_fraction,
            trigger,
            max_scale,
        })
    }
}

/// Unchecked preset shape; missing fields take the defaults.
#[derive(Deserialize)]
#[serde(default)]
struct RawSmartScaleConfig {
    margin_fraction: f64,
    trigger: f64,
    max_scale: f64,
}

impl Default for RawSmartScaleConfig {
    fn default() -> Self {
        let d = SmartScaleConfig::default();
        Self {
            margin_fraction: d.margin_fraction,
            trigger: d.trigger,
            max_scale: d.max_scale,
        }
    }
}

impl TryFrom<RawSmartScaleConfig> for SmartScaleConfig {
    type Error = Error;

    fn try_from(raw: RawSmartScaleConfig) -> Result<Self> {
        SmartScaleConfig::new(raw.margin_fraction, raw.trigger, raw.max_scale)
    }
}

/// Processing parameters suitable for preset files and CLI defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitParams {
    pub ratio: AspectRatio,
    pub background: BackgroundColor,
    /// Enlarge a small centered object before padding
    pub smart_scale: bool,
    pub smart: SmartScaleConfig,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            ratio: AspectRatio::default(),
            background: BackgroundColor::WHITE,
            smart_scale: false,
            smart: SmartScaleConfig::default(),
        }
    }
}

impl FitParams {
    pub fn new(ratio: AspectRatio, background: BackgroundColor, smart_scale: bool) -> Self {
        Self {
            ratio,
            background,
            smart_scale,
            ..Self::default()
        }
    }

    /// Load a JSON preset. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
