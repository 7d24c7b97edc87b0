use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

/// How much of each step a scale reserves for the rendered band of a datum.
///
/// Closed set of variants dispatched by exhaustive `match`; chart code never
/// extends it by subclassing-style trait objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RangeBandConfig {
    /// No banding: the scale is a plain linear transform.
    #[default]
    None,
    /// Absolute band width in pixels.
    Fixed { pixels: f64 },
    /// Band width in domain units, converted through the scaling factor.
    FixedDomain { domain: f64 },
    /// Band is the step minus a fixed pixel gap.
    FixedSpaceFromStep { pixels: f64 },
    /// Band is a caller-chosen fraction of the step.
    FixedPercentOfStep { percent: f64 },
    /// Band fraction assigned by the active style rather than the caller.
    StyleAssignedPercentOfStep { percent: f64 },
}

impl RangeBandConfig {
    pub fn validate(self) -> AxisResult<Self> {
        match self {
            Self::None => Ok(self),
            Self::Fixed { pixels } | Self::FixedSpaceFromStep { pixels } => {
                if !pixels.is_finite() || pixels < 0.0 {
                    return Err(AxisError::InvalidData(
                        "range band pixel size must be finite and >= 0".to_owned(),
                    ));
                }
                Ok(self)
            }
            Self::FixedDomain { domain } => {
                if !domain.is_finite() || domain < 0.0 {
                    return Err(AxisError::InvalidData(
                        "range band domain size must be finite and >= 0".to_owned(),
                    ));
                }
                Ok(self)
            }
            Self::FixedPercentOfStep { percent } | Self::StyleAssignedPercentOfStep { percent } => {
                if !percent.is_finite() || !(0.0..=1.0).contains(&percent) {
                    return Err(AxisError::InvalidData(
                        "range band percent must be within [0, 1]".to_owned(),
                    ));
                }
                Ok(self)
            }
        }
    }

    #[must_use]
    pub fn is_banded(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// How the distance between consecutive domain values maps to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepSizeConfig {
    /// Derive the step from the minimum detected gap between domain values.
    #[default]
    AutoDetect,
    /// Step given directly in pixels.
    Fixed { pixels: f64 },
    /// Step given in domain units.
    FixedDomain { domain: f64 },
}

impl StepSizeConfig {
    pub fn validate(self) -> AxisResult<Self> {
        match self {
            Self::AutoDetect => Ok(self),
            Self::Fixed { pixels } => {
                if !pixels.is_finite() || pixels <= 0.0 {
                    return Err(AxisError::InvalidData(
                        "fixed step size must be finite and > 0 pixels".to_owned(),
                    ));
                }
                Ok(self)
            }
            Self::FixedDomain { domain } => {
                if !domain.is_finite() || domain <= 0.0 {
                    return Err(AxisError::InvalidData(
                        "fixed domain step must be finite and > 0".to_owned(),
                    ));
                }
                Ok(self)
            }
        }
    }
}

/// Zoom/pan transform applied on top of the base scale.
///
/// `scaling_factor > 1` zooms in; `translate` shifts the visible window in
/// pixels. Mutated only by interaction handlers or explicit viewport calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSettings {
    pub scaling_factor: f64,
    pub translate: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            scaling_factor: 1.0,
            translate: 0.0,
        }
    }
}

impl ViewportSettings {
    pub fn new(scaling_factor: f64, translate: f64) -> AxisResult<Self> {
        Self {
            scaling_factor,
            translate,
        }
        .validate()
    }

    pub fn validate(self) -> AxisResult<Self> {
        if !self.scaling_factor.is_finite() || self.scaling_factor <= 0.0 {
            return Err(AxisError::InvalidData(
                "viewport scaling factor must be finite and > 0".to_owned(),
            ));
        }
        if !self.translate.is_finite() {
            return Err(AxisError::InvalidData(
                "viewport translate must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}
