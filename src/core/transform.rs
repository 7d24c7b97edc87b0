use serde::{Deserialize, Serialize};

use crate::core::config::{RangeBandConfig, StepSizeConfig, ViewportSettings};
use crate::core::extent::ScaleOutputExtent;

/// Domain bookkeeping backing a linear scale.
///
/// Tracks two extents: the scaled extent (`domain_min..domain_max`, possibly
/// widened by viewport extension) and the raw data extent. The gap between
/// consecutive *added* values feeds auto-detected step sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDomainInfo {
    domain_min: f64,
    domain_max: f64,
    data_min: f64,
    data_max: f64,
    minimum_detected_step: f64,
    previously_added: Option<f64>,
}

impl Default for LinearDomainInfo {
    fn default() -> Self {
        Self {
            domain_min: f64::INFINITY,
            domain_max: f64::NEG_INFINITY,
            data_min: f64::INFINITY,
            data_max: f64::NEG_INFINITY,
            minimum_detected_step: f64::INFINITY,
            previously_added: None,
        }
    }
}

impl LinearDomainInfo {
    /// Folds a domain value into both extents and the detected-gap minimum.
    pub fn add(&mut self, value: f64) {
        if let Some(previous) = self.previously_added {
            let step = (value - previous).abs();
            if step > 0.0 && step < self.minimum_detected_step {
                self.minimum_detected_step = step;
            }
        }
        self.previously_added = Some(value);

        self.data_min = self.data_min.min(value);
        self.data_max = self.data_max.max(value);
        self.domain_min = self.domain_min.min(value);
        self.domain_max = self.domain_max.max(value);
    }

    /// Widens the scaled extent without touching the data extent.
    pub fn extend(&mut self, min: f64, max: f64) {
        self.domain_min = self.domain_min.min(min);
        self.domain_max = self.domain_max.max(max);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain_min > self.domain_max
    }

    #[must_use]
    pub fn domain_min(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.domain_min }
    }

    #[must_use]
    pub fn domain_max(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.domain_max }
    }

    #[must_use]
    pub fn domain_diff(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.domain_max - self.domain_min
        }
    }

    #[must_use]
    pub fn minimum_detected_step(&self) -> f64 {
        self.minimum_detected_step
    }

    /// Whether the first band would clip: data sits exactly on the scaled
    /// extent's lower boundary, so half a step must be reserved there.
    #[must_use]
    pub fn has_half_step_at_start(&self) -> bool {
        !self.is_empty() && self.domain_min == self.data_min
    }

    #[must_use]
    pub fn has_half_step_at_end(&self) -> bool {
        !self.is_empty() && self.domain_max == self.data_max
    }
}

/// The linear transform core shared by continuous scales.
///
/// `apply(d) = (d + domain_translate) * scaling_factor + range_translate`,
/// and `reverse` inverts it exactly. All five fields are derived state,
/// recomputed by `update_scale_factor` followed by
/// `update_translate_and_range_band` whenever domain, range, or viewport
/// settings change. No pixel rounding happens here; snapping is applied only
/// at the layout boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleTransform {
    pub domain_translate: f64,
    pub scaling_factor: f64,
    pub range_translate: f64,
    /// Signed pixel distance between consecutive steps; negative on
    /// inverted ranges.
    pub step_size: f64,
    /// Non-negative band width in pixels.
    pub range_band: f64,
}

impl Default for ScaleTransform {
    fn default() -> Self {
        Self {
            domain_translate: 0.0,
            scaling_factor: 1.0,
            range_translate: 0.0,
            step_size: 0.0,
            range_band: 0.0,
        }
    }
}

impl ScaleTransform {
    #[must_use]
    pub fn apply(&self, domain_value: f64) -> f64 {
        (domain_value + self.domain_translate) * self.scaling_factor + self.range_translate
    }

    #[must_use]
    pub fn reverse(&self, pixel: f64) -> f64 {
        (pixel - self.range_translate) / self.scaling_factor - self.domain_translate
    }

    /// Recomputes `scaling_factor` and `step_size`.
    ///
    /// `scaling_factor` is never zero while `domain_diff != 0`; a degenerate
    /// domain leaves it at 1.0 and the translate step centers the output.
    pub fn update_scale_factor(
        &mut self,
        viewport: ViewportSettings,
        domain: &LinearDomainInfo,
        range: ScaleOutputExtent,
        band_config: RangeBandConfig,
        step_config: StepSizeConfig,
    ) {
        let domain_diff = domain.domain_diff();
        let range_diff = range.diff();

        if !band_config.is_banded() {
            self.step_size = 0.0;
            self.scaling_factor = if domain_diff == 0.0 {
                1.0
            } else {
                viewport.scaling_factor * range_diff / domain_diff
            };
            return;
        }

        let reserved = reserved_range_percent_of_step(domain);
        match step_config {
            StepSizeConfig::AutoDetect => {
                let gap = domain.minimum_detected_step();
                if gap.is_finite() && gap > 0.0 {
                    self.scaling_factor =
                        viewport.scaling_factor * range_diff / (domain_diff + gap * reserved);
                    self.step_size = gap * self.scaling_factor;
                } else {
                    // Single-point or all-equal domain: no gap to detect.
                    self.step_size = range_diff.abs();
                    self.scaling_factor = 1.0;
                }
            }
            StepSizeConfig::Fixed { pixels } => {
                self.step_size = pixels;
                self.scaling_factor = if domain_diff == 0.0 {
                    1.0
                } else {
                    viewport.scaling_factor * (range_diff - pixels * reserved) / domain_diff
                };
            }
            StepSizeConfig::FixedDomain {
                domain: step_domain,
            } => {
                let total_domain_diff = domain_diff + step_domain * reserved;
                self.scaling_factor = if total_domain_diff == 0.0 {
                    1.0
                } else {
                    viewport.scaling_factor * range_diff / total_domain_diff
                };
                self.step_size = step_domain * self.scaling_factor;
            }
        }
    }

    /// Recomputes translates and the cached band width.
    ///
    /// Must run after `update_scale_factor`. A zero-width domain centers
    /// output at the range midpoint instead of dividing by zero.
    pub fn update_translate_and_range_band(
        &mut self,
        viewport: ViewportSettings,
        domain: &LinearDomainInfo,
        range: ScaleOutputExtent,
        band_config: RangeBandConfig,
    ) {
        if domain.domain_diff() == 0.0 {
            self.domain_translate = -domain.domain_min();
            self.range_translate = range.midpoint();
        } else {
            self.domain_translate = -domain.domain_min();
            let start_reserve = if band_config.is_banded() && domain.has_half_step_at_start() {
                self.step_size / 2.0
            } else {
                0.0
            };
            self.range_translate = range.start + viewport.translate + start_reserve;
        }

        self.range_band = range_band_size(band_config, self.step_size, self.scaling_factor);
    }
}

/// Fraction of the output range reserved so the first/last band is not
/// clipped: 0.0 when neither domain boundary sits at a half-step edge, 1.0
/// when both do, 0.5 when exactly one does.
#[must_use]
pub fn reserved_range_percent_of_step(domain: &LinearDomainInfo) -> f64 {
    match (domain.has_half_step_at_start(), domain.has_half_step_at_end()) {
        (false, false) => 0.0,
        (true, true) => 1.0,
        _ => 0.5,
    }
}

/// Band width in pixels for a given config, step, and scaling factor.
///
/// Pure over its inputs; band widths are magnitudes even on inverted ranges.
#[must_use]
pub fn range_band_size(config: RangeBandConfig, step_size: f64, scaling_factor: f64) -> f64 {
    match config {
        RangeBandConfig::None => 0.0,
        RangeBandConfig::Fixed { pixels } => pixels,
        RangeBandConfig::FixedDomain { domain } => domain * scaling_factor.abs(),
        RangeBandConfig::FixedSpaceFromStep { pixels } => (step_size.abs() - pixels).max(0.0),
        RangeBandConfig::FixedPercentOfStep { percent }
        | RangeBandConfig::StyleAssignedPercentOfStep { percent } => step_size.abs() * percent,
    }
}

#[cfg(test)]
mod tests {
    use super::{LinearDomainInfo, range_band_size, reserved_range_percent_of_step};
    use crate::core::config::RangeBandConfig;

    #[test]
    fn minimum_gap_tracks_consecutive_added_values() {
        let mut domain = LinearDomainInfo::default();
        for value in [0.0, 10.0, 14.0, 30.0] {
            domain.add(value);
        }
        assert_eq!(domain.minimum_detected_step(), 4.0);
        assert_eq!(domain.domain_diff(), 30.0);
    }

    #[test]
    fn extension_clears_the_half_step_edge() {
        let mut domain = LinearDomainInfo::default();
        domain.add(5.0);
        domain.add(10.0);
        assert_eq!(reserved_range_percent_of_step(&domain), 1.0);

        domain.extend(0.0, 10.0);
        assert_eq!(reserved_range_percent_of_step(&domain), 0.5);

        domain.extend(0.0, 12.0);
        assert_eq!(reserved_range_percent_of_step(&domain), 0.0);
    }

    #[test]
    fn band_size_covers_every_variant() {
        assert_eq!(range_band_size(RangeBandConfig::None, 50.0, 2.0), 0.0);
        assert_eq!(
            range_band_size(RangeBandConfig::Fixed { pixels: 12.0 }, 50.0, 2.0),
            12.0
        );
        assert_eq!(
            range_band_size(RangeBandConfig::FixedDomain { domain: 3.0 }, 50.0, 2.0),
            6.0
        );
        assert_eq!(
            range_band_size(
                RangeBandConfig::FixedSpaceFromStep { pixels: 10.0 },
                50.0,
                2.0
            ),
            40.0
        );
        assert_eq!(
            range_band_size(
                RangeBandConfig::FixedPercentOfStep { percent: 0.5 },
                50.0,
                2.0
            ),
            25.0
        );
        assert_eq!(
            range_band_size(
                RangeBandConfig::StyleAssignedPercentOfStep { percent: 0.65 },
                40.0,
                2.0
            ),
            26.0
        );
    }
}
