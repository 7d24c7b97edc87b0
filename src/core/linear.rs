use std::cmp::Ordering;

use crate::core::config::{RangeBandConfig, StepSizeConfig, ViewportSettings};
use crate::core::extent::{Extent, ScaleOutputExtent};
use crate::core::transform::{LinearDomainInfo, ScaleTransform};
use crate::error::{AxisError, AxisResult};

/// Continuous domain-to-pixel scale.
///
/// Mutators keep the cached transform current by re-running the two update
/// steps (`update_scale_factor`, then `update_translate_and_range_band`) in
/// order, so `apply`/`reverse` are always safe to call. Both steps stay
/// public and idempotent for callers that drive the cycle explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: LinearDomainInfo,
    range: ScaleOutputExtent,
    viewport: ViewportSettings,
    range_band_config: RangeBandConfig,
    step_size_config: StepSizeConfig,
    transform: ScaleTransform,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearScale {
    #[must_use]
    pub fn new() -> Self {
        let mut scale = Self {
            domain: LinearDomainInfo::default(),
            range: ScaleOutputExtent::default(),
            viewport: ViewportSettings::default(),
            range_band_config: RangeBandConfig::default(),
            step_size_config: StepSizeConfig::default(),
            transform: ScaleTransform::default(),
        };
        scale.rebuild();
        scale
    }

    /// Folds one domain value into the scale's extent.
    ///
    /// Gap detection for auto step sizing reads *consecutive* added values,
    /// so callers feed data in series order.
    pub fn add_domain_value(&mut self, value: f64) -> AxisResult<()> {
        if !value.is_finite() {
            return Err(AxisError::InvalidData(
                "domain values must be finite".to_owned(),
            ));
        }
        self.domain.add(value);
        self.rebuild();
        Ok(())
    }

    pub fn add_domain_values<I: IntoIterator<Item = f64>>(&mut self, values: I) -> AxisResult<()> {
        for value in values {
            self.add_domain_value(value)?;
        }
        Ok(())
    }

    pub fn reset_domain(&mut self) {
        self.domain.reset();
        self.viewport = ViewportSettings::default();
        self.rebuild();
    }

    /// The scaled domain extent, `None` while no data has been added.
    #[must_use]
    pub fn domain_extent(&self) -> Option<Extent<f64>> {
        if self.domain.is_empty() {
            None
        } else {
            Extent::new(self.domain.domain_min(), self.domain.domain_max()).ok()
        }
    }

    pub fn set_range(&mut self, range: ScaleOutputExtent) {
        self.range = range;
        self.rebuild();
    }

    #[must_use]
    pub fn range(&self) -> ScaleOutputExtent {
        self.range
    }

    pub fn set_range_band_config(&mut self, config: RangeBandConfig) -> AxisResult<()> {
        self.range_band_config = config.validate()?;
        self.rebuild();
        Ok(())
    }

    #[must_use]
    pub fn range_band_config(&self) -> RangeBandConfig {
        self.range_band_config
    }

    pub fn set_step_size_config(&mut self, config: StepSizeConfig) -> AxisResult<()> {
        self.step_size_config = config.validate()?;
        self.rebuild();
        Ok(())
    }

    #[must_use]
    pub fn step_size_config(&self) -> StepSizeConfig {
        self.step_size_config
    }

    pub fn set_viewport_settings(&mut self, settings: ViewportSettings) -> AxisResult<()> {
        self.viewport = settings.validate()?;
        self.rebuild();
        Ok(())
    }

    #[must_use]
    pub fn viewport_settings(&self) -> ViewportSettings {
        self.viewport
    }

    /// Solves viewport settings so `window` spans the output range.
    ///
    /// A degenerate or empty domain resets the viewport to identity instead
    /// of erroring; windowing a zero-width domain has no meaningful answer.
    pub fn set_viewport_domain(&mut self, window: Extent<f64>) -> AxisResult<()> {
        let domain_diff = self.domain.domain_diff();
        if domain_diff == 0.0 {
            self.viewport = ViewportSettings::default();
            self.rebuild();
            return Ok(());
        }

        let window_diff = window.diff();
        if window_diff == 0.0 {
            return Err(AxisError::InvalidData(
                "viewport window must have non-zero width".to_owned(),
            ));
        }

        let scaling_factor = domain_diff / window_diff;
        let base = self.range.diff() / domain_diff;
        let translate = -(window.min() - self.domain.domain_min()) * scaling_factor * base;
        self.viewport = ViewportSettings::new(scaling_factor, translate)?;
        self.rebuild();
        Ok(())
    }

    /// Domain window currently visible through the output range.
    #[must_use]
    pub fn viewport_domain(&self) -> Extent<f64> {
        if self.is_degenerate() {
            let value = self.domain.domain_min();
            return Extent::new(value, value).expect("degenerate extent is ordered");
        }
        let a = self.transform.reverse(self.range.start);
        let b = self.transform.reverse(self.range.end);
        Extent::from_unordered(a, b).expect("finite transform output")
    }

    /// Widens the scaled domain so externally chosen bounds (e.g. nice tick
    /// limits) fall inside the axis.
    pub fn extend_viewport_domain(&mut self, a: f64, b: f64) -> AxisResult<()> {
        if !a.is_finite() || !b.is_finite() {
            return Err(AxisError::InvalidData(
                "domain extension bounds must be finite".to_owned(),
            ));
        }
        self.domain.extend(a.min(b), a.max(b));
        self.rebuild();
        Ok(())
    }

    pub fn update_scale_factor(&mut self) {
        self.transform.update_scale_factor(
            self.viewport,
            &self.domain,
            self.range,
            self.range_band_config,
            self.step_size_config,
        );
    }

    pub fn update_translate_and_range_band(&mut self) {
        self.transform.update_translate_and_range_band(
            self.viewport,
            &self.domain,
            self.range,
            self.range_band_config,
        );
    }

    fn rebuild(&mut self) {
        self.update_scale_factor();
        self.update_translate_and_range_band();
    }

    /// Maps a domain value to a pixel position.
    ///
    /// A zero-width domain maps every input to the range midpoint.
    #[must_use]
    pub fn apply(&self, domain_value: f64) -> f64 {
        if self.is_degenerate() {
            return self.range.midpoint();
        }
        self.transform.apply(domain_value)
    }

    /// Inverts `apply`. On a zero-width domain every pixel maps back to the
    /// single domain value.
    #[must_use]
    pub fn reverse(&self, pixel: f64) -> f64 {
        if self.is_degenerate() {
            return self.domain.domain_min();
        }
        self.transform.reverse(pixel)
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.domain.domain_diff() == 0.0
    }

    #[must_use]
    pub fn range_band(&self) -> f64 {
        self.transform.range_band
    }

    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.transform.step_size
    }

    #[must_use]
    pub fn scaling_factor(&self) -> f64 {
        self.transform.scaling_factor
    }

    #[must_use]
    pub fn transform(&self) -> ScaleTransform {
        self.transform
    }

    /// Where a domain value sits relative to the visible window; used by
    /// panning callers to decide scroll direction.
    #[must_use]
    pub fn compare_domain_to_viewport(&self, domain_value: f64) -> Ordering {
        let window = self.viewport_domain();
        if domain_value < window.min() {
            Ordering::Less
        } else if domain_value > window.max() {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;
    use crate::core::extent::{Extent, ScaleOutputExtent};

    fn scale_over(values: &[f64], range: (f64, f64)) -> LinearScale {
        let mut scale = LinearScale::new();
        scale
            .add_domain_values(values.iter().copied())
            .expect("finite values");
        scale.set_range(ScaleOutputExtent::new(range.0, range.1).expect("finite range"));
        scale
    }

    #[test]
    fn viewport_domain_matches_range_endpoints() {
        let scale = scale_over(&[0.0, 100.0], (0.0, 500.0));
        let window = scale.viewport_domain();
        assert!((window.min() - 0.0).abs() < 1e-9);
        assert!((window.max() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn windowing_zooms_and_pans() {
        let mut scale = scale_over(&[0.0, 100.0], (0.0, 500.0));
        scale
            .set_viewport_domain(Extent::new(25.0, 75.0).expect("ordered"))
            .expect("valid window");

        assert!((scale.apply(25.0) - 0.0).abs() < 1e-9);
        assert!((scale.apply(75.0) - 500.0).abs() < 1e-9);
        assert_eq!(scale.viewport_settings().scaling_factor, 2.0);
    }

    #[test]
    fn inverted_range_maps_domain_min_to_range_start() {
        let scale = scale_over(&[0.0, 10.0], (600.0, 0.0));
        assert!((scale.apply(0.0) - 600.0).abs() < 1e-9);
        assert!((scale.apply(10.0) - 0.0).abs() < 1e-9);
        assert!((scale.reverse(300.0) - 5.0).abs() < 1e-9);
    }
}
