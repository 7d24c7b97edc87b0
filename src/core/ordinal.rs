use indexmap::IndexSet;

use crate::core::config::{RangeBandConfig, StepSizeConfig};
use crate::core::extent::ScaleOutputExtent;
use crate::core::transform::range_band_size;
use crate::error::{AxisError, AxisResult};

/// Discrete scale over insertion-ordered unique string keys.
///
/// Each key owns an evenly sized band; bands keep the order keys were first
/// added in, never sorted. Unknown keys map to `0.0` and `reverse` clamps to
/// the nearest valid band, so lookups never fail on legitimate empty or
/// out-of-window inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    domain: IndexSet<String>,
    range: ScaleOutputExtent,
    band_config: RangeBandConfig,
    viewport_data_size: Option<usize>,
    starting_domain: Option<String>,
    viewport_scale: f64,
    viewport_translate: f64,
    step_size: f64,
    range_band: f64,
}

impl Default for OrdinalScale {
    fn default() -> Self {
        Self::new()
    }
}

impl OrdinalScale {
    #[must_use]
    pub fn new() -> Self {
        let mut scale = Self {
            domain: IndexSet::new(),
            range: ScaleOutputExtent::default(),
            band_config: RangeBandConfig::StyleAssignedPercentOfStep { percent: 0.65 },
            viewport_data_size: None,
            starting_domain: None,
            viewport_scale: 1.0,
            viewport_translate: 0.0,
            step_size: 0.0,
            range_band: 0.0,
        };
        scale.recompute();
        scale
    }

    /// Appends a key; already-present keys keep their original position.
    pub fn add_domain(&mut self, key: impl Into<String>) {
        self.domain.insert(key.into());
        self.recompute();
    }

    pub fn add_domains<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        for key in keys {
            self.domain.insert(key.into());
        }
        self.recompute();
    }

    pub fn reset_domain(&mut self) {
        self.domain.clear();
        self.viewport_data_size = None;
        self.starting_domain = None;
        self.recompute();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.domain.contains(key)
    }

    pub fn domain_keys(&self) -> impl Iterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    pub fn set_range(&mut self, range: ScaleOutputExtent) {
        self.range = range;
        self.recompute();
    }

    #[must_use]
    pub fn range(&self) -> ScaleOutputExtent {
        self.range
    }

    /// Ordinal bands are always present, and band width only makes sense in
    /// pixels or as a fraction of the step; `None` and `FixedDomain` indicate
    /// mis-wired chart code.
    pub fn set_range_band_config(&mut self, config: RangeBandConfig) -> AxisResult<()> {
        match config.validate()? {
            RangeBandConfig::None | RangeBandConfig::FixedDomain { .. } => {
                return Err(AxisError::Precondition(
                    "ordinal scales require a pixel or percent range band config".to_owned(),
                ));
            }
            valid => self.band_config = valid,
        }
        self.recompute();
        Ok(())
    }

    #[must_use]
    pub fn range_band_config(&self) -> RangeBandConfig {
        self.band_config
    }

    /// Ordinal steps are always derived from the band count; any non-auto
    /// config is a wiring error.
    pub fn set_step_size_config(&mut self, config: StepSizeConfig) -> AxisResult<()> {
        match config {
            StepSizeConfig::AutoDetect => Ok(()),
            _ => Err(AxisError::Precondition(
                "ordinal scales only support auto-detected step sizes".to_owned(),
            )),
        }
    }

    /// Windows the scale to `viewport_data_size` bands starting at
    /// `starting_domain`.
    ///
    /// Recomputes in two passes: the baseline step at scale 1.0, then the
    /// zoom ratio `len / min(size, len)` and the translate that puts the
    /// starting band at the viewport edge. On inverted ranges the step sign
    /// flips with the range diff, which places index 0 at `range.start` (the
    /// bottom of a vertical axis).
    pub fn set_viewport(
        &mut self,
        viewport_data_size: Option<usize>,
        starting_domain: Option<&str>,
    ) -> AxisResult<()> {
        if starting_domain.is_some() && viewport_data_size.is_none() {
            return Err(AxisError::Precondition(
                "a starting domain requires a viewport data size".to_owned(),
            ));
        }
        if viewport_data_size == Some(0) && starting_domain.is_some() {
            return Err(AxisError::Precondition(
                "viewport data size must be > 0 when a starting domain is set".to_owned(),
            ));
        }
        if let Some(start) = starting_domain {
            if !self.domain.contains(start) {
                return Err(AxisError::Precondition(format!(
                    "starting domain `{start}` is not in the scale's domain"
                )));
            }
        }

        self.viewport_data_size = viewport_data_size.filter(|size| *size > 0);
        self.starting_domain = starting_domain.map(str::to_owned);
        self.recompute();
        Ok(())
    }

    #[must_use]
    pub fn viewport_data_size(&self) -> Option<usize> {
        self.viewport_data_size
    }

    #[must_use]
    pub fn starting_domain(&self) -> Option<&str> {
        self.starting_domain.as_deref()
    }

    /// Pixel position of a key's band center; unknown keys map to `0.0`.
    #[must_use]
    pub fn apply(&self, key: &str) -> f64 {
        match self.domain.get_index_of(key) {
            Some(index) => self.index_location(index),
            None => 0.0,
        }
    }

    /// Nearest band key for a pixel, clamped to the domain.
    ///
    /// Any finite input yields a valid key, even pixels far outside the
    /// nominal range; only an empty domain returns `None`.
    #[must_use]
    pub fn reverse(&self, pixel: f64) -> Option<&str> {
        if self.domain.is_empty() {
            return None;
        }
        let last = self.domain.len() - 1;
        let index = if self.step_size == 0.0 {
            0
        } else {
            let raw = (pixel - self.range.start - self.viewport_translate) / self.step_size - 0.5;
            raw.round().clamp(0.0, last as f64) as usize
        };
        self.domain.get_index(index).map(String::as_str)
    }

    /// Signed pixel distance between adjacent band centers.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    #[must_use]
    pub fn range_band(&self) -> f64 {
        self.range_band
    }

    fn index_location(&self, index: usize) -> f64 {
        self.range.start + self.viewport_translate + self.step_size * (index as f64 + 0.5)
    }

    fn recompute(&mut self) {
        let count = self.domain.len();
        if count == 0 {
            self.viewport_scale = 1.0;
            self.viewport_translate = 0.0;
            self.step_size = 0.0;
            self.range_band = 0.0;
            return;
        }

        // Pass 1: baseline step at scale 1.0.
        let base_step = self.range.diff() / count as f64;

        // Pass 2: zoom to the requested window and anchor the starting band.
        match self.viewport_data_size {
            Some(size) => {
                let window = size.min(count);
                self.viewport_scale = count as f64 / window as f64;
                self.step_size = base_step * self.viewport_scale;
                let start_index = self
                    .starting_domain
                    .as_deref()
                    .and_then(|key| self.domain.get_index_of(key))
                    .unwrap_or(0);
                self.viewport_translate = -self.step_size * start_index as f64;
            }
            None => {
                self.viewport_scale = 1.0;
                self.viewport_translate = 0.0;
                self.step_size = base_step;
            }
        }

        self.range_band = range_band_size(self.band_config, self.step_size, 1.0);
    }
}
