use crate::error::{AxisError, AxisResult};
use crate::ticks::formatter::{ThresholdTickFormatter, TickFormatter};
use crate::ticks::numeric::NumericTickProvider;
use crate::ticks::provider::{TickProvider, TickRequest};
use crate::ticks::tick::Tick;

/// Tick provider for axes with a collapsed "below threshold" bucket region.
///
/// Delegates tick generation to an inner provider with a threshold-aware
/// formatter, strips the generated sub-threshold ticks, and synthesizes the
/// single threshold tick whose label sits over the bucket. Both `threshold`
/// and `show_bucket` must be configured before `get_ticks`; anything else is
/// mis-wired chart code and fails fast.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketingTickProvider<P = NumericTickProvider> {
    inner: P,
    threshold: Option<f64>,
    show_bucket: Option<bool>,
}

impl Default for BucketingTickProvider<NumericTickProvider> {
    fn default() -> Self {
        Self::new(NumericTickProvider::new())
    }
}

impl<P: TickProvider> BucketingTickProvider<P> {
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            threshold: None,
            show_bucket: None,
        }
    }

    /// Domain value below which ticks collapse into the bucket.
    pub fn with_threshold(mut self, threshold: f64) -> AxisResult<Self> {
        if !threshold.is_finite() {
            return Err(AxisError::InvalidData(
                "bucketing threshold must be finite".to_owned(),
            ));
        }
        self.threshold = Some(threshold);
        Ok(self)
    }

    /// Whether the bucket region is rendered or collapsed to the axis start.
    #[must_use]
    pub fn with_show_bucket(mut self, show_bucket: bool) -> Self {
        self.show_bucket = Some(show_bucket);
        self
    }

    #[must_use]
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    #[must_use]
    pub fn show_bucket(&self) -> Option<bool> {
        self.show_bucket
    }
}

impl<P: TickProvider> TickProvider for BucketingTickProvider<P> {
    fn get_ticks(&self, request: &mut TickRequest<'_>) -> AxisResult<Vec<Tick<f64>>> {
        let threshold = self.threshold.ok_or_else(|| {
            AxisError::Precondition(
                "bucketing threshold must be set before requesting ticks".to_owned(),
            )
        })?;
        let show_bucket = self.show_bucket.ok_or_else(|| {
            AxisError::Precondition(
                "bucketing show_bucket must be set before requesting ticks".to_owned(),
            )
        })?;

        let threshold_formatter = ThresholdTickFormatter::new(request.formatter, threshold);
        let mut ticks = {
            let mut delegated = TickRequest {
                scale: &mut *request.scale,
                formatter: &threshold_formatter,
                label_cache: &mut *request.label_cache,
                draw_strategy: request.draw_strategy,
                orientation: request.orientation,
                viewport_extension_enabled: request.viewport_extension_enabled,
                hint: request.hint,
            };
            self.inner.get_ticks(&mut delegated)?
        };

        let origin_location = request.scale.apply(0.0);
        let threshold_location = request.scale.apply(threshold);
        let (location, label_offset) = if show_bucket {
            // Shift the label to the midpoint of the bucket region.
            (
                threshold_location,
                -0.5 * (threshold_location - origin_location),
            )
        } else {
            (origin_location, 0.0)
        };

        ticks.retain(|tick| !(tick.value <= threshold && tick.value != 0.0));
        ticks.push(Tick {
            value: threshold,
            label: threshold_formatter.format(&threshold),
            location,
            label_offset,
        });
        ticks.sort_by(|left, right| left.value.total_cmp(&right.value));

        Ok(ticks)
    }
}
