use chrono::{DateTime, Utc};

use crate::core::config::ViewportSettings;
use crate::core::extent::{Extent, ScaleOutputExtent};
use crate::core::linear::LinearScale;
use crate::error::{AxisError, AxisResult};

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

pub fn unix_seconds_to_datetime(seconds: f64) -> AxisResult<DateTime<Utc>> {
    if !seconds.is_finite() {
        return Err(AxisError::InvalidData(
            "timestamp seconds must be finite".to_owned(),
        ));
    }
    DateTime::<Utc>::from_timestamp_millis((seconds * 1000.0).round() as i64)
        .ok_or_else(|| AxisError::InvalidData("timestamp out of representable range".to_owned()))
}

/// Date-time axis scale.
///
/// A thin adapter over [`LinearScale`] keyed by unix seconds, so time axes
/// share the numeric tick pipeline (providers, formatters, draw strategies)
/// unchanged. `inner_mut` exposes the numeric scale for that pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemporalScale {
    inner: LinearScale,
}

impl TemporalScale {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: LinearScale::new(),
        }
    }

    pub fn add_domain_value(&mut self, time: DateTime<Utc>) -> AxisResult<()> {
        self.inner.add_domain_value(datetime_to_unix_seconds(time))
    }

    pub fn reset_domain(&mut self) {
        self.inner.reset_domain();
    }

    pub fn set_range(&mut self, range: ScaleOutputExtent) {
        self.inner.set_range(range);
    }

    pub fn set_viewport_settings(&mut self, settings: ViewportSettings) -> AxisResult<()> {
        self.inner.set_viewport_settings(settings)
    }

    pub fn set_viewport_domain(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AxisResult<()> {
        let window = Extent::from_unordered(
            datetime_to_unix_seconds(start),
            datetime_to_unix_seconds(end),
        )?;
        self.inner.set_viewport_domain(window)
    }

    pub fn viewport_domain(&self) -> AxisResult<(DateTime<Utc>, DateTime<Utc>)> {
        let window = self.inner.viewport_domain();
        Ok((
            unix_seconds_to_datetime(window.min())?,
            unix_seconds_to_datetime(window.max())?,
        ))
    }

    #[must_use]
    pub fn apply(&self, time: DateTime<Utc>) -> f64 {
        self.inner.apply(datetime_to_unix_seconds(time))
    }

    pub fn reverse(&self, pixel: f64) -> AxisResult<DateTime<Utc>> {
        unix_seconds_to_datetime(self.inner.reverse(pixel))
    }

    #[must_use]
    pub fn inner(&self) -> &LinearScale {
        &self.inner
    }

    #[must_use]
    pub fn inner_mut(&mut self) -> &mut LinearScale {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::{TemporalScale, datetime_to_unix_seconds, unix_seconds_to_datetime};
    use crate::core::extent::ScaleOutputExtent;
    use chrono::{TimeZone, Utc};

    #[test]
    fn unix_seconds_round_trip_keeps_millisecond_precision() {
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap();
        let seconds = datetime_to_unix_seconds(time);
        let recovered = unix_seconds_to_datetime(seconds).expect("in range");
        assert_eq!(recovered, time);
    }

    #[test]
    fn temporal_scale_maps_through_the_numeric_pipeline() {
        let mut scale = TemporalScale::new();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        scale.add_domain_value(start).expect("finite");
        scale.add_domain_value(end).expect("finite");
        scale.set_range(ScaleOutputExtent::new(0.0, 864.0).expect("finite range"));

        let noon = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert!((scale.apply(noon) - 432.0).abs() < 1e-6);
        assert_eq!(scale.reverse(432.0).expect("in range"), noon);
    }
}
