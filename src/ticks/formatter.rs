use std::collections::HashMap;

use ordered_float::OrderedFloat;
use rust_decimal::Decimal;

use crate::core::time::unix_seconds_to_datetime;
use crate::error::{AxisError, AxisResult};

/// Renders a domain value into a tick label.
pub trait TickFormatter<D> {
    fn format(&self, value: &D) -> String;
}

/// Decimal tick labels without binary-float noise.
///
/// Values are rounded through `Decimal` so `0.1 + 0.2` style artifacts never
/// reach the axis; trailing zeros are trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericTickFormatter {
    precision: u32,
}

impl Default for NumericTickFormatter {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

impl NumericTickFormatter {
    pub fn with_precision(precision: u32) -> AxisResult<Self> {
        if precision > 12 {
            return Err(AxisError::InvalidData(
                "tick label precision must be <= 12".to_owned(),
            ));
        }
        Ok(Self { precision })
    }
}

impl TickFormatter<f64> for NumericTickFormatter {
    fn format(&self, value: &f64) -> String {
        match Decimal::from_f64_retain(*value) {
            Some(decimal) => decimal.round_dp(self.precision).normalize().to_string(),
            // Magnitudes outside Decimal's range fall back to plain float text.
            None => format!("{value}"),
        }
    }
}

/// UTC time labels over unix-second tick values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeTickFormatter {
    pattern: String,
}

impl TimeTickFormatter {
    /// Fixed chrono format pattern, e.g. `"%H:%M"`.
    #[must_use]
    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Picks a pattern granularity from the tick step.
    #[must_use]
    pub fn adaptive(step_seconds: f64) -> Self {
        const MINUTE: f64 = 60.0;
        const HOUR: f64 = 3_600.0;
        const DAY: f64 = 86_400.0;
        let pattern = if step_seconds < MINUTE {
            "%H:%M:%S"
        } else if step_seconds < HOUR {
            "%H:%M"
        } else if step_seconds < DAY {
            "%b %d %H:%M"
        } else if step_seconds < 28.0 * DAY {
            "%b %d"
        } else {
            "%b %Y"
        };
        Self::with_pattern(pattern)
    }
}

impl TickFormatter<f64> for TimeTickFormatter {
    fn format(&self, value: &f64) -> String {
        match unix_seconds_to_datetime(*value) {
            Ok(time) => time.format(&self.pattern).to_string(),
            Err(_) => format!("{value}"),
        }
    }
}

/// Bucketing-axis formatter: values below the threshold collapse to empty
/// labels, the threshold itself is prefixed with `"< "`.
#[derive(Clone, Copy)]
pub struct ThresholdTickFormatter<'a> {
    base: &'a dyn TickFormatter<f64>,
    threshold: f64,
}

impl<'a> ThresholdTickFormatter<'a> {
    #[must_use]
    pub fn new(base: &'a dyn TickFormatter<f64>, threshold: f64) -> Self {
        Self { base, threshold }
    }
}

impl TickFormatter<f64> for ThresholdTickFormatter<'_> {
    fn format(&self, value: &f64) -> String {
        if *value < self.threshold {
            String::new()
        } else if *value == self.threshold {
            format!("< {}", self.base.format(value))
        } else {
            self.base.format(value)
        }
    }
}

/// Caller-owned label cache, reused across draw cycles so unchanged tick
/// values skip re-formatting.
#[derive(Debug, Clone, Default)]
pub struct TickLabelCache {
    entries: HashMap<OrderedFloat<f64>, String>,
}

impl TickLabelCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(&mut self, value: f64, formatter: &dyn TickFormatter<f64>) -> String {
        self.entries
            .entry(OrderedFloat(value))
            .or_insert_with(|| formatter.format(&value))
            .clone()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{NumericTickFormatter, ThresholdTickFormatter, TickFormatter, TickLabelCache};

    #[test]
    fn numeric_labels_trim_float_noise() {
        let formatter = NumericTickFormatter::default();
        assert_eq!(formatter.format(&(0.1 + 0.2)), "0.3");
        assert_eq!(formatter.format(&40.0), "40");
        assert_eq!(formatter.format(&2.5), "2.5");
    }

    #[test]
    fn threshold_formatter_suppresses_and_prefixes() {
        let base = NumericTickFormatter::default();
        let formatter = ThresholdTickFormatter::new(&base, 10.0);
        assert_eq!(formatter.format(&5.0), "");
        assert_eq!(formatter.format(&10.0), "< 10");
        assert_eq!(formatter.format(&20.0), "20");
    }

    #[test]
    fn cache_formats_each_value_once() {
        struct Counting(std::cell::Cell<usize>);
        impl TickFormatter<f64> for Counting {
            fn format(&self, value: &f64) -> String {
                self.0.set(self.0.get() + 1);
                format!("{value}")
            }
        }

        let formatter = Counting(std::cell::Cell::new(0));
        let mut cache = TickLabelCache::new();
        assert_eq!(cache.format(7.0, &formatter), "7");
        assert_eq!(cache.format(7.0, &formatter), "7");
        assert_eq!(formatter.0.get(), 1);
    }
}
