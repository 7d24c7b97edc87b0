use tracing::{debug, trace};

use crate::error::{AxisError, AxisResult};
use crate::ticks::provider::{TickProvider, TickRequest};
use crate::ticks::tick::Tick;

const DEFAULT_MIN_TICK_COUNT: usize = 2;
const DEFAULT_MAX_TICK_COUNT: usize = 10;

/// Mantissas of the "nice" step ladder; combined with powers of ten.
const NICE_MANTISSAS: [f64; 4] = [1.0, 2.0, 2.5, 5.0];

/// Standard numeric tick provider.
///
/// Each candidate tick count gets the smallest nice step whose
/// floor-anchored window covers the viewport extent. Among candidates whose
/// labels do not collide, the tightest-fitting set wins (ties favor more
/// ticks). When every candidate collides the fewest-tick candidate is
/// returned anyway; a sparse axis beats an unreadable one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericTickProvider {
    desired_tick_count: Option<usize>,
    desired_min_tick_count: usize,
    desired_max_tick_count: usize,
    zero_bound: bool,
    whole_number_steps: bool,
}

impl Default for NumericTickProvider {
    fn default() -> Self {
        Self {
            desired_tick_count: None,
            desired_min_tick_count: DEFAULT_MIN_TICK_COUNT,
            desired_max_tick_count: DEFAULT_MAX_TICK_COUNT,
            zero_bound: false,
            whole_number_steps: false,
        }
    }
}

impl NumericTickProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the provider to exactly `count` ticks, skipping the retry loop's
    /// count search (collisions then only influence the chosen step).
    pub fn set_fixed_tick_count(&mut self, count: Option<usize>) -> AxisResult<()> {
        if let Some(count) = count {
            if count < 2 {
                return Err(AxisError::Precondition(
                    "fixed tick count must be >= 2".to_owned(),
                ));
            }
        }
        self.desired_tick_count = count;
        Ok(())
    }

    pub fn set_tick_count_range(&mut self, min: usize, max: usize) -> AxisResult<()> {
        if min < 2 || max < min {
            return Err(AxisError::Precondition(
                "tick count range requires 2 <= min <= max".to_owned(),
            ));
        }
        self.desired_min_tick_count = min;
        self.desired_max_tick_count = max;
        Ok(())
    }

    /// Extends the tick window to include zero.
    pub fn set_zero_bound(&mut self, zero_bound: bool) {
        self.zero_bound = zero_bound;
    }

    /// Restricts steps to whole numbers (integer domains).
    pub fn set_whole_number_steps(&mut self, whole: bool) {
        self.whole_number_steps = whole;
    }

    fn candidate_counts(&self) -> Vec<usize> {
        match self.desired_tick_count {
            Some(count) => vec![count],
            None => (self.desired_min_tick_count..=self.desired_max_tick_count)
                .rev()
                .collect(),
        }
    }

    fn ticks_from_hint(
        &self,
        request: &mut TickRequest<'_>,
        low: f64,
    ) -> AxisResult<Option<Vec<Tick<f64>>>> {
        let Some(hint) = request.hint else {
            return Ok(None);
        };
        if hint.tick_count < 2 {
            return Err(AxisError::Precondition(
                "tick hint must carry at least 2 ticks".to_owned(),
            ));
        }
        let span = hint.end - hint.start;
        if !span.is_finite() || span == 0.0 {
            return Err(AxisError::InvalidData(
                "tick hint window must be finite and non-zero".to_owned(),
            ));
        }

        // Keep the hint's cadence, shifted onto the current viewport.
        let step = span.abs() / (hint.tick_count - 1) as f64;
        let start = (low / step).floor() * step;
        let values: Vec<f64> = (0..hint.tick_count)
            .map(|index| start + step * index as f64)
            .collect();
        Ok(Some(request.build_ticks(&values)))
    }
}

impl TickProvider for NumericTickProvider {
    fn get_ticks(&self, request: &mut TickRequest<'_>) -> AxisResult<Vec<Tick<f64>>> {
        let window = request.scale.viewport_domain();
        let mut low = window.min();
        let mut high = window.max();
        if self.zero_bound {
            low = low.min(0.0);
            high = high.max(0.0);
        }

        if low == high {
            return Ok(request.build_ticks(&[low]));
        }

        if let Some(ticks) = self.ticks_from_hint(request, low)? {
            return Ok(ticks);
        }

        // Candidates run from most to fewest ticks. Among collision-free
        // candidates the one hugging the viewport tightest (least overshoot)
        // wins, tie-broken toward more ticks; if every candidate collides
        // the fewest-tick set is kept anyway.
        let mut fewest: Option<(Vec<f64>, Vec<Tick<f64>>)> = None;
        let mut chosen: Option<(f64, Vec<f64>, Vec<Tick<f64>>)> = None;
        for count in self.candidate_counts() {
            let step = nice_step_covering(low, high, count, self.whole_number_steps);
            let start = (low / step).floor() * step;
            let values: Vec<f64> = (0..count)
                .map(|index| start + step * index as f64)
                .collect();
            let ticks = request.build_ticks(&values);
            let report = request.draw_strategy.collides(&ticks, request.orientation);
            trace!(
                count,
                step,
                collides = report.ticks_collide,
                "numeric tick candidate"
            );
            let overshoot = (step * (count - 1) as f64) - (high - low);
            if !report.ticks_collide
                && chosen
                    .as_ref()
                    .is_none_or(|(best, _, _)| overshoot < *best - 1e-9)
            {
                chosen = Some((overshoot, values, ticks));
            } else if report.ticks_collide {
                fewest = Some((values, ticks));
            }
        }

        let (values, mut ticks) = match chosen {
            Some((_, values, ticks)) => (values, ticks),
            None => {
                debug!("all tick-count candidates collide; keeping the fewest-tick set");
                fewest.expect("candidate counts are never empty")
            }
        };

        if request.viewport_extension_enabled {
            if let (Some(first), Some(last)) = (values.first(), values.last()) {
                request.scale.extend_viewport_domain(*first, *last)?;
                // Extension moved the transform; re-read final locations.
                ticks = request.build_ticks(&values);
            }
        }

        Ok(ticks)
    }
}

/// Smallest nice step (mantissa x 10^k) at or above `raw`.
fn nice_step_at_least(raw: f64, whole_numbers: bool) -> f64 {
    let mut power = raw.abs().log10().floor() as i32;
    loop {
        for mantissa in NICE_MANTISSAS {
            let candidate = mantissa * 10_f64.powi(power);
            if whole_numbers && (candidate < 1.0 || candidate.fract() != 0.0) {
                continue;
            }
            if candidate >= raw {
                return candidate;
            }
        }
        power += 1;
    }
}

/// Nice step for `count` ticks whose floor-anchored window covers
/// `[low, high]`.
///
/// Walks up the nice-step ladder until coverage holds; a bounded number of
/// attempts guards the zero-spanning two-tick case, which no floor-anchored
/// nice step can cover, by falling back to the exact span.
fn nice_step_covering(low: f64, high: f64, count: usize, whole_numbers: bool) -> f64 {
    let span = high - low;
    let segments = count.saturating_sub(1).max(1) as f64;
    let mut step = nice_step_at_least(span / segments, whole_numbers);

    for _ in 0..64 {
        let start = (low / step).floor() * step;
        let end = start + step * segments;
        if end >= high - span * 1e-9 {
            return step;
        }
        step = nice_step_at_least(step * 1.01, whole_numbers);
    }

    span / segments
}
