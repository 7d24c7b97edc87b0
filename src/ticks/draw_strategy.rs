use crate::layout::view::ViewMeasuredSizes;
use crate::ticks::tick::{AxisOrientation, CollisionReport, Tick};

/// Measurement and collision seam between tick generation and layout.
///
/// Implemented by the rendering layer; the tick providers and the layout
/// manager consume only decoration, collision, and measurement. Drawing
/// itself never enters this crate.
pub trait TickDrawStrategy<D> {
    /// Applies rendering-side adjustments (label offsets etc.) to freshly
    /// generated ticks.
    fn decorate_ticks(&self, ticks: &mut [Tick<D>]);

    /// Whether rendered tick labels would overlap at their current locations.
    fn collides(&self, ticks: &[Tick<D>], orientation: AxisOrientation) -> CollisionReport;

    /// Space needed by ticks drawn along a vertical (left/right) axis.
    fn measure_vertically_drawn_ticks(
        &self,
        ticks: &[Tick<D>],
        max_width: f64,
        max_height: f64,
    ) -> ViewMeasuredSizes;

    /// Space needed by ticks drawn along a horizontal (top/bottom) axis.
    fn measure_horizontally_drawn_ticks(
        &self,
        ticks: &[Tick<D>],
        max_width: f64,
        max_height: f64,
    ) -> ViewMeasuredSizes;
}

/// Text-metric estimates without a font stack: label width is approximated
/// from character count and font size. Good enough for margin sizing and
/// collision checks in headless use; rendering layers substitute real
/// measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatingTickDrawStrategy {
    pub font_size_px: f64,
    /// Average glyph width as a fraction of the font size.
    pub char_width_ratio: f64,
    pub label_padding_px: f64,
    pub min_label_gap_px: f64,
}

impl Default for EstimatingTickDrawStrategy {
    fn default() -> Self {
        Self {
            font_size_px: 12.0,
            char_width_ratio: 0.6,
            label_padding_px: 4.0,
            min_label_gap_px: 2.0,
        }
    }
}

impl EstimatingTickDrawStrategy {
    fn label_width(&self, label: &str) -> f64 {
        label.chars().count() as f64 * self.font_size_px * self.char_width_ratio
    }
}

impl<D> TickDrawStrategy<D> for EstimatingTickDrawStrategy {
    fn decorate_ticks(&self, _ticks: &mut [Tick<D>]) {}

    fn collides(&self, ticks: &[Tick<D>], orientation: AxisOrientation) -> CollisionReport {
        if ticks.len() < 2 {
            return CollisionReport::clear();
        }

        let mut ordered: Vec<(usize, f64, f64)> = ticks
            .iter()
            .enumerate()
            .map(|(index, tick)| (index, tick.location, self.label_width(&tick.label)))
            .collect();
        ordered.sort_by(|left, right| left.1.total_cmp(&right.1));

        for pair in ordered.windows(2) {
            let (_, prev_location, prev_width) = pair[0];
            let (index, location, width) = pair[1];
            let gap = location - prev_location;
            let required = if orientation.is_vertical() {
                self.font_size_px + self.min_label_gap_px
            } else {
                (prev_width + width) / 2.0 + self.min_label_gap_px
            };
            if gap < required {
                return CollisionReport::colliding_at(index);
            }
        }

        CollisionReport::clear()
    }

    fn measure_vertically_drawn_ticks(
        &self,
        ticks: &[Tick<D>],
        max_width: f64,
        max_height: f64,
    ) -> ViewMeasuredSizes {
        let widest = ticks
            .iter()
            .map(|tick| self.label_width(&tick.label))
            .fold(0.0_f64, f64::max);
        let preferred_width = (widest + self.label_padding_px).min(max_width);
        ViewMeasuredSizes {
            preferred_width,
            preferred_height: max_height,
            min_width: preferred_width,
            min_height: 0.0,
        }
    }

    fn measure_horizontally_drawn_ticks(
        &self,
        ticks: &[Tick<D>],
        max_width: f64,
        max_height: f64,
    ) -> ViewMeasuredSizes {
        let preferred_height = if ticks.is_empty() {
            0.0
        } else {
            (self.font_size_px + self.label_padding_px).min(max_height)
        };
        ViewMeasuredSizes {
            preferred_width: max_width,
            preferred_height,
            min_width: 0.0,
            min_height: preferred_height,
        }
    }
}

/// Never collides and occupies no space; for headless tick generation and
/// tests that exercise provider logic without label metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoCollisionDrawStrategy;

impl<D> TickDrawStrategy<D> for NoCollisionDrawStrategy {
    fn decorate_ticks(&self, _ticks: &mut [Tick<D>]) {}

    fn collides(&self, _ticks: &[Tick<D>], _orientation: AxisOrientation) -> CollisionReport {
        CollisionReport::clear()
    }

    fn measure_vertically_drawn_ticks(
        &self,
        _ticks: &[Tick<D>],
        _max_width: f64,
        _max_height: f64,
    ) -> ViewMeasuredSizes {
        ViewMeasuredSizes::default()
    }

    fn measure_horizontally_drawn_ticks(
        &self,
        _ticks: &[Tick<D>],
        _max_width: f64,
        _max_height: f64,
    ) -> ViewMeasuredSizes {
        ViewMeasuredSizes::default()
    }
}

#[cfg(test)]
mod tests {
    use super::{EstimatingTickDrawStrategy, TickDrawStrategy};
    use crate::ticks::tick::{AxisOrientation, Tick};

    fn tick(value: f64, label: &str, location: f64) -> Tick<f64> {
        Tick {
            value,
            label: label.to_owned(),
            location,
            label_offset: 0.0,
        }
    }

    #[test]
    fn tight_horizontal_labels_collide() {
        let strategy = EstimatingTickDrawStrategy::default();
        let ticks = vec![tick(0.0, "1000", 0.0), tick(1.0, "2000", 20.0)];
        let report = strategy.collides(&ticks, AxisOrientation::Bottom);
        assert!(report.ticks_collide);
        assert_eq!(report.first_collision, Some(1));
    }

    #[test]
    fn spaced_labels_do_not_collide() {
        let strategy = EstimatingTickDrawStrategy::default();
        let ticks = vec![tick(0.0, "1000", 0.0), tick(1.0, "2000", 60.0)];
        assert!(
            !strategy
                .collides(&ticks, AxisOrientation::Bottom)
                .ticks_collide
        );
    }

    #[test]
    fn vertical_collision_uses_font_height() {
        let strategy = EstimatingTickDrawStrategy::default();
        let close = vec![tick(0.0, "a", 0.0), tick(1.0, "b", 10.0)];
        assert!(
            strategy
                .collides(&close, AxisOrientation::Left)
                .ticks_collide
        );

        let spaced = vec![tick(0.0, "a", 0.0), tick(1.0, "b", 20.0)];
        assert!(
            !strategy
                .collides(&spaced, AxisOrientation::Left)
                .ticks_collide
        );
    }
}
