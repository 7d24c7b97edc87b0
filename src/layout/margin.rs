use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{AxisError, AxisResult};
use crate::layout::view::{Bounds, LayoutView};

/// Space budget for one margin side, in pixels or as a fraction of the
/// canvas dimension. Pixel and percent bounds are mutually exclusive;
/// unset bounds mean 0 (min) and the whole dimension (max).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarginSpec {
    min_pixel: Option<f64>,
    max_pixel: Option<f64>,
    min_percent: Option<f64>,
    max_percent: Option<f64>,
}

impl MarginSpec {
    pub fn from_pixel(min_pixel: Option<f64>, max_pixel: Option<f64>) -> AxisResult<Self> {
        validate_bound_pair(min_pixel, max_pixel, f64::INFINITY, "pixel")?;
        Ok(Self {
            min_pixel,
            max_pixel,
            min_percent: None,
            max_percent: None,
        })
    }

    /// Fractions of the canvas dimension, within `[0, 1]`.
    pub fn from_percent(min_percent: Option<f64>, max_percent: Option<f64>) -> AxisResult<Self> {
        validate_bound_pair(min_percent, max_percent, 1.0, "percent")?;
        Ok(Self {
            min_pixel: None,
            max_pixel: None,
            min_percent,
            max_percent,
        })
    }

    pub fn fixed_pixel(pixels: f64) -> AxisResult<Self> {
        Self::from_pixel(Some(pixels), Some(pixels))
    }

    #[must_use]
    pub fn max_pixels(&self, total: f64) -> f64 {
        if let Some(max) = self.max_pixel {
            max.min(total)
        } else if let Some(max) = self.max_percent {
            total * max
        } else {
            total
        }
    }

    #[must_use]
    pub fn min_pixels(&self, total: f64) -> f64 {
        if let Some(min) = self.min_pixel {
            min.min(total)
        } else if let Some(min) = self.min_percent {
            total * min
        } else {
            0.0
        }
    }
}

fn validate_bound_pair(
    min: Option<f64>,
    max: Option<f64>,
    upper: f64,
    kind: &str,
) -> AxisResult<()> {
    for value in [min, max].into_iter().flatten() {
        if !value.is_finite() || value < 0.0 || value > upper {
            return Err(AxisError::InvalidData(format!(
                "margin {kind} bounds must be finite, >= 0, and <= {upper}"
            )));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(AxisError::InvalidData(format!(
                "margin {kind} min must be <= max"
            )));
        }
    }
    Ok(())
}

/// Margin budgets for all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub left: MarginSpec,
    pub right: MarginSpec,
    pub top: MarginSpec,
    pub bottom: MarginSpec,
}

/// Ordered per-view sizes plus a running total for one margin side.
///
/// Additive during a single measure pass and rebuilt each pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SizeList {
    sizes: SmallVec<[f64; 4]>,
    total: f64,
}

impl SizeList {
    pub fn add(&mut self, size: f64) {
        self.sizes.push(size);
        self.total += size;
    }

    pub fn adjust(&mut self, index: usize, delta: f64) {
        self.sizes[index] += delta;
        self.total += delta;
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> f64 {
        self.sizes[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.sizes.iter().copied()
    }
}

/// Preferred and minimum sizes for one side's views, in position order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesiredViewSizes {
    pub preferred: SizeList,
    pub minimum: SizeList,
}

impl DesiredViewSizes {
    pub fn add(&mut self, preferred: f64, minimum: f64) {
        self.preferred.add(preferred);
        self.minimum.add(minimum.min(preferred));
    }

    /// Shrinks views toward their minimums until the total fits `max_size`.
    ///
    /// Walks last-to-first, so views added later (further from the draw
    /// area) give up space before views closest to the data. If every view
    /// is already at its minimum the total may still exceed `max_size`; the
    /// caller's draw-area floor absorbs that.
    pub fn adjusted_to(&mut self, max_size: f64) {
        let mut excess = self.preferred.total() - max_size;
        if excess <= 0.0 {
            return;
        }

        for index in (0..self.preferred.len()).rev() {
            let available = self.preferred.get(index) - self.minimum.get(index);
            if available <= 0.0 {
                continue;
            }
            if available < excess {
                self.preferred.adjust(index, -available);
                excess -= available;
            } else {
                self.preferred.adjust(index, -excess);
                return;
            }
        }
    }
}

/// Greedy measure and edge-outward layout for left/right margins.
///
/// Measurement walks views in position order, hands each the remaining
/// width budget minus its external margin, and subtracts what it claims.
pub(crate) struct VerticalMarginStrategy;

impl VerticalMarginStrategy {
    pub(crate) fn measure(
        views: &mut [&mut dyn LayoutView],
        max_width: f64,
        height: f64,
        full_height: f64,
        use_max: bool,
    ) -> DesiredViewSizes {
        let mut sizes = DesiredViewSizes::default();
        let mut remaining = max_width;
        for view in views.iter_mut() {
            let config = view.layout_config();
            let budget = if use_max { remaining } else { max_width };
            let available_width = (budget - config.margin.width()).max(0.0);
            let span_height = if config.position.is_full() {
                full_height
            } else {
                height
            };
            let available_height = (span_height - config.margin.height()).max(0.0);
            let measured = view.measure(available_width, available_height);
            let outer = measured.preferred_width + config.margin.width();
            remaining -= outer;
            sizes.add(outer, measured.min_width + config.margin.width());
        }
        sizes
    }

    pub(crate) fn layout_left(
        views: &mut [&mut dyn LayoutView],
        sizes: &SizeList,
        draw_area: Bounds,
        full_bounds: Bounds,
    ) {
        let mut cursor = draw_area.x;
        for (view, outer) in views.iter_mut().zip(sizes.iter()) {
            let config = view.layout_config();
            let content_width = (outer - config.margin.width()).max(0.0);
            let x = cursor - config.margin.right - content_width;
            let (y, height) = vertical_span(config.position.is_full(), draw_area, full_bounds);
            view.layout(
                Bounds::new(x, y, content_width, height).snapped(),
                draw_area,
            );
            cursor = x - config.margin.left;
        }
    }

    pub(crate) fn layout_right(
        views: &mut [&mut dyn LayoutView],
        sizes: &SizeList,
        draw_area: Bounds,
        full_bounds: Bounds,
    ) {
        let mut cursor = draw_area.right();
        for (view, outer) in views.iter_mut().zip(sizes.iter()) {
            let config = view.layout_config();
            let content_width = (outer - config.margin.width()).max(0.0);
            let x = cursor + config.margin.left;
            let (y, height) = vertical_span(config.position.is_full(), draw_area, full_bounds);
            view.layout(
                Bounds::new(x, y, content_width, height).snapped(),
                draw_area,
            );
            cursor = x + content_width + config.margin.right;
        }
    }
}

/// Greedy measure and edge-outward layout for top/bottom margins.
pub(crate) struct HorizontalMarginStrategy;

impl HorizontalMarginStrategy {
    pub(crate) fn measure(
        views: &mut [&mut dyn LayoutView],
        max_height: f64,
        width: f64,
        full_width: f64,
        use_max: bool,
    ) -> DesiredViewSizes {
        let mut sizes = DesiredViewSizes::default();
        let mut remaining = max_height;
        for view in views.iter_mut() {
            let config = view.layout_config();
            let budget = if use_max { remaining } else { max_height };
            let available_height = (budget - config.margin.height()).max(0.0);
            let span_width = if config.position.is_full() {
                full_width
            } else {
                width
            };
            let available_width = (span_width - config.margin.width()).max(0.0);
            let measured = view.measure(available_width, available_height);
            let outer = measured.preferred_height + config.margin.height();
            remaining -= outer;
            sizes.add(outer, measured.min_height + config.margin.height());
        }
        sizes
    }

    pub(crate) fn layout_top(
        views: &mut [&mut dyn LayoutView],
        sizes: &SizeList,
        draw_area: Bounds,
        full_bounds: Bounds,
    ) {
        let mut cursor = draw_area.y;
        for (view, outer) in views.iter_mut().zip(sizes.iter()) {
            let config = view.layout_config();
            let content_height = (outer - config.margin.height()).max(0.0);
            let y = cursor - config.margin.bottom - content_height;
            let (x, width) = horizontal_span(config.position.is_full(), draw_area, full_bounds);
            view.layout(
                Bounds::new(x, y, width, content_height).snapped(),
                draw_area,
            );
            cursor = y - config.margin.top;
        }
    }

    pub(crate) fn layout_bottom(
        views: &mut [&mut dyn LayoutView],
        sizes: &SizeList,
        draw_area: Bounds,
        full_bounds: Bounds,
    ) {
        let mut cursor = draw_area.bottom();
        for (view, outer) in views.iter_mut().zip(sizes.iter()) {
            let config = view.layout_config();
            let content_height = (outer - config.margin.height()).max(0.0);
            let y = cursor + config.margin.top;
            let (x, width) = horizontal_span(config.position.is_full(), draw_area, full_bounds);
            view.layout(
                Bounds::new(x, y, width, content_height).snapped(),
                draw_area,
            );
            cursor = y + content_height + config.margin.bottom;
        }
    }
}

fn vertical_span(is_full: bool, draw_area: Bounds, full_bounds: Bounds) -> (f64, f64) {
    if is_full {
        (full_bounds.y, full_bounds.height)
    } else {
        (draw_area.y, draw_area.height)
    }
}

fn horizontal_span(is_full: bool, draw_area: Bounds, full_bounds: Bounds) -> (f64, f64) {
    if is_full {
        (full_bounds.x, full_bounds.width)
    } else {
        (draw_area.x, draw_area.width)
    }
}

#[cfg(test)]
mod tests {
    use super::{DesiredViewSizes, MarginSpec};

    #[test]
    fn percent_spec_scales_with_the_dimension() {
        let spec = MarginSpec::from_percent(Some(0.1), Some(0.5)).expect("valid spec");
        assert_eq!(spec.max_pixels(400.0), 200.0);
        assert_eq!(spec.min_pixels(400.0), 40.0);
    }

    #[test]
    fn pixel_spec_caps_at_the_dimension() {
        let spec = MarginSpec::from_pixel(None, Some(600.0)).expect("valid spec");
        assert_eq!(spec.max_pixels(400.0), 400.0);
    }

    #[test]
    fn shrink_starts_with_the_last_view() {
        let mut sizes = DesiredViewSizes::default();
        sizes.add(50.0, 20.0);
        sizes.add(40.0, 10.0);
        sizes.adjusted_to(70.0);

        // 20px over budget: the later view gives up all of it.
        assert_eq!(sizes.preferred.get(0), 50.0);
        assert_eq!(sizes.preferred.get(1), 20.0);
        assert_eq!(sizes.preferred.total(), 70.0);
    }

    #[test]
    fn shrink_cascades_once_a_view_hits_its_minimum() {
        let mut sizes = DesiredViewSizes::default();
        sizes.add(50.0, 20.0);
        sizes.add(40.0, 30.0);
        sizes.adjusted_to(60.0);

        assert_eq!(sizes.preferred.get(1), 30.0);
        assert_eq!(sizes.preferred.get(0), 30.0);
        assert_eq!(sizes.preferred.total(), 60.0);
    }
}
