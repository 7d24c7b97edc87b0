use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::{AxisError, AxisResult};
use crate::layout::margin::{
    DesiredViewSizes, HorizontalMarginStrategy, LayoutConfig, SizeList, VerticalMarginStrategy,
};
use crate::layout::view::{Bounds, LayoutPosition, LayoutView};

/// Floor for the central draw area, per dimension.
///
/// When the canvas is smaller than the measured margins plus this floor,
/// margins silently overlap the draw area instead of erroring.
pub const MIN_DRAW_AREA_PX: f64 = 20.0;

/// Handle to a view registered with a [`LayoutManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

/// Accumulated margin totals for the four sides.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Serializable diagnostics for one measure cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub draw_area: Bounds,
    pub passes_used: u8,
}

impl LayoutSnapshot {
    pub fn to_json(&self) -> AxisResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| AxisError::InvalidData(format!("snapshot serialization failed: {err}")))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

fn side_of(position: LayoutPosition) -> Option<Side> {
    match position {
        LayoutPosition::Left | LayoutPosition::FullLeft => Some(Side::Left),
        LayoutPosition::Right | LayoutPosition::FullRight => Some(Side::Right),
        LayoutPosition::Top | LayoutPosition::FullTop => Some(Side::Top),
        LayoutPosition::Bottom | LayoutPosition::FullBottom => Some(Side::Bottom),
        LayoutPosition::DrawArea => None,
    }
}

struct ViewEntry {
    id: ViewId,
    view: Box<dyn LayoutView>,
}

struct Measured {
    width: f64,
    height: f64,
    margins: Margins,
    left: SizeList,
    right: SizeList,
    top: SizeList,
    bottom: SizeList,
    passes_used: u8,
}

struct SideLists {
    left: SizeList,
    right: SizeList,
    top: SizeList,
    bottom: SizeList,
}

/// Distributes canvas space among margin views and the central draw area.
///
/// The manager persists across draw cycles; sorted view lists and the draw
/// area are cached behind dirty flags and recomputed on demand. Measurement
/// runs up to three bounded passes (see [`LayoutManager::measure`]) because
/// views may report different preferred sizes once given concrete budgets.
pub struct LayoutManager {
    config: LayoutConfig,
    views: Vec<ViewEntry>,
    next_view_id: u64,
    paint_order_cache: Vec<usize>,
    position_order_cache: Vec<usize>,
    views_need_paint_sort: bool,
    views_need_position_sort: bool,
    draw_area_bounds: Bounds,
    draw_area_bounds_outdated: bool,
    measured: Option<Measured>,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutManager {
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            views: Vec::new(),
            next_view_id: 0,
            paint_order_cache: Vec::new(),
            position_order_cache: Vec::new(),
            views_need_paint_sort: true,
            views_need_position_sort: true,
            draw_area_bounds: Bounds::default(),
            draw_area_bounds_outdated: true,
            measured: None,
        }
    }

    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
        self.draw_area_bounds_outdated = true;
    }

    #[must_use]
    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    pub fn add_view(&mut self, view: Box<dyn LayoutView>) -> ViewId {
        let id = ViewId(self.next_view_id);
        self.next_view_id += 1;
        self.views.push(ViewEntry { id, view });
        self.invalidate();
        id
    }

    pub fn remove_view(&mut self, id: ViewId) -> Option<Box<dyn LayoutView>> {
        let index = self.views.iter().position(|entry| entry.id == id)?;
        let entry = self.views.remove(index);
        self.invalidate();
        Some(entry.view)
    }

    #[must_use]
    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut (dyn LayoutView + '_)> {
        self.views
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| entry.view.as_mut() as &mut (dyn LayoutView + '_))
    }

    #[must_use]
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Flags every cached derived value stale; the next measure/layout call
    /// recomputes from scratch.
    pub fn invalidate(&mut self) {
        self.draw_area_bounds_outdated = true;
        self.views_need_paint_sort = true;
        self.views_need_position_sort = true;
    }

    #[must_use]
    pub fn draw_area_bounds(&self) -> Bounds {
        self.draw_area_bounds
    }

    #[must_use]
    pub fn is_draw_area_bounds_outdated(&self) -> bool {
        self.draw_area_bounds_outdated
    }

    #[must_use]
    pub fn margins(&self) -> Margins {
        self.measured
            .as_ref()
            .map(|measured| measured.margins)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<LayoutSnapshot> {
        self.measured.as_ref().map(|measured| LayoutSnapshot {
            width: measured.width,
            height: measured.height,
            margins: measured.margins,
            draw_area: self.draw_area_bounds,
            passes_used: measured.passes_used,
        })
    }

    /// Views in ascending paint order (stable for equal keys).
    pub fn paint_ordered_views(&mut self) -> Vec<&dyn LayoutView> {
        if self.views_need_paint_sort {
            self.paint_order_cache = sorted_indices(&self.views, |config| config.paint_order);
            self.views_need_paint_sort = false;
        }
        self.paint_order_cache
            .iter()
            .map(|&index| self.views[index].view.as_ref())
            .collect()
    }

    /// Views in ascending position order (stable for equal keys).
    pub fn position_ordered_views(&mut self) -> Vec<&dyn LayoutView> {
        if self.views_need_position_sort {
            self.position_order_cache = sorted_indices(&self.views, |config| config.position_order);
            self.views_need_position_sort = false;
        }
        self.position_order_cache
            .iter()
            .map(|&index| self.views[index].view.as_ref())
            .collect()
    }

    /// Measures margin views and resolves the draw area.
    ///
    /// Three bounded passes approximate a fixed point:
    /// 1. each side measured against its configured maximum allotment;
    /// 2. re-measured with pass-1 totals as the new maxima (cross-axis
    ///    budgets now subtract the opposing sides);
    /// 3. only if any side total changed, once more with pass-2 totals fixed.
    ///
    /// Views that adapt to their budget (label wrap, tick density) settle
    /// within these passes in practice; the cap is a deliberate bounded-cost
    /// approximation, not a guaranteed fixed point.
    pub fn measure(&mut self, width: f64, height: f64) -> AxisResult<()> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(AxisError::InvalidLayoutSize { width, height });
        }

        let caps = Margins {
            left: self.config.left.max_pixels(width),
            right: self.config.right.max_pixels(width),
            top: self.config.top.max_pixels(height),
            bottom: self.config.bottom.max_pixels(height),
        };

        let (totals_1, _) = self.measure_pass(width, height, caps, Margins::default(), true);
        trace!(?totals_1, "layout measure pass 1");

        let (totals_2, lists_2) = self.measure_pass(width, height, totals_1, totals_1, true);
        trace!(?totals_2, "layout measure pass 2");

        let (mut totals, lists, passes_used) = if totals_2 == totals_1 {
            (totals_2, lists_2, 2)
        } else {
            debug!("margin totals changed between passes; running convergence pass");
            let (totals_3, lists_3) = self.measure_pass(width, height, totals_2, totals_2, false);
            trace!(?totals_3, "layout measure pass 3");
            (totals_3, lists_3, 3)
        };

        totals.left = totals.left.max(self.config.left.min_pixels(width));
        totals.right = totals.right.max(self.config.right.min_pixels(width));
        totals.top = totals.top.max(self.config.top.min_pixels(height));
        totals.bottom = totals.bottom.max(self.config.bottom.min_pixels(height));

        let mut draw_width = width - totals.left - totals.right;
        let mut draw_height = height - totals.top - totals.bottom;
        if draw_width < MIN_DRAW_AREA_PX || draw_height < MIN_DRAW_AREA_PX {
            warn!(
                draw_width,
                draw_height, "draw area below minimum; margins will overlap"
            );
            draw_width = draw_width.max(MIN_DRAW_AREA_PX);
            draw_height = draw_height.max(MIN_DRAW_AREA_PX);
        }

        self.draw_area_bounds = Bounds::new(totals.left, totals.top, draw_width, draw_height);
        self.measured = Some(Measured {
            width,
            height,
            margins: totals,
            left: lists.left,
            right: lists.right,
            top: lists.top,
            bottom: lists.bottom,
            passes_used,
        });
        self.draw_area_bounds_outdated = false;
        Ok(())
    }

    /// Positions every view from the draw-area edges outward.
    ///
    /// Re-measures first when bounds are stale. Each view receives its final
    /// rectangle via `LayoutView::layout`; `DrawArea` views get the draw
    /// area for both arguments.
    pub fn layout(&mut self, width: f64, height: f64) -> AxisResult<()> {
        let stale = self.draw_area_bounds_outdated
            || self
                .measured
                .as_ref()
                .is_none_or(|measured| measured.width != width || measured.height != height);
        if stale {
            self.measure(width, height)?;
        }

        let (left_sizes, right_sizes, top_sizes, bottom_sizes) = {
            let measured = self.measured.as_ref().expect("measure ran above");
            (
                measured.left.clone(),
                measured.right.clone(),
                measured.top.clone(),
                measured.bottom.clone(),
            )
        };
        let draw_area = self.draw_area_bounds.snapped();
        let full_bounds = Bounds::new(0.0, 0.0, width, height);

        let mut views = collect_side(&mut self.views, Side::Left);
        VerticalMarginStrategy::layout_left(&mut views, &left_sizes, draw_area, full_bounds);
        let mut views = collect_side(&mut self.views, Side::Right);
        VerticalMarginStrategy::layout_right(&mut views, &right_sizes, draw_area, full_bounds);
        let mut views = collect_side(&mut self.views, Side::Top);
        HorizontalMarginStrategy::layout_top(&mut views, &top_sizes, draw_area, full_bounds);
        let mut views = collect_side(&mut self.views, Side::Bottom);
        HorizontalMarginStrategy::layout_bottom(&mut views, &bottom_sizes, draw_area, full_bounds);

        for entry in &mut self.views {
            if entry.view.layout_config().position == LayoutPosition::DrawArea {
                entry.view.layout(draw_area, draw_area);
            }
        }

        Ok(())
    }

    fn measure_pass(
        &mut self,
        width: f64,
        height: f64,
        caps: Margins,
        cross: Margins,
        use_max: bool,
    ) -> (Margins, SideLists) {
        let side_height = (height - cross.top - cross.bottom).max(0.0);
        let side_width = (width - cross.left - cross.right).max(0.0);

        let left = Self::measure_vertical(
            &mut self.views,
            Side::Left,
            caps.left,
            side_height,
            height,
            use_max,
        );
        let right = Self::measure_vertical(
            &mut self.views,
            Side::Right,
            caps.right,
            side_height,
            height,
            use_max,
        );
        let top = Self::measure_horizontal(
            &mut self.views,
            Side::Top,
            caps.top,
            side_width,
            width,
            use_max,
        );
        let bottom = Self::measure_horizontal(
            &mut self.views,
            Side::Bottom,
            caps.bottom,
            side_width,
            width,
            use_max,
        );

        let totals = Margins {
            left: left.preferred.total(),
            right: right.preferred.total(),
            top: top.preferred.total(),
            bottom: bottom.preferred.total(),
        };
        let lists = SideLists {
            left: left.preferred,
            right: right.preferred,
            top: top.preferred,
            bottom: bottom.preferred,
        };
        (totals, lists)
    }

    fn measure_vertical(
        entries: &mut [ViewEntry],
        side: Side,
        cap: f64,
        height: f64,
        full_height: f64,
        use_max: bool,
    ) -> DesiredViewSizes {
        let mut views = collect_side(entries, side);
        let mut sizes = VerticalMarginStrategy::measure(&mut views, cap, height, full_height, use_max);
        sizes.adjusted_to(cap);
        sizes
    }

    fn measure_horizontal(
        entries: &mut [ViewEntry],
        side: Side,
        cap: f64,
        width: f64,
        full_width: f64,
        use_max: bool,
    ) -> DesiredViewSizes {
        let mut views = collect_side(entries, side);
        let mut sizes =
            HorizontalMarginStrategy::measure(&mut views, cap, width, full_width, use_max);
        sizes.adjusted_to(cap);
        sizes
    }
}

fn sorted_indices(
    views: &[ViewEntry],
    key: impl Fn(crate::layout::view::ViewLayoutConfig) -> i32,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..views.len()).collect();
    indices.sort_by_key(|&index| key(views[index].view.layout_config()));
    indices
}

fn collect_side(entries: &mut [ViewEntry], side: Side) -> Vec<&mut (dyn LayoutView + '_)> {
    let mut selected: Vec<(i32, &mut (dyn LayoutView + '_))> = entries
        .iter_mut()
        .filter_map(|entry| {
            let config = entry.view.layout_config();
            if side_of(config.position) == Some(side) {
                Some((config.position_order, entry.view.as_mut() as &mut (dyn LayoutView + '_)))
            } else {
                None
            }
        })
        .collect();
    selected.sort_by_key(|(order, _)| *order);
    selected.into_iter().map(|(_, view)| view).collect()
}
