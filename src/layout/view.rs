use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The crate's single pixel-snapping point.
    ///
    /// Bounds handed to views are rounded to whole pixels here, and only
    /// here; scale math stays unrounded so round-trip guarantees hold.
    #[must_use]
    pub fn snapped(&self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
            width: self.width.round(),
            height: self.height.round(),
        }
    }
}

/// Where a view lives relative to the draw area.
///
/// `Full*` variants span the whole canvas on their cross axis instead of
/// stopping at the draw-area edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPosition {
    Left,
    FullLeft,
    Top,
    FullTop,
    Right,
    FullRight,
    Bottom,
    FullBottom,
    DrawArea,
}

impl LayoutPosition {
    #[must_use]
    pub fn is_full(self) -> bool {
        matches!(
            self,
            Self::FullLeft | Self::FullTop | Self::FullRight | Self::FullBottom
        )
    }
}

/// Default paint-order keys, lowest drawn first.
///
/// A table of named constants rather than ambient globals: every view
/// carries its own value in [`ViewLayoutConfig`], so ordering stays
/// overridable per chart instance.
pub mod paint_order {
    pub const GRID: i32 = 5;
    pub const AXIS: i32 = 10;
    pub const SERIES: i32 = 15;
    pub const ANNOTATION: i32 = 20;
    pub const LEGEND: i32 = 25;
    pub const TITLE: i32 = 30;
}

/// Default position-order keys; lower values sit closer to the draw area
/// and are shrunk last when margin space runs out.
pub mod position_order {
    pub const AXIS: i32 = 10;
    pub const LEGEND: i32 = 20;
    pub const TITLE: i32 = 30;
}

/// External margin around a view, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ViewMargin {
    #[must_use]
    pub fn uniform(margin: f64) -> Self {
        Self {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Placement and ordering parameters a view exposes to the layout manager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewLayoutConfig {
    pub paint_order: i32,
    pub position: LayoutPosition,
    pub position_order: i32,
    pub margin: ViewMargin,
}

impl ViewLayoutConfig {
    #[must_use]
    pub fn new(position: LayoutPosition) -> Self {
        Self {
            paint_order: paint_order::AXIS,
            position,
            position_order: position_order::AXIS,
            margin: ViewMargin::default(),
        }
    }

    #[must_use]
    pub fn with_paint_order(mut self, paint_order: i32) -> Self {
        self.paint_order = paint_order;
        self
    }

    #[must_use]
    pub fn with_position_order(mut self, position_order: i32) -> Self {
        self.position_order = position_order;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: ViewMargin) -> Self {
        self.margin = margin;
        self
    }
}

/// Sizes a view reports from its measure pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewMeasuredSizes {
    pub preferred_width: f64,
    pub preferred_height: f64,
    pub min_width: f64,
    pub min_height: f64,
}

/// A chart component occupying layout space: axis, legend, title, or the
/// draw area itself. Implemented by the chart composition layer; the layout
/// manager only measures and positions.
pub trait LayoutView {
    fn layout_config(&self) -> ViewLayoutConfig;

    /// Reports preferred and minimum sizes given the available budget.
    ///
    /// May be called several times per measure cycle with shrinking budgets;
    /// views re-evaluate (label wrapping, tick density) on every call.
    fn measure(&mut self, max_width: f64, max_height: f64) -> ViewMeasuredSizes;

    /// Receives final position. `bounds` is the view's own rectangle,
    /// `draw_area` the central data region, both in canvas coordinates.
    fn layout(&mut self, bounds: Bounds, draw_area: Bounds);
}
