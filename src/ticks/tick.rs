use serde::{Deserialize, Serialize};

/// Which side of the draw area an axis is rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    Top,
    Right,
    Bottom,
    Left,
}

impl AxisOrientation {
    /// Vertical axes stack their tick labels along the y direction.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// One labeled reference mark on an axis.
///
/// Built per draw cycle by a tick provider and immutable once the draw
/// strategy has decorated it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick<D> {
    pub value: D,
    pub label: String,
    /// Pixel position along the axis.
    pub location: f64,
    /// Pixel shift applied to the label relative to `location`.
    pub label_offset: f64,
}

/// Tick count and domain window carried over from a previous draw cycle so
/// panning keeps a stable tick cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickHint<D> {
    pub start: D,
    pub end: D,
    pub tick_count: usize,
}

/// Outcome of a collision check over one candidate tick set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    pub ticks_collide: bool,
    /// Index of the first tick that collides with its predecessor, in
    /// ascending-location order.
    pub first_collision: Option<usize>,
}

impl CollisionReport {
    #[must_use]
    pub fn clear() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn colliding_at(index: usize) -> Self {
        Self {
            ticks_collide: true,
            first_collision: Some(index),
        }
    }
}
