//! axiskit: scale, tick, and layout engine for desktop charting front ends.
//!
//! The crate covers the numeric core a chart needs before anything is drawn:
//! domain-to-pixel scales (linear, ordinal, temporal) with viewport
//! pan/zoom, tick providers with collision-aware retry and threshold
//! bucketing, and a multi-pass layout manager that allocates margin space
//! among axes, legends, and titles. Rendering, gestures, and animation stay
//! in the embedding toolkit; it talks to this crate through the
//! [`ticks::TickDrawStrategy`] and [`layout::LayoutView`] contracts and gets
//! pixel positions and bounds back.
//!
//! Everything is single-threaded and synchronous: each draw cycle rebuilds
//! scales and ticks from scratch, so a superseded cycle is simply discarded.

pub mod core;
pub mod error;
pub mod layout;
pub mod telemetry;
pub mod ticks;

pub use self::core::{
    Extent, LinearScale, OrdinalScale, RangeBandConfig, ScaleOutputExtent, StepSizeConfig,
    TemporalScale, ViewportSettings,
};
pub use error::{AxisError, AxisResult};
pub use layout::{LayoutConfig, LayoutManager, LayoutView, MarginSpec};
pub use ticks::{
    AxisOrientation, BucketingTickProvider, NumericTickProvider, Tick, TickProvider, TickRequest,
};
