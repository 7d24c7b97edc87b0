pub mod bucketing;
pub mod draw_strategy;
pub mod formatter;
pub mod numeric;
pub mod provider;
pub mod tick;

pub use bucketing::BucketingTickProvider;
pub use draw_strategy::{EstimatingTickDrawStrategy, NoCollisionDrawStrategy, TickDrawStrategy};
pub use formatter::{
    NumericTickFormatter, ThresholdTickFormatter, TickFormatter, TickLabelCache, TimeTickFormatter,
};
pub use numeric::NumericTickProvider;
pub use provider::{
    AutoAdjustingStaticTickProvider, EndPointsTickProvider, OrdinalTickProvider,
    StaticTickProvider, TickProvider, TickRequest, TickSpec,
};
pub use tick::{AxisOrientation, CollisionReport, Tick, TickHint};
