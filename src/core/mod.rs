pub mod config;
pub mod extent;
pub mod linear;
pub mod ordinal;
pub mod time;
pub mod transform;

pub use config::{RangeBandConfig, StepSizeConfig, ViewportSettings};
pub use extent::{Extent, ScaleOutputExtent};
pub use linear::LinearScale;
pub use ordinal::OrdinalScale;
pub use time::TemporalScale;
pub use transform::{LinearDomainInfo, ScaleTransform};
