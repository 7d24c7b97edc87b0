pub mod manager;
pub mod margin;
pub mod view;

pub use manager::{LayoutManager, LayoutSnapshot, MIN_DRAW_AREA_PX, Margins, ViewId};
pub use margin::{DesiredViewSizes, LayoutConfig, MarginSpec, SizeList};
pub use view::{
    Bounds, LayoutPosition, LayoutView, ViewLayoutConfig, ViewMargin, ViewMeasuredSizes,
    paint_order, position_order,
};
