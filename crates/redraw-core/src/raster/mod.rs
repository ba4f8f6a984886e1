pub mod brush;
pub mod composite;
pub mod surface;

pub use brush::{snap_brush_size, Tool};
pub use composite::CompositeOp;
pub use surface::RasterSurface;
