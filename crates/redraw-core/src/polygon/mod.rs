pub mod editor;
pub mod fill;

pub use editor::{ClickOutcome, Polygon, PolygonCompletion, PolygonEditor, PolygonSnapshot, PolygonState};
pub use fill::fill_polygon;
