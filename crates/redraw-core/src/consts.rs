/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Small epsilon for floating-point comparisons in coordinate math.
pub const EPSILON: f32 = 1e-6;

/// Radius (image pixels) around a polygon's first vertex that closes it.
pub const POLYGON_CLOSE_RADIUS: f32 = 10.0;

/// Minimum vertex count a polygon needs before it can be closed or filled.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Smallest selectable brush diameter in pixels.
pub const MIN_BRUSH_SIZE: u32 = 5;

/// Largest selectable brush diameter in pixels.
pub const MAX_BRUSH_SIZE: u32 = 100;

/// Brush diameters snap to multiples of this step.
pub const BRUSH_SIZE_STEP: u32 = 5;

/// Brush diameter used when an editor is created.
pub const DEFAULT_BRUSH_SIZE: u32 = 20;

/// Snapshots each editor modality keeps for undo unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Per-stamp alpha of the brush (a half-opaque fill, 0.5 * 255 rounded up).
pub const BRUSH_ALPHA: u8 = 128;

/// Interpolated stamps along a fast stroke are spaced at most
/// `radius * STAMP_SPACING_FACTOR` apart.
pub const STAMP_SPACING_FACTOR: f32 = 0.5;

/// Lower bound of the viewport zoom factor.
pub const MIN_ZOOM: f32 = 0.1;

/// Upper bound of the viewport zoom factor.
pub const MAX_ZOOM: f32 = 10.0;

/// Relative zoom change of one zoom-in / zoom-out step.
pub const ZOOM_STEP: f32 = 0.1;

/// Mask pixel for regions the model should repaint (opaque black).
pub const EDIT_PIXEL: [u8; 4] = [0, 0, 0, 255];

/// Mask pixel for regions the model should keep (opaque white).
pub const PRESERVE_PIXEL: [u8; 4] = [255, 255, 255, 255];

/// Default Gemini-compatible API root.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Overlay colours used when previewing polygon edits.
pub const OVERLAY_STROKE: [u8; 4] = [168, 85, 247, 255];
pub const OVERLAY_FILL: [u8; 4] = [168, 85, 247, 51];
pub const OVERLAY_FIRST_VERTEX: [u8; 4] = [16, 185, 129, 255];

/// Radius of the vertex markers drawn on the polygon overlay.
pub const OVERLAY_MARKER_RADIUS: f32 = 5.0;

/// Width of polygon outlines drawn on the overlay.
pub const OVERLAY_LINE_WIDTH: f32 = 2.0;

/// Overlay tint for raster coverage previews (semi-transparent red).
pub const OVERLAY_COVERAGE: [u8; 3] = [255, 0, 0];
