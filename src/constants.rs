//! Shared application-wide constants.
//! Centralizes tweakable values used across UI rendering and interactions.

// Node dimensions
/// Default node width in world units.
pub const NODE_WIDTH: f32 = 140.0;
/// Default node height in world units.
pub const NODE_HEIGHT: f32 = 60.0;
/// Corner radius for node rectangles (in screen pixels at zoom 1.0).
pub const NODE_CORNER_RADIUS: f32 = 8.0;

// Node defaults
/// Fill color given to nodes dropped from the palette.
pub const DEFAULT_NODE_COLOR: &str = "#E5E7EB";

// Grid/drawing
/// Grid cell size in world units, used for snapping.
pub const GRID_SIZE: f32 = 20.0;
/// Spacing between background grid dots (in world units).
pub const DOT_SPACING: f32 = 12.0;
/// Radius of background grid dots (in screen pixels).
pub const DOT_RADIUS: f32 = 1.0;

// Edges
/// Stroke width of edges in screen pixels at zoom 1.0.
pub const EDGE_WIDTH: f32 = 2.0;
/// Number of line segments used to flatten an edge's bezier curve.
pub const EDGE_SEGMENTS: usize = 24;

// Canvas interactions
/// Click threshold in world units used for distinguishing click vs drag and for edge hit-testing.
pub const CLICK_THRESHOLD: f32 = 10.0;
/// Minimum zoom factor.
pub const MIN_ZOOM: f32 = 0.25;
/// Maximum zoom factor.
pub const MAX_ZOOM: f32 = 5.0;
/// Fraction of the content size added on each side when fitting the view.
pub const FIT_VIEW_PADDING: f32 = 0.2;
