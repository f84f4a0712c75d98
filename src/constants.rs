// Shared visual and interaction constants used by the web frontend.

// Selection styling
pub const HIGHLIGHT_RGB: [f32; 3] = [0.231, 0.510, 0.965]; // #3b82f6
pub const HIGHLIGHT_ALPHA: f32 = 0.4;
pub const HIGHLIGHT_SCALE: f32 = 1.08; // border plane size relative to the item
pub const HIGHLIGHT_DEPTH_OFFSET: f32 = -0.01; // sits just behind the item
pub const SELECTED_EMISSIVE: f32 = 0.2;

// Floor grid
pub const GRID_SIZE: f32 = 20.0;

// Pointer handling
pub const CLICK_DRAG_THRESHOLD_PX: f32 = 6.0; // further than this is an orbit drag
pub const ORBIT_RADIANS_PER_PX: f32 = 0.005; // total turn per pixel once damping settles
pub const WHEEL_ZOOM_PER_PIXEL: f32 = 0.0005; // log-distance units

// Description requests
pub const DESCRIBE_MAX_EDGE: u32 = 768; // long edge of the JPEG sent for description
pub const DESCRIBE_JPEG_QUALITY: u8 = 80;

// DOM ids
pub const CANVAS_ID: &str = "app-canvas";
pub const PASSTHROUGH_ID: &str = "passthrough";
pub const ITEM_LIST_ID: &str = "item-list";
pub const SELECTED_PANEL_ID: &str = "selected-panel";
pub const IDLE_HINT_ID: &str = "idle-hint";
