/// Placement, smoothing and interaction tuning constants.
///
/// These keep the behavioural numbers of the scene in one place so that both
/// the store and the frame loop agree on them.
// Smallest scale any item may be committed with
pub const MIN_SCALE: f32 = 0.1;

// Fixed placement for single uploads: 2 m in front of the viewer at eye level
pub const DEFAULT_PLACEMENT: [f32; 3] = [0.0, 1.5, -2.0];

// Per-frame blend factors, defined against a 60 Hz reference frame
pub const POSITION_LERP: f32 = 0.15;
pub const SCALE_LERP: f32 = 0.1;
pub const REFERENCE_FRAME_HZ: f32 = 60.0;
pub const MAX_FRAME_DT_SEC: f32 = 0.25; // tab switches etc. must not teleport items

// Selected items ease toward a slightly larger scale
pub const SELECTED_SCALE_PULSE: f32 = 1.05;

// Control panel steps (metres / scale units)
pub const MOVE_STEP_XY: f32 = 0.1;
pub const MOVE_STEP_Z: f32 = 0.2;
pub const SCALE_STEP: f32 = 0.1;

// Ring layout defaults
pub const RING_RADIUS: f32 = 4.0;
pub const RING_GAP: f32 = 1.524;
pub const RING_ITEM_WIDTH: f32 = 0.8;
pub const RING_HEIGHT_STEP: f32 = 1.0;
pub const RING_BASE_HEIGHT: f32 = 1.5;

// Background cutout heuristic
pub const CUTOUT_BRIGHT_LEVEL: u8 = 235;
pub const CUTOUT_DISTANCE: f32 = 45.0;

// Orbit camera
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_EYE: [f32; 3] = [0.0, 1.6, 3.0]; // average eye height
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = 30.0;

// Generated item ids
pub const ITEM_ID_LEN: usize = 9;
