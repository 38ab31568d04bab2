use std::f32::consts::FRAC_PI_2;

/// Frames whose wall-clock delta reaches this many seconds do not step physics.
///
/// A long stutter freezes the coin for one frame instead of feeding the solver
/// an oversized step.
pub const MAX_FRAME_DELTA_SECS: f64 = 0.1;

/// Solver iterations requested for the coin on top of Rapier's defaults.
pub const COIN_EXTRA_SOLVER_ITERATIONS: usize = 6;

/// Coin radius in meters.
pub const COIN_RADIUS: f32 = 0.5;

/// Coin thickness in meters.
pub const COIN_THICKNESS: f32 = 0.08;

/// Coin mass per unit of the density setting (kg).
pub const COIN_MASS_PER_DENSITY: f32 = 0.1;

pub const COIN_ANGULAR_DAMPING: f32 = 0.1;

pub const COIN_FRICTION: f32 = 0.3;

/// Where a freshly created coin appears (meters).
pub const COIN_SPAWN_HEIGHT: f32 = 2.0;

/// Thickness of every box wall (meters).
pub const WALL_THICKNESS: f32 = 0.5;

/// Half thickness of the collision ground slab (meters).
pub const GROUND_HALF_THICKNESS: f32 = 0.1;

/// Curvature setting to paraboloid radius factor: `r = curvature * GROUND_RADIUS_SCALE`.
pub const GROUND_RADIUS_SCALE: f32 = 0.04;

/// Number of quads along each side of the visual ground grid.
pub const GROUND_SUBDIVISIONS: u32 = 32;

/// Vertical impulse range of a flip (N·s).
pub const UP_IMPULSE_MIN: f32 = 4.0;
pub const UP_IMPULSE_MAX: f32 = 7.0;

/// Horizontal impulse is drawn from `[-HORIZONTAL_IMPULSE_SPREAD, HORIZONTAL_IMPULSE_SPREAD]`.
pub const HORIZONTAL_IMPULSE_SPREAD: f32 = 2.0;

/// Each spin axis is drawn from `[-SPIN_SPREAD, SPIN_SPREAD]` (rad/s).
pub const SPIN_SPREAD: f32 = 10.0;

/// `|dot(coin_up, world_up)|` above which a face counts as showing.
pub const FACE_UP_THRESHOLD: f32 = 0.7;

/// Distance from the origin of the orbit camera at zoom 1 (meters).
pub const CAMERA_ORBIT_RADIUS: f32 = 8.0;

/// Height added to the orbit camera target (meters).
pub const CAMERA_HEIGHT_OFFSET: f32 = 2.0;

/// Fraction of the remaining distance the camera covers each frame.
pub const CAMERA_FOLLOW_FACTOR: f32 = 0.1;

/// Camera position before the first frame.
pub const CAMERA_START: [f32; 3] = [0.0, 2.0, 6.0];

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;

/// Pitch limits for the orbit camera (radians).
pub const MIN_PITCH: f32 = -FRAC_PI_2;
pub const MAX_PITCH: f32 = FRAC_PI_2;

/// Radians per pixel of pointer or touch drag.
pub const DRAG_SENSITIVITY: f32 = 0.01;

/// Zoom change per pixel of wheel scroll.
pub const WHEEL_SENSITIVITY: f32 = 0.001;

/// Pixels per wheel "line" for devices reporting line units.
pub const PIXELS_PER_WHEEL_LINE: f32 = 100.0;

/// Radians per frame while a camera arrow key is held.
pub const KEY_ROTATION_STEP: f32 = 0.05;

/// Side length of generated coin face images (pixels).
pub const FACE_TEXTURE_SIZE: u32 = 512;
