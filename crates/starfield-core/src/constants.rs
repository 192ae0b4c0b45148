// Default tuning for the particle-field background.

// Particle field
pub const STAR_COUNT: usize = 1600;
pub const FIELD_EXTENT: [f32; 3] = [200.0, 140.0, 200.0]; // full box size, centred on the origin
pub const COLOR_A_HEX: u32 = 0xb9d1ff; // soft blue
pub const COLOR_B_HEX: u32 = 0xa8ffe0; // mint
pub const POINT_SIZE: f32 = 0.38;
pub const POINT_OPACITY: f32 = 0.85;

// Camera
pub const FOV_Y_DEGREES: f32 = 60.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 2000.0;
pub const CAMERA_Z: f32 = 26.0;

// Surface
pub const MAX_PIXEL_RATIO: f64 = 2.0;
pub const MIN_VIEWPORT_EXTENT: f32 = 1.0;

// Motion
pub const ROTATION_RATE_PER_MS: f64 = 0.00018 * 0.25; // radians of yaw per elapsed millisecond
pub const PARALLAX_GAIN_X: f32 = 0.4;
pub const PARALLAX_GAIN_Y: f32 = 0.35;
pub const PARALLAX_DAMPING_PER_FRAME: f32 = 0.02; // applied once per tick, not per second
