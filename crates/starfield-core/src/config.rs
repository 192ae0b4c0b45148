//! Runtime configuration for the background.
//!
//! Defaults come from [`crate::constants`]. The web front-end can override a
//! handful of visual knobs through `data-*` attributes on the canvas; see
//! [`SceneConfig::from_lookup`].

use crate::constants::*;
use crate::field::srgb_hex_to_linear;
use glam::{Vec2, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub star_count: usize,
    pub field_extent: Vec3,
    /// Linear-space endpoint colors of the per-particle gradient.
    pub color_a: [f32; 3],
    pub color_b: [f32; 3],
    pub point_size: f32,
    pub opacity: f32,
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub camera_z: f32,
    pub max_pixel_ratio: f64,
    pub rotation_rate_per_ms: f64,
    pub parallax_gain: Vec2,
    pub damping_per_frame: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            field_extent: Vec3::from_array(FIELD_EXTENT),
            color_a: srgb_hex_to_linear(COLOR_A_HEX),
            color_b: srgb_hex_to_linear(COLOR_B_HEX),
            point_size: POINT_SIZE,
            opacity: POINT_OPACITY,
            fov_y_degrees: FOV_Y_DEGREES,
            z_near: Z_NEAR,
            z_far: Z_FAR,
            camera_z: CAMERA_Z,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            rotation_rate_per_ms: ROTATION_RATE_PER_MS,
            parallax_gain: Vec2::new(PARALLAX_GAIN_X, PARALLAX_GAIN_Y),
            damping_per_frame: PARALLAX_DAMPING_PER_FRAME,
        }
    }
}

impl SceneConfig {
    /// Build a config from defaults plus optional string overrides.
    ///
    /// `lookup` receives attribute names without the `data-` prefix
    /// (`star-count`, `point-size`, `opacity`, `max-pixel-ratio`, `color-a`,
    /// `color-b`). Values that fail to parse or fall outside their range are
    /// logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(n) = parse_override(&lookup, "star-count", |v: &usize| (1..=200_000).contains(v)) {
            cfg.star_count = n;
        }
        if let Some(s) = parse_override(&lookup, "point-size", |v: &f32| *v > 0.0 && v.is_finite()) {
            cfg.point_size = s;
        }
        if let Some(o) = parse_override(&lookup, "opacity", |v: &f32| (0.0..=1.0).contains(v)) {
            cfg.opacity = o;
        }
        if let Some(r) = parse_override(&lookup, "max-pixel-ratio", |v: &f64| *v >= 1.0 && v.is_finite()) {
            cfg.max_pixel_ratio = r;
        }
        if let Some(c) = color_override(&lookup, "color-a") {
            cfg.color_a = c;
        }
        if let Some(c) = color_override(&lookup, "color-b") {
            cfg.color_b = c;
        }
        cfg
    }

    pub fn fov_y_radians(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    valid: impl Fn(&T) -> bool,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) if valid(&v) => Some(v),
        _ => {
            log::warn!("[config] ignoring data-{}={:?}", key, raw);
            None
        }
    }
}

fn color_override(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<[f32; 3]> {
    let raw = lookup(key)?;
    match parse_hex_color(&raw) {
        Some(hex) => Some(srgb_hex_to_linear(hex)),
        None => {
            log::warn!("[config] ignoring data-{}={:?}", key, raw);
            None
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional) into a packed 0xRRGGBB value.
pub fn parse_hex_color(s: &str) -> Option<u32> {
    let digits = s.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
