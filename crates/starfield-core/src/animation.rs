use crate::config::SceneConfig;
use crate::error::Result;
use crate::input::InputTracker;
use crate::scene::{RenderSurface, Session};
use glam::{Vec2, Vec3};
use std::time::Duration;

/// Yaw of the particle field after `elapsed` wall-clock time.
///
/// Depends only on elapsed time, so the drift speed is the same at any
/// refresh rate.
#[inline]
pub fn field_rotation(elapsed: Duration, rate_per_ms: f64) -> f32 {
    (elapsed.as_secs_f64() * 1000.0 * rate_per_ms) as f32
}

/// Camera x/y the parallax is heading for; screen-down pointer moves the camera down.
#[inline]
pub fn parallax_goal(pointer: Vec2, gain: Vec2) -> Vec2 {
    Vec2::new(pointer.x * gain.x, -pointer.y * gain.y)
}

/// One tick: rotate the field, damp the camera toward the pointer target,
/// aim at the origin and draw.
///
/// Damping is applied per call rather than per second. At 120 Hz the camera
/// settles twice as fast as at 60 Hz.
pub fn advance<S: RenderSurface>(
    session: &mut Session<S>,
    input: &InputTracker,
    elapsed: Duration,
    config: &SceneConfig,
) -> Result<()> {
    session.set_field_rotation(field_rotation(elapsed, config.rotation_rate_per_ms))?;

    let camera = session.camera_mut()?;
    camera.damp_toward(
        parallax_goal(input.pointer(), config.parallax_gain),
        config.damping_per_frame,
    );
    camera.look_at(Vec3::ZERO);

    session.render()
}
