pub mod animation;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod input;
pub mod motion;
pub mod scene;
pub mod scheduler;
pub mod subscription;

pub use camera::Camera;
pub use config::SceneConfig;
pub use error::{BackgroundError, Result};
pub use field::{srgb_hex_to_linear, ParticleField};
pub use input::{InputTracker, SurfaceSize, Viewport};
pub use motion::{MotionController, MotionMode, Transition};
pub use scene::{DrawParams, GraphicsDevice, RenderSurface, SceneManager, Session};
pub use scheduler::{AnimationScheduler, FrameClock, SchedulerState};
pub use subscription::{Subscription, Subscriptions};

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
