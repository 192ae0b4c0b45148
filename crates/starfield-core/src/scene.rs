//! Session lifecycle: creation, resize and disposal of the graphics resources
//! behind the background.
//!
//! The platform supplies a [`GraphicsDevice`] (wgpu on the web, fakes in
//! tests). A [`SceneManager`] turns it into at most one live [`Session`] at a
//! time; every operation on a disposed session yields
//! [`BackgroundError::UseAfterDispose`].

use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::error::{BackgroundError, Result};
use crate::field::ParticleField;
use crate::input::{SurfaceSize, Viewport};
use crate::subscription::{Subscription, Subscriptions};
use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Per-frame values handed to the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawParams {
    pub view_proj: Mat4,
    pub model: Mat4,
    pub point_size: f32,
    pub opacity: f32,
}

/// Source of drawable surfaces. Acquiring the underlying context is the
/// platform's job; a device only exists once that succeeded.
pub trait GraphicsDevice {
    type Surface: RenderSurface;

    /// Current display pixel density, before capping.
    fn pixel_ratio(&self) -> f64;

    /// Largest width or height the device accepts for a surface texture.
    fn max_extent(&self) -> u32;

    /// Allocate a surface of `size` with the particle buffers uploaded.
    fn create_surface(&mut self, size: SurfaceSize, field: &ParticleField) -> Result<Self::Surface>;
}

/// GPU-backed resources of one session.
pub trait RenderSurface {
    /// Reconfigure in place. Must not allocate a second surface.
    fn resize(&mut self, size: SurfaceSize);

    fn draw(&mut self, params: &DrawParams) -> Result<()>;

    /// Free buffers and surface bindings. Called once, right before drop.
    fn release(&mut self);
}

/// The particle object attached to the scene root.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleObject {
    pub rotation_y: f32,
    pub point_count: usize,
    pub point_size: f32,
    pub opacity: f32,
}

impl ParticleObject {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }
}

/// Scene graph root. The background only ever holds the one particle object.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub particles: ParticleObject,
}

struct LiveSession<S> {
    scene: Scene,
    camera: Camera,
    surface: S,
    size: SurfaceSize,
    subscriptions: Subscriptions,
}

pub struct Session<S> {
    id: u64,
    live: Option<LiveSession<S>>,
}

impl<S: RenderSurface> Session<S> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    fn live(&self) -> Result<&LiveSession<S>> {
        self.live.as_ref().ok_or_else(|| self.disposed())
    }

    fn live_mut(&mut self) -> Result<&mut LiveSession<S>> {
        let id = self.id;
        self.live.as_mut().ok_or_else(|| use_after_dispose(id))
    }

    fn disposed(&self) -> BackgroundError {
        use_after_dispose(self.id)
    }

    pub fn camera(&self) -> Result<&Camera> {
        Ok(&self.live()?.camera)
    }

    pub fn camera_mut(&mut self) -> Result<&mut Camera> {
        Ok(&mut self.live_mut()?.camera)
    }

    pub fn scene(&self) -> Result<&Scene> {
        Ok(&self.live()?.scene)
    }

    pub fn field_rotation(&self) -> Result<f32> {
        Ok(self.live()?.scene.particles.rotation_y)
    }

    pub fn set_field_rotation(&mut self, radians: f32) -> Result<()> {
        self.live_mut()?.scene.particles.rotation_y = radians;
        Ok(())
    }

    pub fn surface_size(&self) -> Result<SurfaceSize> {
        Ok(self.live()?.size)
    }

    /// Keep `subscription` alive until this session is disposed.
    pub fn attach(&mut self, subscription: Subscription) -> Result<()> {
        self.live_mut()?.subscriptions.push(subscription);
        Ok(())
    }

    pub fn subscription_count(&self) -> Result<usize> {
        Ok(self.live()?.subscriptions.len())
    }

    /// Draw one frame with the current camera and particle transform.
    pub fn render(&mut self) -> Result<()> {
        let live = self.live_mut()?;
        let params = DrawParams {
            view_proj: live.camera.view_projection(),
            model: live.scene.particles.model_matrix(),
            point_size: live.scene.particles.point_size,
            opacity: live.scene.particles.opacity,
        };
        live.surface.draw(&params)
    }
}

#[inline]
fn use_after_dispose(session: u64) -> BackgroundError {
    let e = BackgroundError::UseAfterDispose { session };
    log::error!("[session] {}", e);
    e
}

pub struct SceneManager<D: GraphicsDevice> {
    device: D,
    config: SceneConfig,
    rng: StdRng,
    live: Option<u64>,
    next_id: u64,
}

impl<D: GraphicsDevice> SceneManager<D> {
    pub fn new(device: D, config: SceneConfig) -> Self {
        Self::with_rng(device, config, StdRng::from_entropy())
    }

    pub fn with_seed(device: D, config: SceneConfig, seed: u64) -> Self {
        Self::with_rng(device, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(device: D, config: SceneConfig, rng: StdRng) -> Self {
        Self {
            device,
            config,
            rng,
            live: None,
            next_id: 1,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn live_count(&self) -> usize {
        usize::from(self.live.is_some())
    }

    /// Drawing-buffer size for `viewport`: capped pixel ratio, then fitted
    /// to the device's texture limit.
    pub fn surface_size_for(&self, viewport: Viewport) -> SurfaceSize {
        let wanted = viewport.surface_size(self.device.pixel_ratio(), self.config.max_pixel_ratio);
        let max = self.device.max_extent();
        let size = wanted.fit_within(max);
        if size != wanted {
            log::warn!(
                "[session] {}x{} exceeds device limit {}; using {}x{}",
                wanted.width,
                wanted.height,
                max,
                size.width,
                size.height
            );
        }
        size
    }

    pub fn create_session(&mut self, viewport: Viewport) -> Result<Session<D::Surface>> {
        if let Some(live) = self.live {
            return Err(BackgroundError::SessionAlreadyLive { live });
        }
        let cfg = &self.config;
        let size = self.surface_size_for(viewport);
        let field = ParticleField::generate(
            cfg.star_count,
            cfg.field_extent,
            cfg.color_a,
            cfg.color_b,
            &mut self.rng,
        );
        let surface = self.device.create_surface(size, &field)?;
        let mut camera = Camera::new(cfg, viewport.aspect());
        camera.look_at(Vec3::ZERO);
        let scene = Scene {
            particles: ParticleObject {
                rotation_y: 0.0,
                point_count: field.len(),
                point_size: cfg.point_size,
                opacity: cfg.opacity,
            },
        };

        let id = self.next_id;
        self.next_id += 1;
        self.live = Some(id);
        log::info!(
            "[session] created #{} {}x{} ({} particles)",
            id,
            size.width,
            size.height,
            field.len()
        );
        Ok(Session {
            id,
            live: Some(LiveSession {
                scene,
                camera,
                surface,
                size,
                subscriptions: Subscriptions::new(),
            }),
        })
    }

    /// Match camera aspect and surface size to `viewport`. Repeated calls
    /// with the same extent are no-ops on the surface.
    pub fn resize(&self, session: &mut Session<D::Surface>, viewport: Viewport) -> Result<()> {
        let size = self.surface_size_for(viewport);
        let live = session.live_mut()?;
        live.camera.set_aspect(viewport.aspect());
        if live.size != size {
            log::debug!("[session] resize {}x{}", size.width, size.height);
            live.surface.resize(size);
            live.size = size;
        }
        Ok(())
    }

    /// Release the session's GPU resources and revoke its listeners.
    pub fn dispose_session(&mut self, session: &mut Session<D::Surface>) -> Result<()> {
        let mut live = session.live.take().ok_or_else(|| session.disposed())?;
        for sub in live.subscriptions.drain(..) {
            sub.revoke();
        }
        live.surface.release();
        drop(live);
        if self.live == Some(session.id) {
            self.live = None;
        }
        log::info!("[session] disposed #{}", session.id);
        Ok(())
    }
}
