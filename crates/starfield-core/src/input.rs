use crate::constants::MIN_VIEWPORT_EXTENT;
use crate::error::{BackgroundError, Result};
use glam::Vec2;

/// Viewport extent in CSS pixels, always at least 1x1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn try_new(width: f32, height: f32) -> Result<Self> {
        let ok = |v: f32| v.is_finite() && v >= MIN_VIEWPORT_EXTENT;
        if ok(width) && ok(height) {
            Ok(Self { width, height })
        } else {
            Err(BackgroundError::InvalidViewport { width, height })
        }
    }

    /// Like [`Viewport::try_new`] but clamps degenerate extents to 1 pixel.
    pub fn new(width: f32, height: f32) -> Self {
        Self::try_new(width, height).unwrap_or_else(|e| {
            log::warn!("[viewport] {}; clamping", e);
            let clamp = |v: f32| {
                if v.is_finite() {
                    v.max(MIN_VIEWPORT_EXTENT)
                } else {
                    MIN_VIEWPORT_EXTENT
                }
            };
            Self {
                width: clamp(width),
                height: clamp(height),
            }
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Drawing-buffer size for a display with `pixel_ratio`, capped at `max_ratio`.
    pub fn surface_size(&self, pixel_ratio: f64, max_ratio: f64) -> SurfaceSize {
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio.min(max_ratio)
        } else {
            1.0
        };
        SurfaceSize::new(
            (self.width as f64 * ratio).round() as u32,
            (self.height as f64 * ratio).round() as u32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: MIN_VIEWPORT_EXTENT,
            height: MIN_VIEWPORT_EXTENT,
        }
    }
}

/// Drawing-buffer extent in physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Scale down uniformly so neither side exceeds `max_extent`.
    pub fn fit_within(self, max_extent: u32) -> Self {
        let max_extent = max_extent.max(1);
        let longest = self.width.max(self.height);
        if longest <= max_extent {
            return self;
        }
        let scale = |side: u32| (u64::from(side) * u64::from(max_extent) / u64::from(longest)) as u32;
        Self::new(scale(self.width), scale(self.height))
    }
}

/// Latest pointer target and viewport, sampled once per animation tick.
///
/// Writes replace the stored value outright; only the most recent pointer
/// position between two ticks is ever observed.
#[derive(Clone, Debug, Default)]
pub struct InputTracker {
    pointer: Vec2,
    viewport: Viewport,
}

impl InputTracker {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pointer: Vec2::ZERO,
            viewport,
        }
    }

    /// Store the pointer as normalized coordinates in [-1, 1] on both axes.
    /// Left/top edges map to -1, right/bottom edges to +1.
    pub fn set_pointer(&mut self, client_x: f32, client_y: f32, viewport_width: f32, viewport_height: f32) {
        self.pointer = normalize_pointer(client_x, client_y, viewport_width, viewport_height);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[inline]
pub fn normalize_pointer(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(MIN_VIEWPORT_EXTENT);
    let h = height.max(MIN_VIEWPORT_EXTENT);
    let p = Vec2::new((client_x / w) * 2.0 - 1.0, (client_y / h) * 2.0 - 1.0);
    if p.is_finite() {
        p.clamp(Vec2::splat(-1.0), Vec2::ONE)
    } else {
        Vec2::ZERO
    }
}
