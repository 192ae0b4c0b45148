// Fakes shared by the host-side tests: a graphics device that records what it
// allocates and a frame clock driven by hand.

#![allow(dead_code)]

use starfield_core::{
    AnimationScheduler, BackgroundError, DrawParams, FrameClock, GraphicsDevice, MotionController,
    ParticleField, RenderSurface, SceneConfig, SceneManager, Subscription, Subscriptions,
    SurfaceSize, Viewport,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[derive(Default, Debug)]
pub struct GpuLedger {
    pub live_surfaces: usize,
    pub created: usize,
    pub released: usize,
    pub resizes: usize,
    pub draws: usize,
    pub last_size: Option<SurfaceSize>,
    pub last_draw: Option<DrawParams>,
    pub particles: usize,
    pub fail_create: bool,
}

pub type Ledger = Rc<RefCell<GpuLedger>>;

pub struct FakeDevice {
    pub ledger: Ledger,
    pub pixel_ratio: f64,
    pub max_extent: u32,
}

impl FakeDevice {
    pub fn new(pixel_ratio: f64) -> (Self, Ledger) {
        let ledger = Ledger::default();
        (
            Self {
                ledger: ledger.clone(),
                pixel_ratio,
                max_extent: 8192,
            },
            ledger,
        )
    }
}

impl GraphicsDevice for FakeDevice {
    type Surface = FakeSurface;

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn max_extent(&self) -> u32 {
        self.max_extent
    }

    fn create_surface(
        &mut self,
        size: SurfaceSize,
        field: &ParticleField,
    ) -> Result<FakeSurface, BackgroundError> {
        let mut l = self.ledger.borrow_mut();
        if l.fail_create {
            return Err(BackgroundError::ContextUnavailable("fake device lost".into()));
        }
        l.live_surfaces += 1;
        l.created += 1;
        l.last_size = Some(size);
        l.particles = field.len();
        Ok(FakeSurface {
            ledger: self.ledger.clone(),
            size,
            released: false,
        })
    }
}

pub struct FakeSurface {
    ledger: Ledger,
    pub size: SurfaceSize,
    released: bool,
}

impl RenderSurface for FakeSurface {
    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        let mut l = self.ledger.borrow_mut();
        l.resizes += 1;
        l.last_size = Some(size);
    }

    fn draw(&mut self, params: &DrawParams) -> Result<(), BackgroundError> {
        assert!(!self.released, "draw on released surface");
        let mut l = self.ledger.borrow_mut();
        l.draws += 1;
        l.last_draw = Some(*params);
        Ok(())
    }

    fn release(&mut self) {
        assert!(!self.released, "surface released twice");
        self.released = true;
        let mut l = self.ledger.borrow_mut();
        l.live_surfaces -= 1;
        l.released += 1;
    }
}

#[derive(Default, Debug)]
pub struct ClockLog {
    pub next_id: u32,
    pub pending: Vec<u32>,
    pub requested: usize,
    pub cancelled: Vec<u32>,
}

pub type Clock = Rc<RefCell<ClockLog>>;

pub struct ManualClock {
    pub log: Clock,
}

impl ManualClock {
    pub fn new() -> (Self, Clock) {
        let log = Clock::default();
        (Self { log: log.clone() }, log)
    }
}

impl FrameClock for ManualClock {
    type Handle = u32;

    fn request_frame(&mut self) -> Option<u32> {
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        let id = log.next_id;
        log.pending.push(id);
        log.requested += 1;
        Some(id)
    }

    fn cancel_frame(&mut self, handle: u32) {
        let mut log = self.log.borrow_mut();
        log.pending.retain(|h| *h != handle);
        log.cancelled.push(handle);
    }
}

/// Counts how many listener handles are currently registered.
#[derive(Clone, Default)]
pub struct ListenerCount(pub Rc<Cell<usize>>);

impl ListenerCount {
    pub fn get(&self) -> usize {
        self.0.get()
    }

    pub fn subscription(&self, label: &'static str) -> Subscription {
        let c = self.0.clone();
        c.set(c.get() + 1);
        Subscription::new(label, move || c.set(c.get() - 1))
    }
}

pub type TestController = MotionController<FakeDevice, ManualClock>;

pub struct Harness {
    pub controller: TestController,
    pub gpu: Ledger,
    pub clock: Clock,
    pub listeners: ListenerCount,
    /// Every visibility change reported by the controller, in order.
    pub visibility: Rc<RefCell<Vec<bool>>>,
}

impl Harness {
    pub fn new() -> Self {
        let (device, gpu) = FakeDevice::new(1.0);
        let (clock_impl, clock) = ManualClock::new();
        let listeners = ListenerCount::default();
        let l = listeners.clone();
        let visibility = Rc::new(RefCell::new(Vec::new()));
        let v = visibility.clone();
        let controller = MotionController::new(
            SceneManager::with_seed(device, SceneConfig::default(), 7),
            AnimationScheduler::new(clock_impl),
        )
        .with_subscriber(Box::new(move || {
            let mut subs = Subscriptions::new();
            subs.push(l.subscription("mousemove"));
            subs.push(l.subscription("resize"));
            subs
        }))
        .with_visibility_hook(Box::new(move |visible| v.borrow_mut().push(visible)));
        Self {
            controller,
            gpu,
            clock,
            listeners,
            visibility,
        }
    }

    /// Deliver the pending animation frame, if any, at `elapsed_ms`.
    pub fn fire(&mut self, elapsed_ms: u64) -> bool {
        let due = !self.clock.borrow().pending.is_empty();
        if due {
            self.clock.borrow_mut().pending.clear();
            self.controller.frame(Duration::from_millis(elapsed_ms));
        }
        due
    }
}

pub fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0)
}

pub fn manager(pixel_ratio: f64) -> (SceneManager<FakeDevice>, Ledger) {
    let (device, ledger) = FakeDevice::new(pixel_ratio);
    (SceneManager::with_seed(device, SceneConfig::default(), 42), ledger)
}

pub fn manager_with_limit(pixel_ratio: f64, max_extent: u32) -> (SceneManager<FakeDevice>, Ledger) {
    let (mut device, ledger) = FakeDevice::new(pixel_ratio);
    device.max_extent = max_extent;
    (SceneManager::with_seed(device, SceneConfig::default(), 42), ledger)
}
