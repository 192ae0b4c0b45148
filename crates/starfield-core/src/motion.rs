//! Reduced-motion policy: decides whether an animated session, a single
//! still frame, or nothing at all is on screen.
//!
//! The controller is the only place sessions are created or disposed, and the
//! scheduler only runs while the state is [`MotionState::Animated`].

use crate::animation;
use crate::input::{InputTracker, Viewport};
use crate::scene::{GraphicsDevice, SceneManager, Session};
use crate::scheduler::{AnimationScheduler, FrameClock};
use crate::subscription::Subscriptions;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionMode {
    /// Live session, scheduler running.
    Animated,
    /// Live session that was drawn once; scheduler stopped.
    Static,
    /// No session.
    Disposed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// Dispose whatever is there, create a fresh session and start ticking.
    Animate,
    /// Stop ticking and dispose; draw nothing afterwards.
    Dispose,
}

/// Transition taken when the reduced-motion preference reads `reduced`.
pub fn transition(mode: MotionMode, reduced: bool) -> Transition {
    match (mode, reduced) {
        (MotionMode::Animated, true) => Transition::Dispose,
        (MotionMode::Static | MotionMode::Disposed, false) => Transition::Animate,
        _ => Transition::Stay,
    }
}

enum MotionState<S> {
    Animated(Session<S>),
    Static(Session<S>),
    Disposed,
}

/// Produces the listeners that live exactly as long as one session.
pub type Subscriber = Box<dyn FnMut() -> Subscriptions>;

/// Told whether a session is on screen, each time that changes.
pub type VisibilityHook = Box<dyn FnMut(bool)>;

pub struct MotionController<D: GraphicsDevice, C: FrameClock> {
    scenes: SceneManager<D>,
    scheduler: AnimationScheduler<C>,
    input: InputTracker,
    state: MotionState<D::Surface>,
    subscriber: Option<Subscriber>,
    on_visibility: Option<VisibilityHook>,
    shown: Option<bool>,
    started: bool,
}

impl<D: GraphicsDevice, C: FrameClock> MotionController<D, C> {
    pub fn new(scenes: SceneManager<D>, scheduler: AnimationScheduler<C>) -> Self {
        Self {
            scenes,
            scheduler,
            input: InputTracker::default(),
            state: MotionState::Disposed,
            subscriber: None,
            on_visibility: None,
            shown: None,
            started: false,
        }
    }

    pub fn with_subscriber(mut self, subscriber: Subscriber) -> Self {
        self.subscriber = Some(subscriber);
        self
    }

    pub fn with_visibility_hook(mut self, hook: VisibilityHook) -> Self {
        self.on_visibility = Some(hook);
        self
    }

    /// Read the initial preference once. With reduced motion a single still
    /// frame is drawn and the scheduler is never started.
    pub fn start(&mut self, reduced: bool, viewport: Viewport) {
        if self.started {
            log::warn!("[motion] start called twice; ignoring");
            return;
        }
        self.started = true;
        self.input.set_viewport(viewport);
        if reduced {
            self.show_still();
        } else {
            self.animate();
        }
        self.report_visibility();
    }

    /// Apply a reduced-motion change notification.
    pub fn set_reduced_motion(&mut self, reduced: bool, viewport: Viewport) {
        self.input.set_viewport(viewport);
        let t = transition(self.mode(), reduced);
        log::info!("[motion] reduced={} mode={:?} -> {:?}", reduced, self.mode(), t);
        match t {
            Transition::Stay => {}
            Transition::Animate => self.animate(),
            Transition::Dispose => self.teardown(),
        }
        self.report_visibility();
    }

    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32) {
        let vp = self.input.viewport();
        self.input.set_pointer(client_x, client_y, vp.width(), vp.height());
    }

    pub fn resized(&mut self, viewport: Viewport) {
        self.input.set_viewport(viewport);
        match &mut self.state {
            MotionState::Animated(session) => {
                if let Err(e) = self.scenes.resize(session, viewport) {
                    log::warn!("[motion] resize skipped: {}", e);
                }
            }
            MotionState::Static(session) => {
                let redrawn = self
                    .scenes
                    .resize(session, viewport)
                    .and_then(|_| session.render());
                if let Err(e) = redrawn {
                    log::warn!("[motion] still frame not redrawn: {}", e);
                }
            }
            MotionState::Disposed => {}
        }
    }

    /// Run one tick if a frame was due. `elapsed` is measured from the
    /// page's monotonic time origin.
    pub fn frame(&mut self, elapsed: Duration) {
        let MotionState::Animated(session) = &mut self.state else {
            log::debug!("[motion] frame fired without an animated session");
            return;
        };
        if !self.scheduler.begin_frame() {
            return;
        }
        if let Err(e) = animation::advance(session, &self.input, elapsed, self.scenes.config()) {
            log::warn!("[motion] frame dropped: {}", e);
        }
        self.scheduler.end_frame();
    }

    pub fn mode(&self) -> MotionMode {
        match self.state {
            MotionState::Animated(_) => MotionMode::Animated,
            MotionState::Static(_) => MotionMode::Static,
            MotionState::Disposed => MotionMode::Disposed,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.scheduler.has_pending()
    }

    pub fn live_sessions(&self) -> usize {
        self.scenes.live_count()
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn session(&self) -> Option<&Session<D::Surface>> {
        match &self.state {
            MotionState::Animated(s) | MotionState::Static(s) => Some(s),
            MotionState::Disposed => None,
        }
    }

    pub fn scenes(&self) -> &SceneManager<D> {
        &self.scenes
    }

    pub fn scheduler(&self) -> &AnimationScheduler<C> {
        &self.scheduler
    }

    fn animate(&mut self) {
        self.teardown();
        if let Some(session) = self.open_session() {
            self.state = MotionState::Animated(session);
            self.scheduler.start();
        }
    }

    fn show_still(&mut self) {
        self.teardown();
        if let Some(mut session) = self.open_session() {
            if let Err(e) = session.render() {
                log::warn!("[motion] still frame failed: {}", e);
            }
            self.state = MotionState::Static(session);
        }
    }

    fn report_visibility(&mut self) {
        let visible = self.session().is_some();
        if self.shown == Some(visible) {
            return;
        }
        self.shown = Some(visible);
        if let Some(hook) = self.on_visibility.as_mut() {
            hook(visible);
        }
    }

    /// Stop first, then dispose, so no tick can reach released resources.
    fn teardown(&mut self) {
        self.scheduler.stop();
        match std::mem::replace(&mut self.state, MotionState::Disposed) {
            MotionState::Animated(mut session) | MotionState::Static(mut session) => {
                if let Err(e) = self.scenes.dispose_session(&mut session) {
                    log::error!("[motion] dispose failed: {}", e);
                }
            }
            MotionState::Disposed => {}
        }
    }

    fn open_session(&mut self) -> Option<Session<D::Surface>> {
        let mut session = match self.scenes.create_session(self.input.viewport()) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[motion] background omitted: {}", e);
                return None;
            }
        };
        if let Some(subscribe) = self.subscriber.as_mut() {
            for sub in subscribe() {
                if let Err(e) = session.attach(sub) {
                    log::error!("[motion] listener not attached: {}", e);
                }
            }
        }
        Some(session)
    }
}
