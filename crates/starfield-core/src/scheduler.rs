//! Start/stop state machine for the per-frame tick.
//!
//! The actual timing comes from a [`FrameClock`]: `requestAnimationFrame` in
//! the browser, a manual queue in tests. At most one request is outstanding,
//! and the next one is only issued after the current tick has finished.

use std::fmt::Debug;

pub trait FrameClock {
    type Handle: Copy + Debug + PartialEq;

    /// Ask for one callback at the next display refresh. `None` means the
    /// request could not be placed; the scheduler then falls back to
    /// `Stopped` so a later `start` retries.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Withdraw a pending request so its callback never runs.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SchedulerState<H> {
    Stopped,
    Running { pending: Option<H> },
}

pub struct AnimationScheduler<C: FrameClock> {
    clock: C,
    state: SchedulerState<C::Handle>,
}

impl<C: FrameClock> AnimationScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: SchedulerState::Stopped,
        }
    }

    pub fn state(&self) -> SchedulerState<C::Handle> {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running { .. })
    }

    pub fn has_pending(&self) -> bool {
        matches!(self.state, SchedulerState::Running { pending: Some(_) })
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = match self.clock.request_frame() {
            Some(handle) => SchedulerState::Running {
                pending: Some(handle),
            },
            None => {
                log::warn!("[scheduler] could not request first frame");
                SchedulerState::Stopped
            }
        };
    }

    /// Stop and cancel the outstanding request, if any.
    pub fn stop(&mut self) {
        if let SchedulerState::Running { pending } = self.state {
            if let Some(handle) = pending {
                self.clock.cancel_frame(handle);
            }
            self.state = SchedulerState::Stopped;
        }
    }

    /// Called when a requested frame fires. Returns whether a tick should run.
    pub fn begin_frame(&mut self) -> bool {
        match &mut self.state {
            SchedulerState::Running { pending } => {
                *pending = None;
                true
            }
            SchedulerState::Stopped => false,
        }
    }

    /// Called after the tick completed; schedules the next one while running.
    pub fn end_frame(&mut self) {
        if let SchedulerState::Running { pending: None } = self.state {
            self.state = match self.clock.request_frame() {
                Some(handle) => SchedulerState::Running {
                    pending: Some(handle),
                },
                None => {
                    log::warn!("[scheduler] could not request next frame; stopping");
                    SchedulerState::Stopped
                }
            };
        }
    }
}
