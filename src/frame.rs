use crate::render::GpuDevice;
use starfield_core::{FrameClock, MotionController};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type Controller = MotionController<GpuDevice, RafClock>;

/// The single `requestAnimationFrame` callback, filled in once the controller exists.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct RafClock {
    window: web::Window,
    callback: FrameCallback,
}

impl RafClock {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    pub fn callback_slot(&self) -> FrameCallback {
        self.callback.clone()
    }
}

impl FrameClock for RafClock {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let Some(cb) = slot.as_ref() else {
            log::error!("[frame] no frame callback wired");
            return None;
        };
        match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("[frame] requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("[frame] cancelAnimationFrame({}) failed: {:?}", handle, e);
        }
    }
}

/// Route animation frames to `controller`. Only a weak reference is held, so
/// the callback never keeps the controller or its session alive.
pub fn wire_frame_callback(slot: &FrameCallback, controller: Weak<RefCell<Controller>>) {
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
        let Some(rc) = controller.upgrade() else {
            return;
        };
        let Ok(mut ctrl) = rc.try_borrow_mut() else {
            log::warn!("[frame] controller busy; frame skipped");
            return;
        };
        // DOMHighResTimeStamp: ms since the page's time origin
        ctrl.frame(Duration::from_secs_f64(timestamp_ms.max(0.0) / 1000.0));
    }) as Box<dyn FnMut(f64)>));
}
