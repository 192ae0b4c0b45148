use crate::dom;
use crate::frame::Controller;
use starfield_core::motion::Subscriber;
use starfield_core::{Subscription, Subscriptions};
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Listeners created with every session and revoked when it is disposed.
pub fn session_subscriber(window: web::Window, controller: Weak<RefCell<Controller>>) -> Subscriber {
    Box::new(move || {
        let mut subs = Subscriptions::new();
        subs.extend(wire_pointermove(&window, controller.clone()));
        subs.extend(wire_resize(&window, controller.clone()));
        subs
    })
}

fn wire_pointermove(window: &web::Window, controller: Weak<RefCell<Controller>>) -> Option<Subscription> {
    dom::listen(window, "mousemove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
        with_controller(&controller, |c| c.pointer_moved(x, y));
    })
}

fn wire_resize(window: &web::Window, controller: Weak<RefCell<Controller>>) -> Option<Subscription> {
    let win = window.clone();
    dom::listen(window, "resize", move |_| {
        let vp = dom::viewport(&win);
        with_controller(&controller, |c| c.resized(vp));
    })
}

/// Page-lived listener for runtime changes of the reduced-motion preference.
pub fn watch_reduced_motion(window: &web::Window, controller: Weak<RefCell<Controller>>) -> Option<Subscription> {
    let query = dom::reduced_motion_query(window)?;
    let win = window.clone();
    dom::listen(&query, "change", move |ev: web::Event| {
        let reduced = match ev.dyn_ref::<web::MediaQueryListEvent>() {
            Some(e) => e.matches(),
            None => dom::prefers_reduced_motion(&win),
        };
        let vp = dom::viewport(&win);
        with_controller(&controller, |c| c.set_reduced_motion(reduced, vp));
    })
}

fn with_controller(controller: &Weak<RefCell<Controller>>, f: impl FnOnce(&mut Controller)) {
    let Some(rc) = controller.upgrade() else {
        return;
    };
    match rc.try_borrow_mut() {
        Ok(mut c) => f(&mut c),
        Err(_) => log::warn!("[events] controller busy; event dropped"),
    };
}
