use starfield_core::{Subscription, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Window inner size in CSS pixels.
pub fn viewport(window: &web::Window) -> Viewport {
    let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Viewport::new(px(window.inner_width()), px(window.inner_height()))
}

#[inline]
pub fn data_attribute(el: &web::Element, key: &str) -> Option<String> {
    el.get_attribute(&format!("data-{}", key))
}

#[inline]
pub fn hide(el: &web::Element) {
    let _ = el.set_attribute("style", "display:none");
}

#[inline]
pub fn show(el: &web::Element) {
    let _ = el.remove_attribute("style");
}

pub fn set_visible(el: &web::Element, visible: bool) {
    if visible {
        show(el)
    } else {
        hide(el)
    }
}

pub fn reduced_motion_query(window: &web::Window) -> Option<web::MediaQueryList> {
    window.match_media(REDUCED_MOTION_QUERY).ok().flatten()
}

pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    reduced_motion_query(window)
        .map(|q| q.matches())
        .unwrap_or(false)
}

/// Register `handler` for `event` on `target`; revoking the returned handle
/// removes the listener and frees the closure.
pub fn listen(
    target: &web::EventTarget,
    event: &'static str,
    handler: impl FnMut(web::Event) + 'static,
) -> Option<Subscription> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("[dom] could not listen for {}: {:?}", event, e);
        return None;
    }
    let target = target.clone();
    Some(Subscription::new(event, move || {
        let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        drop(closure);
    }))
}
