#![cfg(target_arch = "wasm32")]
use starfield_core::{AnimationScheduler, MotionController, SceneConfig, SceneManager};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod render;

const CANVAS_ID: &str = "bg";

thread_local! {
    // Page-lived owner; every callback holds only a weak reference.
    static BACKGROUND: RefCell<Option<Rc<RefCell<frame::Controller>>>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("starfield-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;
    let config = SceneConfig::from_lookup(|key| dom::data_attribute(&canvas, key));

    // Without a GPU the page carries on without its background.
    let device = match render::GpuDevice::acquire(window.clone(), canvas.clone()).await {
        Ok(d) => d,
        Err(e) => {
            log::warn!("[init] {}; background omitted", e);
            dom::hide(&canvas);
            return Ok(());
        }
    };

    let clock = frame::RafClock::new(window.clone());
    let slot = clock.callback_slot();
    let scenes = SceneManager::new(device, config);
    let scheduler = AnimationScheduler::new(clock);
    let shown = canvas.clone();
    let controller = Rc::new_cyclic(|weak| {
        frame::wire_frame_callback(&slot, weak.clone());
        RefCell::new(
            MotionController::new(scenes, scheduler)
                .with_subscriber(events::session_subscriber(window.clone(), weak.clone()))
                .with_visibility_hook(Box::new(move |visible| dom::set_visible(&shown, visible))),
        )
    });

    match events::watch_reduced_motion(&window, Rc::downgrade(&controller)) {
        Some(sub) => sub.detach(),
        None => log::info!("[init] reduced-motion query unsupported; assuming motion allowed"),
    }

    let reduced = dom::prefers_reduced_motion(&window);
    controller
        .borrow_mut()
        .start(reduced, dom::viewport(&window));

    BACKGROUND.with(|owner| *owner.borrow_mut() = Some(controller));
    Ok(())
}
