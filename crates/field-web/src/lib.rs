#![cfg(target_arch = "wasm32")]
use field_core::{EventQueue, FieldConfig, FieldController, HostEvent};
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod dom;
mod events;
mod frame;
mod render;
mod weather;

const CANVAS_ID: &str = "field-canvas";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("field-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let ctx2d: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    // Created suspended; resumed on the first pointer press.
    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = FieldConfig::default();
    let master_gain = config.master_gain;
    let controller = FieldController::new(config, Vec2::new(width, height), rand::random());

    let queue = Rc::new(RefCell::new(EventQueue::default()));
    if dom::document_hidden() {
        queue
            .borrow_mut()
            .push(HostEvent::VisibilityChanged { hidden: true });
    }

    events::wire_pointer(&canvas, &queue);
    events::wire_keys(&window, &queue);
    events::wire_resize(&window, &canvas, &queue);
    events::wire_visibility(&document, &queue);
    weather::request_location(&window, &queue);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        controller,
        queue,
        audio: audio::AudioOutput::new(audio_ctx, master_gain),
        ctx2d,
        origin: Instant::now(),
        frame_count: 0,
    }));
    frame::start_loop(frame_ctx);
    log::info!("[init] canvas {}x{}; waiting for a click", width, height);
    Ok(())
}
