//! DOM listeners. Each one only maps the browser event and pushes it onto the
//! shared queue; the frame loop applies it.

use crate::dom;
use field_core::{input_for_key, key_prevents_default, EventQueue, HostEvent, InputEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedQueue = Rc<RefCell<EventQueue>>;

pub fn wire_pointer(canvas: &web::HtmlCanvasElement, queue: &SharedQueue) {
    let queue = queue.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        queue.borrow_mut().push(InputEvent::PointerPressed);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    let _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_keys(window: &web::Window, queue: &SharedQueue) {
    let queue = queue.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let key = ev.key();
        if let Some(input) = input_for_key(&key) {
            log::info!("[keys] {:?}", input);
            queue.borrow_mut().push(input);
        }
        if key_prevents_default(&key) {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_resize(window: &web::Window, canvas: &web::HtmlCanvasElement, queue: &SharedQueue) {
    let queue = queue.clone();
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (width, height) = dom::sync_canvas_backing_size(&canvas);
        queue
            .borrow_mut()
            .push(HostEvent::Resized { width, height });
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_visibility(document: &web::Document, queue: &SharedQueue) {
    let queue = queue.clone();
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        let hidden = doc.hidden();
        log::info!("[visibility] hidden={}", hidden);
        queue
            .borrow_mut()
            .push(HostEvent::VisibilityChanged { hidden });
    }) as Box<dyn FnMut()>);
    let _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}
