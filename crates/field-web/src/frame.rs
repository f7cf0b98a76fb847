use crate::audio::AudioOutput;
use crate::events::SharedQueue;
use crate::render;
use field_core::FieldController;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub controller: FieldController,
    pub queue: SharedQueue,
    pub audio: AudioOutput,
    pub ctx2d: web::CanvasRenderingContext2d,
    pub origin: Instant,
    pub frame_count: u64,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.origin.elapsed().as_secs_f64();

        let events = self.queue.borrow_mut().drain();
        for ev in events {
            self.controller.handle(ev, now);
        }

        let snap = self.controller.frame(now);
        if snap.activate_audio {
            log::info!("[audio] resuming context");
            self.audio.resume(&self.queue);
        }
        self.audio.apply(&snap.audio);

        render::draw_frame(
            &self.ctx2d,
            &self.controller,
            &snap,
            self.audio.state_label(),
            self.frame_count,
        );
        self.frame_count = self.frame_count.wrapping_add(1);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
