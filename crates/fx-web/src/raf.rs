//! Shared requestAnimationFrame loop with a double-start guard.
//!
//! Every effect owns one of these. The frame callback returns `true` to
//! keep scheduling and `false` to let the loop go dormant (e.g. when all
//! signal has decayed); `start` is a no-op while the loop is already
//! running, so visibility events can call it freely.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct RafLoop {
    running: Rc<Cell<bool>>,
    tick: TickClosure,
}

impl RafLoop {
    pub fn new(mut frame: impl FnMut() -> bool + 'static) -> Rc<Self> {
        let running = Rc::new(Cell::new(false));
        let tick: TickClosure = Rc::new(RefCell::new(None));

        let running_tick = running.clone();
        let tick_inner = tick.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !running_tick.get() {
                return;
            }
            if frame() {
                schedule(&tick_inner);
            } else {
                running_tick.set(false);
            }
        }) as Box<dyn FnMut()>));

        Rc::new(Self { running, tick })
    }

    pub fn start(&self) {
        if self.running.get() {
            return;
        }
        self.running.set(true);
        schedule(&self.tick);
    }

    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

fn schedule(tick: &TickClosure) {
    if let Some(w) = web::window() {
        if let Some(closure) = tick.borrow().as_ref() {
            let _ = w.request_animation_frame(closure.as_ref().unchecked_ref());
        }
    }
}
