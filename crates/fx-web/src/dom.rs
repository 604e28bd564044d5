//! Small DOM helpers shared by the effects.

use fx_core::field::DeviceProfile;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

/// Match the canvas backing store to its CSS size times the device pixel
/// ratio. Returns the CSS size; degenerate rects come back as (0, 0).
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let dpr = device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (rect.width() as f32, rect.height() as f32)
}

/// True on devices with a precise pointer and no touch surface; the heavy
/// interactive paths are skipped everywhere else.
pub fn is_fine_pointer() -> bool {
    let Some(window) = web::window() else {
        return false;
    };
    let fine = matches!(
        window.match_media("(pointer: fine)"),
        Ok(Some(q)) if q.matches()
    );
    let touch = js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
    fine && !touch
}

/// Capability hints for the particle budget. `deviceMemory` has no typed
/// binding, so it is read reflectively; absence falls back inside core.
pub fn device_profile() -> DeviceProfile {
    let Some(window) = web::window() else {
        return DeviceProfile::default();
    };
    let navigator = window.navigator();
    let memory_gb = js_sys::Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
        .ok()
        .and_then(|v| v.as_f64());
    let cores = navigator.hardware_concurrency();
    DeviceProfile {
        memory_gb,
        cores: (cores > 0.0).then_some(cores as u32),
        pixel_ratio: window.device_pixel_ratio(),
    }
}

// ---------------- Focus mode ----------------
// A body class is the one piece of shared state between effects: the SDF
// scene writes it during drags, the marquee reads it as a pause signal.

const FOCUS_MODE_CLASS: &str = "focus-mode";

pub fn set_focus_mode(on: bool) {
    if let Some(body) = window_document().and_then(|d| d.body()) {
        let classes = body.class_list();
        let _ = if on {
            classes.add_1(FOCUS_MODE_CLASS)
        } else {
            classes.remove_1(FOCUS_MODE_CLASS)
        };
    }
}

pub fn focus_mode_active() -> bool {
    window_document()
        .and_then(|d| d.body())
        .map(|b| b.class_list().contains(FOCUS_MODE_CLASS))
        .unwrap_or(false)
}

// ---------------- Listener wiring ----------------

pub fn on_window_event(event: &str, handler: impl FnMut() + 'static) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn on_document_event(event: &str, handler: impl FnMut() + 'static) {
    if let Some(document) = window_document() {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        let _ = document.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn set_timeout(delay_ms: i32, handler: impl FnOnce() + 'static) {
    if let Some(window) = web::window() {
        let callback = Closure::once_into_js(handler);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay_ms,
        );
    }
}

pub fn on_window_pointer_event(event: &str, handler: impl FnMut(web::PointerEvent) + 'static) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::PointerEvent)>);
        let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Observe viewport intersection of `element`; the handler receives the
/// current visibility on every transition.
pub fn observe_intersection(
    element: &web::Element,
    mut handler: impl FnMut(bool) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            if let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() {
                handler(entry.is_intersecting());
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);
    let observer = web::IntersectionObserver::new(closure.as_ref().unchecked_ref())?;
    observer.observe(element);
    closure.forget();
    Ok(())
}

/// Keep the container able to host an absolutely positioned canvas.
pub fn ensure_positioned(container: &web::Element) {
    let Some(window) = web::window() else { return };
    let is_static = window
        .get_computed_style(container)
        .ok()
        .flatten()
        .and_then(|s| s.get_property_value("position").ok())
        .map(|p| p == "static")
        .unwrap_or(false);
    if is_static {
        if let Some(el) = container.dyn_ref::<web::HtmlElement>() {
            let _ = el.style().set_property("position", "relative");
        }
    }
}
