//! Pointer coordinate helpers and the interactive-element guard.

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn pointer_client(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Client coords relative to a container rect captured at resize time.
#[inline]
pub fn client_to_container(client: Vec2, rect_left: f32, rect_top: f32) -> Vec2 {
    client - Vec2::new(rect_left, rect_top)
}

/// True when a pointer-down lands on an interactive page element (or one of
/// its ancestors). Such events must never start a shape drag: normal page
/// interaction wins.
pub fn is_interactive_target(ev: &web::PointerEvent) -> bool {
    let Some(element) = ev
        .target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
    else {
        return false;
    };
    let tag = element.tag_name();
    if matches!(
        tag.as_str(),
        "A" | "BUTTON" | "INPUT" | "TEXTAREA" | "SELECT" | "LABEL"
    ) {
        return true;
    }
    matches!(element.closest("a, button, label"), Ok(Some(_)))
}
