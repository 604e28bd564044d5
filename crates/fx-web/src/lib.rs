#![cfg(target_arch = "wasm32")]

//! Browser glue: wires the effect engines in `fx-core` to canvases and
//! DOM elements. Each effect initializes independently; a page missing a
//! section simply skips that effect, and a failing one logs and leaves
//! the rest running.

mod burst_canvas;
mod config;
mod dom;
mod field_canvas;
mod input;
mod marquee_dom;
mod raf;
mod sdf_scene;
mod signal_canvas;

use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fx-web starting");

    let Some(document) = dom::window_document() else {
        return Ok(());
    };
    if document.ready_state() == "loading" {
        dom::on_document_event("DOMContentLoaded", || {
            if let Some(document) = dom::window_document() {
                init(&document);
            }
        });
    } else {
        init(&document);
    }
    Ok(())
}

fn init(document: &web::Document) {
    for cfg in config::SECTIONS {
        if let Err(e) = signal_canvas::init(document, cfg) {
            log::error!("signal canvas `{}`: {e:#}", cfg.selector);
        }
    }

    if let Err(e) = field_canvas::init(document) {
        log::error!("particle field: {e:#}");
    }

    match burst_canvas::BurstLayer::new(document) {
        Ok(burst) => {
            if let Err(e) = marquee_dom::init(document, burst) {
                log::error!("marquee: {e:#}");
            }
        }
        Err(e) => log::error!("burst layer: {e:#}"),
    }

    if let Err(e) = sdf_scene::init(document) {
        log::error!("sdf scene: {e:#}");
    }
}
