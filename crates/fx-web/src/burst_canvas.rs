//! Fixed fullscreen overlay for transient particle bursts.
//!
//! One layer serves the whole page; owners call `spawn` with client
//! coordinates and the layer drains itself. The loop stops on its own when
//! the last particle expires.

use crate::{dom, raf::RafLoop};
use anyhow::{anyhow, Result};
use fx_core::burst::ParticleBurst;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Layer {
    burst: ParticleBurst,
    rng: StdRng,
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    css_w: f32,
    css_h: f32,
}

pub struct BurstLayer {
    state: Rc<RefCell<Layer>>,
    raf: Rc<RafLoop>,
}

impl BurstLayer {
    pub fn new(document: &web::Document) -> Result<Rc<Self>> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| anyhow!("creating burst canvas: {e:?}"))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|_| anyhow!("canvas element has the wrong type"))?;
        canvas.style().set_css_text(
            "position:fixed;inset:0;width:100vw;height:100vh;pointer-events:none;z-index:999;",
        );
        document
            .body()
            .ok_or_else(|| anyhow!("document has no body"))?
            .append_child(&canvas)
            .map_err(|e| anyhow!("appending burst canvas: {e:?}"))?;

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("acquiring 2d context: {e:?}"))?
            .ok_or_else(|| anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("2d context has the wrong type"))?;

        let state = Rc::new(RefCell::new(Layer {
            burst: ParticleBurst::new(),
            rng: StdRng::from_entropy(),
            canvas,
            ctx,
            css_w: 0.0,
            css_h: 0.0,
        }));
        resize(&mut state.borrow_mut());

        let frame_state = state.clone();
        let raf = RafLoop::new(move || {
            let mut s = frame_state.borrow_mut();
            s.burst.step();
            render(&s);
            // Loop lives exactly as long as particles do.
            !s.burst.is_empty()
        });

        {
            let state = state.clone();
            dom::on_window_event("resize", move || resize(&mut state.borrow_mut()));
        }

        Ok(Rc::new(Self { state, raf }))
    }

    /// Fire a burst at a client-space point and (re)start the loop.
    pub fn spawn(&self, at: Vec2, color: &'static str, count: usize) {
        {
            let mut s = self.state.borrow_mut();
            let s = &mut *s;
            s.burst.spawn(at, color, count, &mut s.rng);
        }
        self.raf.start();
    }
}

fn resize(s: &mut Layer) {
    let dpr = dom::device_pixel_ratio();
    let Some(window) = web::window() else { return };
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    s.canvas.set_width((w as f64 * dpr) as u32);
    s.canvas.set_height((h as f64 * dpr) as u32);
    let _ = s.ctx.scale(dpr, dpr);
    s.css_w = w;
    s.css_h = h;
}

fn render(s: &Layer) {
    let ctx = &s.ctx;
    ctx.clear_rect(0.0, 0.0, s.css_w as f64, s.css_h as f64);
    for p in &s.burst.particles {
        ctx.set_global_alpha(p.life as f64);
        ctx.set_fill_style_str(p.color);
        ctx.begin_path();
        let _ = ctx.arc(
            p.pos.x as f64,
            p.pos.y as f64,
            (p.size * p.life) as f64,
            0.0,
            TAU,
        );
        ctx.fill();
    }
    ctx.set_global_alpha(1.0);
}
