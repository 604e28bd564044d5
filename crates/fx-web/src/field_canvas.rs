//! Full-container ambient particle field with proximity links.
//!
//! The simulation lives in `fx_core::field`; this module owns the canvas,
//! sizes the pool from the device profile, and renders dots plus link
//! lines. The loop pauses while the container is off screen or the tab is
//! hidden.

use crate::{config, dom, raf::RafLoop};
use anyhow::{anyhow, Result};
use fx_core::field::{particle_budget, Link, ParticleField};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct FieldCanvas {
    field: ParticleField,
    links: Vec<Link>,
    rng: StdRng,
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    css_w: f32,
    css_h: f32,
}

impl FieldCanvas {
    fn resize(&mut self) {
        let (w, h) = dom::sync_canvas_backing_size(&self.canvas);
        self.css_w = w;
        self.css_h = h;
        let dpr = dom::device_pixel_ratio();
        let _ = self.ctx.scale(dpr, dpr);

        let budget = particle_budget(w, h, &dom::device_profile());
        log::debug!("particle field sized to {budget} particles for {w}x{h}");
        self.field
            .resize(w, h, budget, config::FIELD_PALETTE.len(), &mut self.rng);
    }

    fn frame(&mut self) {
        self.field.step();
        let links = &mut self.links;
        self.field.links(links);

        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.css_w as f64, self.css_h as f64);

        for link in links.iter() {
            let a = self.field.particles[link.a as usize].pos;
            let b = self.field.particles[link.b as usize].pos;
            ctx.set_global_alpha(link.alpha as f64);
            ctx.set_stroke_style_str(config::FIELD_PALETTE[0]);
            ctx.begin_path();
            ctx.move_to(a.x as f64, a.y as f64);
            ctx.line_to(b.x as f64, b.y as f64);
            ctx.stroke();
        }

        for p in &self.field.particles {
            ctx.set_global_alpha(p.alpha as f64);
            ctx.set_fill_style_str(config::FIELD_PALETTE[p.palette]);
            ctx.begin_path();
            let _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, p.size as f64, 0.0, TAU);
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);
    }
}

pub fn init(document: &web::Document) -> Result<()> {
    let Some(container) = document
        .query_selector(config::FIELD_SELECTOR)
        .map_err(|e| anyhow!("querying `{}`: {e:?}", config::FIELD_SELECTOR))?
    else {
        return Ok(());
    };

    dom::ensure_positioned(&container);
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow!("creating canvas: {e:?}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("canvas element has the wrong type"))?;
    canvas.style().set_css_text(
        "position:absolute;inset:0;width:100%;height:100%;pointer-events:none;",
    );
    container
        .append_child(&canvas)
        .map_err(|e| anyhow!("appending canvas: {e:?}"))?;

    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("acquiring 2d context: {e:?}"))?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("2d context has the wrong type"))?;

    let state = Rc::new(RefCell::new(FieldCanvas {
        field: ParticleField::new(),
        links: Vec::new(),
        rng: StdRng::from_entropy(),
        canvas,
        ctx,
        css_w: 0.0,
        css_h: 0.0,
    }));
    state.borrow_mut().resize();

    let visible = Rc::new(Cell::new(false));

    let frame_state = state.clone();
    let frame_visible = visible.clone();
    let raf = RafLoop::new(move || {
        if !frame_visible.get() {
            return false;
        }
        frame_state.borrow_mut().frame();
        true
    });

    {
        let state = state.clone();
        dom::on_window_event("resize", move || state.borrow_mut().resize());
    }

    // Pause with the tab; the field is purely decorative.
    {
        let raf = raf.clone();
        let visible = visible.clone();
        dom::on_document_event("visibilitychange", move || {
            let hidden = dom::window_document()
                .map(|d| d.visibility_state() == web::VisibilityState::Hidden)
                .unwrap_or(false);
            if hidden {
                raf.stop();
            } else if visible.get() {
                raf.start();
            }
        });
    }

    {
        let raf = raf.clone();
        let visible = visible.clone();
        dom::observe_intersection(&container, move |is_visible| {
            visible.set(is_visible);
            if is_visible {
                raf.start();
            }
        })
        .map_err(|e| anyhow!("intersection observer: {e:?}"))?;
    }

    Ok(())
}
