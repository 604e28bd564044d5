//! Per-section canvas driving a `SignalGrid`: dithered squares in grid
//! layout, glowing traces in circuit layout.
//!
//! Each section owns its canvas, its lattice and its animation loop. The
//! loop only runs while the section intersects the viewport and goes
//! dormant once all signal has decayed and the pointer has left, so idle
//! sections cost nothing.

use crate::{config::SectionConfig, dom, input, raf::RafLoop};
use anyhow::{anyhow, Context, Result};
use fx_core::constants::*;
use fx_core::signal::{SignalGrid, SignalLayout};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct SignalCanvas {
    grid: SignalGrid,
    rng: StdRng,
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    container: web::Element,
    /// Parsed color components ("r, g, b") for circuit strokes.
    circuit_rgb: &'static str,
    fill: &'static str,
    css_w: f32,
    css_h: f32,
}

impl SignalCanvas {
    fn resize(&mut self) {
        let (w, h) = dom::sync_canvas_backing_size(&self.canvas);
        self.css_w = w;
        self.css_h = h;
        // Setting the backing size reset the transform; rescale so draw
        // coordinates stay in CSS px.
        let dpr = dom::device_pixel_ratio();
        let _ = self.ctx.scale(dpr, dpr);
        self.grid.resize(w, h, &mut self.rng);
    }

    fn render(&self) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.css_w as f64, self.css_h as f64);
        match self.grid.layout() {
            SignalLayout::Grid => self.render_dither(),
            SignalLayout::Circuit => self.render_circuit(),
        }
    }

    fn render_dither(&self) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(self.fill);
        // Square size follows the vignette only; signal plays no part in
        // this layout.
        for node in &self.grid.nodes {
            let size = DITHER_BASE_SIZE * self.grid.vignette(node.pos);
            if size < DITHER_MIN_DRAW_SIZE {
                continue;
            }
            ctx.fill_rect(
                (node.pos.x - size / 2.0) as f64,
                (node.pos.y - size / 2.0) as f64,
                size as f64,
                size as f64,
            );
        }
    }

    fn render_circuit(&self) {
        let ctx = &self.ctx;

        // Traces between energized neighbors first, dots on top.
        for i in 0..self.grid.nodes.len() {
            for j in [self.grid.down_of(i), self.grid.right_of(i)]
                .into_iter()
                .flatten()
            {
                let strength = self.grid.edge_strength(i, j);
                if strength <= SIGNAL_EDGE_FLOOR {
                    continue;
                }
                ctx.set_stroke_style_str(&format!(
                    "rgba({}, {})",
                    self.circuit_rgb,
                    strength * CIRCUIT_EDGE_ALPHA
                ));
                ctx.begin_path();
                ctx.move_to(self.grid.nodes[i].pos.x as f64, self.grid.nodes[i].pos.y as f64);
                ctx.line_to(self.grid.nodes[j].pos.x as f64, self.grid.nodes[j].pos.y as f64);
                ctx.stroke();
            }
        }

        for node in &self.grid.nodes {
            let radius = (CIRCUIT_DOT_BASE + node.signal * CIRCUIT_DOT_SPAN) / 2.0;
            let alpha = CIRCUIT_DOT_ALPHA_BASE + node.signal * CIRCUIT_DOT_ALPHA_SPAN;
            ctx.set_fill_style_str(&format!("rgba({}, {})", self.circuit_rgb, alpha));
            ctx.begin_path();
            let _ = ctx.arc(node.pos.x as f64, node.pos.y as f64, radius as f64, 0.0, TAU);
            ctx.fill();
        }
    }
}

/// Attach a signal canvas to the first element matching the config's
/// selector. A page without the section is not an error.
pub fn init(document: &web::Document, cfg: &'static SectionConfig) -> Result<()> {
    let Some(container) = document
        .query_selector(cfg.selector)
        .map_err(|e| anyhow!("querying `{}`: {e:?}", cfg.selector))?
    else {
        return Ok(());
    };

    let layout: SignalLayout = cfg
        .layout
        .parse()
        .with_context(|| format!("section `{}`", cfg.selector))?;

    dom::ensure_positioned(&container);
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow!("creating canvas: {e:?}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("canvas element has the wrong type"))?;
    canvas
        .style()
        .set_css_text(&format!(
            "position:absolute;inset:0;width:100%;height:100%;pointer-events:none;z-index:{};",
            cfg.z_index
        ));
    // First child so the lattice sits behind the section's content.
    container
        .insert_before(&canvas, container.first_child().as_ref())
        .map_err(|e| anyhow!("inserting canvas: {e:?}"))?;

    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("acquiring 2d context: {e:?}"))?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("2d context has the wrong type"))?;

    let state = Rc::new(RefCell::new(SignalCanvas {
        grid: SignalGrid::new(layout, cfg.spacing, cfg.fade_margin),
        rng: StdRng::from_entropy(),
        canvas,
        ctx,
        container: container.clone(),
        circuit_rgb: crate::config::CIRCUIT_RGB,
        fill: cfg.color,
        css_w: 0.0,
        css_h: 0.0,
    }));
    state.borrow_mut().resize();

    let hovering = Rc::new(Cell::new(false));
    let visible = Rc::new(Cell::new(false));
    let pointer = Rc::new(Cell::new(Vec2::ZERO));

    let frame_state = state.clone();
    let frame_hover = hovering.clone();
    let frame_visible = visible.clone();
    let frame_pointer = pointer.clone();
    let raf = RafLoop::new(move || {
        if !frame_visible.get() {
            return false;
        }
        let mut s = frame_state.borrow_mut();
        let s = &mut *s;
        if frame_hover.get() {
            s.grid.inject(frame_pointer.get());
        }
        s.grid.ambient_tick(&mut s.rng);
        let active = s.grid.decay_step();
        s.render();
        active || frame_hover.get() || s.grid.layout() == SignalLayout::Circuit
    });

    // Pointer tracking against the live container rect. Hover extends one
    // injection radius past the section so signal builds before entry.
    {
        let state = state.clone();
        let hovering = hovering.clone();
        let pointer = pointer.clone();
        let raf = raf.clone();
        dom::on_window_pointer_event("pointermove", move |ev| {
            let rect = state.borrow().container.get_bounding_client_rect();
            let local = input::client_to_container(
                input::pointer_client(&ev),
                rect.left() as f32,
                rect.top() as f32,
            );
            let near = local.x > -SIGNAL_POINTER_RADIUS
                && local.y > -SIGNAL_POINTER_RADIUS
                && local.x < rect.width() as f32 + SIGNAL_POINTER_RADIUS
                && local.y < rect.height() as f32 + SIGNAL_POINTER_RADIUS;
            pointer.set(local);
            hovering.set(near);
            if near {
                raf.start();
            }
        });
    }

    {
        let hovering = hovering.clone();
        dom::on_document_event("mouseleave", move || hovering.set(false));
    }

    {
        let state = state.clone();
        let raf = raf.clone();
        let visible = visible.clone();
        dom::on_window_event("resize", move || {
            state.borrow_mut().resize();
            if visible.get() {
                raf.start();
            } else {
                // Keep the dormant frame correct for when we scroll back.
                state.borrow().render();
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
