//! Fullscreen WebGL signed-distance-field backdrop with draggable shapes.
//!
//! Drag state and shape anchoring live in `fx_core::sdf`; this module owns
//! the GL plumbing and the pointer wiring. While a drag is in progress the
//! `focus-mode` body class is set so the rest of the page (and the
//! marquee) can get out of the way.
//!
//! The scene declines to start on coarse-pointer or touch devices; the
//! page falls back to its static background.

use crate::{config, dom, input, raf::RafLoop};
use anyhow::{anyhow, Result};
use fx_core::sdf::ShapeSet;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;
use web_sys::WebGl2RenderingContext as Gl;

const VERT_SRC: &str = include_str!("../shaders/sdf.vert");
const FRAG_SRC: &str = include_str!("../shaders/sdf.frag");

struct Uniforms {
    resolution: Option<web::WebGlUniformLocation>,
    time: Option<web::WebGlUniformLocation>,
    mouse: Option<web::WebGlUniformLocation>,
    shapes: Option<web::WebGlUniformLocation>,
    active_shape: Option<web::WebGlUniformLocation>,
}

struct SdfScene {
    shapes: ShapeSet,
    gl: Gl,
    canvas: web::HtmlCanvasElement,
    uniforms: Uniforms,
    started: instant::Instant,
    pointer: glam::Vec2,
    view_w: f32,
    view_h: f32,
}

impl SdfScene {
    fn resize(&mut self) {
        let Some(window) = web::window() else { return };
        let dpr = window.device_pixel_ratio();
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
        self.view_w = w;
        self.view_h = h;
        self.canvas.set_width((w as f64 * dpr) as u32);
        self.canvas.set_height((h as f64 * dpr) as u32);
        self.gl
            .viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        self.shapes.resize(w, h);
    }

    /// Upload uniforms and draw the quad. Shape and pointer coordinates
    /// flip to the shader's bottom-left origin and scale to device px.
    fn frame(&self) {
        let gl = &self.gl;
        let dpr = dom::device_pixel_ratio() as f32;
        let time = self.started.elapsed().as_secs_f32();

        gl.uniform2f(
            self.uniforms.resolution.as_ref(),
            self.canvas.width() as f32,
            self.canvas.height() as f32,
        );
        gl.uniform1f(self.uniforms.time.as_ref(), time);
        gl.uniform2f(
            self.uniforms.mouse.as_ref(),
            self.pointer.x * dpr,
            (self.view_h - self.pointer.y) * dpr,
        );

        let mut data = [0.0f32; 6];
        for (i, s) in self.shapes.shapes.iter().enumerate() {
            data[i * 2] = s.pos.x * dpr;
            data[i * 2 + 1] = (self.view_h - s.pos.y) * dpr;
        }
        gl.uniform2fv_with_f32_array(self.uniforms.shapes.as_ref(), &data);
        gl.uniform1i(
            self.uniforms.active_shape.as_ref(),
            self.shapes.dragged().map_or(-1, |i| i as i32),
        );

        gl.draw_arrays(Gl::TRIANGLES, 0, 6);
    }

    fn set_cursor(&self, cursor: &str) {
        let _ = self.canvas.style().set_property("cursor", cursor);
    }
}

pub fn init(document: &web::Document) -> Result<()> {
    let Some(canvas) = document.get_element_by_id(config::SDF_CANVAS_ID) else {
        return Ok(());
    };
    let canvas = canvas
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("#{} is not a canvas", config::SDF_CANVAS_ID))?;

    if !dom::is_fine_pointer() {
        log::info!("sdf scene disabled: no fine pointer");
        return Ok(());
    }

    // Missing WebGL leaves the static page background in place.
    let Some(gl) = canvas
        .get_context("webgl2")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<Gl>().ok())
    else {
        log::warn!("sdf scene disabled: webgl2 unavailable");
        return Ok(());
    };

    let program = link_program(&gl, VERT_SRC, FRAG_SRC)?;
    gl.use_program(Some(&program));

    // Fullscreen quad, two triangles.
    let quad: [f32; 12] = [
        -1.0, -1.0, 1.0, -1.0, -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0, 1.0,
    ];
    let buffer = gl
        .create_buffer()
        .ok_or_else(|| anyhow!("creating vertex buffer"))?;
    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(
        Gl::ARRAY_BUFFER,
        &js_sys::Float32Array::from(quad.as_slice()),
        Gl::STATIC_DRAW,
    );
    let position = gl.get_attrib_location(&program, "position");
    if position < 0 {
        return Err(anyhow!("vertex shader has no `position` attribute"));
    }
    gl.enable_vertex_attrib_array(position as u32);
    gl.vertex_attrib_pointer_with_i32(position as u32, 2, Gl::FLOAT, false, 0, 0);

    let uniforms = Uniforms {
        resolution: gl.get_uniform_location(&program, "u_resolution"),
        time: gl.get_uniform_location(&program, "u_time"),
        mouse: gl.get_uniform_location(&program, "u_mouse"),
        shapes: gl.get_uniform_location(&program, "u_shapes"),
        active_shape: gl.get_uniform_location(&program, "u_active_shape"),
    };

    let state = Rc::new(RefCell::new(SdfScene {
        shapes: ShapeSet::new(),
        gl,
        canvas,
        uniforms,
        started: instant::Instant::now(),
        pointer: glam::Vec2::ZERO,
        view_w: 0.0,
        view_h: 0.0,
    }));
    state.borrow_mut().resize();

    let frame_state = state.clone();
    let raf = RafLoop::new(move || {
        frame_state.borrow().frame();
        true
    });
    raf.start();

    {
        let state = state.clone();
        dom::on_window_event("resize", move || state.borrow_mut().resize());
    }

    // Drags may start anywhere that is not an interactive page element.
    {
        let state = state.clone();
        dom::on_window_pointer_event("pointerdown", move |ev| {
            if input::is_interactive_target(&ev) {
                return;
            }
            let mut s = state.borrow_mut();
            if s.shapes.begin_drag(input::pointer_client(&ev)).is_some() {
                dom::set_focus_mode(true);
                s.set_cursor("grabbing");
                ev.prevent_default();
            }
        });
    }
    {
        let state = state.clone();
        dom::on_window_pointer_event("pointermove", move |ev| {
            let mut s = state.borrow_mut();
            s.pointer = input::pointer_client(&ev);
            if s.shapes.dragged().is_some() {
                let p = s.pointer;
                s.shapes.drag_to(p);
                ev.prevent_default();
            }
        });
    }
    {
        let state = state.clone();
        dom::on_window_pointer_event("pointerup", move |_| {
            let mut s = state.borrow_mut();
            if s.shapes.dragged().is_some() {
                s.shapes.end_drag();
                dom::set_focus_mode(false);
                s.set_cursor("default");
            }
        });
    }

    // The scene covers the viewport permanently, so only the tab's
    // visibility gates the loop.
    {
        let raf = raf.clone();
        dom::on_document_event("visibilitychange", move || {
            let hidden = dom::window_document()
                .map(|d| d.visibility_state() == web::VisibilityState::Hidden)
                .unwrap_or(false);
            if hidden {
                raf.stop();
            } else {
                raf.start();
            }
        });
    }

    Ok(())
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<web::WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| anyhow!("creating shader object"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(anyhow!("shader compilation failed: {info}"))
    }
}

fn link_program(gl: &Gl, vert_src: &str, frag_src: &str) -> Result<web::WebGlProgram> {
    let vert = compile_shader(gl, Gl::VERTEX_SHADER, vert_src)?;
    let frag = compile_shader(gl, Gl::FRAGMENT_SHADER, frag_src)?;
    let program = gl
        .create_program()
        .ok_or_else(|| anyhow!("creating program object"))?;
    gl.attach_shader(&program, &vert);
    gl.attach_shader(&program, &frag);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        Err(anyhow!("program link failed: {info}"))
    }
}
