//! DOM side of the logo marquee: track duplication, the scroll transform,
//! and the pop-out clone lifecycle.
//!
//! The phase machine lives in `fx_core::marquee`; this module feeds it
//! per-frame geometry and turns its events into DOM mutations. A popped
//! item is represented by a body-level clone of the original `<img>`,
//! addressed by index into the duplicated item list, so the clone can be
//! re-anchored to wherever the original has scrolled to.

use crate::{burst_canvas::BurstLayer, config, dom, raf::RafLoop};
use anyhow::{anyhow, Result};
use fx_core::constants::*;
use fx_core::marquee::{
    palette_for, ItemSpan, MarqueeEvent, MarqueeGeometry, MarqueeLoop, MarqueePhase,
};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

// The C# devicon ships colored and is forced white by a different filter
// than the plain logos, so its transitions need their own endpoints.
const REST_FILTER: &str = "brightness(0) invert(1) drop-shadow(0 0 0 rgba(0,0,0,0))";
const REST_FILTER_CSHARP: &str = "grayscale(100%) brightness(500%) drop-shadow(0 0 0 rgba(0,0,0,0))";

struct MarqueeDom {
    engine: MarqueeLoop,
    track: web::HtmlElement,
    container: web::Element,
    items: Vec<web::HtmlElement>,
    clone: Option<web::HtmlElement>,
    /// Float transform deferred one frame so the clone's initial styles
    /// commit first and the CSS transition fires.
    float_pending: Option<(web::HtmlElement, String, bool)>,
    spans: Vec<ItemSpan>,
    events: Vec<MarqueeEvent>,
}

impl MarqueeDom {
    fn item_alt(&self, item: usize) -> String {
        self.items[item]
            .get_attribute("alt")
            .unwrap_or_default()
    }

    fn frame(&mut self, burst: &BurstLayer) {
        if let Some((clone, glow, csharp)) = self.float_pending.take() {
            let transform = format!(
                "translate(0, -{MARQUEE_FLOAT_DISTANCE}px) scale(2.5) rotate(5deg)"
            );
            let _ = clone.style().set_property("transform", &transform);
            let filter = if csharp {
                format!("grayscale(0%) brightness(100%) drop-shadow(0 0 15px {glow})")
            } else {
                format!("brightness(1) invert(0) drop-shadow(0 0 15px {glow})")
            };
            let _ = clone.style().set_property("filter", &filter);
        }

        let now = dom::now_ms();
        let set_width = self.track.scroll_width() as f32 / 3.0;

        // Geometry is only consulted while cruising; skip the rect pass
        // during pops.
        self.spans.clear();
        let cruising = self.engine.phase() == MarqueePhase::Cruising;
        if cruising {
            for item in &self.items {
                let r = item.get_bounding_client_rect();
                self.spans.push(ItemSpan::new(r.left() as f32, r.width() as f32));
            }
        }
        let container_rect = self.container.get_bounding_client_rect();
        let geometry = MarqueeGeometry {
            container: ItemSpan::new(container_rect.left() as f32, container_rect.width() as f32),
            items: &self.spans,
        };

        self.events.clear();
        let mut events = std::mem::take(&mut self.events);
        self.engine.tick(
            now,
            set_width,
            dom::focus_mode_active(),
            cruising.then_some(&geometry),
            &mut events,
        );

        let _ = self
            .track
            .style()
            .set_property("transform", &format!("translateX({}px)", self.engine.scroll_pos));

        for event in &events {
            match *event {
                MarqueeEvent::Trigger { item } => self.pop_out(item, burst),
                MarqueeEvent::BeginReturn { item } => self.begin_return(item),
                MarqueeEvent::Finished { item } => self.finish(item),
            }
        }
        self.events = events;
    }

    fn pop_out(&mut self, item: usize, burst: &BurstLayer) {
        let original = &self.items[item];
        let rect = original.get_bounding_client_rect();
        let (scroll_x, scroll_y) = page_scroll();

        let Ok(clone) = original
            .clone_node_with_deep(true)
            .and_then(|n| n.dyn_into::<web::HtmlElement>().map_err(Into::into))
        else {
            log::warn!("marquee clone failed for item {item}");
            return;
        };
        let _ = clone.class_list().add_1("marquee-float-item");

        let alt = self.item_alt(item);
        let csharp = alt == "C#";
        let palette = palette_for(&alt);

        let style = clone.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("left", &format!("{}px", rect.left() + scroll_x));
        let _ = style.set_property("top", &format!("{}px", rect.top() + scroll_y));
        let _ = style.set_property("width", &format!("{}px", rect.width()));
        let _ = style.set_property("height", &format!("{}px", rect.height()));
        let _ = style.set_property("z-index", "1000");
        let _ = style.set_property("pointer-events", "none");
        let _ = style.set_property(
            "transition",
            "transform 0.6s cubic-bezier(0.34, 1.56, 0.64, 1), filter 0.6s ease, \
             left 0.6s ease, top 0.6s ease",
        );
        let _ = style.set_property("transform", "translate(0, 0) scale(1) rotate(0deg)");
        let _ = style.set_property("opacity", "1");
        let _ = style.set_property(
            "filter",
            if csharp { REST_FILTER_CSHARP } else { REST_FILTER },
        );

        if let Some(body) = dom::window_document().and_then(|d| d.body()) {
            let _ = body.append_child(&clone);
        }
        let _ = original.class_list().add_1("marquee-item-hidden");

        burst.spawn(
            Vec2::new(
                (rect.left() + rect.width() / 2.0) as f32,
                (rect.top() + rect.height() / 2.0) as f32,
            ),
            palette.particle,
            MARQUEE_BURST_COUNT,
        );

        self.float_pending = Some((clone.clone(), palette.glow.to_owned(), csharp));
        self.clone = Some(clone);
    }

    /// Re-anchor the clone onto the original's current position and reverse
    /// the color transition; the original is still scrolling underneath.
    fn begin_return(&mut self, item: usize) {
        let Some(clone) = &self.clone else { return };
        let rect = self.items[item].get_bounding_client_rect();
        let (scroll_x, scroll_y) = page_scroll();
        let csharp = self.item_alt(item) == "C#";

        let style = clone.style();
        let _ = style.set_property("transform", "translate(0, 0) scale(1) rotate(0deg)");
        let _ = style.set_property("left", &format!("{}px", rect.left() + scroll_x));
        let _ = style.set_property("top", &format!("{}px", rect.top() + scroll_y));
        let _ = style.set_property(
            "filter",
            if csharp { REST_FILTER_CSHARP } else { REST_FILTER },
        );
    }

    fn finish(&mut self, item: usize) {
        if let Some(clone) = self.clone.take() {
            clone.remove();
        }
        let _ = self.items[item].class_list().remove_1("marquee-item-hidden");
    }

    /// Keep a floating clone glued to its original across layout changes.
    fn reanchor_clone(&self) {
        let (Some(clone), Some(item)) = (&self.clone, self.engine.floating_item()) else {
            return;
        };
        let rect = self.items[item].get_bounding_client_rect();
        let (scroll_x, scroll_y) = page_scroll();
        let style = clone.style();
        let _ = style.set_property("left", &format!("{}px", rect.left() + scroll_x));
        let _ = style.set_property("top", &format!("{}px", rect.top() + scroll_y));
        let _ = style.set_property("width", &format!("{}px", rect.width()));
        let _ = style.set_property("height", &format!("{}px", rect.height()));
    }
}

fn page_scroll() -> (f64, f64) {
    web::window()
        .map(|w| {
            (
                w.scroll_x().unwrap_or(0.0),
                w.scroll_y().unwrap_or(0.0),
            )
        })
        .unwrap_or((0.0, 0.0))
}

pub fn init(document: &web::Document, burst: Rc<BurstLayer>) -> Result<()> {
    let Some(container) = document
        .query_selector(config::MARQUEE_CONTAINER_SELECTOR)
        .map_err(|e| anyhow!("querying marquee container: {e:?}"))?
    else {
        return Ok(());
    };
    let Some(track) = document
        .query_selector(config::MARQUEE_TRACK_SELECTOR)
        .map_err(|e| anyhow!("querying marquee track: {e:?}"))?
    else {
        return Ok(());
    };
    let track = track
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow!("marquee track is not an html element"))?;

    // Duplicate the item set twice so the loop can wrap by one set width
    // without a visible seam.
    let originals = collect_items(&track)?;
    if originals.is_empty() {
        return Ok(());
    }
    for _ in 0..2 {
        for item in &originals {
            let clone = item
                .clone_node_with_deep(true)
                .map_err(|e| anyhow!("duplicating marquee item: {e:?}"))?;
            track
                .append_child(&clone)
                .map_err(|e| anyhow!("appending marquee item: {e:?}"))?;
        }
    }
    let items = collect_items(&track)?;
    log::debug!("marquee running with {} items ({} per set)", items.len(), originals.len());

    let state = Rc::new(RefCell::new(MarqueeDom {
        engine: MarqueeLoop::new(),
        track,
        container,
        items,
        clone: None,
        float_pending: None,
        spans: Vec::new(),
        events: Vec::new(),
    }));

    let frame_state = state.clone();
    let raf = RafLoop::new(move || {
        frame_state.borrow_mut().frame(&burst);
        true
    });

    {
        let state = state.clone();
        dom::on_window_event("resize", move || state.borrow().reanchor_clone());
    }

    let started = Rc::new(std::cell::Cell::new(false));

    {
        let raf = raf.clone();
        let started = started.clone();
        dom::on_document_event("visibilitychange", move || {
            let hidden = dom::window_document()
                .map(|d| d.visibility_state() == web::VisibilityState::Hidden)
                .unwrap_or(false);
            if hidden {
                raf.stop();
            } else if started.get() {
                raf.start();
            }
        });
    }

    // Hold the start until the page load entry animation has settled.
    let start = {
        let raf = raf.clone();
        move || {
            let raf = raf.clone();
            let started = started.clone();
            dom::set_timeout(config::MARQUEE_START_DELAY_MS as i32, move || {
                started.set(true);
                raf.start();
            });
        }
    };
    if document.ready_state() == "complete" {
        start();
    } else {
        dom::on_window_event("load", start);
    }

    Ok(())
}

fn collect_items(track: &web::HtmlElement) -> Result<Vec<web::HtmlElement>> {
    let list = track
        .query_selector_all("img")
        .map_err(|e| anyhow!("querying marquee items: {e:?}"))?;
    let mut items = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(node) = list.get(i) {
            if let Ok(el) = node.dyn_into::<web::HtmlElement>() {
                items.push(el);
            }
        }
    }
    Ok(items)
}
