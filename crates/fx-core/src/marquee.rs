//! Infinite marquee with center-detection pop-out.
//!
//! The track shows the original item sequence duplicated three times; the
//! scroll offset is corrected by one set width on wrap so the loop never
//! visually pops. Pop-out transitions are a timed state machine: every
//! phase carries its deadline and is advanced inside `tick`, so a state
//! change can never race a stale timer callback. Items are referenced by
//! index into the live (duplicated) item list, never by owning handle.

use crate::constants::*;

/// Horizontal extent of an item or the container, in shared client coords.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ItemSpan {
    pub left: f32,
    pub width: f32,
}

impl ItemSpan {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    #[inline]
    pub fn center(&self) -> f32 {
        self.left + self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Live item geometry for one frame of center detection.
pub struct MarqueeGeometry<'a> {
    pub container: ItemSpan,
    pub items: &'a [ItemSpan],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarqueePhase {
    Cruising,
    /// An item's clone is popped out in the overlay layer.
    Floating { item: usize, until_ms: f64 },
    /// The clone is animating back onto the (still scrolling) original.
    Returning { item: usize, until_ms: f64 },
    /// Detection is suppressed after a pop completes.
    Cooldown { until_ms: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarqueeEvent {
    /// Pop this item: clone it, hide the original, burst, float the clone.
    Trigger { item: usize },
    /// Re-anchor the clone to the original's current position and reverse
    /// the color transition.
    BeginReturn { item: usize },
    /// Remove the clone and unhide the original.
    Finished { item: usize },
}

pub struct MarqueeLoop {
    pub scroll_pos: f32,
    speed: f32,
    phase: MarqueePhase,
    /// Just-popped item excluded from detection until the deadline passes.
    recently: Option<(usize, f64)>,
}

impl MarqueeLoop {
    pub fn new() -> Self {
        Self {
            scroll_pos: 0.0,
            speed: MARQUEE_BASE_SPEED,
            phase: MarqueePhase::Cruising,
            recently: None,
        }
    }

    pub fn phase(&self) -> MarqueePhase {
        self.phase
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Index of the currently popped item, if any. At most one item is ever
    /// floating: the phase enum holds a single slot.
    pub fn floating_item(&self) -> Option<usize> {
        match self.phase {
            MarqueePhase::Floating { item, .. } | MarqueePhase::Returning { item, .. } => {
                Some(item)
            }
            _ => None,
        }
    }

    pub fn is_excluded(&self, item: usize) -> bool {
        matches!(self.recently, Some((i, _)) if i == item)
    }

    /// Advance one frame. While `focus_mode` is set the marquee is fully
    /// paused (no motion, no deadlines) but the caller keeps scheduling.
    pub fn tick(
        &mut self,
        now_ms: f64,
        set_width: f32,
        focus_mode: bool,
        geometry: Option<&MarqueeGeometry<'_>>,
        out: &mut Vec<MarqueeEvent>,
    ) {
        if focus_mode {
            return;
        }

        self.advance_phase(now_ms, out);

        if let Some((_, clear_at)) = self.recently {
            if now_ms >= clear_at {
                self.recently = None;
            }
        }

        // Ease toward the target speed; never snap.
        let target = match self.phase {
            MarqueePhase::Floating { .. } | MarqueePhase::Returning { .. } => MARQUEE_SLOW_SPEED,
            _ => MARQUEE_BASE_SPEED,
        };
        self.speed += (target - self.speed) * MARQUEE_SPEED_EASE;
        self.scroll_pos -= self.speed;

        // Modular wrap: correct by exactly one set width, preserving the
        // visual offset modulo the set width.
        if set_width > 0.0 {
            if self.scroll_pos <= -set_width {
                self.scroll_pos += set_width;
            } else if self.scroll_pos >= set_width {
                self.scroll_pos -= set_width;
            }
        }

        if self.phase == MarqueePhase::Cruising {
            if let Some(geo) = geometry {
                if let Some(item) = self.detect_center(geo) {
                    self.phase = MarqueePhase::Floating {
                        item,
                        until_ms: now_ms + MARQUEE_FLOAT_MS,
                    };
                    out.push(MarqueeEvent::Trigger { item });
                }
            }
        }
    }

    fn advance_phase(&mut self, now_ms: f64, out: &mut Vec<MarqueeEvent>) {
        match self.phase {
            MarqueePhase::Floating { item, until_ms } if now_ms >= until_ms => {
                self.phase = MarqueePhase::Returning {
                    item,
                    until_ms: now_ms + MARQUEE_RETURN_MS,
                };
                out.push(MarqueeEvent::BeginReturn { item });
            }
            MarqueePhase::Returning { item, until_ms } if now_ms >= until_ms => {
                self.recently = Some((item, now_ms + MARQUEE_RETRIGGER_CLEAR_MS));
                self.phase = MarqueePhase::Cooldown {
                    until_ms: now_ms + MARQUEE_COOLDOWN_MS,
                };
                out.push(MarqueeEvent::Finished { item });
            }
            MarqueePhase::Cooldown { until_ms } if now_ms >= until_ms => {
                self.phase = MarqueePhase::Cruising;
            }
            _ => {}
        }
    }

    /// First fully-visible item whose center lies within the detection
    /// threshold of the container's visual center, skipping the
    /// recently-triggered item.
    fn detect_center(&self, geo: &MarqueeGeometry<'_>) -> Option<usize> {
        let center = geo.container.center() - MARQUEE_CENTER_BIAS;
        for (i, item) in geo.items.iter().enumerate() {
            if self.is_excluded(i) {
                continue;
            }
            if item.left > geo.container.left && item.right() < geo.container.right() {
                if (item.center() - center).abs() < MARQUEE_DETECT_THRESHOLD {
                    return Some(i);
                }
            }
        }
        None
    }
}

impl Default for MarqueeLoop {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------- Item color palette ----------------

/// Glow (rgba) and particle (hex) colors keyed by item category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemPalette {
    pub glow: &'static str,
    pub particle: &'static str,
}

pub const DEFAULT_PALETTE: ItemPalette = ItemPalette {
    glow: "rgba(255, 255, 255, 0.8)",
    particle: "#ffffff",
};

const PALETTE_TABLE: &[(&str, ItemPalette)] = &[
    ("unreal", ItemPalette { glow: "rgba(255, 255, 255, 0.8)", particle: "#ffffff" }),
    ("unity", ItemPalette { glow: "rgba(200, 200, 200, 0.8)", particle: "#cccccc" }),
    ("roblox", ItemPalette { glow: "rgba(0, 162, 255, 0.8)", particle: "#00a2ff" }),
    ("gamemaker", ItemPalette { glow: "rgba(131, 191, 79, 0.8)", particle: "#83bf4f" }),
    ("c++", ItemPalette { glow: "rgba(0, 89, 156, 0.8)", particle: "#00599c" }),
    ("c#", ItemPalette { glow: "rgba(130, 48, 133, 0.8)", particle: "#9b4993" }),
    ("js", ItemPalette { glow: "rgba(247, 223, 30, 0.8)", particle: "#f7df1e" }),
    ("javascript", ItemPalette { glow: "rgba(247, 223, 30, 0.8)", particle: "#f7df1e" }),
    ("blender", ItemPalette { glow: "rgba(232, 125, 13, 0.8)", particle: "#e87d0d" }),
];

/// Look up an item's colors by substring match on its label. The table is
/// ordered and the first match wins; labels matching nothing get white.
pub fn palette_for(label: &str) -> ItemPalette {
    let label = label.to_lowercase();
    PALETTE_TABLE
        .iter()
        .find(|(key, _)| label.contains(key))
        .map(|(_, palette)| *palette)
        .unwrap_or(DEFAULT_PALETTE)
}
