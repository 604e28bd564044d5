//! Lattice of nodes carrying a decaying signal value.
//!
//! Circuit layout draws glowing traces between energized lattice neighbors;
//! grid layout draws vignette-faded dither squares and ignores signal for
//! sizing. Signal is injected by pointer proximity and, in circuit layout,
//! by a low-probability ambient trigger that keeps the scene alive.

use crate::constants::*;
use glam::Vec2;
use rand::Rng;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalLayout {
    Grid,
    Circuit,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown signal layout `{0}`, expected `grid` or `circuit`")]
pub struct LayoutParseError(pub String);

impl FromStr for SignalLayout {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(SignalLayout::Grid),
            "circuit" => Ok(SignalLayout::Circuit),
            other => Err(LayoutParseError(other.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GridNode {
    pub pos: Vec2,
    /// True on the one-cell border ring around the container.
    pub edge: bool,
    /// Current excitation, always within [0, 1].
    pub signal: f32,
    /// Per-frame decay, randomized per node.
    pub decay: f32,
    pub ix: u32,
    pub iy: u32,
}

pub struct SignalGrid {
    pub nodes: Vec<GridNode>,
    layout: SignalLayout,
    spacing: f32,
    fade_margin: f32,
    cols: u32,
    rows: u32,
    width: f32,
    height: f32,
}

impl SignalGrid {
    pub fn new(layout: SignalLayout, spacing: f32, fade_margin: f32) -> Self {
        Self {
            nodes: Vec::new(),
            layout,
            spacing,
            fade_margin,
            cols: 0,
            rows: 0,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn layout(&self) -> SignalLayout {
        self.layout
    }

    /// Effective node spacing; circuit layout uses a fixed wider pitch.
    pub fn spacing(&self) -> f32 {
        match self.layout {
            SignalLayout::Circuit => CIRCUIT_SPACING,
            SignalLayout::Grid => self.spacing,
        }
    }

    /// Regenerate the lattice for a new container size. Covers the viewport
    /// plus a one-cell border, centered. A zero-area container yields an
    /// empty lattice.
    pub fn resize(&mut self, width: f32, height: f32, rng: &mut impl Rng) {
        self.width = width;
        self.height = height;
        self.nodes.clear();
        if width <= 0.0 || height <= 0.0 {
            self.cols = 0;
            self.rows = 0;
            return;
        }

        let spacing = self.spacing();
        let cols = (width / spacing).ceil() as u32 + 2;
        let rows = (height / spacing).ceil() as u32 + 2;
        let off_x = (width - (cols - 2) as f32 * spacing) / 2.0 - spacing;
        let off_y = (height - (rows - 2) as f32 * spacing) / 2.0 - spacing;
        self.cols = cols;
        self.rows = rows;

        log::debug!("signal lattice {}x{} ({} nodes)", cols, rows, cols * rows);
        self.nodes.reserve((cols * rows) as usize);
        for ix in 0..cols {
            for iy in 0..rows {
                let edge = ix == 0 || ix == cols - 1 || iy == 0 || iy == rows - 1;
                self.nodes.push(GridNode {
                    pos: Vec2::new(off_x + ix as f32 * spacing, off_y + iy as f32 * spacing),
                    edge,
                    signal: 0.0,
                    decay: SIGNAL_DECAY_MIN + rng.gen::<f32>() * SIGNAL_DECAY_SPAN,
                    ix,
                    iy,
                });
            }
        }
    }

    /// Raise signal on nodes near the pointer. Injection never decreases an
    /// existing signal. Returns true if any node is energized afterwards.
    pub fn inject(&mut self, pointer: Vec2) -> bool {
        let radius_sq = SIGNAL_POINTER_RADIUS * SIGNAL_POINTER_RADIUS;
        let mut active = false;
        for node in &mut self.nodes {
            let dist_sq = node.pos.distance_squared(pointer);
            if dist_sq < radius_sq {
                let power = 1.0 - dist_sq / radius_sq;
                node.signal = node.signal.max(power).min(1.0);
                active = true;
            }
        }
        active
    }

    /// Ambient heartbeat: in circuit layout, a small chance per frame that a
    /// random node lights up fully. Returns true when a node was triggered.
    pub fn ambient_tick(&mut self, rng: &mut impl Rng) -> bool {
        if self.layout != SignalLayout::Circuit || self.nodes.is_empty() {
            return false;
        }
        if rng.gen::<f64>() < SIGNAL_AMBIENT_CHANCE {
            let i = rng.gen_range(0..self.nodes.len());
            self.nodes[i].signal = 1.0;
            return true;
        }
        false
    }

    /// Apply one frame of geometric decay, clamped at zero. Returns true
    /// while any node still carries signal.
    pub fn decay_step(&mut self) -> bool {
        let mut active = false;
        for node in &mut self.nodes {
            if node.signal > 0.0 {
                node.signal = (node.signal - node.decay).max(0.0);
                if node.signal > 0.0 {
                    active = true;
                }
            }
        }
        active
    }

    /// Index of the lattice neighbor below `i`, if any. Nodes are pushed
    /// column-major (outer ix, inner iy), so "down" is the next index.
    pub fn down_of(&self, i: usize) -> Option<usize> {
        let node = self.nodes.get(i)?;
        (node.iy + 1 < self.rows).then_some(i + 1)
    }

    /// Index of the lattice neighbor to the right of `i`, if any.
    pub fn right_of(&self, i: usize) -> Option<usize> {
        let node = self.nodes.get(i)?;
        (node.ix + 1 < self.cols).then(|| i + self.rows as usize)
    }

    /// Averaged signal across an edge; edges below `SIGNAL_EDGE_FLOOR` are
    /// not drawn.
    pub fn edge_strength(&self, a: usize, b: usize) -> f32 {
        (self.nodes[a].signal + self.nodes[b].signal) / 2.0
    }

    /// Cubic falloff of distance from the nearest container edge. 1 in the
    /// interior, approaching 0 at the boundary; negative distance (border
    /// nodes outside the container) yields 0.
    pub fn vignette(&self, p: Vec2) -> f32 {
        let min_dist = p
            .x
            .min(self.width - p.x)
            .min(p.y)
            .min(self.height - p.y);
        if min_dist < 0.0 {
            return 0.0;
        }
        let t = (min_dist / self.fade_margin).min(1.0);
        1.0 - (1.0 - t).powi(3)
    }
}
