//! Ambient background particle field with proximity links.
//!
//! Particles live in normalized [0,1) coordinates so motion speed is
//! resolution-independent; absolute pixel positions are derived each step
//! and fed to the spatial grid for the link pass.

use crate::constants::*;
use crate::spatial::SpatialGrid;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug)]
pub struct AmbientParticle {
    /// Normalized position, wraps toroidally.
    pub frac: Vec2,
    /// Absolute pixel position, derived from `frac`.
    pub pos: Vec2,
    /// Velocity in px per frame.
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
    /// Index into the front end's color palette.
    pub palette: usize,
}

/// Capability hints read from the environment. Any of them may be missing;
/// the budget falls back to conservative assumptions.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeviceProfile {
    pub memory_gb: Option<f64>,
    pub cores: Option<u32>,
    pub pixel_ratio: f64,
}

/// Desired pool size for a viewport. Zero-area viewports get zero particles.
pub fn particle_budget(viewport_w: f32, viewport_h: f32, profile: &DeviceProfile) -> usize {
    if viewport_w <= 0.0 || viewport_h <= 0.0 {
        return 0;
    }
    let mut budget = viewport_w / 12.0;

    // Missing hints count as weak hardware.
    let memory = profile.memory_gb.unwrap_or(2.0);
    let cores = profile.cores.unwrap_or(2);
    if memory < 4.0 {
        budget *= 0.6;
    }
    if cores < 4 {
        budget *= 0.7;
    }
    if profile.pixel_ratio > 2.0 {
        budget *= 0.8;
    }

    (budget.round() as usize).clamp(FIELD_MIN_PARTICLES, FIELD_MAX_PARTICLES)
}

/// A connection line between two particles, `a < b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: u32,
    pub b: u32,
    pub alpha: f32,
}

pub struct ParticleField {
    pub particles: Vec<AmbientParticle>,
    grid: SpatialGrid,
    width: f32,
    height: f32,
    positions: Vec<Vec2>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            grid: SpatialGrid::new(FIELD_CELL_SIZE),
            width: 0.0,
            height: 0.0,
            positions: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    fn sample_particle(&self, rng: &mut impl Rng, palette_len: usize) -> AmbientParticle {
        let frac = Vec2::new(rng.gen::<f32>(), rng.gen::<f32>());
        AmbientParticle {
            frac,
            pos: frac * Vec2::new(self.width, self.height),
            vel: Vec2::new(
                rng.gen_range(-FIELD_SPEED_MAX..FIELD_SPEED_MAX),
                rng.gen_range(-FIELD_SPEED_MAX..FIELD_SPEED_MAX),
            ),
            size: rng.gen_range(1.0..2.5),
            alpha: rng.gen_range(0.2..0.6),
            palette: rng.gen_range(0..palette_len.max(1)),
        }
    }

    /// Resize the viewport and grow or shrink the pool in place to `desired`.
    /// Shrinking truncates from the end; growing appends freshly sampled
    /// particles. Surviving particles keep their normalized positions.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        desired: usize,
        palette_len: usize,
        rng: &mut impl Rng,
    ) {
        self.width = width;
        self.height = height;
        self.particles.truncate(desired);
        for p in &mut self.particles {
            p.pos = p.frac * Vec2::new(width, height);
        }
        while self.particles.len() < desired {
            let p = self.sample_particle(rng, palette_len);
            self.particles.push(p);
        }
    }

    /// Advance one frame: move in normalized space, wrap, derive pixel
    /// positions, rebuild the spatial partition.
    pub fn step(&mut self) {
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }
        let dims = Vec2::new(self.width, self.height);
        self.positions.clear();
        for p in &mut self.particles {
            p.frac += p.vel / dims;
            p.frac.x = wrap_unit(p.frac.x);
            p.frac.y = wrap_unit(p.frac.y);
            p.pos = p.frac * dims;
            self.positions.push(p.pos);
        }
        self.grid.rebuild(&self.positions);
    }

    /// Collect connection lines. Pairs are visited once (`a < b`) and each
    /// particle stops scanning once it has contributed its cap of links.
    pub fn links(&self, out: &mut Vec<Link>) {
        out.clear();
        for (i, p) in self.particles.iter().enumerate() {
            let mut made = 0usize;
            for &j in self.grid.neighbors(p.pos).iter() {
                let j = j as usize;
                if j <= i {
                    continue;
                }
                let dist = p.pos.distance(self.particles[j].pos);
                if dist < FIELD_LINK_DIST {
                    out.push(Link {
                        a: i as u32,
                        b: j as u32,
                        alpha: FIELD_LINK_MAX_ALPHA * (1.0 - dist / FIELD_LINK_DIST),
                    });
                    made += 1;
                    if made >= FIELD_LINKS_PER_PARTICLE {
                        break;
                    }
                }
            }
        }
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn wrap_unit(v: f32) -> f32 {
    if v < 0.0 {
        v + 1.0
    } else if v >= 1.0 {
        v - 1.0
    } else {
        v
    }
}
