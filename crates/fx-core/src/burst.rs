//! Transient particle bursts spawned on discrete events.
//!
//! Spawning is a pure side effect; the owner steps the system every frame
//! and the list self-drains as lives expire. An empty list costs nothing,
//! so the owning loop can run unconditionally.

use crate::constants::*;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug)]
pub struct BurstParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in [0, 1]; alpha and radius scale with it.
    pub life: f32,
    pub decay: f32,
    pub size: f32,
    pub color: &'static str,
}

#[derive(Default)]
pub struct ParticleBurst {
    pub particles: Vec<BurstParticle>,
}

impl ParticleBurst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Append `count` particles at a point with randomized angle and speed.
    pub fn spawn(&mut self, at: Vec2, color: &'static str, count: usize, rng: &mut impl Rng) {
        self.particles.reserve(count);
        for _ in 0..count {
            let angle = rng.gen::<f32>() * std::f32::consts::TAU;
            let speed = BURST_SPEED_MIN + rng.gen::<f32>() * BURST_SPEED_SPAN;
            self.particles.push(BurstParticle {
                pos: at,
                vel: Vec2::from_angle(angle) * speed,
                life: 1.0,
                decay: BURST_DECAY_MIN + rng.gen::<f32>() * BURST_DECAY_SPAN,
                size: BURST_SIZE_MIN + rng.gen::<f32>() * BURST_SIZE_SPAN,
                color,
            });
        }
    }

    /// Integrate one frame and drop expired particles in place.
    pub fn step(&mut self) {
        self.particles.retain_mut(|p| {
            p.pos += p.vel;
            p.vel *= BURST_DRAG;
            p.life -= p.decay;
            p.life > 0.0
        });
    }
}
