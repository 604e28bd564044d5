// Tests for the transient burst system: spawn ranges, drag, monotone
// draining, and bounded lifetime.

use fx_core::burst::ParticleBurst;
use fx_core::constants::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn spawn_appends_particles_with_bounded_speed_and_decay() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut burst = ParticleBurst::new();
    burst.spawn(Vec2::new(100.0, 50.0), "#ffffff", 20, &mut rng);

    assert_eq!(burst.len(), 20);
    for p in &burst.particles {
        assert_eq!(p.pos, Vec2::new(100.0, 50.0));
        let speed = p.vel.length();
        assert!(
            (BURST_SPEED_MIN..BURST_SPEED_MIN + BURST_SPEED_SPAN).contains(&speed),
            "speed out of range: {speed}"
        );
        assert_eq!(p.life, 1.0);
        assert!((BURST_DECAY_MIN..BURST_DECAY_MIN + BURST_DECAY_SPAN).contains(&p.decay));
        assert!((BURST_SIZE_MIN..BURST_SIZE_MIN + BURST_SIZE_SPAN).contains(&p.size));
    }
}

#[test]
fn count_decreases_monotonically_and_drains_fully() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut burst = ParticleBurst::new();
    burst.spawn(Vec2::ZERO, "#ffffff", 20, &mut rng);

    // Slowest possible decay empties the pool within 1/BURST_DECAY_MIN
    // frames (67 at 0.015).
    let deadline = (1.0 / BURST_DECAY_MIN).ceil() as usize + 1;
    let mut prev = burst.len();
    for _ in 0..deadline {
        burst.step();
        assert!(burst.len() <= prev, "count grew during a step");
        prev = burst.len();
    }
    assert!(burst.is_empty(), "particles alive after {deadline} frames");
}

#[test]
fn survivors_always_have_positive_life() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut burst = ParticleBurst::new();
    burst.spawn(Vec2::ZERO, "#00a2ff", 40, &mut rng);
    for _ in 0..100 {
        burst.step();
        for p in &burst.particles {
            assert!(p.life > 0.0);
        }
    }
}

#[test]
fn drag_damps_velocity_multiplicatively() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut burst = ParticleBurst::new();
    burst.spawn(Vec2::ZERO, "#ffffff", 1, &mut rng);
    let v0 = burst.particles[0].vel;

    burst.step();
    let p = &burst.particles[0];
    assert!((p.vel - v0 * BURST_DRAG).length() < 1e-5);
    // Position integrates the pre-drag velocity.
    assert!((p.pos - v0).length() < 1e-5);
}

#[test]
fn spawn_is_additive_across_events() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut burst = ParticleBurst::new();
    burst.spawn(Vec2::ZERO, "#ffffff", 15, &mut rng);
    burst.step();
    burst.spawn(Vec2::new(10.0, 10.0), "#e87d0d", 25, &mut rng);
    assert_eq!(burst.len(), 40);
}
