// Tests for the ambient particle field: pool resize semantics, toroidal
// wrap, device-capability budgeting, and link-pass invariants.

use fx_core::constants::*;
use fx_core::field::{particle_budget, DeviceProfile, Link, ParticleField};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn resize_reaches_desired_count() {
    let mut rng = rng();
    let mut field = ParticleField::new();
    field.resize(1200.0, 800.0, 90, 3, &mut rng);
    assert_eq!(field.len(), 90);
    field.resize(1200.0, 800.0, 40, 3, &mut rng);
    assert_eq!(field.len(), 40);
    field.resize(1200.0, 800.0, 120, 3, &mut rng);
    assert_eq!(field.len(), 120);
}

#[test]
fn shrinking_truncates_from_the_end() {
    let mut rng = rng();
    let mut field = ParticleField::new();
    field.resize(1000.0, 600.0, 60, 3, &mut rng);
    let kept: Vec<Vec2> = field.particles[..30].iter().map(|p| p.frac).collect();

    field.resize(1000.0, 600.0, 30, 3, &mut rng);
    for (i, p) in field.particles.iter().enumerate() {
        assert_eq!(p.frac, kept[i], "particle {i} changed during truncation");
    }
}

#[test]
fn growing_preserves_existing_and_appends() {
    let mut rng = rng();
    let mut field = ParticleField::new();
    field.resize(1000.0, 600.0, 30, 3, &mut rng);
    let existing: Vec<Vec2> = field.particles.iter().map(|p| p.frac).collect();

    field.resize(1000.0, 600.0, 50, 3, &mut rng);
    assert_eq!(field.len(), 50);
    for (i, frac) in existing.iter().enumerate() {
        assert_eq!(field.particles[i].frac, *frac);
    }
}

#[test]
fn resize_rescales_pixel_positions_from_fractions() {
    let mut rng = rng();
    let mut field = ParticleField::new();
    field.resize(1000.0, 500.0, 20, 3, &mut rng);
    field.resize(2000.0, 1000.0, 20, 3, &mut rng);
    for p in &field.particles {
        assert!((p.pos.x - p.frac.x * 2000.0).abs() < 1e-3);
        assert!((p.pos.y - p.frac.y * 1000.0).abs() < 1e-3);
    }
}

#[test]
fn step_keeps_fractions_in_unit_square() {
    let mut rng = rng();
    let mut field = ParticleField::new();
    field.resize(400.0, 300.0, 80, 3, &mut rng);
    for _ in 0..500 {
        field.step();
    }
    for p in &field.particles {
        assert!((0.0..1.0).contains(&p.frac.x), "x escaped: {}", p.frac.x);
        assert!((0.0..1.0).contains(&p.frac.y), "y escaped: {}", p.frac.y);
    }
}

#[test]
fn zero_area_viewport_yields_zero_particles() {
    let profile = DeviceProfile::default();
    assert_eq!(particle_budget(0.0, 600.0, &profile), 0);
    assert_eq!(particle_budget(1200.0, 0.0, &profile), 0);

    let mut rng = rng();
    let mut field = ParticleField::new();
    field.resize(0.0, 0.0, particle_budget(0.0, 0.0, &profile), 3, &mut rng);
    assert!(field.is_empty());
    // Stepping an empty field on a degenerate viewport must not panic.
    field.step();
    let mut links = Vec::new();
    field.links(&mut links);
    assert!(links.is_empty());
}

#[test]
fn budget_respects_bounds_and_capability_hints() {
    let strong = DeviceProfile {
        memory_gb: Some(16.0),
        cores: Some(12),
        pixel_ratio: 1.0,
    };
    let weak = DeviceProfile {
        memory_gb: Some(2.0),
        cores: Some(2),
        pixel_ratio: 3.0,
    };
    let unknown = DeviceProfile {
        memory_gb: None,
        cores: None,
        pixel_ratio: 1.0,
    };

    for width in [320.0, 800.0, 1440.0, 3840.0] {
        let b = particle_budget(width, 900.0, &strong);
        assert!((FIELD_MIN_PARTICLES..=FIELD_MAX_PARTICLES).contains(&b));
    }
    assert!(particle_budget(1440.0, 900.0, &weak) < particle_budget(1440.0, 900.0, &strong));
    // Missing hints fall back to the conservative path, not the strong one.
    assert_eq!(
        particle_budget(1440.0, 900.0, &unknown),
        particle_budget(
            1440.0,
            900.0,
            &DeviceProfile {
                memory_gb: Some(2.0),
                cores: Some(2),
                pixel_ratio: 1.0
            }
        )
    );
}

#[test]
fn links_are_ordered_capped_and_within_range() {
    let mut rng = rng();
    let mut field = ParticleField::new();
    field.resize(600.0, 400.0, 120, 3, &mut rng);
    field.step();

    let mut links: Vec<Link> = Vec::new();
    field.links(&mut links);

    let mut per_particle = vec![0usize; field.len()];
    for link in &links {
        assert!(link.a < link.b, "pair not ordered: {link:?}");
        let d = field.particles[link.a as usize]
            .pos
            .distance(field.particles[link.b as usize].pos);
        assert!(d < FIELD_LINK_DIST);
        assert!(link.alpha > 0.0 && link.alpha <= FIELD_LINK_MAX_ALPHA);
        per_particle[link.a as usize] += 1;
    }
    for (i, n) in per_particle.iter().enumerate() {
        assert!(
            *n <= FIELD_LINKS_PER_PARTICLE,
            "particle {i} emitted {n} links"
        );
    }
}

#[test]
fn link_alpha_falls_off_with_distance() {
    let mut rng = rng();
    let mut field = ParticleField::new();
    field.resize(600.0, 400.0, 100, 3, &mut rng);
    field.step();

    let mut links = Vec::new();
    field.links(&mut links);
    for link in &links {
        let d = field.particles[link.a as usize]
            .pos
            .distance(field.particles[link.b as usize].pos);
        let expected = FIELD_LINK_MAX_ALPHA * (1.0 - d / FIELD_LINK_DIST);
        assert!((link.alpha - expected).abs() < 1e-4);
    }
}
