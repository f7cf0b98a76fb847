// Host-side tests for the particle field and motion variants.

use field_core::*;
use glam::Vec2;

const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

fn step_many(field: &mut ParticleField, variant: &VariantParameters, frames: usize, coh: f32) {
    let ctx = StepContext {
        variant,
        drift_multiplier: 1.0,
        energy: 0.5,
    };
    for i in 0..frames {
        let breath = breath_phase(i as f32 / 60.0);
        let locus = field_core::scene::locus(BOUNDS.x, BOUNDS.y, breath);
        field.step(locus, breath, coh, &ctx);
    }
}

#[test]
fn construction_clamps_population() {
    assert_eq!(ParticleField::new(BOUNDS, 0, 1).len(), MIN_PARTICLES);
    assert_eq!(ParticleField::new(BOUNDS, 5000, 1).len(), MAX_PARTICLES);
    assert_eq!(ParticleField::new(BOUNDS, 720, 1).len(), 720);
}

#[test]
fn resize_stays_in_bounds_for_any_target() {
    let mut field = ParticleField::new(BOUNDS, 720, 3);
    for target in [0usize, 10, 349, 351, 800, 1099, 1101, 100_000] {
        for _ in 0..200 {
            let len = field.resize(target);
            assert!(
                (MIN_PARTICLES..=MAX_PARTICLES).contains(&len),
                "len {len} out of range after resize({target})"
            );
        }
        let expected = target.clamp(MIN_PARTICLES, MAX_PARTICLES);
        assert_eq!(field.len(), expected, "did not converge to {expected}");
    }
}

#[test]
fn resize_moves_at_most_one_batch() {
    let mut field = ParticleField::new(BOUNDS, 720, 3);
    assert_eq!(field.resize(1100), 720 + RESIZE_BATCH);
    assert_eq!(field.resize(730), 730);
    assert_eq!(field.resize(350), 730 - RESIZE_BATCH);
}

#[test]
fn shrinking_removes_oldest_first() {
    let mut field = ParticleField::new(BOUNDS, 400, 9);
    let survivors: Vec<Particle> = field.particles().skip(RESIZE_BATCH).copied().collect();
    field.resize(MIN_PARTICLES);
    let now: Vec<Particle> = field.particles().copied().collect();
    assert_eq!(now, survivors);
}

#[test]
fn particles_spawn_with_documented_attributes() {
    let field = ParticleField::new(BOUNDS, 1100, 11);
    for p in field.particles() {
        assert!((0.4..1.0).contains(&p.life));
        assert!((0.0..1000.0).contains(&p.phase_seed));
        assert!(p.position.x >= 0.0 && p.position.x <= BOUNDS.x);
        assert!(p.position.y >= 0.0 && p.position.y <= BOUNDS.y);
        let speed = p.velocity.length();
        assert!(speed >= 0.2 - 1e-4 && speed <= 1.2 + 1e-4, "initial speed {speed}");
    }
}

#[test]
fn wrap_around_reenters_at_opposite_margin() {
    let b = BOUNDS;
    assert_eq!(wrap_position(Vec2::new(b.x + 21.0, 100.0), b).x, -20.0);
    assert_eq!(wrap_position(Vec2::new(-21.0, 100.0), b).x, b.x + 20.0);
    assert_eq!(wrap_position(Vec2::new(100.0, b.y + 20.5), b).y, -20.0);
    assert_eq!(wrap_position(Vec2::new(100.0, -20.5), b).y, b.y + 20.0);
    // Inside the margin nothing moves.
    let inside = Vec2::new(b.x + 19.0, -19.0);
    assert_eq!(wrap_position(inside, b), inside);
}

#[test]
fn stepped_particles_stay_within_wrapped_area_and_speed_ceiling() {
    let mut field = ParticleField::new(BOUNDS, 600, 21);
    for mode in [
        MotionMode::Lattice,
        MotionMode::Laminar,
        MotionMode::Swirl,
        MotionMode::Burst,
    ] {
        let variant = VariantParameters {
            motion_mode: mode,
            ..VariantParameters::from_seed(21, 0.9)
        };
        step_many(&mut field, &variant, 240, 0.5);
        let ceiling = SPEED_CEILING * 1.2 * 1.15 + 1e-3;
        for p in field.particles() {
            assert!(p.position.is_finite() && p.velocity.is_finite());
            assert!(p.velocity.length() <= ceiling, "{mode:?} speed over ceiling");
            assert!(p.position.x >= -WRAP_MARGIN && p.position.x <= BOUNDS.x + WRAP_MARGIN);
            assert!(p.position.y >= -WRAP_MARGIN && p.position.y <= BOUNDS.y + WRAP_MARGIN);
        }
    }
}

#[test]
fn same_seed_gives_same_motion() {
    let variant = VariantParameters::from_seed(4242, 0.5);
    let mut a = ParticleField::new(BOUNDS, 500, variant.seed);
    let mut b = ParticleField::new(BOUNDS, 500, variant.seed);
    step_many(&mut a, &variant, 90, 0.3);
    step_many(&mut b, &variant, 90, 0.3);
    assert!(a.particles().eq(b.particles()));
}

#[test]
fn full_cohesion_pulls_towards_locus() {
    let variant = VariantParameters::from_seed(5, 0.5);
    let mut field = ParticleField::new(BOUNDS, 500, 5);
    let locus = Vec2::new(400.0, 360.0);
    let mean_distance = |f: &ParticleField| {
        f.particles().map(|p| p.position.distance(locus)).sum::<f32>() / f.len() as f32
    };
    let before = mean_distance(&field);
    let ctx = StepContext {
        variant: &variant,
        drift_multiplier: 1.0,
        energy: 0.5,
    };
    for _ in 0..60 {
        field.step(locus, 0.5, 1.0, &ctx);
    }
    assert!(mean_distance(&field) < before, "cohesion 1 should converge on the locus");
}

#[test]
fn order_strength_mode_multipliers_and_distance_floor() {
    let base = order_strength(MotionMode::Laminar, 0.5, 180.0, 1.0);
    assert!((base - (0.12 + 1.55 * 0.5)).abs() < 1e-6);
    assert!((order_strength(MotionMode::Lattice, 0.5, 180.0, 1.0) - base * 1.15).abs() < 1e-6);
    assert!((order_strength(MotionMode::Burst, 0.5, 180.0, 1.0) - base * 0.95).abs() < 1e-6);
    assert_eq!(order_strength(MotionMode::Swirl, 0.5, 180.0, 1.0), base);
    assert_eq!(
        order_strength(MotionMode::Laminar, 0.5, 0.0, 1.0),
        order_strength(MotionMode::Laminar, 0.5, 40.0, 1.0)
    );
}

#[test]
fn sprites_scale_with_cohesion_and_life() {
    let mut field = ParticleField::new(BOUNDS, 400, 8);
    let chem = ChemistryState::default();
    let mut out = Vec::new();

    field.sprites(0.0, &chem, true, &mut out);
    assert_eq!(out.len(), field.len());
    for (s, p) in out.iter().zip(field.particles()) {
        assert!((s.alpha - 16.0 * p.life).abs() < 1e-4);
        assert!((s.size - 1.1 * p.life).abs() < 1e-4);
        assert!(s.trail.is_none(), "no trails at zero cohesion");
        assert!(s.link.is_none(), "no links below the cohesion threshold");
    }

    field.sprites(1.0, &chem, false, &mut out);
    assert!(out.iter().all(|s| s.link.is_none()), "links need chemistry visible");
}

#[test]
fn links_follow_chemistry_chance_and_energy() {
    let mut field = ParticleField::new(BOUNDS, 1000, 13);
    let chem = ChemistryState::default();
    let coh = 0.9;
    let mut out = Vec::new();
    field.sprites(coh, &chem, true, &mut out);
    assert_eq!(out.len(), 1000);

    let link_length = 10.0 + 8.0 * chem.energy;
    let mut links = 0;
    for (s, p) in out.iter().zip(field.particles()) {
        if let Some(link) = s.link {
            links += 1;
            assert!((link.to - (p.position + p.velocity * link_length)).length() < 1e-3);
            assert!((link.alpha - (18.0 + 45.0 * coh)).abs() < 1e-4);
        }
    }
    // chance 0.07 over 1000 particles; wide enough for any seed.
    let expected = chem.link_chance() * out.len() as f32;
    assert!(links > 0, "visible chemistry above the threshold draws links");
    assert!(
        (links as f32 - expected).abs() < 40.0,
        "links {links}, expected about {expected}"
    );
}

#[test]
fn trails_appear_on_their_frame_period() {
    let variant = VariantParameters::from_seed(2, 0.5);
    let mut field = ParticleField::new(BOUNDS, 400, 2);
    let chem = ChemistryState::default();
    let mut out = Vec::new();
    let mut frames_with_trails = 0;
    for _ in 0..100 {
        step_many(&mut field, &variant, 1, 1.0);
        field.sprites(1.0, &chem, false, &mut out);
        if out.iter().all(|s| s.trail.is_some()) {
            frames_with_trails += 1;
        } else {
            assert!(out.iter().all(|s| s.trail.is_none()));
        }
    }
    // Period floor(lerp(26, 10, 1.0)) = 10 frames.
    assert_eq!(frames_with_trails, 10);
}
