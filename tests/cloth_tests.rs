// Cloth solver integration tests
//
// Exercises the public API the way a driver would: build a state, call
// tick, read particle and constraint views back out.

use bevy::math::{Rect, Vec2};
use cloth2d::{ClothConfig, ClothState, SolverParams};
use rand::Rng;

const SPACING: f32 = 10.0;
const DT: f32 = 0.1;
const GRAVITY_DOWN: Vec2 = Vec2::new(0.0, 10.0);

/// 3x3 grid, spacing 10, origin at (0, 0), top row fixed. Bounds are
/// far away so they only matter when a test moves them closer.
fn small_cloth(gravity: Vec2) -> ClothState {
    let config = ClothConfig {
        cols: 3,
        rows: 3,
        spacing: Vec2::splat(SPACING),
        origin: Vec2::ZERO,
        fix_top_row: true,
    };
    ClothState::new(
        &config,
        SolverParams::default(),
        gravity,
        Rect::new(0.0, 0.0, 800.0, 600.0),
    )
}

/// Fixed particles hold their build position no matter how long the
/// simulation runs or how hard gravity pulls.
#[test]
fn fixed_particles_never_move() {
    let mut state = small_cloth(Vec2::new(0.0, 500.0));

    for _ in 0..50 {
        state.tick(DT, None);
    }

    for col in 0..3 {
        let anchor = state.mesh().particle_at(col, 0);
        assert!(anchor.fixed);
        assert_eq!(anchor.position, Vec2::new(col as f32 * SPACING, 0.0));
    }
}

/// With no gravity and every constraint at rest length, a tick is a
/// fixed point: nothing moves, bit for bit.
#[test]
fn built_cloth_is_at_equilibrium_without_gravity() {
    let mut state = small_cloth(Vec2::ZERO);
    let before: Vec<Vec2> = state.particles().iter().map(|p| p.position).collect();

    for _ in 0..10 {
        state.tick(DT, None);
    }

    let after: Vec<Vec2> = state.particles().iter().map(|p| p.position).collect();
    assert_eq!(before, after);
}

/// One tick under gravity displaces every free particle downward
/// (y grows in simulation space) and leaves the anchors alone.
#[test]
fn gravity_sags_free_rows_downward() {
    let mut state = small_cloth(GRAVITY_DOWN);
    let before: Vec<Vec2> = state.particles().iter().map(|p| p.position).collect();

    state.tick(DT, None);

    for (index, particle) in state.particles().iter().enumerate() {
        if particle.fixed {
            assert_eq!(particle.position, before[index]);
        } else {
            assert!(
                particle.position.y > before[index].y,
                "particle {} should have sagged: {} -> {}",
                index,
                before[index].y,
                particle.position.y
            );
        }
    }
}

/// The one-sweep solver lets the cloth stretch under load, but the sag
/// settles into a bounded envelope around the rest length instead of
/// growing without limit.
#[test]
fn sag_remains_bounded_over_time() {
    let mut state = small_cloth(GRAVITY_DOWN);

    for _ in 0..51 {
        state.tick(DT, None);
    }

    let mut checked = 0;
    for constraint in state.constraints().iter() {
        // Vertical constraints anchored in the fixed top row.
        if constraint.b == constraint.a + 3 && constraint.a < 3 {
            let length = constraint.current_length(state.particles());
            assert!(
                length > SPACING && length < 2.5 * SPACING,
                "top-row vertical constraint length {} out of envelope",
                length
            );
            checked += 1;
        }
    }
    assert_eq!(checked, 3);
}

/// Cutting deactivates the nearest constraint permanently: it stops
/// relaxing, stops rendering as active, and can never be hit again.
#[test]
fn cut_deactivates_nearest_constraint_permanently() {
    let mut state = small_cloth(Vec2::ZERO);
    let active_before = state.active_constraint_count();

    // Midpoint of the horizontal edge between (0, 1) and (1, 1).
    let target = Vec2::new(5.0, 10.0);
    let index = state.cut_at(target).expect("cut should hit");

    let constraint = state.constraints().get(index).expect("index stays valid");
    assert!(!constraint.active);
    assert_eq!(state.active_constraint_count(), active_before - 1);
    assert_eq!(state.constraint_count(), active_before); // slot not reclaimed

    // The nearest remaining active constraint is 5 units away, outside
    // the default cut radius, so a repeat query misses.
    assert_eq!(state.cut_at(target), None);

    // A cut edge exerts no further corrections: the rest of the mesh is
    // at equilibrium, so ticking changes nothing.
    let before: Vec<Vec2> = state.particles().iter().map(|p| p.position).collect();
    for _ in 0..10 {
        state.tick(DT, None);
    }
    let after: Vec<Vec2> = state.particles().iter().map(|p| p.position).collect();
    assert_eq!(before, after);
}

/// A cut query with nothing in range is a normal miss, not an error,
/// and leaves the constraint set untouched.
#[test]
fn cut_miss_changes_nothing() {
    let mut state = small_cloth(Vec2::ZERO);
    let active_before = state.active_constraint_count();

    assert_eq!(state.cut_at(Vec2::new(400.0, 300.0)), None);
    assert_eq!(state.active_constraint_count(), active_before);
}

/// Tight bounds act as a floor. The clamp runs during integration, so
/// the relaxation sweep can push a compressed edge slightly past the
/// floor before the next tick re-clamps it; the cloth settles against
/// the bound instead of falling through.
#[test]
fn bounds_confine_the_cloth() {
    let mut state = small_cloth(GRAVITY_DOWN);
    let floor = 15.0;
    state.set_bounds(Rect::new(0.0, 0.0, 800.0, floor));

    for _ in 0..20 {
        state.tick(DT, None);
    }

    let max_y = state
        .particles()
        .iter()
        .map(|p| p.position.y)
        .fold(f32::MIN, f32::max);

    assert!(
        max_y > floor - 1.0,
        "cloth should rest on the floor, max y = {max_y}"
    );
    assert!(
        max_y < floor + SPACING,
        "cloth pushed too far through the floor: {max_y}"
    );
    for particle in state.particles() {
        assert!(particle.position.y.is_finite());
        assert!(particle.position.y >= -1.0);
    }
}

/// The configured cut radius is honored: a point that misses at the
/// default radius hits once the radius is widened.
#[test]
fn cut_radius_controls_the_query() {
    let mut near_only = small_cloth(Vec2::ZERO);
    let mut generous = ClothState::new(
        &ClothConfig {
            cols: 3,
            rows: 3,
            spacing: Vec2::splat(SPACING),
            origin: Vec2::ZERO,
            fix_top_row: true,
        },
        SolverParams::default().with_cut_radius(20.0),
        Vec2::ZERO,
        Rect::new(0.0, 0.0, 800.0, 600.0),
    );

    // 5 units below the bottom row: outside the default radius of 4,
    // inside the widened one.
    let probe = Vec2::new(5.0, 25.0);
    assert_eq!(near_only.cut_at(probe), None);
    assert!(generous.cut_at(probe).is_some());
}

/// A zero time scale freezes integration outright: gravity accumulates
/// into the accelerators but never reaches the positions.
#[test]
fn zero_time_scale_freezes_the_cloth() {
    let mut state = small_cloth(GRAVITY_DOWN);
    state.params_mut().time_scale = 0.0;
    let before: Vec<Vec2> = state.particles().iter().map(|p| p.position).collect();

    for _ in 0..5 {
        state.tick(DT, None);
    }

    let after: Vec<Vec2> = state.particles().iter().map(|p| p.position).collect();
    assert_eq!(before, after);
}

/// Hammering the demo-sized cloth with random cut points never panics,
/// never produces non-finite positions, and keeps the active count
/// consistent with the number of reported hits.
#[test]
fn random_cuts_stay_consistent() {
    let mut state = ClothState::default();
    let mut rng = rand::rng();
    let total = state.constraint_count();
    let mut hits = 0;

    for _ in 0..200 {
        let point = Vec2::new(
            rng.random_range(0.0..800.0),
            rng.random_range(0.0..600.0),
        );
        if state.tick(1.0 / 30.0, Some(point)).is_some() {
            hits += 1;
        }
    }

    assert_eq!(state.active_constraint_count(), total - hits);
    assert!(
        state
            .particles()
            .iter()
            .all(|p| p.position.x.is_finite() && p.position.y.is_finite())
    );
}
