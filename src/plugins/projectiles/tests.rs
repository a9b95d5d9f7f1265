//! Projectile pool tests.
//!
//! Spread emission is random by design, so these tests seed `StdRng` and assert
//! bounds and counts rather than exact angles.

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::pool::{OFF_STAGE, PoolConfig, Pooled};
use crate::common::test_utils::{insert_time, run_system_once};
use crate::common::tunables::Tunables;

use super::components::{Projectile, ProjectileSpawn};
use super::pool::ProjectilePool;
use super::systems;

// --------------------------------------------------------------------------------------
// Helpers
// --------------------------------------------------------------------------------------

fn shot(pos: Vec2, dir: Vec2) -> ProjectileSpawn {
    ProjectileSpawn {
        pos,
        dir,
        speed: 5.0,
        health: 1,
        color: Color::srgb(1.0, 0.3, 0.3),
        size: 6.0,
    }
}

fn arena() -> Rect {
    Rect::new(-500.0, -500.0, 500.0, 500.0)
}

fn angle_between(a: Vec2, b: Vec2) -> f32 {
    a.angle_to(b).abs()
}

// --------------------------------------------------------------------------------------
// Emission
// --------------------------------------------------------------------------------------

#[test]
fn emit_single_activates_with_spawn_parameters() {
    let mut pool = ProjectilePool::new(PoolConfig::new(4, 4, 1));
    let h = pool
        .emit_single(shot(Vec2::new(10.0, 20.0), Vec2::new(3.0, 4.0)))
        .expect("pool has room");

    let p = pool.get(h).unwrap();
    assert_eq!(p.pos, Vec2::new(10.0, 20.0));
    assert!((p.dir - Vec2::new(0.6, 0.8)).length() < 1e-6, "direction is normalized");
    assert_eq!(p.speed, 5.0);
    assert_eq!(p.health, 1);
    assert_eq!(p.lifetime, 0.0);
    assert_eq!(p.size, 6.0);
}

#[test]
fn emit_single_with_zero_direction_still_has_unit_direction() {
    let mut pool = ProjectilePool::new(PoolConfig::new(1, 1, 1));
    let h = pool.emit_single(shot(Vec2::ZERO, Vec2::ZERO)).unwrap();
    assert!((pool.get(h).unwrap().dir.length() - 1.0).abs() < 1e-6);
}

#[test]
fn emit_spread_stays_within_half_angle() {
    let mut pool = ProjectilePool::new(PoolConfig::new(64, 512, 32));
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let base = Vec2::new(1.0, 1.0).normalize();

    let handles = pool.emit_spread(shot(Vec2::ZERO, base), 200, 30.0, &mut rng);
    assert_eq!(handles.len(), 200);

    let limit = 15.0_f32.to_radians() + 1e-4;
    for h in &handles {
        let p = pool.get(*h).unwrap();
        assert!(angle_between(base, p.dir) <= limit);
        assert!((p.dir.length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn emit_spread_angles_are_random_not_an_even_fan() {
    let mut pool = ProjectilePool::new(PoolConfig::new(8, 8, 1));
    let mut rng = StdRng::seed_from_u64(42);

    let handles = pool.emit_spread(shot(Vec2::ZERO, Vec2::X), 5, 40.0, &mut rng);
    let mut angles: Vec<f32> = handles
        .iter()
        .map(|h| pool.get(*h).unwrap().dir.to_angle())
        .collect();
    angles.sort_by(f32::total_cmp);

    let gaps: Vec<f32> = angles.windows(2).map(|w| w[1] - w[0]).collect();
    let even = 40.0_f32.to_radians() / 4.0;
    assert!(
        gaps.iter().any(|g| (g - even).abs() > 1e-3),
        "spread looked like an even fan: {gaps:?}"
    );
}

#[test]
fn emit_spread_with_zero_spread_fires_straight() {
    let mut pool = ProjectilePool::new(PoolConfig::new(3, 3, 1));
    let mut rng = StdRng::seed_from_u64(1);
    let handles = pool.emit_spread(shot(Vec2::ZERO, Vec2::Y), 3, 0.0, &mut rng);
    for h in handles {
        assert!((pool.get(h).unwrap().dir - Vec2::Y).length() < 1e-6);
    }
}

#[test]
fn emit_spread_returns_partial_volley_when_pool_runs_out() {
    let mut pool = ProjectilePool::new(PoolConfig::new(2, 3, 1));
    let mut rng = StdRng::seed_from_u64(7);
    let handles = pool.emit_spread(shot(Vec2::ZERO, Vec2::X), 10, 20.0, &mut rng);
    assert_eq!(handles.len(), 3);
    assert_eq!(pool.stats().active, 3);
    assert!(pool.emit_single(shot(Vec2::ZERO, Vec2::X)).is_none());
}

#[test]
fn emit_ring_is_evenly_spaced() {
    let mut pool = ProjectilePool::new(PoolConfig::new(8, 8, 1));
    let handles = pool.emit_ring(shot(Vec2::ZERO, Vec2::X), 4);
    let dirs: Vec<Vec2> = handles.iter().map(|h| pool.get(*h).unwrap().dir).collect();

    let expected = [Vec2::X, Vec2::Y, -Vec2::X, -Vec2::Y];
    for (d, e) in dirs.iter().zip(expected) {
        assert!((*d - e).length() < 1e-5, "{d:?} vs {e:?}");
    }
}

// --------------------------------------------------------------------------------------
// Advancement + culling
// --------------------------------------------------------------------------------------

#[test]
fn advance_moves_speed_per_tick_regardless_of_delta() {
    let mut pool = ProjectilePool::new(PoolConfig::new(1, 1, 1));
    let h = pool.emit_single(shot(Vec2::ZERO, Vec2::X)).unwrap();

    pool.advance(1.0 / 60.0);
    pool.advance(0.5);

    let p = pool.get(h).unwrap();
    assert!((p.pos - Vec2::new(10.0, 0.0)).length() < 1e-5);
    assert!((p.lifetime - (0.5 + 1.0 / 60.0)).abs() < 1e-6);
}

#[test]
fn cull_spent_releases_expired_pierced_and_escaped() {
    let mut pool = ProjectilePool::new(PoolConfig::new(4, 4, 1));
    let keep = pool.emit_single(shot(Vec2::ZERO, Vec2::X)).unwrap();
    let old = pool.emit_single(shot(Vec2::ZERO, Vec2::X)).unwrap();
    let pierced = pool.emit_single(shot(Vec2::ZERO, Vec2::X)).unwrap();
    let escaped = pool.emit_single(shot(Vec2::new(2000.0, 0.0), Vec2::X)).unwrap();

    pool.get_mut(old).unwrap().lifetime = 10.0;
    pool.get_mut(pierced).unwrap().health = 0;

    assert_eq!(pool.cull_spent(arena(), 4.0), 3);
    assert!(pool.get(keep).is_some());
    assert!(pool.get(old).is_none());
    assert!(pool.get(pierced).is_none());
    assert!(pool.get(escaped).is_none());
    assert_eq!(pool.stats().active, 1);
}

#[test]
fn cull_where_uses_custom_predicate() {
    let mut pool = ProjectilePool::new(PoolConfig::new(3, 3, 1));
    for x in [0.0, 100.0, 200.0] {
        pool.emit_single(shot(Vec2::new(x, 0.0), Vec2::X));
    }
    let n = pool.cull_where(|p: &Projectile| p.pos.x >= 100.0);
    assert_eq!(n, 2);
    assert_eq!(pool.iter_active().count(), 1);
}

#[test]
fn released_projectile_is_parked_off_stage() {
    let mut pool = ProjectilePool::new(PoolConfig::new(1, 1, 1));
    let h = pool.emit_single(shot(Vec2::new(5.0, 5.0), Vec2::X)).unwrap();
    assert!(pool.release(h));
    assert!(!pool.release(h));

    // Same slot comes back, but fresh.
    let h2 = pool.emit_single(shot(Vec2::new(1.0, 1.0), Vec2::Y)).unwrap();
    assert_eq!(h.index(), h2.index());
    assert_eq!(pool.get(h2).unwrap().lifetime, 0.0);
    pool.release(h2);
    assert_eq!(Projectile::construct().pos, OFF_STAGE);
}

// --------------------------------------------------------------------------------------
// Systems
// --------------------------------------------------------------------------------------

#[test]
fn init_projectile_pool_uses_tunables() {
    let mut world = World::new();
    world.insert_resource(Tunables {
        projectile_pool: PoolConfig::new(5, 9, 2),
        ..Default::default()
    });

    run_system_once(&mut world, systems::init_projectile_pool);

    let stats = world.resource::<ProjectilePool>().stats();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.max, 9);
}

#[test]
fn advance_and_cull_systems_run_one_tick() {
    let mut world = World::new();
    world.insert_resource(Tunables {
        arena_half_extents: [100.0, 100.0],
        ..Default::default()
    });
    insert_time(&mut world, 0.016);

    let mut pool = ProjectilePool::new(PoolConfig::new(2, 2, 1));
    let inside = pool.emit_single(shot(Vec2::ZERO, Vec2::X)).unwrap();
    let leaving = pool.emit_single(shot(Vec2::new(98.0, 0.0), Vec2::X)).unwrap();
    world.insert_resource(pool);

    run_system_once(&mut world, systems::advance_projectiles);
    run_system_once(&mut world, systems::cull_projectiles);

    let pool = world.resource::<ProjectilePool>();
    assert_eq!(pool.get(inside).unwrap().pos, Vec2::new(5.0, 0.0));
    assert!(pool.get(leaving).is_none());
}

#[test]
fn teardown_releases_everything() {
    let mut world = World::new();
    let mut pool = ProjectilePool::new(PoolConfig::new(3, 3, 1));
    for _ in 0..3 {
        pool.emit_single(shot(Vec2::ZERO, Vec2::X));
    }
    world.insert_resource(pool);

    run_system_once(&mut world, systems::teardown_projectiles);

    assert_eq!(world.resource::<ProjectilePool>().stats().active, 0);
}
