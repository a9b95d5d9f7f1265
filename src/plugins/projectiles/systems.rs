//! Projectile systems: pool creation, per-tick advancement and culling, teardown.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::pool::ProjectilePool;

/// Build the pool from tunables. Runs once in `Startup`.
pub fn init_projectile_pool(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(ProjectilePool::new(tunables.projectile_pool));
}

pub fn advance_projectiles(time: Res<Time>, mut pool: ResMut<ProjectilePool>) {
    pool.advance(time.delta_secs());
}

pub fn cull_projectiles(tunables: Res<Tunables>, mut pool: ResMut<ProjectilePool>) {
    let culled = pool.cull_spent(tunables.arena_rect(), tunables.projectile_max_lifetime);
    if culled > 0 {
        trace!("culled {culled} projectiles");
    }
}

/// Scene end: every live projectile goes back to Free.
pub fn teardown_projectiles(mut pool: ResMut<ProjectilePool>) {
    let released = pool.release_all();
    debug!("projectile teardown released {released}");
}
