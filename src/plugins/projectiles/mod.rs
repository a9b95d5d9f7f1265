//! Projectiles plugin: pooled, straight-line projectiles.
//!
//! # Data flow
//! ```text
//!   Resolve  enemy attack tasks call emit_single / emit_spread / emit_ring
//!   Advance  advance_projectiles   pos += dir * speed, lifetime += dt
//!            cull_projectiles      release on lifetime / pierce / bounds
//! ```
//!
//! Projectile-vs-body hit resolution belongs to the host. It reads Active entries
//! through `ProjectilePool::iter_active`, spends pierce via `get_mut`, and the next
//! cull pass releases anything with `health <= 0`.

pub mod components;
pub mod pool;
pub mod systems;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::core::CombatSet;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, systems::init_projectile_pool);

        app.add_systems(
            FixedUpdate,
            (systems::advance_projectiles, systems::cull_projectiles)
                .chain()
                .in_set(CombatSet::Advance)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(OnExit(GameState::InGame), systems::teardown_projectiles);
    }
}

#[cfg(test)]
mod tests;
