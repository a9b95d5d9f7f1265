//! Sprites plugin: pooled short-lived effects and pickups.
//!
//! Death puffs, sparks and XP/cash/health pickups all live in one `SpritePool`.
//! Each tick (`CombatSet::Advance`) sprites move, spin and age; anything past its
//! lifespan runs its expiry hook and goes back to Free. Pickups leave the pool
//! earlier through the collection scanner.
//!
//! When the arena is saturated a spawn still succeeds: the sprite is created
//! unpooled and lives outside the arena until it expires or is collected.

pub mod components;
pub mod pool;
pub mod systems;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::core::CombatSet;

use components::SpriteExpired;

pub fn plugin(app: &mut App) {
    app.add_message::<SpriteExpired>();
    app.add_systems(Startup, systems::init_sprite_pool);

    app.add_systems(
        FixedUpdate,
        (systems::advance_sprites, systems::expire_sprites)
            .chain()
            .in_set(CombatSet::Advance)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(OnExit(GameState::InGame), systems::teardown_sprites);
}
