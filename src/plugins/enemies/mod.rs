//! Enemies plugin: per-enemy decision state machines and the boss phase controller.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED (ECS)
//! ---------------------------
//! One `Enemy` record per body. Per-kind differences live in a `Behavior`
//! strategy (`Standard` or `Boss`) rather than in separate types:
//!
//! - FACTS: `Health`, `AttackPhase`, `Cooldowns`, `BossPhases`.
//! - RULES: `behavior.rs` holds the pure decision functions (movement band,
//!   attack priority, damage intake). Systems only gather inputs and write results.
//! - CONTINUATIONS: windups, dash ends and death delays are `ScheduledTasks`
//!   keyed by owner, cancelled when the owner dies.
//!
//! ---------------------------
//! LIFECYCLE
//! ---------------------------
//! ```text
//!   Idle <-> Approach / Strafe          distance vs preferred band
//!        -> Attack | Dash | Special     first eligible attack, cooldown armed
//!        -> Idle                        when the scheduled task resolves
//!   any  -> Death                       hp <= 0, tasks cancelled
//!        -> PendingDespawn              after death_delay, drops spawned
//! ```
//!
//! Despawning physics bodies inside the fixed step is avoided: the fixed step marks
//! `PendingDespawn` and `PostUpdate` removes the entity.

pub mod behavior;
pub mod components;
pub mod messages;
pub mod profile;
pub mod spawn;
pub mod systems;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::core::CombatSet;

use messages::DamageEnemy;

pub fn plugin(app: &mut App) {
    app.add_message::<DamageEnemy>();

    app.add_systems(OnEnter(GameState::InGame), spawn::spawn_encounter);

    app.add_systems(
        FixedUpdate,
        systems::apply_damage
            .in_set(CombatSet::Sense)
            .run_if(in_state(GameState::InGame)),
    );

    // Death first so a freshly killed boss neither crosses a segment nor attacks.
    app.add_systems(
        FixedUpdate,
        (
            systems::enemy_death_trigger,
            systems::boss_segment_watch,
            systems::enemy_decide,
        )
            .chain()
            .in_set(CombatSet::Decide)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedUpdate,
        systems::run_due_tasks
            .in_set(CombatSet::Resolve)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        systems::despawn_marked_enemies.run_if(in_state(GameState::InGame)),
    );
}
