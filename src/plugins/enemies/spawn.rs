//! Enemy construction: the encounter layout and boss minions.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::enemy_layers;
use crate::common::state::GameState;
use crate::common::tunables::{Tunables, rgb};
use crate::plugins::physics::ArenaBound;

use super::components::{
    AttackPhase, Behavior, BossPhases, Cooldowns, Enemy, EnemyKind, Faction, Health,
};

/// Spawn one enemy of `kind` at `pos`. Bosses also get `BossPhases`.
pub fn spawn_enemy(
    commands: &mut Commands,
    tunables: &Tunables,
    kind: EnemyKind,
    faction: Faction,
    pos: Vec2,
) -> Entity {
    let profile = *tunables.profile(kind);
    let behavior = match kind {
        EnemyKind::Boss => Behavior::boss(profile, tunables.boss_phases),
        EnemyKind::Grunt | EnemyKind::Gunner => Behavior::standard(profile),
    };

    let mut entity = commands.spawn((
        Name::new(format!("{faction:?} {kind:?}")),
        Enemy { kind, faction },
        Health::new(profile.hp),
        AttackPhase::Idle,
        Cooldowns::default(),
        behavior,
        Sprite {
            color: rgb(profile.color),
            custom_size: Some(Vec2::splat(profile.radius * 2.0)),
            ..default()
        },
        Transform::from_xyz(pos.x, pos.y, 1.0),
        RigidBody::Kinematic,
        Collider::circle(profile.radius),
        enemy_layers(),
        LinearVelocity::ZERO,
        ArenaBound {
            radius: profile.radius,
        },
        DespawnOnExit(GameState::InGame),
    ));

    if kind == EnemyKind::Boss {
        entity.insert(BossPhases::new(tunables.boss_phases.segment_count));
    }
    entity.id()
}

/// Place the configured encounter. Runs on every entry into `InGame`.
pub fn spawn_encounter(mut commands: Commands, tunables: Res<Tunables>) {
    for spawn in &tunables.encounter {
        spawn_enemy(
            &mut commands,
            &tunables,
            spawn.kind,
            spawn.faction,
            Vec2::from(spawn.at),
        );
    }
    debug!("encounter spawned {} enemies", tunables.encounter.len());
}
