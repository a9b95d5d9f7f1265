//! Player plugin: the combat target.
//!
//! Pipeline:
//! - Update: sample input, write PlayerInput resource
//! - FixedUpdate (Sense): publish the player position as `CombatTarget`
//! - FixedUpdate: apply velocity to kinematic rigid body
//!
//! The player entity also carries the collection sinks from [`stats`].

pub mod stats;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::player_layers;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::core::{CombatSet, CombatTarget};
use crate::plugins::physics::ArenaBound;

use stats::{ExperienceLedger, Vitals, Wallet};

const PLAYER_RADIUS: f32 = 13.0;
const PLAYER_MAX_HP: u32 = 100;

#[derive(Component, Debug, Default)]
pub struct Player;

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub move_axis: Vec2,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_input)
        .add_systems(
            FixedUpdate,
            (
                sync_combat_target.in_set(CombatSet::Sense),
                apply_movement,
            )
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands) {
    commands.spawn((
        Name::new("Player"),
        Player,
        ExperienceLedger::default(),
        Wallet::default(),
        Vitals::new(PLAYER_MAX_HP),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(PLAYER_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        RigidBody::Kinematic,
        Collider::circle(PLAYER_RADIUS),
        player_layers(),
        LinearVelocity::ZERO,
        ArenaBound {
            radius: PLAYER_RADIUS,
        },
        DespawnOnExit(GameState::InGame),
    ));
}

/// Headless apps have no keyboard; the axis just stays at zero.
fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else {
        return;
    };
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<&mut LinearVelocity, With<Player>>,
) {
    let Ok(mut vel) = q_player.single_mut() else {
        return;
    };
    vel.0 = input.move_axis * tunables.player_speed;
}

/// No player (or more than one) means no target, which suspends enemy logic.
pub fn sync_combat_target(
    mut target: ResMut<CombatTarget>,
    q_player: Query<&Transform, With<Player>>,
) {
    let next = q_player.single().ok().map(|tf| tf.translation.truncate());
    if target.0 != next {
        target.0 = next;
    }
}
