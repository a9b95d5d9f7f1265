//! Camera plugin: follow camera plus a gizmo view of the pools.
//!
//! Render-only. Pooled projectiles and sprites are not entities, so they are drawn
//! straight from the pools' Active entries each frame.
//!
//! The key subtlety: **B0001**.
//! A system cannot have `Query<&Transform>` and `Query<&mut Transform>` at the same time
//! unless Bevy can prove those queries are disjoint, hence the `Without<...>` filters.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::player::Player;
use crate::plugins::projectiles::pool::ProjectilePool;
use crate::plugins::sprites::pool::SpritePool;

/// Gizmo radius of a scale-1 sprite.
const SPRITE_RADIUS: f32 = 5.0;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, draw_pools.run_if(in_state(GameState::InGame)));
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    time: Res<Time>,
    player: Option<Single<&Transform, (With<Player>, Without<MainCamera>)>>,
    camera: Option<Single<(&mut Transform, &MainCamera), Without<Player>>>,
) {
    let (Some(player), Some(mut camera)) = (player, camera) else {
        return;
    };
    let target = player.translation.truncate();
    let (tf_cam, main_cam) = &mut *camera;

    let alpha = 1.0 - (-main_cam.responsiveness * time.delta_secs()).exp();
    let next = tf_cam.translation.truncate().lerp(target, alpha);
    tf_cam.translation.x = next.x;
    tf_cam.translation.y = next.y;
}

fn draw_pools(
    mut gizmos: Gizmos,
    projectiles: Option<Res<ProjectilePool>>,
    sprites: Option<Res<SpritePool>>,
) {
    if let Some(pool) = projectiles {
        for (_, p) in pool.iter_active() {
            gizmos.circle_2d(p.pos, p.size, p.color);
        }
    }
    if let Some(pool) = sprites {
        for (_, s) in pool.iter_active() {
            gizmos.circle_2d(s.pos, SPRITE_RADIUS * s.scale, s.tint.with_alpha(s.alpha));
        }
    }
}
