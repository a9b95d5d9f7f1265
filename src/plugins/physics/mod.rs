//! Physics plugin: avian setup for kinematic bodies, plus arena confinement.
//!
//! Player and enemies are kinematic bodies driven by `LinearVelocity`. There are no
//! wall colliders (kinematic bodies ignore them anyway), so bodies are clamped back
//! inside the arena after avian integrates them.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

/// Marker: this body must stay inside the arena rectangle.
#[derive(Component, Debug, Clone, Copy)]
pub struct ArenaBound {
    pub radius: f32,
}

pub fn plugin(app: &mut App) {
    let ppm = app.world().resource::<Tunables>().pixels_per_meter;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::ZERO));

    app.add_systems(
        PostUpdate,
        confine_to_arena
            .before(TransformSystems::Propagate)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Clamp a body centre so the whole circle stays inside `arena`.
#[inline]
pub fn confine(pos: Vec2, radius: f32, arena: Rect) -> Vec2 {
    let inset = Vec2::splat(radius).min(arena.half_size());
    pos.clamp(arena.min + inset, arena.max - inset)
}

pub fn confine_to_arena(
    tunables: Res<Tunables>,
    mut q: Query<(&ArenaBound, &mut Transform)>,
) {
    let arena = tunables.arena_rect();
    for (bound, mut tf) in &mut q {
        let pos = tf.translation.truncate();
        let clamped = confine(pos, bound.radius, arena);
        if clamped != pos {
            tf.translation.x = clamped.x;
            tf.translation.y = clamped.y;
        }
    }
}
