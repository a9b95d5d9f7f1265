//! Collision layers.
//!
//! Only bodies live on these layers. Pooled projectiles and sprites are plain
//! arena data and never enter the physics world.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Player,
    Enemy,
}

/// Layers for a living enemy: it touches the player and nothing else.
#[inline]
pub fn enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [Layer::Player])
}

/// Layers for a dying enemy.
///
/// Membership stays `Enemy` but filters are cleared, so the body stops
/// interacting without a structural change.
#[inline]
pub fn non_interacting_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

#[inline]
pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::Enemy])
}
