use bevy::prelude::*;

/// A hit on an enemy, written by whatever resolves projectile or melee contact.
///
/// Consumed in `CombatSet::Sense`. Bosses take half while dashing; dying enemies
/// ignore it.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEnemy {
    pub target: Entity,
    pub amount: i32,
}
