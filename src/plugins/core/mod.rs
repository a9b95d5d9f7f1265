//! Core plugin: shared resources, the fixed logical tick and combat ordering.
//!
//! # Frame order
//! One `FixedUpdate` tick runs the combat sets in a fixed chain:
//!
//! ```text
//!   Sense    target position, damage intake
//!   Decide   death transitions, boss segments, movement + attack choice
//!   Resolve  due scheduled tasks (attack effects fire here)
//!   Advance  projectile + sprite advancement, culling, expiry
//!   Collect  pickup proximity scan
//! ```
//!
//! So an attack's projectiles exist and have moved once before the frame's
//! collection pass.

use bevy::prelude::*;

use crate::common::rng::CombatRng;
use crate::common::tunables::Tunables;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Sense,
    Decide,
    Resolve,
    Advance,
    Collect,
}

/// Where enemies aim and pickups get collected this tick.
///
/// `None` suspends all enemy logic for the tick.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct CombatTarget(pub Option<Vec2>);

pub fn plugin(app: &mut App) {
    // Respect tunables inserted by the host before plugins are added.
    app.init_resource::<Tunables>();
    let tunables = app.world().resource::<Tunables>().clone();

    app.insert_resource(Time::<Fixed>::from_hz(tunables.tick_hz));
    app.insert_resource(CombatRng::from_optional_seed(tunables.rng_seed));
    app.init_resource::<CombatTarget>();
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));

    app.configure_sets(
        FixedUpdate,
        (
            CombatSet::Sense,
            CombatSet::Decide,
            CombatSet::Resolve,
            CombatSet::Advance,
            CombatSet::Collect,
        )
            .chain(),
    );
}
