//! Test helpers.
//!
//! Systems that use `Commands` enqueue structural changes; applying them is normally handled by
//! schedule boundaries. We call `world.flush()` after running so queued commands are applied
//! before assertions.
//!
//! Combat systems read `Res<Time>`. Outside a schedule nobody advances it, so tests insert one
//! and move it forward by hand.

use std::time::Duration;

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Insert a `Time` whose elapsed clock reads `elapsed` seconds.
pub fn insert_time(world: &mut World, elapsed: f32) {
    let mut time = Time::<()>::default();
    if elapsed > 0.0 {
        time.advance_by(Duration::from_secs_f32(elapsed));
    }
    world.insert_resource(time);
}

/// Move the inserted `Time` forward by `dt` seconds.
pub fn advance_time(world: &mut World, dt: f32) {
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(dt));
}
