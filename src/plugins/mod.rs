//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod collection;
pub mod core;
pub mod diagnostics;
pub mod enemies;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod sprites;
pub mod tasks;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
///
/// `core` must come first: it installs the default `Tunables` the others read.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    tasks::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    sprites::plugin(app);
    collection::plugin(app);
    diagnostics::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
