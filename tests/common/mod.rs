//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `combat_sim::game::configure_headless` to install gameplay plugins.
//!
//! Every `app.update()` advances time by exactly one fixed tick, so a test can count
//! ticks instead of sleeping.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use combat_sim::common::tunables::Tunables;

#[allow(dead_code)]
pub fn app_headless() -> App {
    app_with(Tunables::default())
}

pub fn app_with(tunables: Tunables) -> App {
    let tick = Duration::from_secs_f64(1.0 / tunables.tick_hz);
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists for avian.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(tick));
    app.insert_resource(tunables);

    combat_sim::game::configure_headless(&mut app);
    // `App::run` does this; manual `update()` loops must do it themselves so
    // plugins that register resources in `finish` (avian diagnostics) are ready.
    app.finish();
    app.cleanup();
    app
}

#[allow(dead_code)]
pub fn tick(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}
