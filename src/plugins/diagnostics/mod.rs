//! Periodic pool occupancy logging at `debug` level.

use bevy::prelude::*;

use crate::common::pool::PoolStats;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::pool::ProjectilePool;
use crate::plugins::sprites::pool::SpritePool;

#[derive(Resource, Debug)]
pub struct PoolReportTimer(pub Timer);

pub fn plugin(app: &mut App) {
    let interval = app.world().resource::<Tunables>().diagnostics_interval;
    app.insert_resource(PoolReportTimer(Timer::from_seconds(
        interval.max(0.1),
        TimerMode::Repeating,
    )));

    app.add_systems(Update, report_pools.run_if(in_state(GameState::InGame)));
}

fn describe(stats: PoolStats) -> String {
    format!(
        "{}/{} active ({} free, max {})",
        stats.active, stats.total, stats.free, stats.max
    )
}

pub fn pool_report(projectiles: Option<&ProjectilePool>, sprites: Option<&SpritePool>) -> String {
    let projectiles = projectiles.map_or_else(|| "absent".to_string(), |p| describe(p.stats()));
    let sprites = sprites.map_or_else(
        || "absent".to_string(),
        |s| format!("{} + {} unpooled", describe(s.stats()), s.overflow_count()),
    );
    format!("pools: projectiles {projectiles}, sprites {sprites}")
}

pub fn report_pools(
    time: Res<Time>,
    mut timer: ResMut<PoolReportTimer>,
    projectiles: Option<Res<ProjectilePool>>,
    sprites: Option<Res<SpritePool>>,
) {
    if timer.0.tick(time.delta()).just_finished() {
        debug!("{}", pool_report(projectiles.as_deref(), sprites.as_deref()));
    }
}
