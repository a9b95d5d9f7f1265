mod common;

use bevy::prelude::*;
use combat_sim::common::state::GameState;
use combat_sim::plugins::core::CombatTarget;
use combat_sim::plugins::enemies::components::Enemy;
use combat_sim::plugins::player::Player;
use combat_sim::plugins::projectiles::pool::ProjectilePool;
use combat_sim::plugins::sprites::pool::SpritePool;
use combat_sim::plugins::tasks::ScheduledTasks;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();
    common::tick(&mut app, 3);
}

#[test]
fn entering_the_game_spawns_player_encounter_and_pools() {
    let mut app = common::app_headless();
    common::tick(&mut app, 5);

    let world = app.world_mut();
    let players = world.query::<&Player>().iter(world).count();
    let enemies = world.query::<&Enemy>().iter(world).count();
    assert_eq!(players, 1);
    assert_eq!(enemies, 4);

    assert!(world.get_resource::<ProjectilePool>().is_some());
    assert!(world.get_resource::<SpritePool>().is_some());
    assert_eq!(world.resource::<CombatTarget>().0, Some(Vec2::ZERO));
}

#[test]
fn leaving_the_game_tears_everything_down() {
    let mut app = common::app_headless();
    // Long enough for enemies to have queued attacks and fired some.
    common::tick(&mut app, 120);

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Ended);
    common::tick(&mut app, 2);

    let world = app.world_mut();
    assert_eq!(world.query::<&Enemy>().iter(world).count(), 0);
    assert_eq!(world.query::<&Player>().iter(world).count(), 0);
    assert_eq!(world.resource::<ProjectilePool>().active_count(), 0);
    assert_eq!(world.resource::<SpritePool>().active_count(), 0);
    assert!(world.resource::<ScheduledTasks>().is_empty());
}
