mod common;

use bevy::prelude::*;
use combat_sim::common::tunables::{CollectionTunables, EncounterSpawn, Tunables};
use combat_sim::plugins::enemies::components::{AttackPhase, Enemy, EnemyKind};
use combat_sim::plugins::enemies::messages::DamageEnemy;
use combat_sim::plugins::player::stats::ExperienceLedger;
use combat_sim::plugins::projectiles::pool::ProjectilePool;
use combat_sim::plugins::sprites::components::SpriteTag;
use combat_sim::plugins::sprites::pool::SpritePool;

fn single_enemy(kind: EnemyKind, at: [f32; 2]) -> Tunables {
    Tunables {
        rng_seed: Some(7),
        encounter: vec![EncounterSpawn::new(kind, at)],
        collection: CollectionTunables {
            experience_radius: 200.0,
            currency_radius: 200.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn enemies(app: &mut App) -> Vec<(Entity, AttackPhase)> {
    let world = app.world_mut();
    world
        .query_filtered::<(Entity, &AttackPhase), With<Enemy>>()
        .iter(world)
        .map(|(e, p)| (e, *p))
        .collect()
}

#[test]
fn killed_enemy_drops_experience_that_the_player_collects() {
    let mut app = common::app_with(single_enemy(EnemyKind::Grunt, [30.0, 0.0]));
    common::tick(&mut app, 2);

    let found = enemies(&mut app);
    assert_eq!(found.len(), 1);
    let grunt = found[0].0;
    app.world_mut().write_message(DamageEnemy {
        target: grunt,
        amount: 1_000,
    });
    common::tick(&mut app, 2);
    assert_eq!(enemies(&mut app), vec![(grunt, AttackPhase::Death)]);

    // death_delay plus a couple of scan intervals.
    common::tick(&mut app, 60);
    assert!(enemies(&mut app).is_empty());

    let world = app.world_mut();
    let ledger = *world
        .query::<&ExperienceLedger>()
        .single(world)
        .expect("one player");
    assert_eq!(ledger.xp, 5);
    let xp_left = world
        .resource::<SpritePool>()
        .iter_active()
        .filter(|(_, s)| s.payload.tag == SpriteTag::Experience)
        .count();
    assert_eq!(xp_left, 0);
}

#[test]
fn gunner_in_range_fires_a_volley_after_its_windup() {
    let mut app = common::app_with(single_enemy(EnemyKind::Gunner, [0.0, 220.0]));
    common::tick(&mut app, 2);
    assert_eq!(app.world().resource::<ProjectilePool>().active_count(), 0);

    // 0.6s windup at 60 ticks per second, with slack.
    common::tick(&mut app, 50);

    let pool = app.world().resource::<ProjectilePool>();
    assert_eq!(pool.active_count(), 5);
    // Shots travel away from the gunner, towards the player below it.
    assert!(pool.iter_active().all(|(_, p)| p.dir.y < 0.0));
}
