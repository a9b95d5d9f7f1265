//! Collection plugin: the player picks up nearby XP, cash and health sprites.
//!
//! Once per `scan_interval` (in `CombatSet::Collect`) the scanner queries the
//! sprite pool around the combat target with one radius per pickup type. Each
//! hit is released from the pool, applied to whatever sink the player carries,
//! and announced as a `PickupCollected` message.
//!
//! A missing sink (say, no `Wallet`) still consumes the pickup; its effect is
//! just `None`.

pub mod scanner;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::core::{CombatSet, CombatTarget};
use crate::plugins::player::Player;
use crate::plugins::player::stats::{ExperienceLedger, Vitals, Wallet};
use crate::plugins::sprites::components::SpriteTag;
use crate::plugins::sprites::pool::SpritePool;

use scanner::{CollectionScanner, EffectSinks, PickupEffect, apply_pickup};

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PickupCollected {
    pub tag: SpriteTag,
    pub value: u32,
    pub pos: Vec2,
    pub effect: Option<PickupEffect>,
}

pub fn plugin(app: &mut App) {
    app.add_message::<PickupCollected>();
    app.add_systems(Startup, init_scanner);

    app.add_systems(
        FixedUpdate,
        scan_collectibles
            .in_set(CombatSet::Collect)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(OnExit(GameState::InGame), reset_scanner);
}

pub fn init_scanner(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(CollectionScanner::from_tunables(&tunables.collection));
}

pub fn scan_collectibles(
    time: Res<Time>,
    target: Res<CombatTarget>,
    mut scanner: ResMut<CollectionScanner>,
    pool: Option<ResMut<SpritePool>>,
    mut player: Query<
        (
            Option<&mut ExperienceLedger>,
            Option<&mut Wallet>,
            Option<&mut Vitals>,
        ),
        With<Player>,
    >,
    mut collected: MessageWriter<PickupCollected>,
) {
    let (Some(center), Some(mut pool)) = (target.0, pool) else {
        return;
    };
    if !scanner.due(time.elapsed_secs()) {
        return;
    }

    let mut sinks = match player.single_mut() {
        Ok((experience, currency, health)) => EffectSinks {
            experience: experience.map(Mut::into_inner),
            currency: currency.map(Mut::into_inner),
            health: health.map(Mut::into_inner),
        },
        Err(_) => EffectSinks::default(),
    };

    let mut count = 0usize;
    scanner.scan(&mut pool, center, |hit| {
        let effect = apply_pickup(hit, &mut sinks);
        if let Some(PickupEffect::Experience { leveled_up: true }) = effect {
            let level = sinks.experience.as_deref().map_or(0, |l| l.level);
            info!("player reached level {level}");
        }
        collected.write(PickupCollected {
            tag: hit.tag,
            value: hit.value,
            pos: hit.pos,
            effect,
        });
        count += 1;
    });

    if count > 0 {
        trace!("collected {count} pickups at {center}");
    }
}

pub fn reset_scanner(mut scanner: ResMut<CollectionScanner>) {
    scanner.reset();
}
