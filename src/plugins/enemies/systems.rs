//! Enemy systems, in tick order.
//!
//! ```text
//!   Sense    apply_damage
//!   Decide   enemy_death_trigger -> boss_segment_watch -> enemy_decide
//!   Resolve  run_due_tasks
//!   PostUpdate  despawn_marked_enemies
//! ```

use std::f32::consts::TAU;

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::common::layers::non_interacting_enemy_layers;
use crate::common::rng::CombatRng;
use crate::common::tunables::{Tunables, rgb};
use crate::plugins::core::CombatTarget;
use crate::plugins::projectiles::components::ProjectileSpawn;
use crate::plugins::projectiles::pool::ProjectilePool;
use crate::plugins::sprites::components::{SpriteOptions, SpriteTag};
use crate::plugins::sprites::pool::SpritePool;
use crate::plugins::tasks::{ScheduledTasks, TaskAction};

use super::behavior::{Decision, begin_attack, ring_positions, take_damage, think};
use super::components::{
    AttackKind, AttackPhase, Behavior, BossPhases, Cooldowns, Enemy, EnemyKind, Health,
    PendingDespawn,
};
use super::messages::DamageEnemy;
use super::spawn::spawn_enemy;

type Living = (With<Enemy>, Without<PendingDespawn>);

pub fn apply_damage(
    mut hits: MessageReader<DamageEnemy>,
    mut q: Query<(&mut Health, &Behavior, &AttackPhase), Living>,
) {
    for hit in hits.read() {
        let Ok((mut health, behavior, phase)) = q.get_mut(hit.target) else {
            continue;
        };
        let dealt = take_damage(&mut health, behavior, *phase, hit.amount);
        if dealt > 0 {
            trace!("{} took {dealt}, {} hp left", hit.target, health.hp);
        }
    }
}

/// Enter `Death` once health is gone.
///
/// Pending attacks are cancelled here so nothing fires after death; the only task
/// left is the teardown after `death_delay`.
pub fn enemy_death_trigger(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut tasks: ResMut<ScheduledTasks>,
    mut q: Query<
        (
            Entity,
            &Health,
            &mut AttackPhase,
            &mut LinearVelocity,
            &mut CollisionLayers,
        ),
        Living,
    >,
) {
    let now = time.elapsed_secs();
    for (e, health, mut phase, mut vel, mut layers) in &mut q {
        if *phase == AttackPhase::Death || !health.is_depleted() {
            continue;
        }
        *phase = AttackPhase::Death;
        vel.0 = Vec2::ZERO;
        *layers = non_interacting_enemy_layers();

        let cancelled = tasks.cancel_owner(e);
        tasks.schedule(now + tunables.death_delay, e, TaskAction::Despawn);
        debug!("{e} dying, cancelled {cancelled} pending tasks");
    }
}

pub fn boss_segment_watch(
    time: Res<Time>,
    mut q: Query<(Entity, &Health, &AttackPhase, &mut BossPhases, &mut Cooldowns), Living>,
) {
    let now = time.elapsed_secs();
    for (e, health, phase, mut phases, mut cooldowns) in &mut q {
        if *phase == AttackPhase::Death {
            continue;
        }
        if phases.observe(health.fraction()) {
            cooldowns.reset_now(AttackKind::Special, now);
            info!(
                "boss {e} crossed into segment {}/{}, special ready",
                phases.current_segment, phases.segment_count
            );
        }
    }
}

/// Movement and attack selection for every living enemy.
///
/// Without a target nothing is evaluated and everyone stands still.
pub fn enemy_decide(
    time: Res<Time>,
    target: Res<CombatTarget>,
    mut tasks: ResMut<ScheduledTasks>,
    mut q: Query<
        (
            Entity,
            &mut Behavior,
            &Health,
            &Transform,
            &mut AttackPhase,
            &mut Cooldowns,
            &mut LinearVelocity,
        ),
        Living,
    >,
) {
    let now = time.elapsed_secs();

    let Some(target) = target.0 else {
        for (_, _, _, _, _, _, mut vel) in &mut q {
            vel.0 = Vec2::ZERO;
        }
        return;
    };

    for (e, mut behavior, health, tf, mut phase, mut cooldowns, mut vel) in &mut q {
        let pos = tf.translation.truncate();
        match think(&behavior, *phase, &cooldowns, pos, target, health.fraction(), now) {
            Decision::Hold => {
                if *phase == AttackPhase::Dash {
                    vel.0 = behavior.locked_velocity;
                }
            }
            Decision::Move { phase: next, velocity } => {
                *phase = next;
                vel.0 = velocity;
            }
            Decision::Attack(kind) => {
                let plan = begin_attack(&behavior, &mut cooldowns, kind, pos, target, now);
                *phase = plan.phase;
                vel.0 = plan.velocity;
                behavior.locked_velocity = plan.velocity;
                tasks.schedule(plan.task_at, e, plan.action);
            }
        }
    }
}

/// Fire every scheduled continuation that is due.
#[allow(clippy::too_many_arguments)]
pub fn run_due_tasks(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    target: Res<CombatTarget>,
    mut tasks: ResMut<ScheduledTasks>,
    mut rng: ResMut<CombatRng>,
    mut projectiles: Option<ResMut<ProjectilePool>>,
    mut sprites: Option<ResMut<SpritePool>>,
    mut warned_missing_pool: Local<bool>,
    mut q: Query<(&Enemy, &Behavior, &Transform, &mut AttackPhase, &mut LinearVelocity), Living>,
) {
    let now = time.elapsed_secs();

    for task in tasks.drain_due(now) {
        let Ok((enemy, behavior, tf, mut phase, mut vel)) = q.get_mut(task.owner) else {
            trace!("dropping {:?} for missing {}", task.action, task.owner);
            continue;
        };
        let pos = tf.translation.truncate();

        match task.action {
            TaskAction::FireAttack(kind) => {
                if *phase == AttackPhase::Death {
                    continue;
                }
                match projectiles.as_deref_mut() {
                    Some(pool) => fire_attack(pool, rng.rng(), behavior, kind, pos, target.0),
                    None if !*warned_missing_pool => {
                        warn!("no projectile pool, enemy attacks are skipped");
                        *warned_missing_pool = true;
                    }
                    None => {}
                }
                if let (AttackKind::Special, Some(boss)) = (kind, behavior.boss_profile()) {
                    for at in ring_positions(pos, boss.minion_ring_radius, boss.minion_count) {
                        spawn_enemy(&mut commands, &tunables, EnemyKind::Grunt, enemy.faction, at);
                    }
                }
                *phase = AttackPhase::Idle;
            }
            TaskAction::EndDash => {
                if *phase == AttackPhase::Dash {
                    *phase = AttackPhase::Idle;
                    vel.0 = Vec2::ZERO;
                }
            }
            TaskAction::Despawn => {
                commands.entity(task.owner).insert(PendingDespawn);
                if let Some(sprites) = sprites.as_deref_mut() {
                    spawn_remains(sprites, &mut rng, &tunables, behavior, pos);
                }
            }
        }
    }
}

/// Resolve an attack's projectiles, aimed at where the target is now.
///
/// Normal volleys need a target; the Special ring does not.
fn fire_attack(
    pool: &mut ProjectilePool,
    rng: &mut impl Rng,
    behavior: &Behavior,
    kind: AttackKind,
    pos: Vec2,
    target: Option<Vec2>,
) {
    let volley = &behavior.profile.volley;
    let spawn = ProjectileSpawn {
        pos,
        dir: target.map_or(Vec2::X, |t| t - pos),
        speed: volley.speed,
        health: volley.pierce,
        color: volley.color(),
        size: volley.size,
    };

    match kind {
        AttackKind::Special => {
            let burst = behavior.boss_profile().map_or(0, |b| b.special_burst);
            pool.emit_ring(spawn, burst);
        }
        AttackKind::Normal if target.is_some() => {
            if volley.count <= 1 && volley.spread_degrees == 0.0 {
                pool.emit_single(spawn);
            } else {
                pool.emit_spread(spawn, volley.count, volley.spread_degrees, rng);
            }
        }
        AttackKind::Normal | AttackKind::Dash => {}
    }
}

/// Death puff plus the kind's drops, kicked outwards a little.
fn spawn_remains(
    sprites: &mut SpritePool,
    rng: &mut CombatRng,
    tunables: &Tunables,
    behavior: &Behavior,
    pos: Vec2,
) {
    let profile = &behavior.profile;
    let lifespan = tunables.collection.pickup_lifespan;

    sprites.spawn(
        pos,
        SpriteOptions::effect("puff", 0.4)
            .with_tint(rgb(profile.color))
            .with_scale(profile.radius / 16.0),
    );

    let drop_pickup = |sprites: &mut SpritePool, rng: &mut CombatRng, tag: SpriteTag, value: u32| {
        let kick = Vec2::from_angle(rng.range(0.0, TAU)) * rng.range(40.0, 120.0);
        sprites.spawn(
            pos,
            SpriteOptions::pickup(tag, value, lifespan)
                .with_velocity(kick)
                .with_physics(0.0, 0.4, 4.0),
        );
    };

    if profile.xp_value > 0 {
        drop_pickup(sprites, rng, SpriteTag::Experience, profile.xp_value);
    }
    if profile.cash_value > 0 && rng.chance(profile.cash_chance) {
        drop_pickup(sprites, rng, SpriteTag::Currency, profile.cash_value);
    }
    if let Some(boss) = behavior.boss_profile().filter(|b| b.health_drop > 0) {
        drop_pickup(sprites, rng, SpriteTag::Health, boss.health_drop);
    }
}

/// Structural cleanup outside the fixed step.
pub fn despawn_marked_enemies(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
