//! Pure enemy decision logic. No ECS access: systems gather the inputs, call
//! these, and write the results back.
//!
//! # Movement
//! Driven only by distance to the target against the preferred band
//! `[preferred - 50, preferred + 50]`:
//!
//! ```text
//!   distance >  preferred + 50   Approach, toward the target
//!   distance <= preferred - 50   Approach, away from the target
//!   otherwise                    Strafe, perpendicular to the target direction
//! ```
//!
//! Strafe handedness flips every `STRAFE_PERIOD` seconds of elapsed time and never
//! depends on distance.
//!
//! # Attacks
//! Standard enemies have one attack, gated by range and cooldown. Bosses evaluate
//! Special > Dash > Normal every tick and take the first eligible one.

use bevy::prelude::*;

use crate::plugins::tasks::TaskAction;

use super::components::{AttackKind, AttackPhase, Behavior, Cooldowns, Health, Strategy};

pub const BAND_HALF_WIDTH: f32 = 50.0;
pub const STRAFE_PERIOD: f32 = 2.0;

/// +1 or -1, flipping every `STRAFE_PERIOD` seconds.
#[inline]
pub fn strafe_handedness(now: f32) -> f32 {
    if (now / STRAFE_PERIOD).floor() as i64 % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Movement phase and velocity for an enemy at `pos` chasing `target`.
pub fn movement(pos: Vec2, target: Vec2, preferred: f32, speed: f32, now: f32) -> (AttackPhase, Vec2) {
    let to_target = target - pos;
    let distance = to_target.length();
    let dir = to_target.normalize_or_zero();

    if distance > preferred + BAND_HALF_WIDTH {
        (AttackPhase::Approach, dir * speed)
    } else if distance <= preferred - BAND_HALF_WIDTH {
        (AttackPhase::Approach, -dir * speed)
    } else {
        (AttackPhase::Strafe, dir.perp() * strafe_handedness(now) * speed)
    }
}

/// What one enemy sees this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sense {
    pub now: f32,
    pub distance: f32,
    pub health_fraction: f32,
}

/// First eligible attack, if any.
pub fn select_attack(behavior: &Behavior, cooldowns: &Cooldowns, sense: Sense) -> Option<AttackKind> {
    let normal = sense.distance <= behavior.profile.attack_range
        && cooldowns.ready(AttackKind::Normal, sense.now);

    match &behavior.strategy {
        Strategy::Standard => normal.then_some(AttackKind::Normal),
        Strategy::Boss(boss) => {
            let frac = sense.health_fraction;
            if frac < boss.special_health_fraction && cooldowns.ready(AttackKind::Special, sense.now) {
                Some(AttackKind::Special)
            } else if frac < boss.dash_health_fraction
                && sense.distance > boss.dash_min_distance
                && cooldowns.ready(AttackKind::Dash, sense.now)
            {
                Some(AttackKind::Dash)
            } else {
                normal.then_some(AttackKind::Normal)
            }
        }
    }
}

/// Damage actually applied for an incoming hit of `amount`.
///
/// Bosses take half (at least 1) while dashing. Non-positive hits do nothing.
pub fn on_damage(behavior: &Behavior, phase: AttackPhase, amount: i32) -> i32 {
    if amount <= 0 {
        return 0;
    }
    match behavior.strategy {
        Strategy::Boss(_) if phase == AttackPhase::Dash => (amount / 2).max(1),
        _ => amount,
    }
}

/// Apply a hit to a living enemy. Returns the damage actually dealt.
///
/// Dying enemies ignore damage.
pub fn take_damage(health: &mut Health, behavior: &Behavior, phase: AttackPhase, amount: i32) -> i32 {
    if phase == AttackPhase::Death || health.is_depleted() {
        return 0;
    }
    let dealt = on_damage(behavior, phase, amount);
    health.hp -= dealt;
    dealt
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Busy attacking, dashing or dying. Leave everything as it is.
    Hold,
    Move { phase: AttackPhase, velocity: Vec2 },
    Attack(AttackKind),
}

/// One tick of decision-making for a living enemy with a target.
pub fn think(
    behavior: &Behavior,
    phase: AttackPhase,
    cooldowns: &Cooldowns,
    pos: Vec2,
    target: Vec2,
    health_fraction: f32,
    now: f32,
) -> Decision {
    if !phase.allows_movement() {
        return Decision::Hold;
    }

    let sense = Sense {
        now,
        distance: pos.distance(target),
        health_fraction,
    };
    if let Some(kind) = select_attack(behavior, cooldowns, sense) {
        return Decision::Attack(kind);
    }

    let (phase, velocity) = movement(
        pos,
        target,
        behavior.profile.preferred_distance,
        behavior.profile.speed,
        now,
    );
    Decision::Move { phase, velocity }
}

/// How an attack starts: the phase it holds, the velocity during it, and the
/// task that ends it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackPlan {
    pub phase: AttackPhase,
    pub velocity: Vec2,
    pub task_at: f32,
    pub action: TaskAction,
}

/// Enter `kind`: arms its cooldown and returns the plan.
///
/// Boss-only kinds requested for a standard enemy fall back to Normal.
pub fn begin_attack(
    behavior: &Behavior,
    cooldowns: &mut Cooldowns,
    kind: AttackKind,
    pos: Vec2,
    target: Vec2,
    now: f32,
) -> AttackPlan {
    let profile = &behavior.profile;
    let normal = |cooldowns: &mut Cooldowns| {
        cooldowns.arm(AttackKind::Normal, now, profile.attack_cooldown);
        AttackPlan {
            phase: AttackPhase::Attack,
            velocity: Vec2::ZERO,
            task_at: now + profile.windup,
            action: TaskAction::FireAttack(AttackKind::Normal),
        }
    };

    let Some(boss) = behavior.boss_profile() else {
        return normal(cooldowns);
    };

    match kind {
        AttackKind::Normal => normal(cooldowns),
        AttackKind::Special => {
            cooldowns.arm(AttackKind::Special, now, boss.special_cooldown);
            AttackPlan {
                phase: AttackPhase::Special,
                velocity: Vec2::ZERO,
                task_at: now + boss.special_windup,
                action: TaskAction::FireAttack(AttackKind::Special),
            }
        }
        AttackKind::Dash => {
            cooldowns.arm(AttackKind::Dash, now, boss.dash_cooldown);
            AttackPlan {
                phase: AttackPhase::Dash,
                velocity: (target - pos).normalize_or_zero() * boss.dash_speed,
                task_at: now + boss.dash_duration,
                action: TaskAction::EndDash,
            }
        }
    }
}

/// `count` points evenly spaced on a circle around `center`.
pub fn ring_positions(center: Vec2, radius: f32, count: u32) -> impl Iterator<Item = Vec2> {
    let step = std::f32::consts::TAU / count.max(1) as f32;
    (0..count).map(move |i| center + Vec2::from_angle(step * i as f32) * radius)
}
