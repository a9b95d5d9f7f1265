use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::profile::{BossProfile, EnemyProfile};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Grunt,
    Gunner,
    Boss,
}

/// Display-only allegiance. No gameplay rule reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    #[default]
    Wild,
    Legion,
    Void,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub faction: Faction,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
    /// Reference for every percentage threshold.
    pub base_hp: i32,
}

impl Health {
    pub fn new(hp: i32) -> Self {
        let hp = hp.max(1);
        Self {
            hp,
            max_hp: hp,
            base_hp: hp,
        }
    }

    /// Current health as a fraction of base health, never negative.
    #[inline]
    pub fn fraction(&self) -> f32 {
        (self.hp.max(0) as f32) / (self.base_hp.max(1) as f32)
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.hp <= 0
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }
}

/// Exactly one phase is active at a time.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackPhase {
    #[default]
    Idle,
    Approach,
    Strafe,
    Attack,
    Dash,
    Special,
    Death,
}

impl AttackPhase {
    /// Movement decisions only run in Idle, Approach and Strafe.
    #[inline]
    pub fn allows_movement(self) -> bool {
        matches!(self, AttackPhase::Idle | AttackPhase::Approach | AttackPhase::Strafe)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttackKind {
    Normal,
    Dash,
    Special,
}

/// Absolute times (seconds of elapsed game time) at which each attack becomes
/// eligible again.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct Cooldowns {
    pub normal: f32,
    pub dash: f32,
    pub special: f32,
}

impl Cooldowns {
    fn slot(&mut self, kind: AttackKind) -> &mut f32 {
        match kind {
            AttackKind::Normal => &mut self.normal,
            AttackKind::Dash => &mut self.dash,
            AttackKind::Special => &mut self.special,
        }
    }

    pub fn next(&self, kind: AttackKind) -> f32 {
        match kind {
            AttackKind::Normal => self.normal,
            AttackKind::Dash => self.dash,
            AttackKind::Special => self.special,
        }
    }

    #[inline]
    pub fn ready(&self, kind: AttackKind, now: f32) -> bool {
        now >= self.next(kind)
    }

    /// Start the cooldown: eligible again at `now + duration`.
    pub fn arm(&mut self, kind: AttackKind, now: f32, duration: f32) {
        *self.slot(kind) = now + duration.max(0.0);
    }

    /// Make `kind` eligible immediately.
    pub fn reset_now(&mut self, kind: AttackKind, now: f32) {
        *self.slot(kind) = now;
    }
}

/// Health segmentation for bosses.
///
/// `bucket = floor(fraction * segment_count)` (full health clamps into the top
/// bucket). Each time the bucket drops below the lowest one seen so far, the
/// Special cooldown is forced ready. Healing back up never re-arms a crossing.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossPhases {
    pub segment_count: u32,
    /// 0 at full health, growing by one per boundary crossed.
    pub current_segment: u32,
    last_bucket: u32,
}

impl BossPhases {
    pub fn new(segment_count: u32) -> Self {
        let segment_count = segment_count.max(1);
        Self {
            segment_count,
            current_segment: 0,
            last_bucket: segment_count - 1,
        }
    }

    pub fn bucket(&self, fraction: f32) -> u32 {
        let raw = (fraction.max(0.0) * self.segment_count as f32).floor() as u32;
        raw.min(self.segment_count - 1)
    }

    /// Record the current health fraction. Returns true when a segment boundary
    /// was crossed downwards since the last call.
    pub fn observe(&mut self, fraction: f32) -> bool {
        let bucket = self.bucket(fraction);
        if bucket >= self.last_bucket {
            return false;
        }
        self.last_bucket = bucket;
        self.current_segment = self.segment_count - 1 - bucket;
        true
    }
}

/// Per-kind strategy plugged into one `Enemy` record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Distance band movement plus one cooldown-gated attack.
    Standard,
    /// Adds Special > Dash > Normal selection, segments and dash damage reduction.
    Boss(BossProfile),
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Behavior {
    pub profile: EnemyProfile,
    pub strategy: Strategy,
    /// Velocity held for the whole dash.
    pub locked_velocity: Vec2,
}

impl Behavior {
    pub fn standard(profile: EnemyProfile) -> Self {
        Self {
            profile,
            strategy: Strategy::Standard,
            locked_velocity: Vec2::ZERO,
        }
    }

    pub fn boss(profile: EnemyProfile, boss: BossProfile) -> Self {
        Self {
            profile,
            strategy: Strategy::Boss(boss),
            locked_velocity: Vec2::ZERO,
        }
    }

    pub fn boss_profile(&self) -> Option<&BossProfile> {
        match &self.strategy {
            Strategy::Boss(b) => Some(b),
            Strategy::Standard => None,
        }
    }
}

/// Marker: enemy should be removed from the world.
///
/// Set when the death delay runs out; `PostUpdate` despawns it outside the fixed step.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;
