use bevy::prelude::*;

use crate::common::tunables::CollectionTunables;
use crate::plugins::player::stats::{ExperienceLedger, Vitals, Wallet};
use crate::plugins::sprites::components::SpriteTag;
use crate::plugins::sprites::pool::{Collected, SpritePool};

/// Collection radius for one pickup type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectRule {
    pub tag: SpriteTag,
    pub radius: f32,
}

/// Throttled proximity scan over the sprite pool.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CollectionScanner {
    rules: Vec<CollectRule>,
    /// Minimum seconds between scans.
    pub interval: f32,
    last_scan: Option<f32>,
}

impl CollectionScanner {
    pub fn new(interval: f32) -> Self {
        Self {
            rules: Vec::new(),
            interval: interval.max(0.0),
            last_scan: None,
        }
    }

    pub fn from_tunables(t: &CollectionTunables) -> Self {
        let mut scanner = Self::new(t.scan_interval);
        scanner.register(SpriteTag::Experience, t.experience_radius);
        scanner.register(SpriteTag::Currency, t.currency_radius);
        scanner.register(SpriteTag::Health, t.health_radius);
        scanner
    }

    /// Add or replace the rule for `tag`.
    pub fn register(&mut self, tag: SpriteTag, radius: f32) {
        let rule = CollectRule { tag, radius };
        match self.rules.iter_mut().find(|r| r.tag == tag) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn rules(&self) -> &[CollectRule] {
        &self.rules
    }

    /// True at most once per `interval`. Records the scan time when it says yes.
    pub fn due(&mut self, now: f32) -> bool {
        if self.last_scan.is_some_and(|last| now - last < self.interval) {
            return false;
        }
        self.last_scan = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last_scan = None;
    }

    /// Query the pool once per registered type around `center`.
    pub fn scan(
        &self,
        pool: &mut SpritePool,
        center: Vec2,
        mut on_hit: impl FnMut(&Collected),
    ) -> Vec<Collected> {
        let mut all = Vec::new();
        for rule in &self.rules {
            all.extend(pool.query_proximity(center, rule.radius, &mut on_hit, Some(rule.tag)));
        }
        all
    }
}

/// What a pickup did to its collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupEffect {
    Experience { leveled_up: bool },
    Currency,
    Healed(u32),
}

/// Optional effect collaborators. Empty slots make that effect a no-op.
#[derive(Debug, Default)]
pub struct EffectSinks<'a> {
    pub experience: Option<&'a mut ExperienceLedger>,
    pub currency: Option<&'a mut Wallet>,
    pub health: Option<&'a mut Vitals>,
}

/// Apply one collected pickup. `None` when nothing could receive it.
pub fn apply_pickup(hit: &Collected, sinks: &mut EffectSinks) -> Option<PickupEffect> {
    match hit.tag {
        SpriteTag::Experience => sinks.experience.as_deref_mut().map(|ledger| PickupEffect::Experience {
            leveled_up: ledger.add_experience(hit.value),
        }),
        SpriteTag::Currency => sinks.currency.as_deref_mut().map(|wallet| {
            wallet.add_currency(hit.value);
            PickupEffect::Currency
        }),
        SpriteTag::Health => sinks
            .health
            .as_deref_mut()
            .map(|vitals| PickupEffect::Healed(vitals.heal(hit.value))),
        SpriteTag::Effect => None,
    }
}
