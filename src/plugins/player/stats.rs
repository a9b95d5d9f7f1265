//! Collection sinks carried by the player. Each one is optional: a pickup whose
//! sink is missing is still consumed, it just grants nothing.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceLedger {
    pub level: u32,
    /// Experience banked towards the next level.
    pub xp: u32,
    pub next_level_at: u32,
}

impl Default for ExperienceLedger {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            next_level_at: 20,
        }
    }
}

impl ExperienceLedger {
    /// Bank `amount`. Returns true if at least one level was gained.
    ///
    /// Each level costs a quarter more than the last.
    pub fn add_experience(&mut self, amount: u32) -> bool {
        self.xp = self.xp.saturating_add(amount);
        let mut leveled_up = false;
        while self.xp >= self.next_level_at {
            self.xp -= self.next_level_at;
            self.level += 1;
            self.next_level_at = (self.next_level_at + self.next_level_at / 4).max(1);
            leveled_up = true;
        }
        leveled_up
    }
}

#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Wallet {
    pub balance: u64,
}

impl Wallet {
    pub fn add_currency(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(u64::from(amount));
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vitals {
    pub hp: u32,
    pub max_hp: u32,
}

impl Vitals {
    pub fn new(max_hp: u32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    /// Heal up to `max_hp`. Returns how much was actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }
}
