//! Generic fixed-capacity object recycler (the arena behind every pool).
//!
//! # Lifecycle
//! Every entry is constructed once (at creation or when the pool grows) and then
//! cycles between two states:
//!
//! ```text
//!   construct ──> Free ──acquire/reset──> Active ──release/clear──> Free ──> ...
//! ```
//!
//! Entries are never destroyed individually; dropping the pool is the only teardown.
//!
//! # Invariants
//! - `active <= total <= max_size` at all times.
//! - A Free entry holds no gameplay data: `Pooled::clear` puts it off-stage with
//!   zero velocity and an empty payload.
//! - Only Active entries are visited by iteration and culling.
//! - Releasing a Free entry, or releasing through a stale handle, is a no-op.
//!
//! # Handles
//! `acquire` hands out a `PoolHandle` (slot index + generation). Releasing bumps the
//! slot generation, so a handle kept past its release can no longer read or release
//! whatever reuses the slot.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Where Free entries park. Far outside any playable arena.
pub const OFF_STAGE: Vec2 = Vec2::new(-100_000.0, -100_000.0);

/// Entity category a pool recycles. Used for config lookup and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolCategory {
    Projectile,
    Sprite,
}

/// Sizing policy for one pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Entries constructed up front.
    pub initial_size: usize,
    /// Hard ceiling. The pool never holds more entries than this.
    pub max_size: usize,
    /// Entries added when the Free set runs dry but capacity remains.
    pub grow_size: usize,
}

impl PoolConfig {
    pub const fn new(initial_size: usize, max_size: usize, grow_size: usize) -> Self {
        Self {
            initial_size,
            max_size,
            grow_size,
        }
    }

    pub fn validate(&self, category: PoolCategory) -> Result<(), ConfigError> {
        let reason = if self.max_size == 0 {
            "max_size must be at least 1"
        } else if self.initial_size > self.max_size {
            "initial_size exceeds max_size"
        } else if self.grow_size == 0 && self.initial_size < self.max_size {
            "grow_size must be at least 1 when the pool can grow"
        } else {
            return Ok(());
        };
        Err(ConfigError::InvalidPool { category, reason })
    }

    /// Correct a malformed config instead of rejecting it.
    ///
    /// Each correction logs one warning.
    pub fn sanitized(self, category: PoolCategory) -> Self {
        let mut out = self;
        if out.max_size == 0 {
            warn!("{category:?} pool: max_size 0 raised to 1");
            out.max_size = 1;
        }
        if out.initial_size > out.max_size {
            warn!(
                "{category:?} pool: initial_size {} clamped to max_size {}",
                out.initial_size, out.max_size
            );
            out.initial_size = out.max_size;
        }
        if out.grow_size == 0 {
            warn!("{category:?} pool: grow_size 0 raised to 1");
            out.grow_size = 1;
        }
        out
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(30, 200, 10)
    }
}

/// Something a `Pool` can recycle.
///
/// The three functions are the construct/reset pair of a classic object pool plus
/// the clear step that restores the Free invariants.
pub trait Pooled: Send + Sync + 'static {
    /// Spawn parameters applied on activation.
    type Spawn;

    /// Build a fresh, inert entry.
    fn construct() -> Self;

    /// Apply spawn parameters to a Free entry.
    fn reset(&mut self, spawn: Self::Spawn);

    /// Drop all gameplay data and park the entry off-stage.
    fn clear(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolHandle {
    index: u32,
    generation: u32,
}

impl PoolHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EntryState {
    #[default]
    Free,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PoolStats {
    pub active: usize,
    pub free: usize,
    pub total: usize,
    pub max: usize,
}

#[derive(Debug)]
struct Slot<T> {
    item: T,
    state: EntryState,
    generation: u32,
}

#[derive(Debug)]
pub struct Pool<T: Pooled> {
    category: PoolCategory,
    config: PoolConfig,
    slots: Vec<Slot<T>>,
    /// Stack of Free slot indices. Pushed in reverse on growth so the lowest
    /// index is handed out first.
    free: Vec<u32>,
    active: usize,
    /// Set when an acquire fails; cleared by the next release. Keeps the
    /// exhaustion warning to once per episode.
    exhausted: bool,
}

impl<T: Pooled> Pool<T> {
    pub fn new(category: PoolCategory, config: PoolConfig) -> Self {
        let config = config.sanitized(category);
        let mut pool = Self {
            category,
            config,
            slots: Vec::with_capacity(config.initial_size),
            free: Vec::with_capacity(config.initial_size),
            active: 0,
            exhausted: false,
        };
        pool.grow(config.initial_size);
        pool
    }

    #[inline]
    pub fn category(&self) -> PoolCategory {
        self.category
    }

    #[inline]
    pub fn config(&self) -> PoolConfig {
        self.config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            active: self.active,
            free: self.free.len(),
            total: self.slots.len(),
            max: self.config.max_size,
        }
    }

    /// Construct up to `by` new Free entries without crossing `max_size`.
    /// Returns how many were added.
    fn grow(&mut self, by: usize) -> usize {
        let room = self.config.max_size.saturating_sub(self.slots.len());
        let added = by.min(room);
        if added == 0 {
            return 0;
        }

        let start = self.slots.len();
        self.slots.extend((0..added).map(|_| Slot {
            item: T::construct(),
            state: EntryState::Free,
            generation: 0,
        }));
        self.free
            .extend((start..start + added).rev().map(|i| i as u32));

        if start > 0 {
            debug!(
                "{:?} pool grew by {added} to {}/{}",
                self.category,
                self.slots.len(),
                self.config.max_size
            );
        }
        added
    }

    /// Activate a Free entry with `spawn`, growing first if needed.
    ///
    /// Returns `None` once the pool is at `max_size` with nothing Free; the caller
    /// decides the degrade path.
    pub fn acquire(&mut self, spawn: T::Spawn) -> Option<PoolHandle> {
        self.try_acquire(spawn).ok()
    }

    /// Like `acquire`, but hands the spawn parameters back on exhaustion so the
    /// caller can build a fallback from them.
    pub fn try_acquire(&mut self, spawn: T::Spawn) -> Result<PoolHandle, T::Spawn> {
        if self.free.is_empty() && self.grow(self.config.grow_size) == 0 {
            if !self.exhausted {
                warn!(
                    "{:?} pool exhausted at max_size {}",
                    self.category, self.config.max_size
                );
                self.exhausted = true;
            }
            return Err(spawn);
        }

        let Some(index) = self.free.pop() else {
            return Err(spawn);
        };
        let slot = &mut self.slots[index as usize];
        slot.item.reset(spawn);
        slot.state = EntryState::Active;
        self.active += 1;

        Ok(PoolHandle {
            index,
            generation: slot.generation,
        })
    }

    /// Return an Active entry to Free. Returns whether anything changed.
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.index as usize) else {
            return false;
        };
        if slot.state != EntryState::Active || slot.generation != handle.generation {
            return false;
        }
        Self::retire(slot);
        self.free.push(handle.index);
        self.active -= 1;
        self.exhausted = false;
        true
    }

    #[inline]
    fn retire(slot: &mut Slot<T>) {
        slot.item.clear();
        slot.state = EntryState::Free;
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Release every Active entry for which `pred` holds, in index order.
    ///
    /// Releasing only flips per-slot state, so no entry is skipped or seen twice.
    pub fn release_where(&mut self, mut pred: impl FnMut(PoolHandle, &T) -> bool) -> Vec<PoolHandle> {
        let mut released = Vec::new();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.state != EntryState::Active {
                continue;
            }
            let handle = PoolHandle {
                index: i as u32,
                generation: slot.generation,
            };
            if pred(handle, &slot.item) {
                Self::retire(slot);
                self.free.push(handle.index);
                released.push(handle);
            }
        }
        if !released.is_empty() {
            self.active -= released.len();
            self.exhausted = false;
        }
        released
    }

    /// Release everything. Used at scene teardown.
    pub fn release_all(&mut self) -> usize {
        self.release_where(|_, _| true).len()
    }

    pub fn state(&self, handle: PoolHandle) -> EntryState {
        match self.slots.get(handle.index as usize) {
            Some(slot) if slot.generation == handle.generation => slot.state,
            _ => EntryState::Free,
        }
    }

    #[inline]
    pub fn is_active(&self, handle: PoolHandle) -> bool {
        self.state(handle) == EntryState::Active
    }

    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        let slot = self.slots.get(handle.index as usize)?;
        (slot.state == EntryState::Active && slot.generation == handle.generation).then_some(&slot.item)
    }

    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        (slot.state == EntryState::Active && slot.generation == handle.generation)
            .then_some(&mut slot.item)
    }

    /// Read access to an entry regardless of state. Diagnostics and tests only.
    pub fn peek(&self, index: usize) -> Option<(&T, EntryState)> {
        self.slots.get(index).map(|slot| (&slot.item, slot.state))
    }

    /// Active entries in stable (index) order.
    pub fn iter_active(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            (slot.state == EntryState::Active).then(|| {
                (
                    PoolHandle {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    &slot.item,
                )
            })
        })
    }

    /// The single update pass: apply `f` to every Active entry in index order.
    pub fn for_each_active(&mut self, mut f: impl FnMut(PoolHandle, &mut T)) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.state != EntryState::Active {
                continue;
            }
            let handle = PoolHandle {
                index: i as u32,
                generation: slot.generation,
            };
            f(handle, &mut slot.item);
        }
    }
}
