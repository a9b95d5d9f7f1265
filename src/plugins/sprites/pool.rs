//! `SpritePool`: the arena specialised for timed effects and pickups.

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::pool::{Pool, PoolCategory, PoolConfig, PoolHandle, PoolStats};

use super::components::{
    BUILTIN_TEXTURES, DEFAULT_TEXTURE, EphemeralSprite, ExpireHook, SpriteExpired, SpriteOptions,
    SpriteTag,
};

/// Identifies a live sprite, pooled or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Pooled(PoolHandle),
    /// Spawned while the pool was saturated. Never recycled.
    Unpooled(u32),
}

/// A sprite consumed by `query_proximity`. Copied out before the entry was released.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collected {
    pub id: SpriteId,
    pub tag: SpriteTag,
    pub value: u32,
    pub pos: Vec2,
}

impl Collected {
    fn from_sprite(id: SpriteId, sprite: &EphemeralSprite) -> Self {
        Self {
            id,
            tag: sprite.payload.tag,
            value: sprite.payload.value,
            pos: sprite.pos,
        }
    }
}

#[derive(Resource, Debug)]
pub struct SpritePool {
    pool: Pool<EphemeralSprite>,
    /// Last-resort sprites created while the pool was at `max_size`.
    overflow: Vec<(u32, EphemeralSprite)>,
    next_overflow_id: u32,
    overflow_warned: bool,
    /// Physics sprites bounce off this rectangle.
    bounds: Option<Rect>,
    textures: HashSet<&'static str>,
    warned_textures: HashSet<&'static str>,
}

impl SpritePool {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            pool: Pool::new(PoolCategory::Sprite, config),
            overflow: Vec::new(),
            next_overflow_id: 0,
            overflow_warned: false,
            bounds: None,
            textures: BUILTIN_TEXTURES.into_iter().collect(),
            warned_textures: HashSet::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn register_texture(&mut self, key: &'static str) {
        self.textures.insert(key);
    }

    fn resolve_texture(&mut self, key: &'static str) -> &'static str {
        if self.textures.contains(key) {
            return key;
        }
        if self.warned_textures.insert(key) {
            warn!("unknown sprite texture {key:?}, using {DEFAULT_TEXTURE:?}");
        }
        DEFAULT_TEXTURE
    }

    /// Activate a sprite at `pos`.
    ///
    /// Never fails: when the arena is saturated the sprite is created unpooled
    /// and a warning is logged for the episode.
    pub fn spawn(&mut self, pos: Vec2, mut options: SpriteOptions) -> SpriteId {
        options.texture = self.resolve_texture(options.texture);

        match self.pool.try_acquire((pos, options)) {
            Ok(handle) => SpriteId::Pooled(handle),
            Err((pos, options)) => {
                if !self.overflow_warned {
                    warn!("sprite pool saturated, spawning unpooled sprites");
                    self.overflow_warned = true;
                }
                let id = self.next_overflow_id;
                self.next_overflow_id = id.wrapping_add(1);
                self.overflow.push((id, EphemeralSprite::from_options(pos, options)));
                SpriteId::Unpooled(id)
            }
        }
    }

    /// Explicit release. Idempotent.
    pub fn release(&mut self, id: SpriteId) -> bool {
        match id {
            SpriteId::Pooled(handle) => self.pool.release(handle),
            SpriteId::Unpooled(id) => {
                let before = self.overflow.len();
                self.overflow.retain(|(k, _)| *k != id);
                self.settle_overflow();
                self.overflow.len() != before
            }
        }
    }

    pub fn release_all(&mut self) -> usize {
        let n = self.pool.release_all() + self.overflow.len();
        self.overflow.clear();
        self.settle_overflow();
        n
    }

    pub fn get(&self, id: SpriteId) -> Option<&EphemeralSprite> {
        match id {
            SpriteId::Pooled(handle) => self.pool.get(handle),
            SpriteId::Unpooled(id) => self.overflow.iter().find(|(k, _)| *k == id).map(|(_, s)| s),
        }
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut EphemeralSprite> {
        match id {
            SpriteId::Pooled(handle) => self.pool.get_mut(handle),
            SpriteId::Unpooled(id) => self
                .overflow
                .iter_mut()
                .find(|(k, _)| *k == id)
                .map(|(_, s)| s),
        }
    }

    /// Every live sprite: pooled entries in index order, then unpooled ones.
    pub fn iter_active(&self) -> impl Iterator<Item = (SpriteId, &EphemeralSprite)> {
        self.pool
            .iter_active()
            .map(|(h, s)| (SpriteId::Pooled(h), s))
            .chain(self.overflow.iter().map(|(k, s)| (SpriteId::Unpooled(*k), s)))
    }

    /// Pooled plus unpooled.
    pub fn active_count(&self) -> usize {
        self.pool.active_count() + self.overflow.len()
    }

    pub fn overflow_count(&self) -> usize {
        self.overflow.len()
    }

    /// Arena stats. Unpooled sprites are not counted here.
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    pub fn advance(&mut self, delta: f32) {
        let bounds = self.bounds;
        self.pool.for_each_active(|_, s| s.step(delta, bounds));
        for (_, s) in &mut self.overflow {
            s.step(delta, bounds);
        }
    }

    /// Release every sprite whose lifetime reached its lifespan, running its hook.
    ///
    /// Returns the `Notify` messages. `Chain` follow-ups are spawned after the
    /// sweep, so a chained sprite is never expired in the same call.
    pub fn expire(&mut self) -> Vec<SpriteExpired> {
        let mut hooks: Vec<(Vec2, SpriteTag, u32, ExpireHook)> = Vec::new();

        self.pool.release_where(|_, s| {
            if !s.is_expired() {
                return false;
            }
            if let Some(hook) = &s.payload.on_expire {
                hooks.push((s.pos, s.payload.tag, s.payload.value, hook.clone()));
            }
            true
        });

        if self.overflow.iter().any(|(_, s)| s.is_expired()) {
            let (dead, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.overflow)
                .into_iter()
                .partition(|(_, s)| s.is_expired());
            self.overflow = live;
            for (_, s) in dead {
                if let Some(hook) = s.payload.on_expire {
                    hooks.push((s.pos, s.payload.tag, s.payload.value, hook));
                }
            }
            self.settle_overflow();
        }

        let mut notices = Vec::new();
        for (pos, tag, value, hook) in hooks {
            match hook {
                ExpireHook::Notify => notices.push(SpriteExpired { tag, value, pos }),
                ExpireHook::Chain(next) => {
                    self.spawn(pos, *next);
                }
            }
        }
        notices
    }

    /// Collect every collectible sprite within `radius` of `center`.
    ///
    /// One pass over the live set: each hit calls `on_hit` once and is released
    /// before the scan moves on, so nothing is returned twice.
    pub fn query_proximity(
        &mut self,
        center: Vec2,
        radius: f32,
        mut on_hit: impl FnMut(&Collected),
        filter: Option<SpriteTag>,
    ) -> Vec<Collected> {
        let r2 = radius * radius;
        let matches = |s: &EphemeralSprite| {
            s.payload.collectible
                && filter.is_none_or(|t| t == s.payload.tag)
                && s.pos.distance_squared(center) <= r2
        };

        let mut hits = Vec::new();
        self.pool.release_where(|h, s| {
            if !matches(s) {
                return false;
            }
            let hit = Collected::from_sprite(SpriteId::Pooled(h), s);
            on_hit(&hit);
            hits.push(hit);
            true
        });

        if self.overflow.iter().any(|(_, s)| matches(s)) {
            let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.overflow)
                .into_iter()
                .partition(|(_, s)| matches(s));
            self.overflow = kept;
            for (k, s) in taken {
                let hit = Collected::from_sprite(SpriteId::Unpooled(k), &s);
                on_hit(&hit);
                hits.push(hit);
            }
            self.settle_overflow();
        }

        hits
    }

    fn settle_overflow(&mut self) {
        if self.overflow.is_empty() && self.overflow_warned {
            debug!("sprite overflow drained");
            self.overflow_warned = false;
        }
    }
}
