//! Projectile pool: single and spread emission, straight-line advancement, culling.

use bevy::prelude::*;
use rand::Rng;

use crate::common::pool::{Pool, PoolCategory, PoolConfig, PoolHandle, PoolStats};

use super::components::{Projectile, ProjectileSpawn};

#[derive(Resource, Debug)]
pub struct ProjectilePool {
    pool: Pool<Projectile>,
}

impl ProjectilePool {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            pool: Pool::new(PoolCategory::Projectile, config),
        }
    }

    pub fn emit_single(&mut self, spawn: ProjectileSpawn) -> Option<PoolHandle> {
        self.pool.acquire(spawn)
    }

    /// Emit `count` shots, each independently offset from the base direction by a
    /// uniform random angle in `[-spread/2, +spread/2]` degrees.
    ///
    /// Shots are not evenly fanned; two may overlap. Stops early if the pool runs out.
    pub fn emit_spread(
        &mut self,
        spawn: ProjectileSpawn,
        count: u32,
        spread_degrees: f32,
        rng: &mut impl Rng,
    ) -> Vec<PoolHandle> {
        let base = spawn.angle();
        let half = spread_degrees.abs().to_radians() * 0.5;

        let mut out = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let offset = if half > 0.0 { rng.gen_range(-half..=half) } else { 0.0 };
            let Some(h) = self.emit_single(spawn.with_dir(Vec2::from_angle(base + offset))) else {
                break;
            };
            out.push(h);
        }
        out
    }

    /// Emit `count` shots evenly spaced around the full circle, starting at the
    /// spawn direction.
    pub fn emit_ring(&mut self, spawn: ProjectileSpawn, count: u32) -> Vec<PoolHandle> {
        if count == 0 {
            return Vec::new();
        }
        let base = spawn.angle();
        let step = std::f32::consts::TAU / count as f32;

        let mut out = Vec::with_capacity(count as usize);
        for i in 0..count {
            let Some(h) = self.emit_single(spawn.with_dir(Vec2::from_angle(base + step * i as f32)))
            else {
                break;
            };
            out.push(h);
        }
        out
    }

    /// One logical tick: move every live projectile `speed` along its direction
    /// and age it by `delta` seconds.
    pub fn advance(&mut self, delta: f32) {
        self.pool.for_each_active(|_, p| {
            p.pos += p.dir * p.speed;
            p.lifetime += delta;
        });
    }

    /// Release every live projectile matching `pred`. Returns how many went.
    pub fn cull_where(&mut self, mut pred: impl FnMut(&Projectile) -> bool) -> usize {
        self.pool.release_where(|_, p| pred(p)).len()
    }

    /// The standard cull: lifetime, pierce budget and bounds.
    pub fn cull_spent(&mut self, bounds: Rect, max_lifetime: f32) -> usize {
        self.cull_where(|p| p.is_spent(bounds, max_lifetime))
    }

    #[inline]
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        self.pool.release(handle)
    }

    #[inline]
    pub fn release_all(&mut self) -> usize {
        self.pool.release_all()
    }

    #[inline]
    pub fn get(&self, handle: PoolHandle) -> Option<&Projectile> {
        self.pool.get(handle)
    }

    /// Mutable access for the host's hit resolution (pierce budget, recolouring).
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut Projectile> {
        self.pool.get_mut(handle)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (PoolHandle, &Projectile)> {
        self.pool.iter_active()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    #[inline]
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }
}
