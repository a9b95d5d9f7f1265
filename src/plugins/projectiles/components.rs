//! Projectile entry data.
//!
//! A projectile is pure arena data: the rendering collaborator reads `pos`, `color`
//! and `size` of Active entries every frame and never needs to know about the pool.

use bevy::prelude::*;

use crate::common::pool::{OFF_STAGE, Pooled};

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    /// Unit direction of travel.
    pub dir: Vec2,
    /// Distance per logical tick, not per second.
    pub speed: f32,
    /// Remaining pierce budget. The host's hit resolution decrements it.
    pub health: i32,
    /// Seconds since emission.
    pub lifetime: f32,
    pub color: Color,
    pub size: f32,
}

/// Spawn parameters for one projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub pos: Vec2,
    pub dir: Vec2,
    pub speed: f32,
    pub health: i32,
    pub color: Color,
    pub size: f32,
}

impl ProjectileSpawn {
    /// Same shot, travelling along `dir` instead.
    #[inline]
    pub fn with_dir(self, dir: Vec2) -> Self {
        Self { dir, ..self }
    }

    /// Base angle of travel in radians.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.dir.y.atan2(self.dir.x)
    }
}

impl Pooled for Projectile {
    type Spawn = ProjectileSpawn;

    fn construct() -> Self {
        Self {
            pos: OFF_STAGE,
            dir: Vec2::ZERO,
            speed: 0.0,
            health: 0,
            lifetime: 0.0,
            color: Color::WHITE,
            size: 0.0,
        }
    }

    fn reset(&mut self, spawn: ProjectileSpawn) {
        self.pos = spawn.pos;
        self.dir = spawn.dir.try_normalize().unwrap_or(Vec2::X);
        self.speed = spawn.speed;
        self.health = spawn.health;
        self.lifetime = 0.0;
        self.color = spawn.color;
        self.size = spawn.size;
    }

    fn clear(&mut self) {
        *self = Self::construct();
    }
}

impl Projectile {
    /// Spent projectiles get culled: out of time, out of pierce, or out of bounds.
    #[inline]
    pub fn is_spent(&self, bounds: Rect, max_lifetime: f32) -> bool {
        self.lifetime > max_lifetime || self.health <= 0 || !bounds.contains(self.pos)
    }
}
