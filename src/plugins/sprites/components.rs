//! Ephemeral sprite data: spawn options, the pooled entry, payloads and expiry hooks.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::pool::{OFF_STAGE, Pooled};

/// Fallback texture key for anything the registry doesn't know.
pub const DEFAULT_TEXTURE: &str = "idle";

/// Texture keys registered with every new sprite pool.
pub const BUILTIN_TEXTURES: [&str; 6] = [DEFAULT_TEXTURE, "puff", "spark", "xp_orb", "coin", "heart"];

/// What a sprite is, for collection filtering and expiry messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteTag {
    #[default]
    Effect,
    Experience,
    Currency,
    Health,
}

impl SpriteTag {
    pub fn texture(self) -> &'static str {
        match self {
            SpriteTag::Effect => DEFAULT_TEXTURE,
            SpriteTag::Experience => "xp_orb",
            SpriteTag::Currency => "coin",
            SpriteTag::Health => "heart",
        }
    }
}

/// Runs when a sprite reaches the end of its lifespan (not when collected or released).
#[derive(Clone, Debug, PartialEq)]
pub enum ExpireHook {
    /// Emit a `SpriteExpired` message.
    Notify,
    /// Spawn a follow-up sprite where this one expired.
    Chain(Box<SpriteOptions>),
}

/// Per-instance custom payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Payload {
    pub collectible: bool,
    pub value: u32,
    pub tag: SpriteTag,
    pub on_expire: Option<ExpireHook>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpritePhysics {
    /// Downward acceleration, units/s².
    pub gravity: f32,
    /// Fraction of speed kept when bouncing off the arena edge.
    pub bounce: f32,
    /// Linear drag per second.
    pub drag: f32,
}

/// Spawn options. Anything left unset keeps the `Default` value:
/// `"idle"` texture, unit scale and alpha, white tint, 1 s lifespan, no motion,
/// not collectible, no hook, physics off.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteOptions {
    pub texture: &'static str,
    pub scale: f32,
    pub alpha: f32,
    pub tint: Color,
    pub lifespan: f32,
    pub rotation: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub collectible: bool,
    pub value: u32,
    pub tag: SpriteTag,
    pub on_expire: Option<ExpireHook>,
    pub gravity: f32,
    pub bounce: f32,
    pub drag: f32,
    pub enable_physics: bool,
}

impl Default for SpriteOptions {
    fn default() -> Self {
        Self {
            texture: DEFAULT_TEXTURE,
            scale: 1.0,
            alpha: 1.0,
            tint: Color::WHITE,
            lifespan: 1.0,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            collectible: false,
            value: 0,
            tag: SpriteTag::Effect,
            on_expire: None,
            gravity: 0.0,
            bounce: 0.0,
            drag: 0.0,
            enable_physics: false,
        }
    }
}

impl SpriteOptions {
    /// A purely visual effect.
    pub fn effect(texture: &'static str, lifespan: f32) -> Self {
        Self {
            texture,
            lifespan,
            ..default()
        }
    }

    /// A collectible pickup worth `value`.
    pub fn pickup(tag: SpriteTag, value: u32, lifespan: f32) -> Self {
        Self {
            texture: tag.texture(),
            lifespan,
            collectible: true,
            value,
            tag,
            ..default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_spin(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_physics(mut self, gravity: f32, bounce: f32, drag: f32) -> Self {
        self.gravity = gravity;
        self.bounce = bounce;
        self.drag = drag;
        self.enable_physics = true;
        self
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_expire(mut self, hook: ExpireHook) -> Self {
        self.on_expire = Some(hook);
        self
    }
}

/// One pooled sprite.
///
/// The render collaborator reads `pos`, `rotation`, `scale`, `alpha`, `tint` and
/// `texture` of Active entries every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct EphemeralSprite {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub angular_velocity: f32,
    pub lifespan: f32,
    pub lifetime: f32,
    pub scale: f32,
    pub alpha: f32,
    pub tint: Color,
    pub texture: &'static str,
    pub physics: Option<SpritePhysics>,
    pub payload: Payload,
}

impl EphemeralSprite {
    pub fn from_options(pos: Vec2, options: SpriteOptions) -> Self {
        let physics = options.enable_physics.then_some(SpritePhysics {
            gravity: options.gravity,
            bounce: options.bounce.max(0.0),
            drag: options.drag.max(0.0),
        });
        Self {
            pos,
            velocity: options.velocity,
            rotation: options.rotation,
            angular_velocity: options.angular_velocity,
            lifespan: options.lifespan.max(0.0),
            lifetime: 0.0,
            scale: options.scale,
            alpha: options.alpha,
            tint: options.tint,
            texture: options.texture,
            physics,
            payload: Payload {
                collectible: options.collectible,
                value: options.value,
                tag: options.tag,
                on_expire: options.on_expire,
            },
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.lifetime >= self.lifespan
    }

    /// One integration step. `bounds` enables bouncing for physics sprites.
    pub fn step(&mut self, dt: f32, bounds: Option<Rect>) {
        if let Some(phys) = self.physics {
            self.velocity.y -= phys.gravity * dt;
            if phys.drag > 0.0 {
                self.velocity *= (1.0 - phys.drag * dt).max(0.0);
            }
        }

        self.pos += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;

        if let (Some(phys), Some(b)) = (self.physics, bounds) {
            if self.pos.x < b.min.x {
                self.pos.x = b.min.x;
                self.velocity.x = self.velocity.x.abs() * phys.bounce;
            } else if self.pos.x > b.max.x {
                self.pos.x = b.max.x;
                self.velocity.x = -self.velocity.x.abs() * phys.bounce;
            }
            if self.pos.y < b.min.y {
                self.pos.y = b.min.y;
                self.velocity.y = self.velocity.y.abs() * phys.bounce;
            } else if self.pos.y > b.max.y {
                self.pos.y = b.max.y;
                self.velocity.y = -self.velocity.y.abs() * phys.bounce;
            }
        }

        self.lifetime += dt;
    }
}

impl Pooled for EphemeralSprite {
    type Spawn = (Vec2, SpriteOptions);

    fn construct() -> Self {
        Self {
            pos: OFF_STAGE,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            lifespan: 0.0,
            lifetime: 0.0,
            scale: 1.0,
            alpha: 0.0,
            tint: Color::WHITE,
            texture: DEFAULT_TEXTURE,
            physics: None,
            payload: Payload::default(),
        }
    }

    fn reset(&mut self, (pos, options): Self::Spawn) {
        *self = Self::from_options(pos, options);
    }

    fn clear(&mut self) {
        *self = Self::construct();
    }
}

/// A sprite with `ExpireHook::Notify` ran out of lifespan.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpriteExpired {
    pub tag: SpriteTag,
    pub value: u32,
    pub pos: Vec2,
}
