//! Tunable gameplay constants.
//!
//! Everything here has a default, and every struct is `#[serde(default)]`, so a RON file
//! only needs to name the values it overrides:
//!
//! ```text
//! (
//!     tick_hz: 30.0,
//!     sprite_pool: (initial_size: 10, max_size: 50, grow_size: 5),
//!     collection: (scan_interval: 0.2),
//! )
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;
use crate::common::pool::PoolConfig;
use crate::plugins::enemies::components::{EnemyKind, Faction};
use crate::plugins::enemies::profile::{BossProfile, EnemyProfile, VolleyProfile};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// Logical ticks per second for `FixedUpdate`.
    pub tick_hz: f64,
    pub player_speed: f32,
    /// Projectiles beyond these half-extents are culled; physics sprites bounce off them.
    pub arena_half_extents: [f32; 2],
    /// `None` seeds from entropy.
    pub rng_seed: Option<u64>,
    pub projectile_pool: PoolConfig,
    pub sprite_pool: PoolConfig,
    pub projectile_max_lifetime: f32,
    pub collection: CollectionTunables,
    pub grunt: EnemyProfile,
    pub gunner: EnemyProfile,
    pub boss: EnemyProfile,
    pub boss_phases: BossProfile,
    /// Seconds between entering `Death` and teardown.
    pub death_delay: f32,
    pub encounter: Vec<EncounterSpawn>,
    /// Seconds between pool stats log lines.
    pub diagnostics_interval: f32,
}

impl Tunables {
    pub fn from_ron_str(src: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(src)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path)?;
        Self::from_ron_str(&src)
    }

    /// Load from `path`, or warn and fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(t) => {
                info!("loaded tunables from {}", path.display());
                t
            }
            Err(e) => {
                warn!("using default tunables ({}): {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn profile(&self, kind: EnemyKind) -> &EnemyProfile {
        match kind {
            EnemyKind::Grunt => &self.grunt,
            EnemyKind::Gunner => &self.gunner,
            EnemyKind::Boss => &self.boss,
        }
    }

    /// Axis-aligned playable area centred on the origin.
    pub fn arena_rect(&self) -> Rect {
        let [hw, hh] = self.arena_half_extents;
        Rect::new(-hw, -hh, hw, hh)
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            tick_hz: 60.0,
            player_speed: 420.0,
            arena_half_extents: [1024.0, 576.0],
            rng_seed: None,
            projectile_pool: PoolConfig::new(64, 1024, 32),
            sprite_pool: PoolConfig::new(30, 200, 10),
            projectile_max_lifetime: 4.0,
            collection: CollectionTunables::default(),
            grunt: EnemyProfile::grunt(),
            gunner: EnemyProfile::gunner(),
            boss: EnemyProfile::boss(),
            boss_phases: BossProfile::default(),
            death_delay: 0.35,
            encounter: vec![
                EncounterSpawn::new(EnemyKind::Grunt, [-320.0, 220.0]),
                EncounterSpawn::new(EnemyKind::Grunt, [320.0, 220.0]),
                EncounterSpawn::new(EnemyKind::Gunner, [0.0, 360.0]),
                EncounterSpawn {
                    kind: EnemyKind::Boss,
                    at: [0.0, -380.0],
                    faction: Faction::Void,
                },
            ],
            diagnostics_interval: 5.0,
        }
    }
}

/// Pickup collection radii and scan throttle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionTunables {
    /// Minimum seconds between proximity scans.
    pub scan_interval: f32,
    pub experience_radius: f32,
    pub currency_radius: f32,
    pub health_radius: f32,
    /// How long a dropped pickup stays on the floor.
    pub pickup_lifespan: f32,
}

impl Default for CollectionTunables {
    fn default() -> Self {
        Self {
            scan_interval: 0.1,
            experience_radius: 40.0,
            currency_radius: 40.0,
            health_radius: 32.0,
            pickup_lifespan: 30.0,
        }
    }
}

/// One enemy placed when the encounter starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncounterSpawn {
    pub kind: EnemyKind,
    pub at: [f32; 2],
    #[serde(default)]
    pub faction: Faction,
}

impl EncounterSpawn {
    pub fn new(kind: EnemyKind, at: [f32; 2]) -> Self {
        Self {
            kind,
            at,
            faction: Faction::default(),
        }
    }
}

/// Convenience for colour triples stored in config.
#[inline]
pub fn rgb(c: [f32; 3]) -> Color {
    Color::srgb(c[0], c[1], c[2])
}

impl VolleyProfile {
    #[inline]
    pub fn color(&self) -> Color {
        rgb(self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_pool_sizes() {
        let t = Tunables::default();
        assert_eq!(t.sprite_pool, PoolConfig::new(30, 200, 10));
        assert!((t.collection.scan_interval - 0.1).abs() < 1e-6);
        assert!(t.projectile_pool.validate(crate::common::pool::PoolCategory::Projectile).is_ok());
    }

    #[test]
    fn partial_ron_overrides_only_named_fields() {
        let src = r#"(
            tick_hz: 30.0,
            rng_seed: Some(7),
            sprite_pool: (initial_size: 2, max_size: 3, grow_size: 1),
            collection: (scan_interval: 0.25),
            boss_phases: (segment_count: 4),
        )"#;
        let t = Tunables::from_ron_str(src).expect("valid ron");

        assert_eq!(t.tick_hz, 30.0);
        assert_eq!(t.rng_seed, Some(7));
        assert_eq!(t.sprite_pool, PoolConfig::new(2, 3, 1));
        assert!((t.collection.scan_interval - 0.25).abs() < 1e-6);
        assert!((t.collection.experience_radius - 40.0).abs() < 1e-6);
        assert_eq!(t.boss_phases.segment_count, 4);
        assert_eq!(t.grunt, EnemyProfile::grunt());
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let err = Tunables::from_ron_str("(tick_hz: \"fast\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let t = Tunables::load_or_default("definitely/not/here.ron");
        assert_eq!(t, Tunables::default());
    }

    #[test]
    fn shipped_config_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/tunables.ron");
        let t = Tunables::load(path).expect("shipped config is valid");
        assert_eq!(t.encounter.len(), 4);
        assert_eq!(t.encounter[2].faction, Faction::Legion);
        assert_eq!(t.sprite_pool, PoolConfig::new(30, 200, 10));
    }

    #[test]
    fn profile_lookup_by_kind() {
        let t = Tunables::default();
        assert_eq!(t.profile(EnemyKind::Boss).hp, t.boss.hp);
        assert_eq!(t.profile(EnemyKind::Gunner).volley.count, t.gunner.volley.count);
    }
}
