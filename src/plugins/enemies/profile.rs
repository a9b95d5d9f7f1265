//! Per-kind enemy numbers. Loaded as part of `Tunables`.

use serde::{Deserialize, Serialize};

/// Projectiles fired by one attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolleyProfile {
    pub count: u32,
    /// Total arc; each shot gets an independent random offset within half of it.
    pub spread_degrees: f32,
    /// Units per tick.
    pub speed: f32,
    pub pierce: i32,
    pub size: f32,
    pub color: [f32; 3],
}

impl Default for VolleyProfile {
    fn default() -> Self {
        Self {
            count: 1,
            spread_degrees: 0.0,
            speed: 4.0,
            pierce: 1,
            size: 6.0,
            color: [1.0, 0.35, 0.3],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyProfile {
    pub hp: i32,
    pub speed: f32,
    pub radius: f32,
    /// Centre of the preferred distance band.
    pub preferred_distance: f32,
    pub attack_range: f32,
    /// Seconds between normal attacks.
    pub attack_cooldown: f32,
    /// Seconds from attack start until the volley fires.
    pub windup: f32,
    pub volley: VolleyProfile,
    pub xp_value: u32,
    pub cash_value: u32,
    /// Probability of a currency drop on death.
    pub cash_chance: f32,
    pub color: [f32; 3],
}

impl EnemyProfile {
    pub fn grunt() -> Self {
        Self {
            hp: 30,
            speed: 90.0,
            radius: 14.0,
            preferred_distance: 60.0,
            attack_range: 120.0,
            attack_cooldown: 1.8,
            windup: 0.6,
            volley: VolleyProfile::default(),
            xp_value: 5,
            cash_value: 1,
            cash_chance: 0.3,
            color: [0.85, 0.3, 0.3],
        }
    }

    pub fn gunner() -> Self {
        Self {
            hp: 50,
            speed: 70.0,
            radius: 16.0,
            preferred_distance: 200.0,
            attack_range: 320.0,
            attack_cooldown: 2.5,
            windup: 0.6,
            volley: VolleyProfile {
                count: 5,
                spread_degrees: 30.0,
                speed: 5.0,
                color: [1.0, 0.7, 0.2],
                ..VolleyProfile::default()
            },
            xp_value: 12,
            cash_value: 3,
            cash_chance: 0.5,
            color: [0.9, 0.55, 0.2],
        }
    }

    pub fn boss() -> Self {
        Self {
            hp: 1000,
            speed: 60.0,
            radius: 40.0,
            preferred_distance: 220.0,
            attack_range: 360.0,
            attack_cooldown: 2.0,
            windup: 0.6,
            volley: VolleyProfile {
                count: 3,
                spread_degrees: 20.0,
                speed: 6.0,
                pierce: 2,
                size: 9.0,
                color: [0.8, 0.3, 1.0],
            },
            xp_value: 100,
            cash_value: 25,
            cash_chance: 1.0,
            color: [0.55, 0.2, 0.75],
        }
    }
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self::grunt()
    }
}

/// Boss-only numbers: health segments and the Special/Dash attacks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossProfile {
    pub segment_count: u32,
    /// Special needs health below this fraction of base health.
    pub special_health_fraction: f32,
    pub special_cooldown: f32,
    pub special_windup: f32,
    /// Projectiles in the ring burst.
    pub special_burst: u32,
    /// Grunts summoned after the burst.
    pub minion_count: u32,
    pub minion_ring_radius: f32,
    /// Dash needs health below this fraction of base health.
    pub dash_health_fraction: f32,
    /// Dash needs the target farther than this.
    pub dash_min_distance: f32,
    pub dash_cooldown: f32,
    pub dash_speed: f32,
    pub dash_duration: f32,
    /// Health pickup value dropped on death.
    pub health_drop: u32,
}

impl Default for BossProfile {
    fn default() -> Self {
        Self {
            segment_count: 3,
            special_health_fraction: 0.6,
            special_cooldown: 8.0,
            special_windup: 0.8,
            special_burst: 16,
            minion_count: 4,
            minion_ring_radius: 90.0,
            dash_health_fraction: 0.8,
            dash_min_distance: 150.0,
            dash_cooldown: 5.0,
            dash_speed: 520.0,
            dash_duration: 0.45,
            health_drop: 25,
        }
    }
}
