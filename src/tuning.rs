//! Data-driven game balance
//!
//! Every gameplay constant lives here, grouped per component. A tuning file is
//! JSON; missing keys keep their defaults so a file only needs the overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Player balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: i32,
    /// Movement speed (pixels per tick)
    pub speed: f32,
    /// Distance from the screen bottom to the player's bottom edge at spawn
    pub bottom_margin: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            speed: 10.0,
            bottom_margin: 50.0,
        }
    }
}

/// Pen (spawner) balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenTuning {
    /// Travel speed (pixels per tick)
    pub speed: f32,
    /// Ticks spent at a target before the attack fires
    pub dwell_ticks: u32,
}

impl Default for PenTuning {
    fn default() -> Self {
        Self {
            speed: 50.0,
            dwell_ticks: 40,
        }
    }
}

/// Gun attack balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GunTuning {
    pub total_shots: u32,
    /// Ticks between shots
    pub fire_delay: u32,
    /// Recoil offset change per tick (pixels)
    pub recoil_step: f32,
    /// Maximum recoil offset (pixels)
    pub recoil_max: f32,
}

impl Default for GunTuning {
    fn default() -> Self {
        Self {
            total_shots: 3,
            fire_delay: 18,
            recoil_step: 4.0,
            recoil_max: 12.0,
        }
    }
}

/// Bullet projectile balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    /// Pixels per second
    pub speed: f32,
    pub damage: i32,
    pub lifetime_ms: f64,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            speed: 600.0,
            damage: 10,
            lifetime_ms: 2500.0,
        }
    }
}

/// Grenade attack balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrenadeTuning {
    /// Flight speed (pixels per tick)
    pub speed: f32,
    pub explosion_radius: f32,
    /// Ticks between landing and detonation
    pub fuse_ticks: u32,
    pub damage: i32,
    /// Ticks the explosion sprite stays on screen
    pub explosion_ticks: u32,
    /// Grenade sprite scale relative to the source image
    pub sprite_scale: f32,
    /// Spin rate range (degrees per tick)
    pub min_spin: f32,
    pub max_spin: f32,
    /// Minimum landing distance (the flight speed is used if larger)
    pub land_threshold: f32,
}

impl Default for GrenadeTuning {
    fn default() -> Self {
        Self {
            speed: 8.0,
            explosion_radius: 120.0,
            fuse_ticks: 5,
            damage: 20,
            explosion_ticks: 15,
            sprite_scale: 1.3,
            min_spin: 8.0,
            max_spin: 18.0,
            land_threshold: 6.0,
        }
    }
}

/// Sword attack balance (all times are ticks since spawn)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwordTuning {
    pub damage: i32,
    /// Preview overlays start
    pub wait_ticks: u32,
    /// Preview overlays end
    pub preview_end: u32,
    /// Damage tick and start of the full-opacity slashes
    pub slash_start: u32,
    pub slash_end: u32,
    pub finish_ticks: u32,
    /// Hit band half-width around each slash line
    pub hit_half_width: f32,
    /// Slash sprite scale relative to the source image
    pub slash_scale: f32,
    /// Angles (degrees) of the slashes that track the player
    pub follow_angles: Vec<f32>,
    /// Slashes placed at random inside the play area
    pub random_slashes: u32,
}

impl Default for SwordTuning {
    fn default() -> Self {
        Self {
            damage: 15,
            wait_ticks: 30,
            preview_end: 120,
            slash_start: 120,
            slash_end: 210,
            finish_ticks: 270,
            hit_half_width: 18.0,
            slash_scale: 1.1,
            follow_angles: vec![-45.0, 45.0],
            random_slashes: 3,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub pen: PenTuning,
    pub gun: GunTuning,
    pub bullet: BulletTuning,
    pub grenade: GrenadeTuning,
    pub sword: SwordTuning,
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({})", e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if self.player.max_health <= 0 {
            return invalid("player.max_health", "must be positive");
        }
        if self.pen.speed <= 0.0 {
            return invalid("pen.speed", "must be positive");
        }
        if self.gun.total_shots == 0 {
            return invalid("gun.total_shots", "must be at least 1");
        }
        if self.gun.fire_delay == 0 {
            return invalid("gun.fire_delay", "must be at least 1 tick");
        }
        if self.bullet.speed <= 0.0 {
            return invalid("bullet.speed", "must be positive");
        }
        if self.grenade.speed <= 0.0 {
            return invalid("grenade.speed", "must be positive");
        }
        if self.grenade.min_spin > self.grenade.max_spin {
            return invalid("grenade.min_spin", "must not exceed max_spin");
        }
        let s = &self.sword;
        if !(s.wait_ticks <= s.preview_end
            && s.slash_start <= s.slash_end
            && s.slash_end <= s.finish_ticks
            && s.slash_start > 0)
        {
            return invalid("sword", "timeline must be ordered wait <= preview_end, 0 < slash_start <= slash_end <= finish");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "gun": { "total_shots": 5 } }"#).unwrap();
        assert_eq!(tuning.gun.total_shots, 5);
        assert_eq!(tuning.gun.fire_delay, 18);
        assert_eq!(tuning.grenade, GrenadeTuning::default());
    }

    #[test]
    fn test_rejects_zero_fire_delay() {
        let err = Tuning::from_json(r#"{ "gun": { "fire_delay": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "gun.fire_delay", .. }));
    }

    #[test]
    fn test_rejects_unordered_sword_timeline() {
        let err = Tuning::from_json(r#"{ "sword": { "slash_end": 300 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "sword", .. }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default(Path::new("/definitely/not/here.json"));
        assert_eq!(tuning, Tuning::default());
    }
}
