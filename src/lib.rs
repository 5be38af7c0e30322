//! Unchecked - dodge the pen's attacks inside the play area
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, pen, attacks, projectiles)
//! - `renderer`: Drawing surface abstraction and frame composition
//! - `assets`: Image handle registry resolved once at startup
//! - `tuning`: Data-driven game balance
//! - `settings`: Display preferences

pub mod assets;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use assets::{AssetBundle, AssetError, AttackAssets, ImageHandle};
pub use settings::{DisplayMode, Settings};
pub use tuning::{ConfigError, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Milliseconds of game time per tick
    pub const MS_PER_TICK: f64 = 1000.0 / TICK_RATE as f64;

    /// Windowed screen size (the fullscreen size comes from the host)
    pub const WINDOWED_WIDTH: u32 = 1200;
    pub const WINDOWED_HEIGHT: u32 = 900;

    /// Play area is this fraction of the screen, centered and flush with the bottom
    pub const PLAY_AREA_FRACTION: f32 = 0.6;

    /// Pen spawn area (fractions of the screen)
    pub const SPAWN_AREA_X: f32 = 0.05;
    pub const SPAWN_AREA_Y: f32 = 0.05;
    pub const SPAWN_AREA_W: f32 = 0.9;
    pub const SPAWN_AREA_H: f32 = 0.3;

    /// Sprite sizes (pixels)
    pub const PLAYER_SIZE: f32 = 25.0;
    pub const PEN_SIZE: f32 = 130.0;
    pub const GUN_SIZE: f32 = 100.0;
    pub const BULLET_SIZE: f32 = 20.0;
    pub const GRENADE_SIZE: f32 = 40.0;
    pub const EXPLOSION_SIZE: f32 = 160.0;
    pub const SWORD_SIZE: f32 = 80.0;
    pub const SLASH_WIDTH: f32 = 200.0;
    pub const SLASH_HEIGHT: f32 = 30.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Angle (radians, screen space with y down) of the vector from `from` to `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector pointing from `from` to `to`, straight down when the points coincide
#[inline]
pub fn aim_direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(Vec2::Y)
}
