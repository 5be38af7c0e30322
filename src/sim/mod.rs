//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Drawing only through the `Surface` trait

pub mod arena;
pub mod attack;
pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod pen;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use attack::{Attack, AttackBehavior, AttackKind, SpawnContext};
pub use collision::HitShape;
pub use geometry::Rect;
pub use pen::Pen;
pub use player::{Player, Target};
pub use projectile::{Projectile, ProjectileKind};
pub use state::{ActiveAttack, GameEvent, GamePhase, GameState, HitSource, Snapshot};
pub use tick::{TickInput, tick};
