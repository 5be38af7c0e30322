//! Attacks spawned by the pen
//!
//! Every attack is a small timed state machine counted in fixed ticks. Attacks
//! capture the pen and player positions at spawn by value; only the gun's aim
//! and the sword's follow slashes read the live player through `Target`.

pub mod grenade;
pub mod gun;
pub mod sword;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use grenade::{GrenadeAttack, GrenadePhase};
pub use gun::GunAttack;
pub use sword::{Slash, SwordAttack};

use super::arena::Arena;
use super::collision::HitShape;
use super::player::Target;
use super::projectile::Projectile;
use crate::assets::AttackAssets;
use crate::renderer::Surface;
use crate::tuning::Tuning;

/// Attack variants the pen can pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    Gun,
    Grenade,
    Sword,
}

impl AttackKind {
    pub const ALL: [AttackKind; 3] = [AttackKind::Gun, AttackKind::Grenade, AttackKind::Sword];

    /// Uniform random pick
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttackKind::Gun => "gun",
            AttackKind::Grenade => "grenade",
            AttackKind::Sword => "sword",
        }
    }
}

/// Everything an attack may read while it is being built
#[derive(Clone, Copy)]
pub struct SpawnContext<'a> {
    /// Pen center at spawn
    pub pen: Vec2,
    /// Player center at spawn
    pub player: Vec2,
    pub assets: &'a AttackAssets,
    pub arena: &'a Arena,
    pub tuning: &'a Tuning,
}

/// Common contract of every attack
pub trait AttackBehavior {
    /// Advance one tick. Returns newly spawned projectiles (possibly none).
    ///
    /// A no-op once the attack has finished.
    fn update(&mut self, target: &mut dyn Target, now_ms: f64) -> Vec<Projectile>;

    /// A no-op once the attack has finished.
    fn draw(&self, surface: &mut dyn Surface);

    fn is_finished(&self) -> bool;

    /// Regions that will (or currently can) hurt the player
    fn threats(&self) -> Vec<HitShape>;
}

/// A live attack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Attack {
    Gun(GunAttack),
    Grenade(GrenadeAttack),
    Sword(SwordAttack),
}

impl Attack {
    pub fn spawn(kind: AttackKind, ctx: &SpawnContext<'_>, rng: &mut impl Rng) -> Self {
        match kind {
            AttackKind::Gun => Attack::Gun(GunAttack::new(ctx)),
            AttackKind::Grenade => Attack::Grenade(GrenadeAttack::new(ctx, rng)),
            AttackKind::Sword => Attack::Sword(SwordAttack::new(ctx, rng)),
        }
    }

    pub fn kind(&self) -> AttackKind {
        match self {
            Attack::Gun(_) => AttackKind::Gun,
            Attack::Grenade(_) => AttackKind::Grenade,
            Attack::Sword(_) => AttackKind::Sword,
        }
    }

    fn behavior(&self) -> &dyn AttackBehavior {
        match self {
            Attack::Gun(a) => a,
            Attack::Grenade(a) => a,
            Attack::Sword(a) => a,
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn AttackBehavior {
        match self {
            Attack::Gun(a) => a,
            Attack::Grenade(a) => a,
            Attack::Sword(a) => a,
        }
    }
}

impl AttackBehavior for Attack {
    fn update(&mut self, target: &mut dyn Target, now_ms: f64) -> Vec<Projectile> {
        self.behavior_mut().update(target, now_ms)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.behavior().draw(surface)
    }

    fn is_finished(&self) -> bool {
        self.behavior().is_finished()
    }

    fn threats(&self) -> Vec<HitShape> {
        self.behavior().threats()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::sim::Player;
    use crate::tuning::PlayerTuning;

    pub const ARENA: Arena = Arena {
        screen: Vec2::new(1200.0, 900.0),
        play_area: crate::sim::Rect::new(240.0, 360.0, 720.0, 540.0),
        spawn_area: crate::sim::Rect::new(60.0, 45.0, 1080.0, 270.0),
    };

    pub fn player_at(center: Vec2) -> Player {
        let mut p = Player::new(&ARENA, Vec2::splat(25.0), &PlayerTuning::default());
        p.set_position(center);
        p
    }

    pub fn ctx<'a>(pen: Vec2, player: Vec2, assets: &'a AttackAssets, tuning: &'a Tuning) -> SpawnContext<'a> {
        SpawnContext {
            pen,
            player,
            assets,
            arena: &ARENA,
            tuning,
        }
    }
}
