//! Grenade: thrown at where the player stood, lands, fuses, explodes
//!
//! FLYING -> LANDED_FUSE -> EXPLODING -> DONE. The target is locked at spawn;
//! the blast radius is previewed on the ground while the grenade is in the air.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{AttackBehavior, SpawnContext};
use crate::assets::ImageHandle;
use crate::consts::MS_PER_TICK;
use crate::renderer::{Sprite, SpriteKey, Surface};
use crate::sim::collision::{HitShape, circle_contains};
use crate::sim::player::Target;
use crate::sim::projectile::Projectile;

/// Preview alpha triangle wave
const PREVIEW_ALPHA_START: f32 = 90.0;
const PREVIEW_ALPHA_STEP: f32 = 6.0;
const PREVIEW_ALPHA_HIGH: f32 = 200.0;
const PREVIEW_ALPHA_LOW: f32 = 30.0;
/// Alpha actually drawn is clamped to this range
const PREVIEW_DRAW_MIN: f32 = 20.0;
const PREVIEW_DRAW_MAX: f32 = 220.0;
const PREVIEW_COLOR: [u8; 3] = [200, 0, 0];
/// Explosion sprite overshoots the blast diameter by this many pixels
const EXPLOSION_OVERSIZE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrenadePhase {
    Flying,
    /// Ticks left on the fuse
    LandedFuse { remaining: u32 },
    /// Ticks left on the explosion visual
    Exploding { remaining: u32 },
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrenadeAttack {
    pub pos: Vec2,
    /// Player center at spawn
    pub target: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub speed: f32,
    pub phase: GrenadePhase,
    pub explosion_radius: f32,
    pub damage: i32,
    /// Visual spin (degrees)
    pub spin: f32,
    /// Degrees per tick
    pub spin_rate: f32,
    fuse_ticks: u32,
    explosion_ticks: u32,
    land_threshold: f32,
    preview_alpha: f32,
    preview_dir: f32,
    age_ticks: u64,
    sprite_scale: f32,
    grenade_img: ImageHandle,
    explosion_img: ImageHandle,
    finished: bool,
}

impl GrenadeAttack {
    pub fn new(ctx: &SpawnContext<'_>, rng: &mut impl Rng) -> Self {
        let tuning = &ctx.tuning.grenade;
        let vel = (ctx.player - ctx.pen).try_normalize().unwrap_or(Vec2::ZERO) * tuning.speed;
        Self {
            pos: ctx.pen,
            target: ctx.player,
            vel,
            speed: tuning.speed,
            phase: GrenadePhase::Flying,
            explosion_radius: tuning.explosion_radius,
            damage: tuning.damage,
            spin: 0.0,
            spin_rate: rng.random_range(tuning.min_spin..=tuning.max_spin),
            fuse_ticks: tuning.fuse_ticks,
            explosion_ticks: tuning.explosion_ticks,
            land_threshold: tuning.land_threshold,
            preview_alpha: PREVIEW_ALPHA_START,
            preview_dir: 1.0,
            age_ticks: 0,
            sprite_scale: tuning.sprite_scale,
            grenade_img: ctx.assets.grenade,
            explosion_img: ctx.assets.explosion,
            finished: false,
        }
    }

    pub fn blast(&self) -> HitShape {
        HitShape::Circle {
            center: self.target,
            radius: self.explosion_radius,
        }
    }

    /// Current preview circle radius (pulses with time)
    pub fn preview_radius(&self) -> f32 {
        let t_ms = self.age_ticks as f64 * MS_PER_TICK;
        self.explosion_radius * (0.9 + 0.15 * (t_ms / 200.0).sin() as f32)
    }

    /// Preview alpha as drawn
    pub fn preview_alpha(&self) -> u8 {
        self.preview_alpha.clamp(PREVIEW_DRAW_MIN, PREVIEW_DRAW_MAX) as u8
    }

    fn explode(&mut self, target: &mut dyn Target) {
        let hit = circle_contains(self.target, self.explosion_radius, target.position());
        if hit {
            target.apply_damage(self.damage);
        }
        log::debug!("Grenade exploded at {:?} (player hit: {})", self.target, hit);

        self.phase = if self.explosion_ticks > 0 {
            GrenadePhase::Exploding {
                remaining: self.explosion_ticks,
            }
        } else {
            self.finished = true;
            GrenadePhase::Done
        };
    }

    fn step_preview(&mut self) {
        self.preview_alpha += self.preview_dir * PREVIEW_ALPHA_STEP;
        if self.preview_alpha >= PREVIEW_ALPHA_HIGH {
            self.preview_dir = -1.0;
        }
        if self.preview_alpha <= PREVIEW_ALPHA_LOW {
            self.preview_dir = 1.0;
        }
    }
}

impl AttackBehavior for GrenadeAttack {
    fn update(&mut self, target: &mut dyn Target, _now_ms: f64) -> Vec<Projectile> {
        if self.finished {
            return Vec::new();
        }
        self.age_ticks += 1;

        match self.phase {
            GrenadePhase::Flying => {
                self.pos += self.vel;
                self.spin = (self.spin + self.spin_rate) % 360.0;
                if self.pos.distance(self.target) < self.land_threshold.max(self.speed) {
                    self.phase = GrenadePhase::LandedFuse {
                        remaining: self.fuse_ticks,
                    };
                }
            }
            GrenadePhase::LandedFuse { remaining } => {
                if remaining > 0 {
                    self.phase = GrenadePhase::LandedFuse {
                        remaining: remaining - 1,
                    };
                } else {
                    self.explode(target);
                }
            }
            GrenadePhase::Exploding { remaining } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.phase = GrenadePhase::Done;
                    self.finished = true;
                } else {
                    self.phase = GrenadePhase::Exploding { remaining };
                }
                return Vec::new();
            }
            GrenadePhase::Done => {
                self.finished = true;
                return Vec::new();
            }
        }

        self.step_preview();
        Vec::new()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.finished {
            return;
        }

        if self.phase == GrenadePhase::Flying {
            let [r, g, b] = PREVIEW_COLOR;
            surface.circle(self.target, self.preview_radius().floor(), [r, g, b, self.preview_alpha()]);
        }

        let key = SpriteKey::new(&self.grenade_img)
            .scaled(self.sprite_scale)
            .rotated(self.spin);
        surface.sprite(&Sprite::new(key, self.grenade_img.size, self.pos));

        if let GrenadePhase::Exploding { .. } = self.phase {
            let diameter = self.explosion_radius * 2.0 + EXPLOSION_OVERSIZE;
            let scale = diameter / self.explosion_img.size.x.max(1.0);
            let key = SpriteKey::new(&self.explosion_img).scaled(scale);
            surface.sprite(&Sprite::new(key, self.explosion_img.size, self.target));
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn threats(&self) -> Vec<HitShape> {
        match self.phase {
            GrenadePhase::Flying | GrenadePhase::LandedFuse { .. } => vec![self.blast()],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::assets::AttackAssets;
    use crate::renderer::{DrawCommand, DrawList};
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn grenade(pen: Vec2, player: Vec2) -> GrenadeAttack {
        let assets = AttackAssets::standard();
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        GrenadeAttack::new(&ctx(pen, player, &assets, &tuning), &mut rng)
    }

    /// Ticks until the grenade leaves the Flying phase
    fn fly(g: &mut GrenadeAttack, player: &mut dyn Target) -> u32 {
        let mut ticks = 0;
        while g.phase == GrenadePhase::Flying {
            g.update(player, 0.0);
            ticks += 1;
            assert!(ticks < 1000);
        }
        ticks
    }

    #[test]
    fn test_target_locked_at_spawn() {
        let q = Vec2::new(600.0, 700.0);
        let mut g = grenade(Vec2::new(600.0, 100.0), q);
        let mut player = player_at(q);
        player.set_position(Vec2::new(900.0, 850.0));
        fly(&mut g, &mut player);
        assert_eq!(g.target, q);
        assert!(g.pos.distance(q) < 8.0);
    }

    #[test]
    fn test_phase_timeline() {
        // 600 px at 8 px/tick: 75 steps, lands when < 8 px away
        let mut g = grenade(Vec2::new(600.0, 100.0), Vec2::new(600.0, 700.0));
        let mut player = player_at(Vec2::new(600.0, 700.0));
        let flight = fly(&mut g, &mut player);
        assert_eq!(flight, 75);
        assert_eq!(g.phase, GrenadePhase::LandedFuse { remaining: 5 });

        for _ in 0..5 {
            g.update(&mut player, 0.0);
            assert_eq!(player.health(), 100);
        }
        assert_eq!(g.phase, GrenadePhase::LandedFuse { remaining: 0 });

        g.update(&mut player, 0.0);
        assert_eq!(g.phase, GrenadePhase::Exploding { remaining: 15 });
        assert_eq!(player.health(), 80);

        for _ in 0..14 {
            g.update(&mut player, 0.0);
            assert!(!g.is_finished());
        }
        g.update(&mut player, 0.0);
        assert_eq!(g.phase, GrenadePhase::Done);
        assert!(g.is_finished());
        assert_eq!(player.health(), 80);
    }

    #[test]
    fn test_blast_radius_inclusive() {
        let q = Vec2::new(600.0, 500.0);
        for (offset, expected) in [(120.0, 80), (121.0, 100)] {
            let mut g = grenade(Vec2::new(600.0, 100.0), q);
            let mut player = player_at(q);
            fly(&mut g, &mut player);
            player.set_position(q + Vec2::new(offset, 0.0));
            for _ in 0..6 {
                g.update(&mut player, 0.0);
            }
            assert_eq!(player.health(), expected, "offset {}", offset);
        }
    }

    #[test]
    fn test_spin_rate_in_range() {
        for seed in 0..50 {
            let assets = AttackAssets::standard();
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let g = GrenadeAttack::new(&ctx(Vec2::ZERO, Vec2::ONE, &assets, &tuning), &mut rng);
            assert!((8.0..=18.0).contains(&g.spin_rate));
        }
    }

    #[test]
    fn test_preview_drawn_only_while_flying() {
        let mut g = grenade(Vec2::new(600.0, 100.0), Vec2::new(600.0, 700.0));
        let mut player = player_at(Vec2::new(600.0, 700.0));
        let mut list = DrawList::new();
        g.draw(&mut list);
        let circle = list.commands.iter().find_map(|c| match c {
            DrawCommand::Circle { center, radius, color } => Some((*center, *radius, color[3])),
            _ => None,
        });
        let (center, radius, alpha) = circle.expect("preview circle");
        assert_eq!(center, Vec2::new(600.0, 700.0));
        assert!((102.0..=126.0).contains(&radius));
        assert!((20..=220).contains(&alpha));

        fly(&mut g, &mut player);
        list.clear();
        g.draw(&mut list);
        assert!(!list.commands.iter().any(|c| matches!(c, DrawCommand::Circle { .. })));
    }

    #[test]
    fn test_preview_alpha_stays_bounded() {
        let mut g = grenade(Vec2::new(600.0, 100.0), Vec2::new(600.0, 900.0));
        let mut player = player_at(Vec2::new(600.0, 850.0));
        for _ in 0..90 {
            g.update(&mut player, 0.0);
            assert!((24.0..=204.0).contains(&g.preview_alpha));
        }
    }
}
