//! Sword: five slashes telegraphed, then struck all at once
//!
//! Two slashes follow the player (crossed at -45° and +45°), the rest sit at
//! random spots in the play area. Timeline in ticks since spawn:
//!
//! | ticks               | what happens                         |
//! |---------------------|--------------------------------------|
//! | 0 .. wait           | hilt only                            |
//! | wait .. preview_end | translucent slashes fading in        |
//! | slash_start         | every slash checks for a hit, once   |
//! | slash_start .. end  | full-opacity slashes                 |
//! | finish              | done                                 |
//!
//! Each slash hits along an infinite line through its center, within
//! `hit_half_width` of it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{AttackBehavior, SpawnContext};
use crate::assets::ImageHandle;
use crate::renderer::{Sprite, SpriteKey, Surface};
use crate::sim::collision::HitShape;
use crate::sim::player::Target;
use crate::sim::projectile::Projectile;
use crate::tuning::SwordTuning;

const PREVIEW_ALPHA_FROM: f32 = 110.0;
const PREVIEW_ALPHA_RANGE: f32 = 120.0;

/// One slash hitbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slash {
    pub pos: Vec2,
    pub angle_deg: f32,
    /// Locked to the player's live position
    pub follows: bool,
    /// Already checked for damage
    pub hit: bool,
    sprite: SpriteKey,
}

impl Slash {
    fn new(pos: Vec2, angle_deg: f32, follows: bool, image: &ImageHandle, scale: f32) -> Self {
        Self {
            pos,
            angle_deg,
            follows,
            hit: false,
            // Rotation is fixed for the slash's lifetime: key computed once
            sprite: SpriteKey::new(image).scaled(scale).rotated(angle_deg),
        }
    }

    pub fn shape(&self, half_width: f32) -> HitShape {
        HitShape::Line {
            origin: self.pos,
            theta: self.angle_deg.to_radians(),
            half_width,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwordAttack {
    /// Hilt position (pen center at spawn)
    pub origin: Vec2,
    pub slashes: Vec<Slash>,
    /// Ticks since spawn
    pub timer: u32,
    timing: SwordTuning,
    sword_img: ImageHandle,
    slash_img: ImageHandle,
    finished: bool,
}

impl SwordAttack {
    pub fn new(ctx: &SpawnContext<'_>, rng: &mut impl Rng) -> Self {
        let tuning = &ctx.tuning.sword;
        let slash_img = ctx.assets.slash;

        let mut slashes: Vec<Slash> = tuning
            .follow_angles
            .iter()
            .map(|&angle| Slash::new(ctx.player, angle, true, &slash_img, tuning.slash_scale))
            .collect();

        let area = ctx.arena.play_area;
        for _ in 0..tuning.random_slashes {
            let pos = Vec2::new(
                rng.random_range(area.left() as i32..=area.right() as i32) as f32,
                rng.random_range(area.top() as i32..=area.bottom() as i32) as f32,
            );
            let angle = rng.random_range(0.0..360.0);
            slashes.push(Slash::new(pos, angle, false, &slash_img, tuning.slash_scale));
        }

        Self {
            origin: ctx.pen,
            slashes,
            timer: 0,
            timing: tuning.clone(),
            sword_img: ctx.assets.sword,
            slash_img,
            finished: false,
        }
    }

    /// Check every slash against the player, once per slash
    fn strike(&mut self, target: &mut dyn Target) {
        let half_width = self.timing.hit_half_width;
        for slash in self.slashes.iter_mut().filter(|s| !s.hit) {
            if slash.shape(half_width).hits(&target.rect()) {
                target.apply_damage(self.timing.damage);
            }
            slash.hit = true;
        }
    }

    /// Preview fade-in alpha at the current timer
    fn preview_alpha(&self) -> u8 {
        let t = &self.timing;
        let span = t.preview_end.saturating_sub(t.wait_ticks).max(1) as f32;
        let progress = (self.timer - t.wait_ticks) as f32 / span;
        (PREVIEW_ALPHA_FROM + PREVIEW_ALPHA_RANGE * progress) as u8
    }

    fn draw_slashes(&self, surface: &mut dyn Surface, alpha: u8) {
        for slash in &self.slashes {
            let sprite = Sprite::new(slash.sprite, self.slash_img.size, slash.pos.floor()).with_alpha(alpha);
            surface.sprite(&sprite);
        }
    }
}

impl AttackBehavior for SwordAttack {
    fn update(&mut self, target: &mut dyn Target, _now_ms: f64) -> Vec<Projectile> {
        if self.finished {
            return Vec::new();
        }
        self.timer += 1;

        let player = target.position();
        for slash in self.slashes.iter_mut().filter(|s| s.follows) {
            slash.pos = player;
        }

        if self.timer == self.timing.slash_start {
            self.strike(target);
        }

        if self.timer >= self.timing.finish_ticks {
            self.finished = true;
        }
        Vec::new()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.finished {
            return;
        }

        surface.sprite(&Sprite::new(SpriteKey::new(&self.sword_img), self.sword_img.size, self.origin));

        let t = &self.timing;
        if (t.wait_ticks..t.preview_end).contains(&self.timer) {
            self.draw_slashes(surface, self.preview_alpha());
        }
        if (t.slash_start..t.slash_end).contains(&self.timer) {
            self.draw_slashes(surface, u8::MAX);
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn threats(&self) -> Vec<HitShape> {
        if self.timer >= self.timing.slash_start {
            return Vec::new();
        }
        // Follow slashes cannot be dodged; only the fixed ones are worth avoiding
        self.slashes
            .iter()
            .filter(|s| !s.follows)
            .map(|s| s.shape(self.timing.hit_half_width))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::assets::AttackAssets;
    use crate::renderer::DrawList;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn sword(player: Vec2, seed: u64) -> SwordAttack {
        let assets = AttackAssets::standard();
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        SwordAttack::new(&ctx(Vec2::new(600.0, 150.0), player, &assets, &tuning), &mut rng)
    }

    #[test]
    fn test_spawns_two_follow_three_random() {
        let s = sword(Vec2::new(500.0, 500.0), 5);
        assert_eq!(s.slashes.len(), 5);
        let follows: Vec<f32> = s.slashes.iter().filter(|s| s.follows).map(|s| s.angle_deg).collect();
        assert_eq!(follows, vec![-45.0, 45.0]);
        for slash in s.slashes.iter().filter(|s| !s.follows) {
            assert!(ARENA.play_area.contains_point(slash.pos));
            assert!((0.0..360.0).contains(&slash.angle_deg));
        }
    }

    #[test]
    fn test_follow_slashes_track_player() {
        let mut s = sword(Vec2::new(500.0, 500.0), 5);
        let mut player = player_at(Vec2::new(700.0, 600.0));
        s.update(&mut player, 0.0);
        for slash in s.slashes.iter().filter(|s| s.follows) {
            assert_eq!(slash.pos, Vec2::new(700.0, 600.0));
        }
    }

    #[test]
    fn test_all_slashes_resolve_on_strike_tick() {
        let center = Vec2::new(500.0, 500.0);
        let mut s = sword(center, 9);
        let mut player = player_at(center);

        // Random slashes: one 19 px off its line, one exactly on it, one far away
        s.slashes[2].pos = Vec2::new(500.0, 481.0);
        s.slashes[2].angle_deg = 0.0;
        s.slashes[3].pos = Vec2::new(300.0, 500.0);
        s.slashes[3].angle_deg = 0.0;
        s.slashes[4].pos = Vec2::new(500.0, 100.0);
        s.slashes[4].angle_deg = 0.0;

        for _ in 0..119 {
            s.update(&mut player, 0.0);
        }
        assert!(s.slashes.iter().all(|sl| !sl.hit));
        assert_eq!(player.health(), 100);

        s.update(&mut player, 0.0);
        assert_eq!(s.timer, 120);
        assert!(s.slashes.iter().all(|sl| sl.hit));
        // Two follow slashes + the on-line slash, 15 each
        assert_eq!(player.health(), 55);

        // Never again
        for _ in 0..200 {
            s.update(&mut player, 0.0);
        }
        assert_eq!(player.health(), 55);
        assert!(s.is_finished());
        assert_eq!(s.timer, 270);
    }

    #[test]
    fn test_draw_phases() {
        let mut s = sword(Vec2::new(500.0, 500.0), 1);
        let mut player = player_at(Vec2::new(500.0, 500.0));
        let sprites_at = |s: &SwordAttack| {
            let mut list = DrawList::new();
            s.draw(&mut list);
            list.sprites().map(|sp| sp.alpha).collect::<Vec<_>>()
        };

        // Wait phase: hilt only
        assert_eq!(sprites_at(&s).len(), 1);

        for _ in 0..30 {
            s.update(&mut player, 0.0);
        }
        let preview = sprites_at(&s);
        assert_eq!(preview.len(), 6);
        assert_eq!(preview[1], 110);

        for _ in 30..120 {
            s.update(&mut player, 0.0);
        }
        let strike = sprites_at(&s);
        assert_eq!(strike.len(), 6);
        assert!(strike.iter().all(|&a| a == 255));

        for _ in 120..210 {
            s.update(&mut player, 0.0);
        }
        assert_eq!(sprites_at(&s).len(), 1);

        for _ in 210..270 {
            s.update(&mut player, 0.0);
        }
        assert!(sprites_at(&s).is_empty());
    }

    #[test]
    fn test_threats_are_fixed_slashes_before_strike() {
        let mut s = sword(Vec2::new(500.0, 500.0), 2);
        let mut player = player_at(Vec2::new(500.0, 500.0));
        assert_eq!(s.threats().len(), 3);
        for _ in 0..120 {
            s.update(&mut player, 0.0);
        }
        assert!(s.threats().is_empty());
    }
}
