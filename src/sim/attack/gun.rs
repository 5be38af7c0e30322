//! Gun: a burst of bullets, each re-aimed at the player when fired

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{AttackBehavior, SpawnContext};
use crate::{aim_direction, angle_to};
use crate::assets::ImageHandle;
use crate::renderer::{Sprite, SpriteKey, Surface};
use crate::sim::collision::HitShape;
use crate::sim::player::Target;
use crate::sim::projectile::Projectile;
use crate::tuning::BulletTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GunAttack {
    /// Gun position (pen center at spawn)
    pub spawn_pos: Vec2,
    pub fire_delay: u32,
    pub fire_count: u32,
    pub shots_fired: u32,
    pub total_shots: u32,
    /// Current unit aim vector
    pub aim: Vec2,
    /// Mirrored when spawned right of the screen midline
    pub flip: bool,
    pub recoil_offset: f32,
    recoil_speed: f32,
    recoil_step: f32,
    recoil_max: f32,
    recoiling: bool,
    gun_img: ImageHandle,
    bullet_img: ImageHandle,
    bullet: BulletTuning,
    finished: bool,
}

impl GunAttack {
    pub fn new(ctx: &SpawnContext<'_>) -> Self {
        let tuning = &ctx.tuning.gun;
        Self {
            spawn_pos: ctx.pen,
            fire_delay: tuning.fire_delay,
            fire_count: 0,
            shots_fired: 0,
            total_shots: tuning.total_shots,
            aim: aim_direction(ctx.pen, ctx.player),
            flip: ctx.pen.x > ctx.arena.mid_x(),
            recoil_offset: 0.0,
            recoil_speed: tuning.recoil_step,
            recoil_step: tuning.recoil_step,
            recoil_max: tuning.recoil_max,
            recoiling: false,
            gun_img: ctx.assets.gun,
            bullet_img: ctx.assets.bullet,
            bullet: ctx.tuning.bullet.clone(),
            finished: false,
        }
    }

    /// Aim angle in degrees (clockwise from +x in screen space)
    pub fn aim_angle_deg(&self) -> f32 {
        angle_to(self.spawn_pos, self.spawn_pos + self.aim).to_degrees()
    }

    /// Where the gun sprite sits this tick (pushed back along the aim by recoil)
    pub fn draw_pos(&self) -> Vec2 {
        self.spawn_pos - self.aim * self.recoil_offset
    }

    /// Triangle wave in [0, recoil_max], stops once it returns to zero
    fn step_recoil(&mut self) {
        if !self.recoiling {
            return;
        }
        self.recoil_offset = (self.recoil_offset + self.recoil_speed).min(self.recoil_max);
        if self.recoil_offset >= self.recoil_max {
            self.recoil_speed = -self.recoil_step.abs();
        }
        if self.recoil_offset <= 0.0 {
            self.recoil_offset = 0.0;
            self.recoil_speed = self.recoil_step.abs();
            self.recoiling = false;
        }
    }

    fn fire(&mut self, now_ms: f64) -> Projectile {
        self.shots_fired += 1;
        self.recoiling = true;
        self.recoil_offset = 0.0;
        self.recoil_speed = self.recoil_step.abs();
        if self.shots_fired >= self.total_shots {
            self.finished = true;
        }
        Projectile::bullet(self.spawn_pos, self.aim, now_ms, &self.bullet_img, &self.bullet)
    }
}

impl AttackBehavior for GunAttack {
    fn update(&mut self, target: &mut dyn Target, now_ms: f64) -> Vec<Projectile> {
        if self.finished {
            return Vec::new();
        }

        // Track the live player
        self.aim = aim_direction(self.spawn_pos, target.position());
        self.step_recoil();

        self.fire_count += 1;
        if self.fire_count < self.fire_delay {
            return Vec::new();
        }
        self.fire_count = 0;
        vec![self.fire(now_ms)]
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.finished {
            return;
        }
        let key = SpriteKey::new(&self.gun_img)
            .flipped(self.flip)
            .rotated(self.aim_angle_deg());
        surface.sprite(&Sprite::new(key, self.gun_img.size, self.draw_pos()));
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn threats(&self) -> Vec<HitShape> {
        // Bullets in flight are tracked by the projectile pool; the gun itself never hits
        Vec::new()
    }
}
