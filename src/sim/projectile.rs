//! Projectiles spawned by attacks
//!
//! Projectiles are owned by the shared pool in `GameState` once spawned.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::HitShape;
use super::geometry::{Rect, rotated_bounds};
use super::player::Target;
use crate::assets::ImageHandle;
use crate::renderer::{Sprite, SpriteKey, Surface};
use crate::tuning::BulletTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Bullet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Assigned when the projectile joins the pool (0 before that)
    pub id: u32,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    /// Unit travel direction
    pub dir: Vec2,
    /// Pixels per second
    pub speed: f32,
    pub damage: i32,
    pub spawn_ms: f64,
    pub lifetime_ms: f64,
    /// Collision box size (bounds of the rotated sprite)
    pub size: Vec2,
    sprite: SpriteKey,
    sprite_size: Vec2,
    active: bool,
}

impl Projectile {
    /// A bullet whose sprite points up by default, turned to face `dir`
    pub fn bullet(origin: Vec2, dir: Vec2, now_ms: f64, image: &ImageHandle, tuning: &BulletTuning) -> Self {
        // Clockwise rotation that takes "up" (0, -1) onto dir
        let rotation = dir.x.atan2(-dir.y).to_degrees();
        Self {
            id: 0,
            kind: ProjectileKind::Bullet,
            pos: origin,
            dir,
            speed: tuning.speed,
            damage: tuning.damage,
            spawn_ms: now_ms,
            lifetime_ms: tuning.lifetime_ms,
            size: rotated_bounds(image.size, rotation),
            sprite: SpriteKey::new(image).rotated(rotation),
            sprite_size: image.size,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    pub fn hit_shape(&self) -> HitShape {
        HitShape::Rect(self.rect())
    }

    /// Whether the lifetime has run out at `now_ms`
    pub fn expired(&self, now_ms: f64) -> bool {
        now_ms - self.spawn_ms > self.lifetime_ms
    }

    /// Move, expire, then collide. Returns the damage dealt this tick, if any.
    pub fn update(&mut self, dt: f32, now_ms: f64, target: &mut dyn Target) -> Option<i32> {
        if !self.active {
            return None;
        }

        self.pos += self.dir * self.speed * dt;

        if self.expired(now_ms) {
            self.active = false;
            return None;
        }

        if self.hit_shape().hits(&target.rect()) {
            target.apply_damage(self.damage);
            self.active = false;
            return Some(self.damage);
        }

        None
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.active {
            return;
        }
        surface.sprite(&Sprite::new(self.sprite, self.sprite_size, self.pos));
    }
}
