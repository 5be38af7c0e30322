//! The player avatar and the capability attacks use to hurt it

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::geometry::Rect;
use crate::tuning::PlayerTuning;

/// Whatever attacks and projectiles aim at and damage
pub trait Target {
    /// Center point
    fn position(&self) -> Vec2;
    /// Collision rect
    fn rect(&self) -> Rect;
    fn health(&self) -> i32;
    /// Subtract health; never fails, result is clamped to [0, max]
    fn apply_damage(&mut self, amount: i32);
}

/// The player-controlled checkbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    health: i32,
    max_health: i32,
    /// Pixels per tick
    pub speed: f32,
}

impl Player {
    /// Spawn horizontally centered, `bottom_margin` above the screen bottom
    pub fn new(arena: &Arena, size: Vec2, tuning: &PlayerTuning) -> Self {
        let mut rect = Rect::new(0.0, 0.0, size.x, size.y);
        rect.x = (arena.screen.x / 2.0).floor() - (size.x / 2.0).floor();
        rect.y = arena.screen.y - tuning.bottom_margin - size.y;
        rect.clamp_into(&arena.play_area);

        Self {
            rect,
            health: tuning.max_health,
            max_health: tuning.max_health,
            speed: tuning.speed,
        }
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Fraction of health remaining (0-1)
    pub fn health_ratio(&self) -> f32 {
        self.health.clamp(0, self.max_health) as f32 / self.max_health as f32
    }

    /// Move by one tick of directional input (each axis -1, 0 or 1).
    ///
    /// Diagonals are normalized; each step is truncated to whole pixels.
    pub fn handle_input(&mut self, move_x: i8, move_y: i8) {
        if move_x == 0 && move_y == 0 {
            return;
        }
        let dir = Vec2::new(move_x.signum() as f32, move_y.signum() as f32).normalize();
        self.rect.x += (dir.x * self.speed).trunc();
        self.rect.y += (dir.y * self.speed).trunc();
    }

    pub fn clamp_to(&mut self, area: &Rect) {
        self.rect.clamp_into(area);
    }

    /// Keep the player inside the play area after a screen resize
    pub fn on_resize(&mut self, arena: &Arena) {
        self.clamp_to(&arena.play_area);
    }

    /// Teleport the center (tests and scripted scenes)
    pub fn set_position(&mut self, center: Vec2) {
        self.rect.set_center(center);
    }
}

impl Target for Player {
    fn position(&self) -> Vec2 {
        self.rect.center()
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn apply_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).clamp(0, self.max_health);
        log::debug!("Player hit for {}, HP {}/{}", amount, self.health, self.max_health);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&Arena::new(1200, 900), Vec2::splat(25.0), &PlayerTuning::default())
    }

    #[test]
    fn test_spawn_position() {
        let p = player();
        assert_eq!(p.rect.x, 600.0 - 12.0);
        assert_eq!(p.rect.bottom(), 850.0);
        assert_eq!(p.health(), 100);
        assert!(p.is_alive());
    }

    #[test]
    fn test_damage_clamps_and_kills() {
        let mut p = player();
        p.apply_damage(30);
        assert_eq!(p.health(), 70);
        p.apply_damage(500);
        assert_eq!(p.health(), 0);
        assert!(!p.is_alive());
        // Negative damage cannot exceed max health
        p.apply_damage(-1000);
        assert_eq!(p.health(), p.max_health());
    }

    #[test]
    fn test_diagonal_movement_truncates() {
        let mut p = player();
        let start = p.rect;
        p.handle_input(1, -1);
        assert_eq!(p.rect.x - start.x, 7.0);
        assert_eq!(p.rect.y - start.y, -7.0);

        p.handle_input(-1, 0);
        assert_eq!(p.rect.x - start.x, -3.0);
    }

    #[test]
    fn test_clamped_to_play_area() {
        let arena = Arena::new(1200, 900);
        let mut p = player();
        for _ in 0..200 {
            p.handle_input(1, 1);
            p.clamp_to(&arena.play_area);
        }
        assert_eq!(p.rect.right(), arena.play_area.right());
        assert_eq!(p.rect.bottom(), arena.play_area.bottom());
    }

    #[test]
    fn test_resize_reclamps() {
        let mut p = player();
        let small = Arena::new(600, 500);
        p.on_resize(&small);
        assert!(small.play_area.contains_point(p.position()));
    }
}
