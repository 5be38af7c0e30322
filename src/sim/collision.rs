//! Hit detection against the player
//!
//! Each attack resolves hits with its own geometric test:
//! - bullets: axis-aligned rect overlap with the player's rect
//! - grenade blasts: player center inside a circle (radius inclusive)
//! - sword slashes: player center within a band around an infinite line
//!
//! `HitShape::clearance` gives a signed distance (negative = inside) in the
//! spirit of an SDF, which the autopilot uses to rank threats.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, perpendicular_distance_to_line};

/// A region that damages the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitShape {
    /// Axis-aligned box, tested against the player's rect
    Rect(Rect),
    /// Disc, tested against the player's center
    Circle { center: Vec2, radius: f32 },
    /// Infinite line with a half-width, tested against the player's center
    Line { origin: Vec2, theta: f32, half_width: f32 },
}

impl HitShape {
    /// Whether this shape hits a player occupying `target`
    pub fn hits(&self, target: &Rect) -> bool {
        match *self {
            HitShape::Rect(rect) => rect.overlaps(target),
            HitShape::Circle { center, radius } => circle_contains(center, radius, target.center()),
            HitShape::Line {
                origin,
                theta,
                half_width,
            } => line_band_contains(origin, theta, half_width, target.center()),
        }
    }

    /// Signed distance from `point` to the shape boundary (negative inside)
    pub fn clearance(&self, point: Vec2) -> f32 {
        match *self {
            HitShape::Rect(rect) => sd_box(point, rect),
            HitShape::Circle { center, radius } => point.distance(center) - radius,
            HitShape::Line {
                origin,
                theta,
                half_width,
            } => perpendicular_distance_to_line(point, origin, theta) - half_width,
        }
    }
}

/// Euclidean containment, boundary inclusive
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    point.distance(center) <= radius
}

/// Perpendicular distance to the line is within `half_width` (inclusive)
#[inline]
pub fn line_band_contains(origin: Vec2, theta: f32, half_width: f32, point: Vec2) -> bool {
    perpendicular_distance_to_line(point, origin, theta) <= half_width
}

/// Signed distance to an axis-aligned box
fn sd_box(point: Vec2, rect: Rect) -> f32 {
    let half = rect.size() / 2.0;
    let d = (point - rect.center()).abs() - half;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(center: Vec2) -> Rect {
        Rect::from_center(center, Vec2::splat(25.0))
    }

    #[test]
    fn test_circle_boundary_inclusive() {
        let shape = HitShape::Circle {
            center: Vec2::ZERO,
            radius: 120.0,
        };
        assert!(shape.hits(&player_at(Vec2::new(120.0, 0.0))));
        assert!(!shape.hits(&player_at(Vec2::new(120.5, 0.0))));
    }

    #[test]
    fn test_line_band_threshold() {
        let shape = HitShape::Line {
            origin: Vec2::new(100.0, 100.0),
            theta: 0.0,
            half_width: 18.0,
        };
        assert!(shape.hits(&player_at(Vec2::new(900.0, 100.0))));
        assert!(shape.hits(&player_at(Vec2::new(0.0, 118.0))));
        assert!(!shape.hits(&player_at(Vec2::new(0.0, 119.0))));
    }

    #[test]
    fn test_rect_hit() {
        let shape = HitShape::Rect(Rect::new(0.0, 0.0, 20.0, 20.0));
        assert!(shape.hits(&Rect::new(15.0, 15.0, 25.0, 25.0)));
        assert!(!shape.hits(&Rect::new(20.0, 0.0, 25.0, 25.0)));
    }

    #[test]
    fn test_clearance_sign() {
        let circle = HitShape::Circle {
            center: Vec2::ZERO,
            radius: 10.0,
        };
        assert!(circle.clearance(Vec2::new(5.0, 0.0)) < 0.0);
        assert!((circle.clearance(Vec2::new(15.0, 0.0)) - 5.0).abs() < 1e-5);

        let rect = HitShape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(rect.clearance(Vec2::new(5.0, 5.0)) < 0.0);
        assert!((rect.clearance(Vec2::new(13.0, 5.0)) - 3.0).abs() < 1e-5);
    }
}
