//! Screen-space geometry for hitboxes and aiming
//!
//! Everything here uses screen coordinates: origin top-left, y grows downward.
//! Angles are radians unless a name says degrees.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on a point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            w: size.x,
            h: size.y,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Move so that the center lands on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Whether a point lies inside (edges inclusive)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Move this rect fully inside `area`.
    ///
    /// If the rect is larger than the area along an axis it is centered on that axis.
    pub fn clamp_into(&mut self, area: &Rect) {
        self.x = clamp_axis(self.x, self.w, area.x, area.w);
        self.y = clamp_axis(self.y, self.h, area.y, area.h);
    }
}

fn clamp_axis(pos: f32, len: f32, area_pos: f32, area_len: f32) -> f32 {
    if len >= area_len {
        area_pos + (area_len - len) / 2.0
    } else if pos < area_pos {
        area_pos
    } else if pos + len > area_pos + area_len {
        area_pos + area_len - len
    } else {
        pos
    }
}

/// Perpendicular distance from `point` to the infinite line through `line_point`
/// with direction angle `theta` (radians)
#[inline]
pub fn perpendicular_distance_to_line(point: Vec2, line_point: Vec2, theta: f32) -> f32 {
    let v = point - line_point;
    (v.x * theta.sin() - v.y * theta.cos()).abs()
}

/// Shortest distance from `point` to the segment `a`-`b`
pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-6 {
        // Degenerate segment
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Size of the axis-aligned bounding box of a `size` sprite rotated by `angle_deg`
pub fn rotated_bounds(size: Vec2, angle_deg: f32) -> Vec2 {
    let (s, c) = angle_deg.to_radians().sin_cos();
    let (s, c) = (s.abs(), c.abs());
    Vec2::new(size.x * c + size.y * s, size.x * s + size.y * c)
}
