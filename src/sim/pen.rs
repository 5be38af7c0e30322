//! The pen: roams the spawn area and signals when an attack should start
//!
//! MOVING -> (arrive) -> DWELLING -> READY (consumed by `ready_to_attack`)

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::PenTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pen {
    pub pos: Vec2,
    pub target: IVec2,
    pub size: Vec2,
    /// Pixels per tick
    pub speed: f32,
    /// Dwell ticks remaining
    pub wait_time: u32,
    dwell_ticks: u32,
    /// Arrived at the target and waiting to fire
    drawing: bool,
    spawn_area: Rect,
}

impl Pen {
    /// Start centered in the spawn area with a random first target
    pub fn new(spawn_area: Rect, size: Vec2, tuning: &PenTuning, rng: &mut impl Rng) -> Self {
        let mut pen = Self {
            pos: spawn_area.center().floor(),
            target: IVec2::ZERO,
            size,
            speed: tuning.speed,
            wait_time: 0,
            dwell_ticks: tuning.dwell_ticks,
            drawing: false,
            spawn_area,
        };
        pen.pick_new_target(rng);
        pen
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Pick a uniformly random integer point inside the spawn area (edges inclusive)
    pub fn pick_new_target(&mut self, rng: &mut impl Rng) {
        let a = self.spawn_area;
        self.target = IVec2::new(
            rng.random_range(a.left() as i32..=a.right() as i32),
            rng.random_range(a.top() as i32..=a.bottom() as i32),
        );
    }

    /// Change the spawn area (screen resize); re-targets if the old target left it
    pub fn set_spawn_area(&mut self, spawn_area: Rect, rng: &mut impl Rng) {
        self.spawn_area = spawn_area;
        if !spawn_area.contains_point(self.target.as_vec2()) {
            self.pick_new_target(rng);
        }
    }

    pub fn update(&mut self) {
        if self.wait_time > 0 {
            self.wait_time -= 1;
            return;
        }

        let target = self.target.as_vec2();
        let delta = target - self.pos;
        let dist = delta.length();
        if dist > self.speed {
            self.pos += delta / dist * self.speed;
        } else {
            // Arrived: hold still and get ready to attack
            self.pos = target;
            self.drawing = true;
            self.wait_time = self.dwell_ticks;
        }
    }

    /// True exactly once per arrival, after the dwell has run out
    pub fn ready_to_attack(&mut self) -> bool {
        if self.drawing && self.wait_time == 0 {
            self.drawing = false;
            return true;
        }
        false
    }

    pub fn is_dwelling(&self) -> bool {
        self.drawing
    }
}
