//! Screen layout shared by every component
//!
//! Recomputed only when the host reports a new screen size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Screen size in pixels
    pub screen: Vec2,
    /// Where the player may move
    pub play_area: Rect,
    /// Where the pen picks its targets
    pub spawn_area: Rect,
}

impl Arena {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);

        let area_w = (w * PLAY_AREA_FRACTION).floor();
        let area_h = (h * PLAY_AREA_FRACTION).floor();
        let play_area = Rect::new(((w - area_w) / 2.0).floor(), h - area_h, area_w, area_h);

        let spawn_area = Rect::new(
            (w * SPAWN_AREA_X).floor(),
            (h * SPAWN_AREA_Y).floor(),
            (w * SPAWN_AREA_W).floor(),
            (h * SPAWN_AREA_H).floor(),
        );

        Self {
            screen: Vec2::new(w, h),
            play_area,
            spawn_area,
        }
    }

    /// Horizontal screen midline
    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.screen.x / 2.0
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(WINDOWED_WIDTH, WINDOWED_HEIGHT)
    }
}
