//! Frame composition
//!
//! Draw order: background and play-area outline, pen, attacks, projectiles,
//! player, HUD.

use glam::Vec2;

use super::sprite::{Sprite, SpriteKey};
use super::surface::{Rgba, Surface, rgb};
use crate::sim::{AttackBehavior, GameState, Rect, Target};

const BACKGROUND: Rgba = rgb(210, 210, 200);
const PLAY_AREA_OUTLINE: Rgba = rgb(180, 180, 180);
const PLAY_AREA_OUTLINE_WIDTH: f32 = 5.0;

const HUD_TEXT_POS: Vec2 = Vec2::new(35.0, 30.0);
const HUD_TEXT_SIZE: f32 = 36.0;
const HUD_TEXT_COLOR: Rgba = rgb(255, 255, 255);
const HEALTH_BAR_POS: Vec2 = Vec2::new(35.0, 60.0);
const HEALTH_BAR_SIZE: Vec2 = Vec2::new(200.0, 25.0);
const HEALTH_BAR_FRAME: Rgba = rgb(50, 50, 50);
const HEALTH_BAR_INSET: f32 = 2.0;

/// Draw one complete frame of `state`
pub fn draw_frame(state: &GameState, surface: &mut dyn Surface) {
    surface.fill(BACKGROUND);
    surface.rect(state.arena.play_area, PLAY_AREA_OUTLINE, Some(PLAY_AREA_OUTLINE_WIDTH));

    let pen = &state.assets.pen;
    surface.sprite(&Sprite::new(SpriteKey::new(pen), pen.size, state.pen.pos.floor()));

    for active in &state.attacks {
        active.attack.draw(surface);
    }
    for projectile in &state.projectiles {
        projectile.draw(surface);
    }

    let player = &state.assets.player;
    surface.sprite(&Sprite::new(SpriteKey::new(player), player.size, state.player.position()));

    if state.settings.show_hud {
        let hp = state.player.health();
        let max = state.player.max_health();
        surface.text(&format!("HP: {}/{}", hp, max), HUD_TEXT_POS, HUD_TEXT_SIZE, HUD_TEXT_COLOR);
        draw_health_bar(surface, HEALTH_BAR_POS, state.player.health_ratio());
    }
}

/// Bar fill color by remaining fraction
fn health_color(ratio: f32) -> Rgba {
    if ratio > 0.6 {
        rgb(0, 200, 0)
    } else if ratio > 0.3 {
        rgb(255, 200, 0)
    } else {
        rgb(255, 0, 0)
    }
}

/// Frame plus a fill proportional to `ratio` (0-1)
pub fn draw_health_bar(surface: &mut dyn Surface, pos: Vec2, ratio: f32) {
    let ratio = ratio.clamp(0.0, 1.0);

    surface.rect(
        Rect::new(pos.x, pos.y, HEALTH_BAR_SIZE.x, HEALTH_BAR_SIZE.y),
        HEALTH_BAR_FRAME,
        None,
    );

    let inner_w = ((HEALTH_BAR_SIZE.x - 2.0 * HEALTH_BAR_INSET) * ratio).floor();
    if inner_w > 0.0 {
        surface.rect(
            Rect::new(
                pos.x + HEALTH_BAR_INSET,
                pos.y + HEALTH_BAR_INSET,
                inner_w,
                HEALTH_BAR_SIZE.y - 2.0 * HEALTH_BAR_INSET,
            ),
            health_color(ratio),
            None,
        );
    }
}
