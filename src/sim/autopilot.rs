//! Demo mode: steer the player away from whatever is about to hit it
//!
//! Every tick the nine possible moves are scored by how much room they leave
//! between the player and the nearest danger. Dangers are the attack threat
//! shapes plus the swept path of every bullet in flight.

use glam::Vec2;

use super::attack::AttackBehavior;
use super::collision::HitShape;
use super::geometry::{Rect, distance_to_segment};
use super::player::{Player, Target};
use super::state::GameState;
use crate::consts::SIM_DT;

/// How far ahead bullet paths are swept
const LOOKAHEAD_TICKS: f32 = 45.0;
/// Clearance beyond this counts as safe
const COMFORT: f32 = 150.0;
/// Pull toward the middle of the play area when nothing is near
const CENTER_PULL: f32 = 0.02;

/// Staying put first: ties keep the player still
const MOVES: [(i8, i8); 9] = [
    (0, 0),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

#[derive(Debug, Clone, Copy)]
enum Danger {
    Shape(HitShape),
    /// Capsule around a bullet's path
    Path { from: Vec2, to: Vec2, radius: f32 },
}

impl Danger {
    fn clearance(&self, point: Vec2) -> f32 {
        match *self {
            Danger::Shape(shape) => shape.clearance(point),
            Danger::Path { from, to, radius } => distance_to_segment(point, from, to) - radius,
        }
    }
}

fn dangers(state: &GameState) -> Vec<Danger> {
    let mut out: Vec<Danger> = state
        .attacks
        .iter()
        .flat_map(|a| a.attack.threats())
        .map(Danger::Shape)
        .collect();

    out.extend(state.projectiles.iter().filter(|p| p.is_active()).map(|p| Danger::Path {
        from: p.pos,
        to: p.pos + p.dir * p.speed * SIM_DT * LOOKAHEAD_TICKS,
        radius: p.size.max_element() / 2.0,
    }));
    out
}

/// Where the player's center ends up after one move
fn predict(player: &Player, play_area: &Rect, mx: i8, my: i8) -> Vec2 {
    let mut ghost = player.clone();
    ghost.handle_input(mx, my);
    ghost.clamp_to(play_area);
    ghost.position()
}

/// Pick this tick's (move_x, move_y)
pub fn steer(state: &GameState) -> (i8, i8) {
    let dangers = dangers(state);
    let home = state.arena.play_area.center();
    let half = state.player.rect.size().max_element() / 2.0;

    let mut best = (0, 0);
    let mut best_score = f32::NEG_INFINITY;

    for &(mx, my) in &MOVES {
        let at = predict(&state.player, &state.arena.play_area, mx, my);
        let room = dangers
            .iter()
            .map(|d| d.clearance(at) - half)
            .fold(COMFORT, f32::min);
        let score = room - CENTER_PULL * at.distance(home);

        if score > best_score {
            best_score = score;
            best = (mx, my);
        }
    }

    best
}
