//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::attack::{Attack, AttackBehavior, AttackKind, GrenadePhase};
use super::autopilot;
use super::player::Target;
use super::state::{GameEvent, GamePhase, GameState, HitSource};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal direction (-1 left, 0, 1 right)
    pub move_x: i8,
    /// Vertical direction (-1 up, 0, 1 down)
    pub move_y: i8,
    /// Pause toggle
    pub pause: bool,
    /// Switch between fullscreen and windowed
    pub toggle_fullscreen: bool,
    /// Host window was resized to this size
    pub resize: Option<(u32, u32)>,
    /// Demo mode - the autopilot steers the player
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Screen changes apply even while paused
    if input.toggle_fullscreen {
        let (w, h) = state.settings.toggle_fullscreen();
        state.resize(w, h);
    }
    if let Some((w, h)) = input.resize {
        state.resize(w, h);
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at tick {}", state.time_ticks);
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let now_ms = state.now_ms();

    // Player movement
    let (move_x, move_y) = if input.autopilot {
        autopilot::steer(state)
    } else {
        (input.move_x, input.move_y)
    };
    state.player.handle_input(move_x, move_y);
    state.player.clamp_to(&state.arena.play_area);

    // Pen roams, then spawns one attack per arrival
    state.pen.update();
    if state.pen.ready_to_attack() {
        let kind = AttackKind::random(&mut state.rng);
        state.spawn_attack(kind);
        state.pen.pick_new_target(&mut state.rng);
    }

    update_attacks(state, now_ms);
    update_projectiles(state, dt, now_ms);

    if !state.player.is_alive() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::PlayerDied {
            tick: state.time_ticks,
        });
        log::info!(
            "Game over at tick {} after {} attacks",
            state.time_ticks,
            state.attacks_spawned
        );
    }
}

/// Advance every attack in spawn order, then drop the finished ones
fn update_attacks(state: &mut GameState, now_ms: f64) {
    let mut spawned = Vec::new();

    for active in &mut state.attacks {
        let before = state.player.health();
        let was_detonated = detonation(&active.attack).is_some();
        spawned.extend(active.attack.update(&mut state.player, now_ms));

        if let (false, Some(at)) = (was_detonated, detonation(&active.attack)) {
            state.events.push(GameEvent::GrenadeExploded { id: active.id, at });
        }

        let dealt = before - state.player.health();
        if dealt > 0 {
            state.events.push(GameEvent::PlayerHit {
                source: HitSource::Attack(active.attack.kind()),
                damage: dealt,
            });
            log::debug!("Attack #{} hit player for {}", active.id, dealt);
        }
    }

    state.attacks.retain(|a| !a.attack.is_finished());
    state.adopt_projectiles(spawned);
}

/// Where a grenade went off, once it has
fn detonation(attack: &Attack) -> Option<Vec2> {
    match attack {
        Attack::Grenade(g) if matches!(g.phase, GrenadePhase::Exploding { .. } | GrenadePhase::Done) => {
            Some(g.target)
        }
        _ => None,
    }
}

/// Advance the projectile pool; the pool empties once the player is dead
fn update_projectiles(state: &mut GameState, dt: f32, now_ms: f64) {
    let player = &mut state.player;
    let events = &mut state.events;

    state.projectiles.retain_mut(|projectile| {
        if !player.is_alive() {
            return false;
        }
        if let Some(damage) = projectile.update(dt, now_ms, player) {
            log::debug!("Projectile #{} hit player for {}", projectile.id, damage);
            events.push(GameEvent::PlayerHit {
                source: HitSource::Projectile(projectile.kind),
                damage,
            });
        }
        projectile.is_active() && player.is_alive()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::DisplayMode;

    /// State whose pen never arrives, so only scripted attacks run
    fn quiet_state(seed: u64) -> GameState {
        let mut state = GameState::with_defaults(seed);
        state.pen.wait_time = u32::MAX;
        state
    }

    #[test]
    fn test_tick_advances_time() {
        let mut state = GameState::with_defaults(12345);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, 1);
        assert!((state.now_ms() - 1000.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::with_defaults(12345);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.time_ticks, 0);

        // Tick while paused - nothing should change
        let player_before = state.player.rect;
        let input = TickInput {
            move_x: 1,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.player.rect, player_before);
        assert_eq!(state.time_ticks, 0);

        // Unpause
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_player_stays_in_play_area() {
        let mut state = quiet_state(1);
        let left = TickInput {
            move_x: -1,
            move_y: -1,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &left, SIM_DT);
        }
        let area = state.arena.play_area;
        assert_eq!(state.player.rect.left(), area.left());
        assert_eq!(state.player.rect.top(), area.top());
    }

    #[test]
    fn test_pen_spawns_attacks() {
        let mut state = GameState::with_defaults(7);
        let mut spawned = 0;
        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            spawned += state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::AttackSpawned { .. }))
                .count();
        }
        assert!(spawned >= 2);
        assert_eq!(spawned as u32, state.attacks_spawned);
    }

    #[test]
    fn test_grenade_end_to_end() {
        let mut state = quiet_state(3);
        state.pen.pos = Vec2::new(600.0, 100.0);
        state.player.set_position(Vec2::new(600.0, 700.0));
        state.spawn_attack(AttackKind::Grenade);

        let mut landed_at = None;
        let mut hits = Vec::new();
        let mut exploded = Vec::new();
        for t in 1..=200u64 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            hits.extend(state.events.iter().copied().filter(|e| matches!(e, GameEvent::PlayerHit { .. })));
            for event in &state.events {
                if let GameEvent::GrenadeExploded { at, .. } = event {
                    exploded.push((t, *at));
                }
            }
            let flying = matches!(
                state.attacks.first().map(|a| &a.attack),
                Some(Attack::Grenade(g)) if matches!(g.phase, GrenadePhase::Flying)
            );
            if !flying && landed_at.is_none() {
                landed_at = Some(t);
            }
        }

        // 600 px at 8 px/tick
        assert_eq!(landed_at, Some(75));
        assert_eq!(exploded, vec![(81, Vec2::new(600.0, 700.0))]);
        assert_eq!(state.player.health(), 80);
        assert_eq!(
            hits,
            vec![GameEvent::PlayerHit {
                source: HitSource::Attack(AttackKind::Grenade),
                damage: 20
            }]
        );
        assert!(state.attacks.is_empty());
    }

    #[test]
    fn test_bullets_join_pool_and_hit() {
        let mut state = quiet_state(4);
        state.pen.pos = Vec2::new(600.0, 300.0);
        state.player.set_position(Vec2::new(600.0, 600.0));
        state.spawn_attack(AttackKind::Gun);

        let mut bullet_hits = 0;
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            bullet_hits += state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::PlayerHit { source: HitSource::Projectile(_), .. }))
                .count();
        }

        assert_eq!(bullet_hits, 3);
        assert_eq!(state.player.health(), 70);
        assert!(state.projectiles.is_empty());
        assert!(state.attacks.is_empty());
    }

    #[test]
    fn test_death_ends_game_and_clears_projectiles() {
        let mut state = quiet_state(5);
        state.pen.pos = Vec2::new(600.0, 300.0);
        state.player.set_position(Vec2::new(600.0, 600.0));
        state.player.apply_damage(95);
        state.spawn_attack(AttackKind::Gun);

        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.is_over() {
                break;
            }
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.health(), 0);
        assert!(state.projectiles.is_empty());
        assert!(state.events.contains(&GameEvent::PlayerDied { tick: state.time_ticks }));

        // Frozen afterwards
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_toggle_fullscreen_resizes_arena() {
        let mut state = GameState::with_defaults(6);
        let input = TickInput {
            toggle_fullscreen: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.settings.mode, DisplayMode::Fullscreen);
        assert_eq!(state.arena.screen, Vec2::new(1920.0, 1080.0));
        assert!(state.arena.play_area.contains_point(state.player.position()));
    }

    #[test]
    fn test_determinism() {
        let inputs: Vec<TickInput> = (0..900)
            .map(|i| TickInput {
                move_x: [(-1), 0, 1][i % 3],
                move_y: [1, 0, -1, 0][i % 4],
                ..Default::default()
            })
            .collect();

        let run = |seed: u64| {
            let mut state = GameState::with_defaults(seed);
            for input in &inputs {
                tick(&mut state, input, SIM_DT);
            }
            (state.snapshot(), state.player.rect, state.pen.pos)
        };

        assert_eq!(run(42), run(42));
    }
}
