//! Game state and core simulation types
//!
//! `GameState` owns every entity plus the context (arena, assets, tuning) the
//! entities are built from. Nothing outside it is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::attack::{Attack, AttackKind, SpawnContext};
use super::pen::Pen;
use super::player::{Player, Target};
use super::projectile::{Projectile, ProjectileKind};
use crate::assets::AttackAssets;
use crate::consts::MS_PER_TICK;
use crate::settings::{DisplayMode, Settings};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player ran out of health
    GameOver,
}

/// What dealt damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSource {
    Attack(AttackKind),
    Projectile(ProjectileKind),
}

/// Things that happened during the last tick (for audio/effects on the host)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AttackSpawned { id: u32, kind: AttackKind, at: Vec2 },
    PlayerHit { source: HitSource, damage: i32 },
    GrenadeExploded { id: u32, at: Vec2 },
    PlayerDied { tick: u64 },
}

/// An attack in the active list
#[derive(Debug, Clone)]
pub struct ActiveAttack {
    pub id: u32,
    pub attack: Attack,
}

/// Serializable summary for HUDs and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: u64,
    pub tick: u64,
    pub phase: GamePhase,
    pub health: i32,
    pub max_health: i32,
    pub attacks: usize,
    pub projectiles: usize,
    pub attacks_spawned: u32,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub arena: Arena,
    pub settings: Settings,
    pub assets: AttackAssets,
    pub tuning: Tuning,
    pub player: Player,
    pub pen: Pen,
    /// Active attacks in spawn order
    pub attacks: Vec<ActiveAttack>,
    /// Shared projectile pool in spawn order
    pub projectiles: Vec<Projectile>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub attacks_spawned: u32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, settings: Settings, assets: AttackAssets, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let (w, h) = settings.screen_size();
        let arena = Arena::new(w, h);
        let player = Player::new(&arena, assets.player.size, &tuning.player);
        let pen = Pen::new(arena.spawn_area, assets.pen.size, &tuning.pen, &mut rng);

        log::info!("New game: seed {}, screen {}x{}", seed, w, h);

        Self {
            seed,
            rng,
            time_ticks: 0,
            phase: GamePhase::Playing,
            arena,
            settings,
            assets,
            tuning,
            player,
            pen,
            attacks: Vec::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
            attacks_spawned: 0,
            next_id: 1,
        }
    }

    /// Windowed 1200x900 game with standard assets and default tuning
    pub fn with_defaults(seed: u64) -> Self {
        let settings = Settings {
            mode: DisplayMode::Windowed,
            ..Settings::default()
        };
        Self::new(seed, settings, AttackAssets::standard(), Tuning::default())
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Game time in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.time_ticks as f64 * MS_PER_TICK
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Lay the arena out for a new screen size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.arena = Arena::new(width, height);
        self.player.on_resize(&self.arena);
        self.pen.set_spawn_area(self.arena.spawn_area, &mut self.rng);
        log::info!("Resized to {}x{}", width, height);
    }

    /// Build an attack from the current pen and player positions
    pub fn spawn_attack(&mut self, kind: AttackKind) -> u32 {
        let ctx = SpawnContext {
            pen: self.pen.position(),
            player: self.player.position(),
            assets: &self.assets,
            arena: &self.arena,
            tuning: &self.tuning,
        };
        let attack = Attack::spawn(kind, &ctx, &mut self.rng);
        let at = ctx.pen;

        let id = self.next_entity_id();
        self.attacks.push(ActiveAttack { id, attack });
        self.attacks_spawned += 1;
        self.events.push(GameEvent::AttackSpawned { id, kind, at });
        log::info!("Attack #{} ({}) spawned at {:?}", id, kind.as_str(), at);
        id
    }

    /// Move newly spawned projectiles into the shared pool
    pub fn adopt_projectiles(&mut self, spawned: Vec<Projectile>) {
        for mut projectile in spawned {
            projectile.id = self.next_entity_id();
            self.projectiles.push(projectile);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            tick: self.time_ticks,
            phase: self.phase,
            health: self.player.health(),
            max_health: self.player.max_health(),
            attacks: self.attacks.len(),
            projectiles: self.projectiles.len(),
            attacks_spawned: self.attacks_spawned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::with_defaults(12345);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health(), 100);
        assert!(state.attacks.is_empty());
        assert!(state.arena.spawn_area.contains_point(state.pen.target.as_vec2()));
    }

    #[test]
    fn test_spawn_attack_assigns_ids() {
        let mut state = GameState::with_defaults(1);
        let a = state.spawn_attack(AttackKind::Gun);
        let b = state.spawn_attack(AttackKind::Sword);
        assert!(b > a);
        assert_eq!(state.attacks.len(), 2);
        assert_eq!(state.attacks[1].attack.kind(), AttackKind::Sword);
        assert_eq!(state.attacks_spawned, 2);
    }

    #[test]
    fn test_resize_keeps_player_in_area() {
        let mut state = GameState::with_defaults(1);
        state.resize(640, 480);
        assert!(state.arena.play_area.contains_point(state.player.position()));
        assert!(state.arena.spawn_area.contains_point(state.pen.target.as_vec2()));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::with_defaults(9);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state.snapshot());
    }
}
