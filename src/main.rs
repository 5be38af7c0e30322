//! Unchecked headless runner
//!
//! Plays one seeded demo session on autopilot, drawing every frame into a
//! `DrawList`, and prints the final snapshot as JSON.
//!
//! Usage: `unchecked [seed] [tuning.json]`

use std::path::Path;

use unchecked::consts::{SIM_DT, TICK_RATE};
use unchecked::renderer::{DrawList, SpriteCache, draw_frame, instance_bytes, sprite_instances};
use unchecked::sim::{GameEvent, GameState, TickInput, tick};
use unchecked::{AssetBundle, AttackAssets, DisplayMode, Settings, Tuning};

const DEFAULT_SEED: u64 = 12345;
/// Two minutes of game time
const MAX_TICKS: u64 = TICK_RATE as u64 * 120;

fn main() {
    env_logger::init();
    log::info!("Unchecked (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(Path::new(&path)),
        None => Tuning::default(),
    };

    let assets = match AttackAssets::resolve(&AssetBundle::with_standard_sizes()) {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("Asset setup failed: {}", e);
            std::process::exit(1);
        }
    };

    let settings = Settings {
        mode: DisplayMode::Windowed,
        ..Settings::default()
    };
    let mut state = GameState::new(seed, settings, assets, tuning);

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut frame = DrawList::new();
    let mut variants = SpriteCache::new();
    let mut uploaded_bytes = 0usize;
    let mut hits_taken = 0u32;

    while state.time_ticks < MAX_TICKS {
        tick(&mut state, &input, SIM_DT);
        hits_taken += state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerHit { .. }))
            .count() as u32;

        frame.clear();
        draw_frame(&state, &mut frame);
        for sprite in frame.sprites() {
            variants.get_or_insert_with(sprite.key, |key| sprite.size * key.scale());
        }
        uploaded_bytes += instance_bytes(&sprite_instances(&frame)).len();

        if state.is_over() {
            break;
        }
    }

    let (cache_hits, cache_misses) = variants.stats();
    log::info!(
        "Run finished after {} ticks: {} attacks, {} hits taken, {} HP left",
        state.time_ticks,
        state.attacks_spawned,
        hits_taken,
        state.snapshot().health
    );
    log::info!(
        "Sprite variants: {} ({} hits, {} misses), {} instance bytes",
        variants.len(),
        cache_hits,
        cache_misses,
        uploaded_bytes
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
